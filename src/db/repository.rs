use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, Row, params, params_from_iter};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::AppError;
use crate::models::transaction::{Transaction, TransactionType};

const COLUMNS: &str = "id, description, amount, date, category, payment_mode, transaction_type, created_at";

/// Conjunction of optional constraints; an absent field means "no constraint".
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category: Option<String>,
    pub payment_mode: Option<String>,
    pub transaction_type: Option<TransactionType>,
}

fn map_row(row: &Row) -> rusqlite::Result<Transaction> {
    let amount_str: String = row.get(2)?;
    let date_str: String = row.get(3)?;
    let type_str: String = row.get(6)?;
    let created_at_str: String = row.get(7)?;

    Ok(Transaction {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: Decimal::from_str(&amount_str)
            .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
        category: row.get(4)?,
        payment_mode: row.get(5)?,
        transaction_type: TransactionType::from_str(&type_str)
            .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
    })
}

pub fn add_transaction(conn: &Connection, transaction: &Transaction) -> Result<(), AppError> {
    conn.execute(
        "INSERT INTO transactions (id, description, amount, date, category, payment_mode, transaction_type, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            &transaction.id,
            &transaction.description,
            transaction.amount.to_string(),
            transaction.date.to_string(),
            &transaction.category,
            &transaction.payment_mode,
            transaction.transaction_type.as_str(),
            transaction.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn get_transaction(conn: &Connection, id: &str) -> Result<Transaction, AppError> {
    let sql = format!("SELECT {} FROM transactions WHERE id = ?1", COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    match stmt.query_row([id], map_row) {
        Ok(transaction) => Ok(transaction),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(AppError::NotFound(id.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// Overwrites every field except `id` and `created_at`.
pub fn update_transaction(conn: &Connection, transaction: &Transaction) -> Result<(), AppError> {
    let rows_affected = conn.execute(
        "UPDATE transactions \
         SET description = ?1, amount = ?2, date = ?3, category = ?4, payment_mode = ?5, transaction_type = ?6 \
         WHERE id = ?7",
        params![
            &transaction.description,
            transaction.amount.to_string(),
            transaction.date.to_string(),
            &transaction.category,
            &transaction.payment_mode,
            transaction.transaction_type.as_str(),
            &transaction.id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(AppError::NotFound(transaction.id.clone()));
    }
    Ok(())
}

pub fn delete_transaction(conn: &Connection, id: &str) -> Result<(), AppError> {
    let rows_affected = conn.execute("DELETE FROM transactions WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(AppError::NotFound(id.to_string()));
    }
    Ok(())
}

/// Transactions matching the filter, newest date first.
pub fn find_transactions(
    conn: &Connection,
    filter: &TransactionFilter,
) -> Result<Vec<Transaction>, AppError> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<String> = Vec::new();

    if let Some(from) = filter.from {
        clauses.push("date >= ?");
        values.push(from.to_string());
    }
    if let Some(to) = filter.to {
        clauses.push("date <= ?");
        values.push(to.to_string());
    }
    if let Some(category) = &filter.category {
        clauses.push("category = ?");
        values.push(category.clone());
    }
    if let Some(payment_mode) = &filter.payment_mode {
        clauses.push("payment_mode = ?");
        values.push(payment_mode.clone());
    }
    if let Some(transaction_type) = filter.transaction_type {
        clauses.push("transaction_type = ?");
        values.push(transaction_type.as_str().to_string());
    }

    let mut sql = format!("SELECT {} FROM transactions", COLUMNS);
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY date DESC");

    let mut stmt = conn.prepare(&sql)?;
    let iter = stmt.query_map(params_from_iter(values), map_row)?;

    let mut transactions = Vec::new();
    for transaction in iter {
        transactions.push(transaction?);
    }
    Ok(transactions)
}

/// The five most recently inserted transactions, newest insertion first.
pub fn recent_transactions(conn: &Connection) -> Result<Vec<Transaction>, AppError> {
    let sql = format!(
        "SELECT {} FROM transactions ORDER BY created_at DESC LIMIT 5",
        COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let iter = stmt.query_map([], map_row)?;

    let mut transactions = Vec::new();
    for transaction in iter {
        transactions.push(transaction?);
    }
    Ok(transactions)
}
