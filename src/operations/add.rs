use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::info;

use crate::db::repository;
use crate::error::AppError;
use crate::models::transaction::{Transaction, TransactionType};

const MAX_DESCRIPTION_LEN: usize = 255;
const MAX_LABEL_LEN: usize = 50;

/// Raw form-like input for the add operation, validated before any mutation.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub date: String,
    pub description: Option<String>,
    pub amount: String,
    pub category: String,
    pub payment_mode: String,
    pub transaction_type: String,
}

pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::invalid_input(format!("invalid date '{}'. Use YYYY-MM-DD", value))
    })
}

pub fn parse_amount(value: &str) -> Result<Decimal, AppError> {
    let amount = Decimal::from_str(value).map_err(|_| {
        AppError::invalid_input(format!("invalid amount '{}'. Must be a decimal number", value))
    })?;
    if amount <= Decimal::ZERO {
        return Err(AppError::invalid_input(format!(
            "invalid amount '{}'. Must be greater than zero",
            value
        )));
    }
    Ok(amount)
}

pub fn validate_label(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input(format!("{} cannot be empty", field)));
    }
    if trimmed.len() > MAX_LABEL_LEN {
        return Err(AppError::invalid_input(format!(
            "{} too long (max {} characters)",
            field, MAX_LABEL_LEN
        )));
    }
    Ok(trimmed.to_string())
}

/// Blank descriptions are stored as absent, not as an empty string.
pub fn validate_description(value: Option<&str>) -> Result<Option<String>, AppError> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if trimmed.len() > MAX_DESCRIPTION_LEN {
                return Err(AppError::invalid_input(format!(
                    "description too long (max {} characters)",
                    MAX_DESCRIPTION_LEN
                )));
            }
            Ok(Some(trimmed.to_string()))
        }
    }
}

pub fn create_transaction(input: &TransactionInput) -> Result<Transaction, AppError> {
    let date = parse_date(&input.date)?;
    let amount = parse_amount(&input.amount)?;
    let transaction_type = TransactionType::from_str(&input.transaction_type)?;
    let category = validate_label(&input.category, "category")?;
    let payment_mode = validate_label(&input.payment_mode, "payment mode")?;
    let description = validate_description(input.description.as_deref())?;

    Ok(Transaction::new(
        date,
        description,
        amount,
        transaction_type,
        category,
        payment_mode,
    ))
}

pub fn add_transaction_to_db(
    conn: &Connection,
    input: &TransactionInput,
) -> Result<Transaction, AppError> {
    let transaction = create_transaction(input)?;
    repository::add_transaction(conn, &transaction)?;
    info!(id = %transaction.id, "transaction added");
    Ok(transaction)
}
