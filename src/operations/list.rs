use rusqlite::Connection;
use std::str::FromStr;

use crate::db::repository::{self, TransactionFilter};
use crate::error::AppError;
use crate::models::transaction::{Transaction, TransactionType};
use crate::operations::add::parse_date;

/// Raw filter strings as they arrive from the CLI.
#[derive(Debug, Clone, Default)]
pub struct FilterArgs {
    pub from: Option<String>,
    pub to: Option<String>,
    pub category: Option<String>,
    pub payment_mode: Option<String>,
    pub transaction_type: Option<String>,
}

pub fn parse_filter(args: &FilterArgs) -> Result<TransactionFilter, AppError> {
    Ok(TransactionFilter {
        from: args.from.as_deref().map(parse_date).transpose()?,
        to: args.to.as_deref().map(parse_date).transpose()?,
        category: args.category.clone(),
        payment_mode: args.payment_mode.clone(),
        transaction_type: args
            .transaction_type
            .as_deref()
            .map(TransactionType::from_str)
            .transpose()?,
    })
}

pub fn list_transactions(conn: &Connection, args: &FilterArgs) -> Result<Vec<Transaction>, AppError> {
    let filter = parse_filter(args)?;
    repository::find_transactions(conn, &filter)
}
