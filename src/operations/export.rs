use rusqlite::Connection;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::db::repository::{self, TransactionFilter};
use crate::error::AppError;

/// Column order is part of the export contract; do not reorder.
const HEADER: [&str; 6] = ["Date", "Description", "Category", "Amount", "Type", "Payment Mode"];

/// Writes all transactions as CSV, newest date first. A missing description
/// becomes an empty field, not a "None" literal.
pub fn export_transactions<W: Write>(conn: &Connection, writer: W) -> Result<usize, AppError> {
    let transactions = repository::find_transactions(conn, &TransactionFilter::default())?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for transaction in &transactions {
        csv_writer.write_record([
            transaction.date.to_string().as_str(),
            transaction.description.as_deref().unwrap_or(""),
            transaction.category.as_str(),
            transaction.amount.to_string().as_str(),
            transaction.transaction_type.as_str(),
            transaction.payment_mode.as_str(),
        ])?;
    }
    csv_writer.flush()?;

    Ok(transactions.len())
}

pub fn export_to_file(conn: &Connection, path: &Path) -> Result<usize, AppError> {
    let file = File::create(path)?;
    let count = export_transactions(conn, file)?;
    info!(path = %path.display(), count, "transactions exported");
    Ok(count)
}
