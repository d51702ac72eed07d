use rusqlite::Connection;
use tracing::info;

use crate::db::repository;
use crate::error::AppError;

pub fn remove_transaction_from_db(conn: &Connection, id: &str) -> Result<(), AppError> {
    repository::delete_transaction(conn, id)?;
    info!(id = %id, "transaction removed");
    Ok(())
}
