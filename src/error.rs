use thiserror::Error;

/// Errors surfaced by store operations and validation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected before any mutation (bad date, bad amount, missing field).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An edit, delete or lookup referenced an id that does not exist.
    #[error("transaction '{0}' not found")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }
}
