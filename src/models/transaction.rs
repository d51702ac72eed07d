use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Value stored in the `transaction_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(AppError::invalid_input(format!(
                "invalid transaction type '{}'. Use 'income' or 'expense'",
                other
            ))),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
    pub payment_mode: String,
    pub transaction_type: TransactionType,
    /// Set once at insertion, only used for "recent transactions" ordering.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: Option<String>,
        amount: Decimal,
        transaction_type: TransactionType,
        category: String,
        payment_mode: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description,
            amount,
            date,
            category,
            payment_mode,
            transaction_type,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_round_trip() {
        assert_eq!("income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!("EXPENSE".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert_eq!(TransactionType::Income.as_str(), "income");
    }

    #[test]
    fn test_transaction_type_invalid() {
        let result = "transfer".parse::<TransactionType>();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid transaction type"));
    }

    #[test]
    fn test_new_assigns_unique_ids() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let a = Transaction::new(
            date,
            None,
            Decimal::new(100, 0),
            TransactionType::Expense,
            "Food".to_string(),
            "Cash".to_string(),
        );
        let b = Transaction::new(
            date,
            None,
            Decimal::new(100, 0),
            TransactionType::Expense,
            "Food".to_string(),
            "Cash".to_string(),
        );
        assert_ne!(a.id, b.id);
    }
}
