use rusqlite::Connection;
use std::str::FromStr;
use tracing::info;

use crate::db::repository;
use crate::error::AppError;
use crate::models::transaction::{Transaction, TransactionType};
use crate::operations::add::{
    parse_amount, parse_date, validate_description, validate_label,
};

/// Partial update: only supplied fields are overwritten, the rest keep their
/// stored values. `id` and `created_at` are never editable.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub date: Option<String>,
    pub description: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    pub payment_mode: Option<String>,
    pub transaction_type: Option<String>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.payment_mode.is_none()
            && self.transaction_type.is_none()
    }
}

pub fn edit_transaction_in_db(
    conn: &Connection,
    id: &str,
    patch: &TransactionPatch,
) -> Result<Transaction, AppError> {
    if patch.is_empty() {
        return Err(AppError::invalid_input("no fields to edit"));
    }

    let mut transaction = repository::get_transaction(conn, id)?;
    apply_patch(&mut transaction, patch)?;
    repository::update_transaction(conn, &transaction)?;
    info!(id = %transaction.id, "transaction edited");
    Ok(transaction)
}

fn apply_patch(transaction: &mut Transaction, patch: &TransactionPatch) -> Result<(), AppError> {
    if let Some(date) = &patch.date {
        transaction.date = parse_date(date)?;
    }
    if let Some(amount) = &patch.amount {
        transaction.amount = parse_amount(amount)?;
    }
    if let Some(transaction_type) = &patch.transaction_type {
        transaction.transaction_type = TransactionType::from_str(transaction_type)?;
    }
    if let Some(category) = &patch.category {
        transaction.category = validate_label(category, "category")?;
    }
    if let Some(payment_mode) = &patch.payment_mode {
        transaction.payment_mode = validate_label(payment_mode, "payment mode")?;
    }
    if let Some(description) = &patch.description {
        transaction.description = validate_description(Some(description))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;
    use crate::db::repository::get_transaction;
    use crate::operations::add::{TransactionInput, add_transaction_to_db};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn seeded(conn: &Connection) -> Transaction {
        add_transaction_to_db(
            conn,
            &TransactionInput {
                date: "2024-01-01".to_string(),
                description: Some("Groceries".to_string()),
                amount: "42.50".to_string(),
                category: "Food".to_string(),
                payment_mode: "Card".to_string(),
                transaction_type: "expense".to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_edit_changes_only_submitted_fields() {
        let conn = establish_test_connection().unwrap();
        let original = seeded(&conn);

        let patch = TransactionPatch {
            amount: Some("99.99".to_string()),
            category: Some("Travel".to_string()),
            ..Default::default()
        };
        let edited = edit_transaction_in_db(&conn, &original.id, &patch).unwrap();

        assert_eq!(edited.amount, Decimal::new(9999, 2));
        assert_eq!(edited.category, "Travel");
        // unedited fields retain prior values
        assert_eq!(edited.date, original.date);
        assert_eq!(edited.description, original.description);
        assert_eq!(edited.payment_mode, original.payment_mode);
        assert_eq!(edited.transaction_type, original.transaction_type);

        let stored = get_transaction(&conn, &original.id).unwrap();
        assert_eq!(stored.category, "Travel");
        assert_eq!(stored.created_at, original.created_at);
    }

    #[test]
    fn test_edit_date_and_type() {
        let conn = establish_test_connection().unwrap();
        let original = seeded(&conn);

        let patch = TransactionPatch {
            date: Some("2024-02-15".to_string()),
            transaction_type: Some("income".to_string()),
            ..Default::default()
        };
        let edited = edit_transaction_in_db(&conn, &original.id, &patch).unwrap();
        assert_eq!(edited.date, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        assert_eq!(edited.transaction_type, TransactionType::Income);
    }

    #[test]
    fn test_edit_unknown_id_is_not_found() {
        let conn = establish_test_connection().unwrap();
        let patch = TransactionPatch {
            amount: Some("10".to_string()),
            ..Default::default()
        };
        let result = edit_transaction_in_db(&conn, "missing-id", &patch);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_edit_invalid_value_leaves_row_untouched() {
        let conn = establish_test_connection().unwrap();
        let original = seeded(&conn);

        let patch = TransactionPatch {
            amount: Some("-1".to_string()),
            ..Default::default()
        };
        let result = edit_transaction_in_db(&conn, &original.id, &patch);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));

        let stored = get_transaction(&conn, &original.id).unwrap();
        assert_eq!(stored.amount, original.amount);
    }

    #[test]
    fn test_edit_with_no_fields_rejected() {
        let conn = establish_test_connection().unwrap();
        let original = seeded(&conn);
        let result = edit_transaction_in_db(&conn, &original.id, &TransactionPatch::default());
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_edit_blank_description_clears_it() {
        let conn = establish_test_connection().unwrap();
        let original = seeded(&conn);

        let patch = TransactionPatch {
            description: Some("".to_string()),
            ..Default::default()
        };
        let edited = edit_transaction_in_db(&conn, &original.id, &patch).unwrap();
        assert_eq!(edited.description, None);
    }
}
