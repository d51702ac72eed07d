//! Aggregation over a snapshot of transactions.
//!
//! Every function here is a pure fold over a `&[Transaction]` slice; range
//! and filter scoping happens in the repository before the slice is built.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::summary::{MonthlyBalance, TopCategory};
use crate::models::transaction::{Transaction, TransactionType};

pub fn sum_by_type(transactions: &[Transaction], transaction_type: TransactionType) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.transaction_type == transaction_type)
        .fold(Decimal::ZERO, |acc, t| acc + t.amount)
}

pub fn sum_by_type_on_date(
    transactions: &[Transaction],
    transaction_type: TransactionType,
    date: NaiveDate,
) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.transaction_type == transaction_type && t.date == date)
        .fold(Decimal::ZERO, |acc, t| acc + t.amount)
}

pub fn max_amount(transactions: &[Transaction], transaction_type: TransactionType) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.transaction_type == transaction_type)
        .map(|t| t.amount)
        .fold(Decimal::ZERO, Decimal::max)
}

pub fn count_by_type(transactions: &[Transaction], transaction_type: TransactionType) -> usize {
    transactions
        .iter()
        .filter(|t| t.transaction_type == transaction_type)
        .count()
}

/// Groups amounts by a string key, keeping first-encounter order so ties in
/// `top_category` resolve to the earliest group.
fn sum_by_key<F>(
    transactions: &[Transaction],
    transaction_type: TransactionType,
    key: F,
) -> Vec<(String, Decimal)>
where
    F: Fn(&Transaction) -> String,
{
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for transaction in transactions {
        if transaction.transaction_type != transaction_type {
            continue;
        }
        let k = key(transaction);
        match totals.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, total)) => *total += transaction.amount,
            None => totals.push((k, transaction.amount)),
        }
    }
    totals
}

/// Only categories with at least one matching transaction appear.
pub fn totals_by_category(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> Vec<(String, Decimal)> {
    sum_by_key(transactions, transaction_type, |t| t.category.clone())
}

pub fn totals_by_payment_mode(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> Vec<(String, Decimal)> {
    sum_by_key(transactions, transaction_type, |t| t.payment_mode.clone())
}

/// Daily totals in ascending date order.
pub fn totals_by_date(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> Vec<(NaiveDate, Decimal)> {
    let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for transaction in transactions {
        if transaction.transaction_type != transaction_type {
            continue;
        }
        *totals.entry(transaction.date).or_insert(Decimal::ZERO) += transaction.amount;
    }
    totals.into_iter().collect()
}

/// Monthly totals keyed by `YYYY-MM`, ascending by label.
pub fn totals_by_month(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> Vec<(String, Decimal)> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for transaction in transactions {
        if transaction.transaction_type != transaction_type {
            continue;
        }
        let month = transaction.date.format("%Y-%m").to_string();
        *totals.entry(month).or_insert(Decimal::ZERO) += transaction.amount;
    }
    totals.into_iter().collect()
}

/// The category with the largest summed amount, or `None` when the slice has
/// no matching transactions. Ties keep the first-encountered category.
pub fn top_category(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> Option<TopCategory> {
    let total = sum_by_type(transactions, transaction_type);
    if total <= Decimal::ZERO {
        return None;
    }

    let totals = totals_by_category(transactions, transaction_type);
    let (category, amount) = totals
        .into_iter()
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })?;

    let percent = (amount / total * Decimal::ONE_HUNDRED).round_dp(2);
    Some(TopCategory {
        category,
        amount,
        percent,
    })
}

/// Income, expense and balance per month in a single pass. Months with only
/// one side present report 0 for the other.
pub fn monthly_balance(transactions: &[Transaction]) -> Vec<MonthlyBalance> {
    let mut totals: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for transaction in transactions {
        let month = transaction.date.format("%Y-%m").to_string();
        let entry = totals.entry(month).or_insert((Decimal::ZERO, Decimal::ZERO));
        match transaction.transaction_type {
            TransactionType::Income => entry.0 += transaction.amount,
            TransactionType::Expense => entry.1 += transaction.amount,
        }
    }

    totals
        .into_iter()
        .map(|(month, (income, expense))| MonthlyBalance {
            month,
            income,
            expense,
            balance: income - expense,
        })
        .collect()
}

/// `total` spread over the inclusive day count of `[from, to]`, rounded to
/// 2 decimal places. 0 when the range is inverted or empty.
pub fn average_daily(total: Decimal, from: NaiveDate, to: NaiveDate) -> Decimal {
    let days = (to - from).num_days() + 1;
    if days <= 0 {
        return Decimal::ZERO;
    }
    (total / Decimal::from(days)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;
    use uuid::Uuid;

    fn tx(date: &str, amount: &str, transaction_type: TransactionType, category: &str) -> Transaction {
        Transaction {
            id: Uuid::new_v4().to_string(),
            description: None,
            amount: Decimal::from_str(amount).unwrap(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            category: category.to_string(),
            payment_mode: "Cash".to_string(),
            transaction_type,
            created_at: Utc::now(),
        }
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            tx("2024-01-01", "100", TransactionType::Expense, "Food"),
            tx("2024-01-01", "500", TransactionType::Income, "Salary"),
            tx("2024-01-02", "50", TransactionType::Expense, "Food"),
        ]
    }

    #[test]
    fn test_sum_by_type() {
        let transactions = sample_transactions();
        assert_eq!(sum_by_type(&transactions, TransactionType::Expense), Decimal::new(150, 0));
        assert_eq!(sum_by_type(&transactions, TransactionType::Income), Decimal::new(500, 0));
    }

    #[test]
    fn test_sum_by_type_empty_is_zero() {
        assert_eq!(sum_by_type(&[], TransactionType::Expense), Decimal::ZERO);
    }

    #[test]
    fn test_sum_by_type_on_date() {
        let transactions = sample_transactions();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            sum_by_type_on_date(&transactions, TransactionType::Expense, date),
            Decimal::new(100, 0)
        );
        let other = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(
            sum_by_type_on_date(&transactions, TransactionType::Expense, other),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_totals_by_category_sums_to_type_total() {
        let transactions = vec![
            tx("2024-01-01", "100", TransactionType::Expense, "Food"),
            tx("2024-01-02", "30", TransactionType::Expense, "Travel"),
            tx("2024-01-03", "20", TransactionType::Expense, "Food"),
        ];
        let totals = totals_by_category(&transactions, TransactionType::Expense);
        assert_eq!(
            totals,
            vec![
                ("Food".to_string(), Decimal::new(120, 0)),
                ("Travel".to_string(), Decimal::new(30, 0)),
            ]
        );

        let grouped_total: Decimal = totals.iter().map(|(_, v)| *v).sum();
        assert_eq!(grouped_total, sum_by_type(&transactions, TransactionType::Expense));
    }

    #[test]
    fn test_totals_by_category_excludes_other_type() {
        let transactions = sample_transactions();
        let totals = totals_by_category(&transactions, TransactionType::Expense);
        assert!(totals.iter().all(|(category, _)| category != "Salary"));
    }

    #[test]
    fn test_totals_by_date_ascending() {
        let transactions = vec![
            tx("2024-01-03", "10", TransactionType::Expense, "Food"),
            tx("2024-01-01", "20", TransactionType::Expense, "Food"),
            tx("2024-01-01", "30", TransactionType::Expense, "Travel"),
        ];
        let totals = totals_by_date(&transactions, TransactionType::Expense);
        assert_eq!(
            totals,
            vec![
                (NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), Decimal::new(50, 0)),
                (NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), Decimal::new(10, 0)),
            ]
        );
    }

    #[test]
    fn test_totals_by_month_labels_and_order() {
        let transactions = vec![
            tx("2024-02-10", "10", TransactionType::Income, "Salary"),
            tx("2024-01-15", "20", TransactionType::Income, "Salary"),
            tx("2024-01-20", "5", TransactionType::Income, "Bonus"),
        ];
        let totals = totals_by_month(&transactions, TransactionType::Income);
        assert_eq!(
            totals,
            vec![
                ("2024-01".to_string(), Decimal::new(25, 0)),
                ("2024-02".to_string(), Decimal::new(10, 0)),
            ]
        );
    }

    #[test]
    fn test_top_category_sample_transactions() {
        let transactions = sample_transactions();
        let top = top_category(&transactions, TransactionType::Expense).unwrap();
        assert_eq!(top.category, "Food");
        assert_eq!(top.amount, Decimal::new(150, 0));
        assert_eq!(top.percent, Decimal::new(10000, 2));
    }

    #[test]
    fn test_top_category_percent_rounded() {
        let transactions = vec![
            tx("2024-01-01", "1", TransactionType::Expense, "A"),
            tx("2024-01-01", "2", TransactionType::Expense, "B"),
        ];
        let top = top_category(&transactions, TransactionType::Expense).unwrap();
        assert_eq!(top.category, "B");
        // 2/3 of the total, rounded to 2 decimal places
        assert_eq!(top.percent, Decimal::from_str("66.67").unwrap());
    }

    #[test]
    fn test_top_category_tie_keeps_first_encountered() {
        let transactions = vec![
            tx("2024-01-01", "50", TransactionType::Expense, "Travel"),
            tx("2024-01-02", "50", TransactionType::Expense, "Food"),
        ];
        let top = top_category(&transactions, TransactionType::Expense).unwrap();
        assert_eq!(top.category, "Travel");
    }

    #[test]
    fn test_top_category_none_when_empty() {
        assert!(top_category(&[], TransactionType::Expense).is_none());

        let income_only = vec![tx("2024-01-01", "100", TransactionType::Income, "Salary")];
        assert!(top_category(&income_only, TransactionType::Expense).is_none());
    }

    #[test]
    fn test_monthly_balance_zero_fills_missing_side() {
        let transactions = vec![
            tx("2024-01-05", "500", TransactionType::Income, "Salary"),
            tx("2024-01-10", "200", TransactionType::Expense, "Rent"),
            tx("2024-02-01", "80", TransactionType::Expense, "Food"),
        ];
        let rows = monthly_balance(&transactions);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].month, "2024-01");
        assert_eq!(rows[0].income, Decimal::new(500, 0));
        assert_eq!(rows[0].expense, Decimal::new(200, 0));
        assert_eq!(rows[0].balance, Decimal::new(300, 0));

        assert_eq!(rows[1].month, "2024-02");
        assert_eq!(rows[1].income, Decimal::ZERO);
        assert_eq!(rows[1].expense, Decimal::new(80, 0));
        assert_eq!(rows[1].balance, Decimal::new(-80, 0));
    }

    #[test]
    fn test_average_daily_sample_transactions() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let avg = average_daily(Decimal::new(150, 0), from, to);
        assert_eq!(avg, Decimal::new(7500, 2));
    }

    #[test]
    fn test_average_daily_single_day() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(average_daily(Decimal::new(99, 0), day, day), Decimal::new(9900, 2));
    }

    #[test]
    fn test_average_daily_inverted_range_is_zero() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(average_daily(Decimal::new(150, 0), from, to), Decimal::ZERO);
    }

    #[test]
    fn test_max_amount() {
        let transactions = sample_transactions();
        assert_eq!(max_amount(&transactions, TransactionType::Expense), Decimal::new(100, 0));
        assert_eq!(max_amount(&[], TransactionType::Expense), Decimal::ZERO);
    }

    #[test]
    fn test_count_by_type() {
        let transactions = sample_transactions();
        assert_eq!(count_by_type(&transactions, TransactionType::Expense), 2);
        assert_eq!(count_by_type(&transactions, TransactionType::Income), 1);
    }

    #[test]
    fn test_balance_identity() {
        let transactions = sample_transactions();
        let income = sum_by_type(&transactions, TransactionType::Income);
        let expense = sum_by_type(&transactions, TransactionType::Expense);
        assert_eq!(income - expense, Decimal::new(350, 0));
    }
}
