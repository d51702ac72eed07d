use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::transaction::Transaction;

/// Parallel label/value arrays in the shape chart renderers consume.
///
/// A pure reshape of the engine's `(key, sum)` pairs: ordering is preserved
/// and an empty input produces empty arrays, never an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
}

impl ChartSeries {
    pub fn from_pairs(pairs: Vec<(String, Decimal)>) -> Self {
        let mut labels = Vec::with_capacity(pairs.len());
        let mut values = Vec::with_capacity(pairs.len());
        for (label, value) in pairs {
            labels.push(label);
            values.push(value);
        }
        Self { labels, values }
    }

    pub fn from_date_pairs(pairs: Vec<(NaiveDate, Decimal)>) -> Self {
        Self::from_pairs(
            pairs
                .into_iter()
                .map(|(date, value)| (date.format("%Y-%m-%d").to_string(), value))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// The category with the largest summed amount in a report range.
#[derive(Debug, Clone, PartialEq)]
pub struct TopCategory {
    pub category: String,
    pub amount: Decimal,
    /// Share of the range total, 0..=100, rounded to 2 decimal places.
    pub percent: Decimal,
}

/// One row of the monthly income/expense breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBalance {
    /// `YYYY-MM` label derived from the transaction date.
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// Aggregates for the dashboard view, computed over the whole store.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub today_expense: Decimal,
    pub recent: Vec<Transaction>,
    pub expense_by_category: ChartSeries,
    pub expense_by_date: ChartSeries,
    pub monthly_income: ChartSeries,
}

/// Aggregates for the report view over an inclusive date range.
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub total_expense: Decimal,
    pub avg_daily_expense: Decimal,
    pub max_expense: Decimal,
    pub total_transactions: usize,
    pub top_category: Option<TopCategory>,
    pub total_income: Decimal,
    pub expense_by_category: ChartSeries,
    pub expense_by_payment_mode: ChartSeries,
    pub monthly_summary: Vec<MonthlyBalance>,
}

impl ReportSummary {
    /// The all-zero report rendered when no date range was supplied.
    pub fn empty() -> Self {
        Self {
            total_expense: Decimal::ZERO,
            avg_daily_expense: Decimal::ZERO,
            max_expense: Decimal::ZERO,
            total_transactions: 0,
            top_category: None,
            total_income: Decimal::ZERO,
            expense_by_category: ChartSeries::default(),
            expense_by_payment_mode: ChartSeries::default(),
            monthly_summary: Vec::new(),
        }
    }
}
