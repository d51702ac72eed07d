use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::repository::{self, TransactionFilter};
use crate::error::AppError;
use crate::models::summary::{ChartSeries, DashboardSummary};
use crate::models::transaction::TransactionType;
use crate::stats;

/// Aggregates unconditionally over the whole store. The dashboard has no date
/// filter, unlike the report view.
pub fn build_dashboard(conn: &Connection, today: NaiveDate) -> Result<DashboardSummary, AppError> {
    let all = repository::find_transactions(conn, &TransactionFilter::default())?;

    let total_income = stats::sum_by_type(&all, TransactionType::Income);
    let total_expense = stats::sum_by_type(&all, TransactionType::Expense);

    Ok(DashboardSummary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        today_expense: stats::sum_by_type_on_date(&all, TransactionType::Expense, today),
        recent: repository::recent_transactions(conn)?,
        expense_by_category: ChartSeries::from_pairs(stats::totals_by_category(
            &all,
            TransactionType::Expense,
        )),
        expense_by_date: ChartSeries::from_date_pairs(stats::totals_by_date(
            &all,
            TransactionType::Expense,
        )),
        monthly_income: ChartSeries::from_pairs(stats::totals_by_month(
            &all,
            TransactionType::Income,
        )),
    })
}
