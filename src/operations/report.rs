use rusqlite::Connection;

use crate::db::repository::{self, TransactionFilter};
use crate::error::AppError;
use crate::models::summary::{ChartSeries, ReportSummary};
use crate::models::transaction::TransactionType;
use crate::operations::add::parse_date;
use crate::stats;

/// Report over an inclusive date range.
///
/// When either end of the range is missing, every KPI comes back as zero and
/// every series empty. The report never falls back to aggregating the whole
/// store; only the dashboard does that.
pub fn build_report(
    conn: &Connection,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<ReportSummary, AppError> {
    let (Some(from), Some(to)) = (from, to) else {
        return Ok(ReportSummary::empty());
    };
    let from = parse_date(from)?;
    let to = parse_date(to)?;

    let filter = TransactionFilter {
        from: Some(from),
        to: Some(to),
        ..Default::default()
    };
    let in_range = repository::find_transactions(conn, &filter)?;

    let total_expense = stats::sum_by_type(&in_range, TransactionType::Expense);

    Ok(ReportSummary {
        total_expense,
        avg_daily_expense: stats::average_daily(total_expense, from, to),
        max_expense: stats::max_amount(&in_range, TransactionType::Expense),
        total_transactions: stats::count_by_type(&in_range, TransactionType::Expense),
        top_category: stats::top_category(&in_range, TransactionType::Expense),
        total_income: stats::sum_by_type(&in_range, TransactionType::Income),
        expense_by_category: ChartSeries::from_pairs(stats::totals_by_category(
            &in_range,
            TransactionType::Expense,
        )),
        expense_by_payment_mode: ChartSeries::from_pairs(stats::totals_by_payment_mode(
            &in_range,
            TransactionType::Expense,
        )),
        monthly_summary: stats::monthly_balance(&in_range),
    })
}
