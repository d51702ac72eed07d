mod db;
mod error;
mod models;
mod operations;
mod stats;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::AppError;
use crate::models::summary::{ChartSeries, DashboardSummary, ReportSummary};
use crate::models::transaction::Transaction;
use crate::operations::add::TransactionInput;
use crate::operations::edit::TransactionPatch;
use crate::operations::list::FilterArgs;

#[derive(Parser)]
#[command(version, about = "Track income and expense transactions from the command line")]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, global = true, default_value = "spendlog.db")]
    db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new transaction
    Add {
        /// Transaction date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Amount, must be greater than zero
        #[arg(long)]
        amount: String,
        #[arg(long)]
        category: String,
        #[arg(long = "payment-mode")]
        payment_mode: String,
        /// income or expense
        #[arg(long = "type")]
        transaction_type: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List transactions, newest first, optionally filtered
    List {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "payment-mode")]
        payment_mode: Option<String>,
        #[arg(long = "type")]
        transaction_type: Option<String>,
    },
    /// Edit fields of an existing transaction; omitted fields are kept
    Edit {
        id: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "payment-mode")]
        payment_mode: Option<String>,
        #[arg(long = "type")]
        transaction_type: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a transaction by id
    Delete { id: String },
    /// Show the five most recently added transactions
    Recent,
    /// All-time totals, today's spend and chart series
    Dashboard,
    /// Expense report over an inclusive date range; without a full range all
    /// figures are zero
    Report {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Export all transactions to a CSV file
    Export { path: PathBuf },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().without_time())
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let conn = db::connection::establish_connection(&cli.db)?;

    match &cli.command {
        Commands::Add {
            date,
            amount,
            category,
            payment_mode,
            transaction_type,
            description,
        } => {
            let input = TransactionInput {
                date: date.clone(),
                description: description.clone(),
                amount: amount.clone(),
                category: category.clone(),
                payment_mode: payment_mode.clone(),
                transaction_type: transaction_type.clone(),
            };
            let transaction = operations::add::add_transaction_to_db(&conn, &input)?;
            println!("Added transaction {}", transaction.id);
        }
        Commands::List {
            from,
            to,
            category,
            payment_mode,
            transaction_type,
        } => {
            let args = FilterArgs {
                from: from.clone(),
                to: to.clone(),
                category: category.clone(),
                payment_mode: payment_mode.clone(),
                transaction_type: transaction_type.clone(),
            };
            let transactions = operations::list::list_transactions(&conn, &args)?;
            print_transactions(&transactions);
        }
        Commands::Edit {
            id,
            date,
            amount,
            category,
            payment_mode,
            transaction_type,
            description,
        } => {
            let patch = TransactionPatch {
                date: date.clone(),
                description: description.clone(),
                amount: amount.clone(),
                category: category.clone(),
                payment_mode: payment_mode.clone(),
                transaction_type: transaction_type.clone(),
            };
            let transaction = operations::edit::edit_transaction_in_db(&conn, id, &patch)?;
            println!("Updated transaction {}", transaction.id);
        }
        Commands::Delete { id } => {
            operations::remove::remove_transaction_from_db(&conn, id)?;
            println!("Deleted transaction {}", id);
        }
        Commands::Recent => {
            let transactions = db::repository::recent_transactions(&conn)?;
            print_transactions(&transactions);
        }
        Commands::Dashboard => {
            let today = chrono::Local::now().date_naive();
            let dashboard = operations::dashboard::build_dashboard(&conn, today)?;
            print_dashboard(&dashboard);
        }
        Commands::Report { from, to } => {
            let report = operations::report::build_report(&conn, from.as_deref(), to.as_deref())?;
            print_report(&report);
        }
        Commands::Export { path } => {
            let count = operations::export::export_to_file(&conn, path)?;
            println!("Exported {} transactions to {}", count, path.display());
        }
    }

    Ok(())
}

fn print_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No transactions found.");
        return;
    }
    for t in transactions {
        println!(
            "{}  {}  {:>10}  {:<12} {:<10} {}  {}",
            t.id,
            t.date,
            t.amount,
            t.category,
            t.payment_mode,
            t.transaction_type,
            t.description.as_deref().unwrap_or("")
        );
    }
}

fn print_series(title: &str, series: &ChartSeries) {
    println!("{}:", title);
    if series.is_empty() {
        println!("  (none)");
        return;
    }
    for (label, value) in series.labels.iter().zip(&series.values) {
        println!("  {:<12} {:>10}", label, value);
    }
}

fn print_dashboard(dashboard: &DashboardSummary) {
    println!("Total income:   {}", dashboard.total_income);
    println!("Total expense:  {}", dashboard.total_expense);
    println!("Balance:        {}", dashboard.balance);
    println!("Today's spend:  {}", dashboard.today_expense);
    println!();
    print_series("Expenses by category", &dashboard.expense_by_category);
    print_series("Expenses by date", &dashboard.expense_by_date);
    print_series("Monthly income", &dashboard.monthly_income);
    println!();
    println!("Recent transactions:");
    print_transactions(&dashboard.recent);
}

fn print_report(report: &ReportSummary) {
    println!("Total expense:      {}", report.total_expense);
    println!("Average daily:      {}", report.avg_daily_expense);
    println!("Largest expense:    {}", report.max_expense);
    println!("Transactions:       {}", report.total_transactions);
    println!("Total income:       {}", report.total_income);
    match &report.top_category {
        Some(top) => println!(
            "Top category:       {} ({}, {}% of spend)",
            top.category, top.amount, top.percent
        ),
        None => println!("Top category:       (none)"),
    }
    println!();
    print_series("Expenses by category", &report.expense_by_category);
    print_series("Expenses by payment mode", &report.expense_by_payment_mode);
    println!();
    println!("Monthly summary:");
    if report.monthly_summary.is_empty() {
        println!("  (none)");
    }
    for row in &report.monthly_summary {
        println!(
            "  {}  income {:>10}  expense {:>10}  balance {:>10}",
            row.month, row.income, row.expense, row.balance
        );
    }
}
