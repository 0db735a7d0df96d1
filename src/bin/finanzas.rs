//! The command-line front end for the finanzas personal finance tracker.
//!
//! The binary is a thin presentation collaborator: it collects input, calls
//! into the stores and renders their results as plain text. All data logic
//! lives in the library.

use std::{fs::File, path::PathBuf, process::ExitCode, sync::OnceLock};

use clap::{Parser, Subcommand};
use numfmt::{Formatter, Precision};
use rusqlite::Connection;
use time::{
    Date, Month, OffsetDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};
use tracing_subscriber::EnvFilter;

use finanzas_rs::{
    DatabaseID, Error, dashboard, export,
    models::{ReferenceName, TransactionDraft, TransactionKind},
    stores::{CategoryStore, LocationStore, TransactionStore, sqlite::create_app_state},
    window::{MonthFilter, ReportWindow, year_options},
};

/// A personal finance tracker over a local SQLite database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, default_value = "finanzas.db")]
    db_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new transaction.
    Add {
        /// The date of the transaction (YYYY-MM-DD). Defaults to today.
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,

        /// Whether the transaction is an income (Ingreso) or an expense
        /// (Gasto).
        #[arg(long, value_parser = parse_kind)]
        kind: TransactionKind,

        /// The category to file the transaction under.
        #[arg(long)]
        category: String,

        /// The amount of money that changed hands, must be greater than zero.
        #[arg(long)]
        amount: f64,

        /// An optional free-text note.
        #[arg(long)]
        note: Option<String>,

        /// The place the transaction happened at.
        #[arg(long)]
        location: String,
    },

    /// Delete a transaction by its ID.
    Delete {
        /// The ID of the transaction to delete.
        id: DatabaseID,
    },

    /// List the transactions in the report window.
    List {
        #[command(flatten)]
        window: WindowArgs,
    },

    /// Show the KPI totals and expense breakdowns for the report window.
    Summary {
        #[command(flatten)]
        window: WindowArgs,

        /// Print the summary as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Export the transactions in the report window as a CSV report.
    Export {
        #[command(flatten)]
        window: WindowArgs,

        /// File path to write. Defaults to reporte_<window>.csv.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Add a category for classifying transactions.
    AddCategory {
        /// The kind of transactions the category applies to.
        #[arg(value_parser = parse_kind)]
        kind: TransactionKind,

        /// The category name.
        name: String,
    },

    /// Add a location where transactions happen.
    AddLocation {
        /// The location name.
        name: String,
    },

    /// List the category names for a transaction kind.
    Categories {
        /// The kind of transactions to list categories for.
        #[arg(value_parser = parse_kind)]
        kind: TransactionKind,
    },

    /// List all location names.
    Locations,

    /// List the years that have transactions.
    Years,
}

/// The year and month selection shared by the reporting subcommands.
#[derive(clap::Args, Debug)]
struct WindowArgs {
    /// The year to report on. Defaults to the current year.
    #[arg(long)]
    year: Option<i32>,

    /// The month (1-12) to report on. Defaults to the current month.
    #[arg(long, conflicts_with = "all_months", value_parser = clap::value_parser!(u8).range(1..=12))]
    month: Option<u8>,

    /// Report on the whole year instead of a single month.
    #[arg(long)]
    all_months: bool,
}

impl WindowArgs {
    fn into_window(self, today: Date) -> ReportWindow {
        let year = self.year.unwrap_or_else(|| today.year());

        let month = if self.all_months {
            MonthFilter::All
        } else {
            match self.month {
                Some(month) => MonthFilter::Only(
                    Month::try_from(month).expect("clap keeps the month in 1-12"),
                ),
                None => MonthFilter::Only(today.month()),
            }
        };

        ReportWindow { year, month }
    }
}

fn parse_date(text: &str) -> Result<Date, String> {
    const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

    Date::parse(text, DATE_FORMAT).map_err(|error| format!("expected a YYYY-MM-DD date: {error}"))
}

fn parse_kind(text: &str) -> Result<TransactionKind, String> {
    text.parse().map_err(|error: Error| error.to_string())
}

fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn run(args: Args) -> Result<(), Error> {
    let connection = Connection::open(&args.db_path)?;
    let mut state = create_app_state(connection)?;

    let today = OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date();

    match args.command {
        Command::Add {
            date,
            kind,
            category,
            amount,
            note,
            location,
        } => {
            let draft = TransactionDraft::new(
                date.unwrap_or(today),
                kind,
                category,
                amount,
                note.filter(|note| !note.is_empty()),
                location,
            )?;

            let transaction = state.transaction_store.add(draft)?;
            println!(
                "Registered {} of {} ({}, {}) with id {}.",
                transaction.kind,
                format_amount(transaction.amount),
                transaction.category,
                transaction.location,
                transaction.id
            );
        }
        Command::Delete { id } => {
            state.transaction_store.delete(id)?;
            println!("Deleted transaction {id}.");
        }
        Command::List { window } => {
            let transactions = state.transaction_store.get_all()?;
            let total_count = state.transaction_store.count()?;
            let window = window.into_window(today);
            let filtered = window.filter(&transactions);

            if filtered.is_empty() {
                println!("No transactions in {}.", window.label());
                return Ok(());
            }

            println!(
                "{} of {} transactions in {}:",
                filtered.len(),
                total_count,
                window.label()
            );
            for transaction in &filtered {
                println!(
                    "{:>6}  {}  {:<7}  {:<16}  {:>12}  {:<14}  {}",
                    transaction.id,
                    transaction.date,
                    transaction.kind.to_string(),
                    transaction.category,
                    format_amount(transaction.amount),
                    transaction.location,
                    transaction.note.as_deref().unwrap_or("")
                );
            }
        }
        Command::Summary { window, json } => {
            let transactions = state.transaction_store.get_all()?;
            let window = window.into_window(today);

            // An empty store reports the all-time view, like the dashboard
            // does before any data is entered.
            let (label, filtered) = if transactions.is_empty() {
                ("Histórico".to_owned(), Vec::new())
            } else {
                (window.label(), window.filter(&transactions))
            };

            let totals = dashboard::totals(&filtered);
            let by_category = dashboard::expenses_by_category(&filtered);
            let top_locations = dashboard::top_expense_locations(&filtered);

            if json {
                let report = SummaryReport {
                    window: label,
                    income: totals.income,
                    expenses: totals.expenses,
                    balance: totals.balance(),
                    expenses_by_category: by_category,
                    top_locations,
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report)
                        .expect("the summary report serializes to JSON")
                );
                return Ok(());
            }

            println!("Control: {label}");
            println!("  Ingresos: {}", format_amount(totals.income));
            println!("  Gastos:   {}", format_amount(totals.expenses));
            println!("  Balance:  {}", format_amount(totals.balance()));

            if !by_category.is_empty() {
                println!("Por categoría:");
                for (category, total) in &by_category {
                    println!("  {:<16} {}", category, format_amount(*total));
                }
            }

            if !top_locations.is_empty() {
                println!("Por lugar (top {}):", dashboard::TOP_LOCATIONS);
                for (location, total) in &top_locations {
                    println!("  {:<16} {}", location, format_amount(*total));
                }
            }
        }
        Command::Export { window, output } => {
            let transactions = state.transaction_store.get_all()?;
            let window = window.into_window(today);
            let filtered = window.filter(&transactions);

            let path = output.unwrap_or_else(|| default_report_path(&window.label()));
            let file = File::create(&path).map_err(|error| Error::Csv(error.to_string()))?;
            export::write_csv(file, &filtered)?;

            println!(
                "Wrote {} transactions to {}.",
                filtered.len(),
                path.display()
            );
        }
        Command::AddCategory { kind, name } => {
            let name = ReferenceName::new(&name)?;

            if state.category_store.add(kind, name.clone())? {
                println!("Added {kind} category {name}.");
            } else {
                println!("The {kind} category {name} already exists.");
            }
        }
        Command::AddLocation { name } => {
            let name = ReferenceName::new(&name)?;

            if state.location_store.add(name.clone())? {
                println!("Added location {name}.");
            } else {
                println!("The location {name} already exists.");
            }
        }
        Command::Categories { kind } => {
            for name in state.category_store.names(kind)? {
                println!("{name}");
            }
        }
        Command::Locations => {
            for name in state.location_store.names()? {
                println!("{name}");
            }
        }
        Command::Years => {
            let transactions = state.transaction_store.get_all()?;

            for year in year_options(&transactions, today.year()) {
                println!("{year}");
            }
        }
    }

    Ok(())
}

/// The default report file name, derived from the window label.
fn default_report_path(label: &str) -> PathBuf {
    PathBuf::from(format!("reporte_{}.csv", label.replace(' ', "_")))
}

/// Formats an amount the way the KPI cards display money: a dollar sign,
/// thousands separators and no decimal places.
fn format_amount(amount: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT
        .get_or_init(|| Formatter::currency("$").unwrap().precision(Precision::Decimals(0)));

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT
        .get_or_init(|| Formatter::currency("-$").unwrap().precision(Precision::Decimals(0)));

    if amount < 0.0 {
        negative_fmt.fmt_string(amount.abs())
    } else if amount > 0.0 {
        positive_fmt.fmt_string(amount)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0".to_owned()
    }
}

/// The machine-readable shape of the `summary --json` output.
#[derive(serde::Serialize)]
struct SummaryReport {
    window: String,
    income: f64,
    expenses: f64,
    balance: f64,
    expenses_by_category: Vec<(String, f64)>,
    top_locations: Vec<(String, f64)>,
}
