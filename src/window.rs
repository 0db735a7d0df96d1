//! Year and month report-window filtering.
//!
//! The store returns the full transaction set; the window is applied in
//! memory before the result is aggregated or exported.

use time::{Date, Month};

use crate::models::Transaction;

/// Which months of the selected year a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    /// Every month of the year.
    All,
    /// A single calendar month.
    Only(Month),
}

/// The year and month selection a report is filtered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    /// The calendar year to report on.
    pub year: i32,
    /// The month selection within the year.
    pub month: MonthFilter,
}

impl ReportWindow {
    /// The default window: the month and year of `today`.
    pub fn current(today: Date) -> Self {
        Self {
            year: today.year(),
            month: MonthFilter::Only(today.month()),
        }
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: Date) -> bool {
        if date.year() != self.year {
            return false;
        }

        match self.month {
            MonthFilter::All => true,
            MonthFilter::Only(month) => date.month() == month,
        }
    }

    /// The transactions that fall inside the window, keeping their order.
    pub fn filter(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|transaction| self.contains(transaction.date))
            .cloned()
            .collect()
    }

    /// The display label for the window, e.g. "Enero 2024" or "Año 2024".
    pub fn label(&self) -> String {
        match self.month {
            MonthFilter::All => format!("Año {}", self.year),
            MonthFilter::Only(month) => format!("{} {}", month_label(month), self.year),
        }
    }
}

/// The years to offer in the year selector: every year present in
/// `transactions` plus `current_year`, newest first.
///
/// The current year is always offered, even when no transaction falls in it.
pub fn year_options(transactions: &[Transaction], current_year: i32) -> Vec<i32> {
    let mut years: Vec<i32> = transactions
        .iter()
        .map(|transaction| transaction.date.year())
        .collect();
    years.push(current_year);

    years.sort_unstable();
    years.dedup();
    years.reverse();

    years
}

/// The Spanish name of `month`, as shown in window labels.
pub fn month_label(month: Month) -> &'static str {
    match month {
        Month::January => "Enero",
        Month::February => "Febrero",
        Month::March => "Marzo",
        Month::April => "Abril",
        Month::May => "Mayo",
        Month::June => "Junio",
        Month::July => "Julio",
        Month::August => "Agosto",
        Month::September => "Septiembre",
        Month::October => "Octubre",
        Month::November => "Noviembre",
        Month::December => "Diciembre",
    }
}

#[cfg(test)]
mod window_tests {
    use time::{Date, Month, macros::date};

    use crate::{
        dashboard,
        models::{Transaction, TransactionKind},
    };

    use super::{MonthFilter, ReportWindow, year_options};

    fn create_transaction(
        id: i64,
        date: Date,
        kind: TransactionKind,
        category: &str,
        amount: f64,
        location: &str,
    ) -> Transaction {
        Transaction {
            id,
            date,
            kind,
            category: category.to_string(),
            amount,
            note: None,
            location: location.to_string(),
        }
    }

    fn example_transactions() -> Vec<Transaction> {
        vec![
            create_transaction(
                1,
                date!(2024 - 01 - 15),
                TransactionKind::Expense,
                "Alimentación",
                50.0,
                "Casa",
            ),
            create_transaction(
                2,
                date!(2024 - 01 - 20),
                TransactionKind::Income,
                "Salario",
                1000.0,
                "Oficina",
            ),
            create_transaction(
                3,
                date!(2024 - 02 - 01),
                TransactionKind::Expense,
                "Transporte",
                20.0,
                "Casa",
            ),
        ]
    }

    #[test]
    fn single_month_window_keeps_matching_records() {
        let window = ReportWindow {
            year: 2024,
            month: MonthFilter::Only(Month::January),
        };

        let filtered = window.filter(&example_transactions());

        let ids: Vec<i64> = filtered.iter().map(|transaction| transaction.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let totals = dashboard::totals(&filtered);
        assert_eq!(totals.income, 1000.0);
        assert_eq!(totals.expenses, 50.0);
        assert_eq!(totals.balance(), 950.0);
    }

    #[test]
    fn all_months_window_keeps_the_whole_year() {
        let window = ReportWindow {
            year: 2024,
            month: MonthFilter::All,
        };

        let filtered = window.filter(&example_transactions());

        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn window_excludes_other_years() {
        let window = ReportWindow {
            year: 2023,
            month: MonthFilter::All,
        };

        assert!(window.filter(&example_transactions()).is_empty());
    }

    #[test]
    fn current_window_uses_todays_year_and_month() {
        let window = ReportWindow::current(date!(2026 - 08 - 06));

        assert_eq!(window.year, 2026);
        assert_eq!(window.month, MonthFilter::Only(Month::August));
    }

    #[test]
    fn labels_name_the_month_or_the_year() {
        let january = ReportWindow {
            year: 2024,
            month: MonthFilter::Only(Month::January),
        };
        let full_year = ReportWindow {
            year: 2024,
            month: MonthFilter::All,
        };

        assert_eq!(january.label(), "Enero 2024");
        assert_eq!(full_year.label(), "Año 2024");
    }

    #[test]
    fn year_options_include_the_current_year() {
        let years = year_options(&example_transactions(), 2026);

        assert_eq!(years, vec![2026, 2024]);
    }

    #[test]
    fn year_options_deduplicate_and_sort_descending() {
        let mut transactions = example_transactions();
        transactions.push(create_transaction(
            4,
            date!(2022 - 06 - 30),
            TransactionKind::Expense,
            "Ocio",
            15.0,
            "Online",
        ));

        let years = year_options(&transactions, 2024);

        assert_eq!(years, vec![2024, 2022]);
    }
}
