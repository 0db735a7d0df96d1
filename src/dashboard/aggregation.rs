//! Transaction data aggregation for the dashboard.
//!
//! Provides functions to sum income and expenses for the KPI cards and to
//! group expenses by category and location for the breakdown views. All
//! functions operate on a transaction set the caller has already filtered to
//! the report window.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Transaction, TransactionKind};

/// The maximum number of groups returned by [top_expense_locations].
pub const TOP_LOCATIONS: usize = 5;

/// The KPI totals for a filtered set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    /// The sum of all income amounts.
    pub income: f64,
    /// The sum of all expense amounts.
    pub expenses: f64,
}

impl Totals {
    /// Income minus expenses.
    pub fn balance(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Sums income and expense amounts for the KPI cards.
pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => totals.income += transaction.amount,
            TransactionKind::Expense => totals.expenses += transaction.amount,
        }
    }

    totals
}

/// Groups expense amounts by category, in the order categories first appear.
///
/// Income is ignored. Empty input produces an empty vector, not an error.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<(String, f64)> {
    group_expenses(transactions, |transaction| transaction.category.as_str())
}

/// Groups expense amounts by location and keeps the largest groups.
///
/// At most [TOP_LOCATIONS] groups are returned, sorted by total in
/// non-increasing order. The sort is stable, so ties keep the order the
/// groups first appeared in.
pub fn top_expense_locations(transactions: &[Transaction]) -> Vec<(String, f64)> {
    let mut groups = group_expenses(transactions, |transaction| transaction.location.as_str());

    groups.sort_by(|(_, left), (_, right)| right.total_cmp(left));
    groups.truncate(TOP_LOCATIONS);

    groups
}

/// Sums expense amounts grouped by `key`, preserving first-seen group order.
fn group_expenses<'a, F>(transactions: &'a [Transaction], key: F) -> Vec<(String, f64)>
where
    F: Fn(&'a Transaction) -> &'a str,
{
    let mut group_indices: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, f64)> = Vec::new();

    let expenses = transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Expense);

    for transaction in expenses {
        match group_indices.get(key(transaction)) {
            Some(&index) => groups[index].1 += transaction.amount,
            None => {
                group_indices.insert(key(transaction), groups.len());
                groups.push((key(transaction).to_string(), transaction.amount));
            }
        }
    }

    groups
}

#[cfg(test)]
mod aggregation_tests {
    use time::{Date, macros::date};

    use crate::models::{Transaction, TransactionKind};

    use super::{TOP_LOCATIONS, expenses_by_category, top_expense_locations, totals};

    fn create_transaction(
        date: Date,
        kind: TransactionKind,
        category: &str,
        amount: f64,
        location: &str,
    ) -> Transaction {
        Transaction {
            id: 0,
            date,
            kind,
            category: category.to_string(),
            amount,
            note: None,
            location: location.to_string(),
        }
    }

    fn expense(category: &str, amount: f64, location: &str) -> Transaction {
        create_transaction(
            date!(2024 - 01 - 15),
            TransactionKind::Expense,
            category,
            amount,
            location,
        )
    }

    #[test]
    fn totals_sums_by_kind() {
        let transactions = vec![
            expense("Alimentación", 50.0, "Casa"),
            create_transaction(
                date!(2024 - 01 - 20),
                TransactionKind::Income,
                "Salario",
                1000.0,
                "Oficina",
            ),
        ];

        let totals = totals(&transactions);

        assert_eq!(totals.income, 1000.0);
        assert_eq!(totals.expenses, 50.0);
        assert_eq!(totals.balance(), 950.0);
    }

    #[test]
    fn totals_on_empty_input_are_zero() {
        let totals = totals(&[]);

        assert_eq!(totals.income, 0.0);
        assert_eq!(totals.expenses, 0.0);
        assert_eq!(totals.balance(), 0.0);
    }

    #[test]
    fn category_breakdown_groups_and_ignores_income() {
        let transactions = vec![
            expense("Alimentación", 50.0, "Casa"),
            expense("Transporte", 20.0, "Casa"),
            expense("Alimentación", 30.0, "Supermercado"),
            create_transaction(
                date!(2024 - 01 - 20),
                TransactionKind::Income,
                "Salario",
                1000.0,
                "Oficina",
            ),
        ];

        let breakdown = expenses_by_category(&transactions);

        assert_eq!(
            breakdown,
            vec![
                ("Alimentación".to_string(), 80.0),
                ("Transporte".to_string(), 20.0)
            ]
        );
    }

    #[test]
    fn category_breakdown_sums_to_expense_total() {
        let transactions = vec![
            expense("Alimentación", 50.0, "Casa"),
            expense("Transporte", 20.0, "Casa"),
            expense("Ocio", 12.5, "Online"),
            expense("Alimentación", 7.5, "Restaurante"),
        ];

        let breakdown_total: f64 = expenses_by_category(&transactions)
            .iter()
            .map(|(_, total)| total)
            .sum();

        assert_eq!(breakdown_total, totals(&transactions).expenses);
    }

    #[test]
    fn category_breakdown_on_empty_input_is_empty() {
        assert!(expenses_by_category(&[]).is_empty());
    }

    #[test]
    fn top_locations_keeps_at_most_five_groups_sorted_descending() {
        let transactions: Vec<Transaction> = (1..=7)
            .map(|i| expense("Ocio", i as f64 * 10.0, &format!("Lugar {i}")))
            .collect();

        let top = top_expense_locations(&transactions);

        assert_eq!(top.len(), TOP_LOCATIONS);
        assert!(
            top.windows(2)
                .all(|window| window[0].1 >= window[1].1)
        );
        assert_eq!(top[0], ("Lugar 7".to_string(), 70.0));
        assert_eq!(top[4], ("Lugar 3".to_string(), 30.0));
    }

    #[test]
    fn top_locations_breaks_ties_by_first_appearance() {
        let transactions = vec![
            expense("Ocio", 25.0, "Casa"),
            expense("Ocio", 25.0, "Online"),
            expense("Ocio", 40.0, "Supermercado"),
        ];

        let top = top_expense_locations(&transactions);

        assert_eq!(
            top,
            vec![
                ("Supermercado".to_string(), 40.0),
                ("Casa".to_string(), 25.0),
                ("Online".to_string(), 25.0)
            ]
        );
    }

    #[test]
    fn top_locations_ignores_income() {
        let transactions = vec![create_transaction(
            date!(2024 - 01 - 20),
            TransactionKind::Income,
            "Salario",
            1000.0,
            "Oficina",
        )];

        assert!(top_expense_locations(&transactions).is_empty());
    }
}
