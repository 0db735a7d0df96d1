//! Aggregation of filtered transaction sets for the dashboard summary.

mod aggregation;

pub use aggregation::{TOP_LOCATIONS, Totals, expenses_by_category, top_expense_locations, totals};
