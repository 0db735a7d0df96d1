//! Defines the category store trait.

use crate::{
    Error,
    models::{ReferenceName, TransactionKind},
};

/// Creates and retrieves the categories used to classify transactions.
pub trait CategoryStore {
    /// Add a category scoped to transactions of `kind`.
    ///
    /// Returns `Ok(false)` without inserting anything when a category with
    /// the same kind and name already exists.
    fn add(&self, kind: TransactionKind, name: ReferenceName) -> Result<bool, Error>;

    /// Get the names of all categories for `kind`, in alphabetical order.
    fn names(&self, kind: TransactionKind) -> Result<Vec<String>, Error>;
}
