//! Defines the transaction store trait.

use crate::{
    DatabaseID, Error,
    models::{Transaction, TransactionDraft},
};

/// Creates, deletes and retrieves financial transactions.
pub trait TransactionStore {
    /// Add `draft` to the store, assigning it a fresh ID.
    ///
    /// The store trusts the draft: validation happens when the draft is
    /// created, not here.
    fn add(&mut self, draft: TransactionDraft) -> Result<Transaction, Error>;

    /// Delete the transaction with `id`.
    ///
    /// Deleting an ID that is not in the store is a no-op, not an error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;

    /// Get every transaction, ordered by date with the newest first.
    ///
    /// An inaccessible table is reported as an error, never silently mapped
    /// to an empty result: callers decide how to fall back.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// The number of transactions in the store.
    fn count(&self) -> Result<usize, Error>;
}
