//! Implements a struct that holds the application's stores.

use crate::stores::{CategoryStore, LocationStore, TransactionStore};

/// The stores behind one open database, handed to the presentation layer.
#[derive(Debug, Clone)]
pub struct AppState<C, L, T>
where
    C: CategoryStore,
    L: LocationStore,
    T: TransactionStore,
{
    /// The store for managing transaction categories.
    pub category_store: C,
    /// The store for managing transaction locations.
    pub location_store: L,
    /// The store for managing transactions.
    pub transaction_store: T,
}

impl<C, L, T> AppState<C, L, T>
where
    C: CategoryStore,
    L: LocationStore,
    T: TransactionStore,
{
    /// Create a new [AppState].
    pub fn new(category_store: C, location_store: L, transaction_store: T) -> Self {
        Self {
            category_store,
            location_store,
            transaction_store,
        }
    }
}
