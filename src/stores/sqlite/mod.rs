//! Contains SQLite backed implementations of the store traits and a
//! convenience function for setting up the application state.

mod category;
mod location;
mod transaction;

pub use category::SQLiteCategoryStore;
pub use location::SQLiteLocationStore;
pub use transaction::SQLiteTransactionStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{AppState, Error, db::initialize};

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteCategoryStore, SQLiteLocationStore, SQLiteTransactionStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models, running any pending schema migration and seeding the reference
/// data.
///
/// # Errors
/// Returns an error if initialization fails. This is fatal: no store can
/// operate against an uninitialized database.
pub fn create_app_state(db_connection: Connection) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(
        SQLiteCategoryStore::new(connection.clone()),
        SQLiteLocationStore::new(connection.clone()),
        SQLiteTransactionStore::new(connection),
    ))
}
