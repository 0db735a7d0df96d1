//! Finanzas is a personal finance tracker backed by a single local SQLite
//! database.
//!
//! This library is the data-access layer behind the `finanzas` binary: schema
//! management and migration, reference data (categories and locations),
//! transaction CRUD, and the aggregation that feeds the dashboard summary and
//! CSV reports.

#![warn(missing_docs)]

pub mod dashboard;
mod database_id;
pub mod db;
pub mod export;
pub mod models;
mod state;
pub mod stores;
pub mod window;

pub use database_id::DatabaseID;
pub use state::AppState;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a category or location name.
    #[error("name cannot be empty")]
    EmptyName,

    /// A zero or negative amount was used to create a transaction.
    ///
    /// Transactions record money actually changing hands, so the amount must
    /// be a positive number.
    #[error("{0} is not a valid amount, the amount must be greater than zero")]
    InvalidAmount(f64),

    /// A string other than "Ingreso" or "Gasto" was used as a transaction
    /// kind.
    #[error("\"{0}\" is not a transaction kind, expected \"Ingreso\" or \"Gasto\"")]
    UnknownKind(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The CSV report could not be written.
    #[error("could not write the CSV report: {0}")]
    Csv(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::Csv(value.to_string())
    }
}
