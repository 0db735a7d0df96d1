/*! This module defines traits for mapping the domain models to the database
and the idempotent initialization that runs at every process start. */

use rusqlite::{Connection, Row, Transaction as SqlTransaction};

use crate::{
    Error,
    stores::sqlite::{SQLiteCategoryStore, SQLiteLocationStore, SQLiteTransactionStore},
};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create the table for the model if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a
/// concrete rust type.
pub trait MapRow {
    /// The type a row is converted into.
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// **Note:** This function expects that the row object contains all the
    /// table columns in the order they were defined.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the
    /// corresponding rust type, or if an invalid column index was used.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type, reading from the column at
    /// `offset`.
    ///
    /// This is useful in cases where tables have been joined and you want to
    /// construct two different types from the one query.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the
    /// corresponding rust type, or if an invalid column index was used.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// The location assigned to transactions recorded before locations existed.
pub const DEFAULT_LOCATION: &str = "General";

/// The categories inserted the first time the application runs.
const DEFAULT_CATEGORIES: [(&str, &str); 8] = [
    ("Ingreso", "Salario"),
    ("Ingreso", "Inversiones"),
    ("Gasto", "Alimentación"),
    ("Gasto", "Transporte"),
    ("Gasto", "Vivienda"),
    ("Gasto", "Salud"),
    ("Gasto", "Ocio"),
    ("Gasto", "Servicios"),
];

/// The locations inserted the first time the application runs.
const DEFAULT_LOCATIONS: [&str; 5] = ["Casa", "Oficina", "Supermercado", "Restaurante", "Online"];

/// Create the application tables, run any pending schema migration and seed
/// the reference data.
///
/// Safe to call on every process start: tables are only created when absent
/// and seeds are only inserted into empty tables. Everything runs inside a
/// single exclusive transaction.
///
/// # Errors
/// Returns an error if there is an SQL error. Callers should treat this as
/// fatal, no other operation can succeed against an uninitialized database.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    SQLiteTransactionStore::create_table(&transaction)?;
    SQLiteCategoryStore::create_table(&transaction)?;
    SQLiteLocationStore::create_table(&transaction)?;

    add_location_column_if_missing(&transaction)?;
    seed_reference_data(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Bring a database created before locations existed up to the current
/// schema.
///
/// Detection is structural: there is no stored schema version, so the column
/// is probed with a query and any prepare failure is taken to mean the column
/// is missing.
fn add_location_column_if_missing(connection: &Connection) -> Result<(), Error> {
    if connection
        .prepare("SELECT ubicacion FROM transacciones LIMIT 1")
        .is_ok()
    {
        return Ok(());
    }

    connection.execute(
        "ALTER TABLE transacciones ADD COLUMN ubicacion TEXT DEFAULT 'General'",
        (),
    )?;

    tracing::info!("added the ubicacion column to the transacciones table");

    Ok(())
}

fn seed_reference_data(connection: &Connection) -> Result<(), Error> {
    let category_count: i64 =
        connection.query_row("SELECT count(*) FROM categorias", [], |row| row.get(0))?;

    if category_count == 0 {
        let mut statement =
            connection.prepare("INSERT OR IGNORE INTO categorias (tipo, nombre) VALUES (?1, ?2)")?;

        for (kind, name) in DEFAULT_CATEGORIES {
            statement.execute((kind, name))?;
        }

        tracing::info!("seeded {} default categories", DEFAULT_CATEGORIES.len());
    }

    let location_count: i64 =
        connection.query_row("SELECT count(*) FROM lugares", [], |row| row.get(0))?;

    if location_count == 0 {
        let mut statement =
            connection.prepare("INSERT OR IGNORE INTO lugares (nombre) VALUES (?1)")?;

        for name in DEFAULT_LOCATIONS {
            statement.execute((name,))?;
        }

        tracing::info!("seeded {} default locations", DEFAULT_LOCATIONS.len());
    }

    Ok(())
}
