//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    DatabaseID, Error,
    db::{CreateTable, DEFAULT_LOCATION, MapRow},
    models::{Transaction, TransactionDraft},
    stores::TransactionStore,
};

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// The draft was validated when it was created, so the store inserts it
    /// as-is.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn add(&mut self, draft: TransactionDraft) -> Result<Transaction, Error> {
        let transaction = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO transacciones (fecha, tipo, categoria, monto, nota, ubicacion)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING id, fecha, tipo, categoria, monto, nota, ubicacion",
            )?
            .query_row(
                (
                    draft.date,
                    draft.kind,
                    &draft.category,
                    draft.amount,
                    &draft.note,
                    &draft.location,
                ),
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Delete the transaction with `id` from the database.
    ///
    /// Deleting an ID that is not in the database is a successful no-op.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_deleted = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM transacciones WHERE id = :id", &[(":id", &id)])?;

        if rows_deleted == 0 {
            tracing::debug!("no transaction with id {id} to delete");
        }

        Ok(())
    }

    /// Retrieve every transaction in the database, newest date first.
    ///
    /// # Errors
    /// This function will return an error if the table cannot be read or a
    /// row cannot be converted. A read failure is never reported as an empty
    /// result.
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, fecha, tipo, categoria, monto, nota, ubicacion
                 FROM transacciones ORDER BY fecha DESC",
            )?
            .query_map([], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Get the total number of transactions in the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn count(&self) -> Result<usize, Error> {
        self.connection
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(id) FROM transacciones", [], |row| {
                row.get::<_, i64>(0).map(|count| count as usize)
            })
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS transacciones (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    fecha TEXT NOT NULL,
                    tipo TEXT NOT NULL,
                    categoria TEXT NOT NULL,
                    monto REAL NOT NULL,
                    nota TEXT,
                    ubicacion TEXT
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let date = row.get(offset + 1)?;
        let kind = row.get(offset + 2)?;
        let category = row.get(offset + 3)?;
        let amount = row.get(offset + 4)?;
        let note = row.get(offset + 5)?;

        // Rows inserted with an explicit NULL location read back as the
        // migration default.
        let location: Option<String> = row.get(offset + 6)?;
        let location = location.unwrap_or_else(|| DEFAULT_LOCATION.to_string());

        Ok(Transaction {
            id,
            date,
            kind,
            category,
            amount,
            note,
            location,
        })
    }
}
