//! Implements a SQLite backed location store.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::CreateTable, models::ReferenceName, stores::LocationStore};

/// Creates and retrieves transaction locations to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteLocationStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteLocationStore {
    /// Create a new location store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl LocationStore for SQLiteLocationStore {
    /// Add a location to the database.
    ///
    /// Returns `Ok(false)` when the name already exists; the uniqueness
    /// conflict is not an error.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn add(&self, name: ReferenceName) -> Result<bool, Error> {
        let result = self
            .connection
            .lock()
            .unwrap()
            .execute("INSERT INTO lugares (nombre) VALUES (?1)", (name.as_ref(),));

        match result {
            Ok(_) => Ok(true),
            // Code 2067 occurs when a UNIQUE constraint failed.
            Err(rusqlite::Error::SqliteFailure(error, Some(_))) if error.extended_code == 2067 => {
                Ok(false)
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Retrieve all location names in the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn names(&self) -> Result<Vec<String>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT nombre FROM lugares ORDER BY nombre")?
            .query_map([], |row| row.get(0))?
            .map(|maybe_name| maybe_name.map_err(|error| error.into()))
            .collect()
    }
}

impl CreateTable for SQLiteLocationStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS lugares (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    nombre TEXT NOT NULL UNIQUE
                    )",
            (),
        )?;

        Ok(())
    }
}
