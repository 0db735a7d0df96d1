//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::CreateTable,
    models::{ReferenceName, TransactionKind},
    stores::CategoryStore,
};

/// Creates and retrieves transaction categories to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SQLiteCategoryStore {
    /// Add a category to the database.
    ///
    /// Returns `Ok(false)` when a category with the same kind and name
    /// already exists; the uniqueness conflict is not an error.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn add(&self, kind: TransactionKind, name: ReferenceName) -> Result<bool, Error> {
        let result = self.connection.lock().unwrap().execute(
            "INSERT INTO categorias (tipo, nombre) VALUES (?1, ?2)",
            (kind, name.as_ref()),
        );

        match result {
            Ok(_) => Ok(true),
            // Code 2067 occurs when a UNIQUE constraint failed.
            Err(rusqlite::Error::SqliteFailure(error, Some(_))) if error.extended_code == 2067 => {
                Ok(false)
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Retrieve the category names for `kind` in the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn names(&self, kind: TransactionKind) -> Result<Vec<String>, Error> {
        let kind = kind.as_db_str();

        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT nombre FROM categorias WHERE tipo = :tipo ORDER BY nombre")?
            .query_map(&[(":tipo", &kind)], |row| row.get(0))?
            .map(|maybe_name| maybe_name.map_err(|error| error.into()))
            .collect()
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS categorias (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    tipo TEXT NOT NULL,
                    nombre TEXT NOT NULL,
                    UNIQUE(tipo, nombre)
                    )",
            (),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod category_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        db::initialize,
        models::{ReferenceName, TransactionKind},
    };

    use super::{CategoryStore, SQLiteCategoryStore};

    fn get_test_store() -> SQLiteCategoryStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteCategoryStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn add_category_succeeds() {
        let store = get_test_store();
        let name = ReferenceName::new("suscripciones").unwrap();

        let added = store.add(TransactionKind::Expense, name).unwrap();

        assert!(added);
        assert!(
            store
                .names(TransactionKind::Expense)
                .unwrap()
                .contains(&"Suscripciones".to_string())
        );
    }

    #[test]
    fn add_duplicate_category_returns_false() {
        let store = get_test_store();

        let first = store
            .add(
                TransactionKind::Expense,
                ReferenceName::new("comida").unwrap(),
            )
            .unwrap();
        let second = store
            .add(
                TransactionKind::Expense,
                ReferenceName::new("Comida").unwrap(),
            )
            .unwrap();

        assert!(first);
        assert!(!second);

        let names = store.names(TransactionKind::Expense).unwrap();
        let comida_count = names.iter().filter(|name| *name == "Comida").count();
        assert_eq!(comida_count, 1);
    }

    #[test]
    fn names_are_scoped_by_kind() {
        let store = get_test_store();

        store
            .add(
                TransactionKind::Income,
                ReferenceName::new("becas").unwrap(),
            )
            .unwrap();

        assert!(
            store
                .names(TransactionKind::Income)
                .unwrap()
                .contains(&"Becas".to_string())
        );
        assert!(
            !store
                .names(TransactionKind::Expense)
                .unwrap()
                .contains(&"Becas".to_string())
        );
    }

    #[test]
    fn same_name_is_allowed_under_both_kinds() {
        let store = get_test_store();
        let name = ReferenceName::new("varios").unwrap();

        assert!(store.add(TransactionKind::Income, name.clone()).unwrap());
        assert!(store.add(TransactionKind::Expense, name).unwrap());
    }

    #[test]
    fn names_are_sorted_alphabetically() {
        let store = get_test_store();

        let names = store.names(TransactionKind::Income).unwrap();

        assert_eq!(names, vec!["Inversiones", "Salario"]);
    }
}
