//! Defines the transaction model, the kind enum that splits income from
//! expenses and the draft type used to create new transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use time::Date;

use crate::{DatabaseID, Error};

/// Whether a transaction records money coming in or going out.
///
/// The database stores the kind as the Spanish strings `"Ingreso"` and
/// `"Gasto"` for compatibility with existing store files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Money earned, stored as `"Ingreso"`.
    Income,
    /// Money spent, stored as `"Gasto"`.
    Expense,
}

impl TransactionKind {
    /// The string stored in the `tipo` column for this kind.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Income => "Ingreso",
            Self::Expense => "Gasto",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ingreso" => Ok(Self::Income),
            "gasto" => Ok(Self::Expense),
            _ => Err(Error::UnknownKind(s.to_string())),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_db_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "Ingreso" => Ok(Self::Income),
            "Gasto" => Ok(Self::Expense),
            other => Err(FromSqlError::Other(
                format!("unexpected tipo value {other:?}").into(),
            )),
        }
    }
}

/// A single recorded money movement.
///
/// Transactions are immutable once created: there is no update operation,
/// only deletion by ID. The category and location are denormalized copies of
/// the reference names at the time of entry, so later additions to the
/// reference lists never change existing rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseID,
    /// When the transaction happened.
    pub date: Date,
    /// Whether money came in or went out.
    pub kind: TransactionKind,
    /// The name of the category the transaction was filed under.
    pub category: String,
    /// The amount of money that changed hands.
    pub amount: f64,
    /// An optional free-text note.
    pub note: Option<String>,
    /// The name of the place the transaction happened at.
    pub location: String,
}

/// A validated transaction that has not been added to the store yet.
///
/// The amount invariant is enforced here, at entry time. The storage schema
/// itself does not constrain `monto`, so rows inserted by other tools are
/// read back as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    /// When the transaction happened.
    pub date: Date,
    /// Whether money came in or went out.
    pub kind: TransactionKind,
    /// The name of the category the transaction is filed under.
    pub category: String,
    /// The amount of money that changed hands.
    pub amount: f64,
    /// An optional free-text note.
    pub note: Option<String>,
    /// The name of the place the transaction happened at.
    pub location: String,
}

impl TransactionDraft {
    /// Create a draft for a new transaction.
    ///
    /// # Errors
    /// Returns an [Error::InvalidAmount] if `amount` is zero, negative or not
    /// a finite number.
    pub fn new(
        date: Date,
        kind: TransactionKind,
        category: String,
        amount: f64,
        note: Option<String>,
        location: String,
    ) -> Result<Self, Error> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidAmount(amount));
        }

        Ok(Self {
            date,
            kind,
            category,
            amount,
            note,
            location,
        })
    }
}

#[cfg(test)]
mod transaction_kind_tests {
    use crate::Error;

    use super::TransactionKind;

    #[test]
    fn parses_db_strings() {
        assert_eq!("Ingreso".parse(), Ok(TransactionKind::Income));
        assert_eq!("Gasto".parse(), Ok(TransactionKind::Expense));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("ingreso".parse(), Ok(TransactionKind::Income));
        assert_eq!("GASTO".parse(), Ok(TransactionKind::Expense));
    }

    #[test]
    fn rejects_unknown_strings() {
        let parsed: Result<TransactionKind, Error> = "transferencia".parse();

        assert_eq!(parsed, Err(Error::UnknownKind("transferencia".to_string())));
    }

    #[test]
    fn displays_as_db_string() {
        assert_eq!(TransactionKind::Income.to_string(), "Ingreso");
        assert_eq!(TransactionKind::Expense.to_string(), "Gasto");
    }
}
