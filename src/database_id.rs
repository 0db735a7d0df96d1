//! Defines an alias for the integer type used for database row IDs.

/// Alias for the type of the IDs used in the application database.
pub type DatabaseID = i64;
