//! Defines the location store trait.

use crate::{Error, models::ReferenceName};

/// Creates and retrieves the locations transactions are recorded at.
pub trait LocationStore {
    /// Add a location.
    ///
    /// Locations are not scoped by transaction kind: the name is unique
    /// across the whole store. Returns `Ok(false)` without inserting anything
    /// when the name already exists.
    fn add(&self, name: ReferenceName) -> Result<bool, Error>;

    /// Get the names of all locations, in alphabetical order.
    fn names(&self) -> Result<Vec<String>, Error>;
}
