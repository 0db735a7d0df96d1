//! Defines the validated name type shared by the category and location
//! reference lists.

use std::fmt::Display;

use unicode_segmentation::UnicodeSegmentation;

use crate::Error;

/// The normalized name of a category or location.
///
/// Names are trimmed and capitalized: the first grapheme is uppercased and
/// the remainder lowercased, so "comida" and "Comida" become the same name
/// and cannot coexist in a reference list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReferenceName(String);

impl ReferenceName {
    /// Create a normalized reference name.
    ///
    /// # Errors
    /// Returns an [Error::EmptyName] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        let mut graphemes = name.graphemes(true);
        let first = graphemes
            .next()
            .expect("a non-empty string has a first grapheme");

        Ok(Self(
            first.to_uppercase() + &graphemes.as_str().to_lowercase(),
        ))
    }

    /// Create a reference name without validation or normalization.
    ///
    /// The caller should ensure that the string is not empty and already
    /// normalized. This function has `_unchecked` in the name but is not
    /// `unsafe`, because violating the invariant causes incorrect behaviour
    /// but does not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for ReferenceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ReferenceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
