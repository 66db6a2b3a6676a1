//! Error types for unit resolution.

use std::fmt;

/// Error type for unit parsing and resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// A form schema declared a unit tag this crate does not know.
    ///
    /// Known tags are `"cm"`, `"cms"` and `"ms"`.
    UnknownUnit(String),
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownUnit(tag) => {
                write!(f, "Unknown source unit tag: {:?}", tag)
            }
        }
    }
}

impl std::error::Error for UnitError {}
