//! Crate-wide error contract.
//!
//! # Responsibility
//! - Give every utility one error type with a small, stable taxonomy.
//!
//! # Invariants
//! - `InvalidArgument` is returned before any caller-owned value is mutated.
//! - `InvalidOperation` is reserved for violations found while processing data.
//! - Library code returns these errors and never panics on bad input.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ExtResult<T> = Result<T, ExtError>;

/// Error taxonomy shared by all extension utilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtError {
    /// A required argument is empty, unknown, or otherwise unusable.
    InvalidArgument { name: &'static str, reason: String },
    /// Input data violated the requested policy while being processed.
    InvalidOperation(String),
    /// More than one method matched on a single hierarchy level.
    Ambiguous {
        type_name: String,
        method_name: String,
        matches: usize,
    },
    /// An enumerated value outside the supported closed set.
    NotImplemented(String),
}

impl ExtError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

impl Display for ExtError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { name, reason } => {
                write!(f, "invalid argument `{name}`: {reason}")
            }
            Self::InvalidOperation(details) => write!(f, "invalid operation: {details}"),
            Self::Ambiguous {
                type_name,
                method_name,
                matches,
            } => write!(
                f,
                "ambiguous match: {matches} methods named `{method_name}` on `{type_name}`"
            ),
            Self::NotImplemented(details) => write!(f, "not implemented: {details}"),
        }
    }
}

impl Error for ExtError {}

#[cfg(test)]
mod tests {
    use super::ExtError;

    #[test]
    fn display_names_argument_and_reason() {
        let err = ExtError::invalid_argument("method_name", "must not be empty");
        assert_eq!(
            err.to_string(),
            "invalid argument `method_name`: must not be empty"
        );
    }

    #[test]
    fn display_reports_ambiguous_match_count() {
        let err = ExtError::Ambiguous {
            type_name: "Derived".to_string(),
            method_name: "run".to_string(),
            matches: 2,
        };
        assert!(err.to_string().contains("2 methods named `run`"));
    }
}
