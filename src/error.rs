//! Custom error types for fintrack
//!
//! This module defines the error hierarchy for the library using thiserror.
//! Lookups that miss inside the store are not errors (they are silent no-ops);
//! `NotFound` is reserved for front ends resolving user-typed identifiers.

use thiserror::Error;

/// The main error type for fintrack operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid user input caught before it reaches the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// An id prefix matched more than one record
    #[error("{entity_type} id '{prefix}' is ambiguous ({matches} matches)")]
    Ambiguous {
        entity_type: &'static str,
        prefix: String,
        matches: usize,
    },

    /// Persistence layer errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Backup import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Report / backup export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Advice collaborator errors (never shown to the user, see `advice`)
    #[error("Advice error: {0}")]
    Advice(String),
}

impl FinanceError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for incomes
    pub fn income_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for account balances
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for reserves
    pub fn reserve_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Reserve",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for fintrack operations
pub type FinanceResult<T> = Result<T, FinanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinanceError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = FinanceError::reserve_not_found("emergency");
        assert_eq!(err.to_string(), "Reserve not found: emergency");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_ambiguous_error() {
        let err = FinanceError::Ambiguous {
            entity_type: "Expense",
            prefix: "ab".into(),
            matches: 3,
        };
        assert_eq!(err.to_string(), "Expense id 'ab' is ambiguous (3 matches)");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FinanceError = io_err.into();
        assert!(matches!(err, FinanceError::Io(_)));
    }
}
