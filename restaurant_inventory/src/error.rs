//! Error types for restaurant_inventory

use thiserror::Error;

/// Unified error type for inventory operations
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The persistent store rejected or failed an operation
    /// (connection loss, constraint violation, query error)
    #[error("Database error: {0}")]
    Store(#[from] rusqlite::Error),
    /// Operator typed something that is not a valid value for `field`
    #[error("Invalid {field}: {input:?} ({reason})")]
    InputShape {
        field: &'static str,
        input: String,
        reason: &'static str,
    },
    /// Console input reached end of stream
    #[error("Input closed")]
    InputClosed,
    /// Console or filesystem I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InventoryError {
    /// Builds an input-shape error for `field`.
    pub fn input_shape(field: &'static str, input: &str, reason: &'static str) -> Self {
        InventoryError::InputShape {
            field,
            input: input.to_string(),
            reason,
        }
    }

    /// True when the persistent store caused the failure
    pub fn is_store_error(&self) -> bool {
        matches!(self, InventoryError::Store(_))
    }

    /// True for errors the menu loop can survive by re-prompting or
    /// reporting and carrying on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            InventoryError::Store(_) | InventoryError::InputShape { .. }
        )
    }
}

/// Result alias for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_keeps_underlying_cause() {
        let err = InventoryError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(err.is_store_error());
        assert!(err.is_recoverable());
        assert!(err.to_string().starts_with("Database error: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn input_shape_is_not_a_store_error() {
        let err = InventoryError::input_shape("ID", "abc", "expected a whole number");
        assert!(!err.is_store_error());
        assert!(err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "Invalid ID: \"abc\" (expected a whole number)"
        );
    }

    #[test]
    fn input_closed_ends_the_session() {
        assert!(!InventoryError::InputClosed.is_recoverable());
    }
}
