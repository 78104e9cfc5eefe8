//! # Error Types
//!
//! Domain-specific error types for kirana-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kirana-core errors (this file)                                        │
//! │  └── TransactionError  - Engine rule violations & invalid input        │
//! │                                                                         │
//! │  kirana-catalog errors (separate crate)                                │
//! │  └── CatalogError      - Lookup miss, void acknowledgment failure      │
//! │                                                                         │
//! │  Register errors (in app)                                              │
//! │  └── RegisterError     - What the front-end sees (serialized)          │
//! │                                                                         │
//! │  Flow: TransactionError / CatalogError → RegisterError → Front-end     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (index, raw input, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every error is terminal for one user action; a failed operation
//!    leaves the transaction exactly as it was (atomicity per operation)

use thiserror::Error;

// =============================================================================
// Transaction Error
// =============================================================================

/// Transaction engine errors.
///
/// Each variant maps to one user-facing condition; the session layer
/// translates them to display messages without losing the category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// An operation requiring a selected line was invoked with none
    /// selected.
    #[error("no line item is selected")]
    NoSelection,

    /// A selection was requested for a row that does not exist.
    #[error("no line item at index {index}")]
    NoSuchLine { index: usize },

    /// Quantity input failed validation (non-numeric or zero).
    #[error("invalid quantity: {reason}")]
    InvalidQuantity { reason: String },

    /// Price input failed validation (non-numeric or negative).
    #[error("invalid price: {reason}")]
    InvalidPrice { reason: String },

    /// Discount input failed validation (non-numeric or negative).
    #[error("invalid discount: {reason}")]
    InvalidDiscount { reason: String },

    /// Duplicate return request: the selected line is already a return.
    #[error("line item has already been marked for return")]
    AlreadyReturned,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with TransactionError.
pub type TransactionResult<T> = Result<T, TransactionError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TransactionError::NoSelection.to_string(),
            "no line item is selected"
        );
        assert_eq!(
            TransactionError::NoSuchLine { index: 7 }.to_string(),
            "no line item at index 7"
        );
        assert_eq!(
            TransactionError::InvalidQuantity {
                reason: "quantity cannot be zero".to_string()
            }
            .to_string(),
            "invalid quantity: quantity cannot be zero"
        );
    }
}
