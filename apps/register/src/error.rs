//! # Register Error Type
//!
//! Unified error type for register commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Kirana POS                             │
//! │                                                                         │
//! │  Front-end                   Register session                           │
//! │  ─────────                   ────────────────                           │
//! │                                                                         │
//! │  scan / qty / void ...                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command method                                                  │  │
//! │  │  Result<T, RegisterError>                                        │  │
//! │  │         │                                                        │  │
//! │  │  CatalogError::NotFound ──────────────┐                          │  │
//! │  │         │                             ▼                          │  │
//! │  │  TransactionError::* ──────────► RegisterError ─────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Every error is terminal for one action; the transaction is left       │
//! │  exactly as it was, and the session stays usable.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! The struct serializes with a machine-readable `code` and a
//! human-readable `message`, so a front-end can branch on the code and
//! display the message.

use kirana_catalog::CatalogError;
use kirana_core::TransactionError;
use serde::Serialize;

/// Error returned from register commands.
///
/// What a front-end receives when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "item not found for barcode 0000000000000"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for register command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Catalog lookup failed for a scanned barcode
    NotFound,

    /// User-supplied quantity/price/discount failed validation
    InvalidInput,

    /// An operation requiring a selected line had none
    NoSelection,

    /// Duplicate return request on the same line
    AlreadyReturned,

    /// A collaborator call failed (e.g. void acknowledgment)
    OperationFailed,

    /// Another catalog call is still in flight
    Busy,
}

impl RegisterError {
    /// Creates a new register error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        RegisterError {
            code,
            message: message.into(),
        }
    }

    /// A catalog call is already pending.
    pub fn busy() -> Self {
        RegisterError::new(
            ErrorCode::Busy,
            "another catalog request is still in progress",
        )
    }
}

/// Converts engine errors, keeping the category.
impl From<TransactionError> for RegisterError {
    fn from(err: TransactionError) -> Self {
        let code = match err {
            TransactionError::NoSelection => ErrorCode::NoSelection,
            TransactionError::AlreadyReturned => ErrorCode::AlreadyReturned,
            TransactionError::NoSuchLine { .. }
            | TransactionError::InvalidQuantity { .. }
            | TransactionError::InvalidPrice { .. }
            | TransactionError::InvalidDiscount { .. } => ErrorCode::InvalidInput,
        };
        RegisterError::new(code, err.to_string())
    }
}

/// Converts catalog errors, keeping the category.
impl From<CatalogError> for RegisterError {
    fn from(err: CatalogError) -> Self {
        let code = match err {
            CatalogError::NotFound(_) => ErrorCode::NotFound,
            CatalogError::VoidRejected(_) => ErrorCode::OperationFailed,
        };
        RegisterError::new(code, err.to_string())
    }
}

impl std::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for RegisterError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_error_codes() {
        let err: RegisterError = TransactionError::NoSelection.into();
        assert_eq!(err.code, ErrorCode::NoSelection);

        let err: RegisterError = TransactionError::AlreadyReturned.into();
        assert_eq!(err.code, ErrorCode::AlreadyReturned);

        let err: RegisterError = TransactionError::InvalidQuantity {
            reason: "quantity cannot be zero".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_catalog_error_codes() {
        let err: RegisterError = CatalogError::NotFound("0".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: RegisterError = CatalogError::VoidRejected("0".to_string()).into();
        assert_eq!(err.code, ErrorCode::OperationFailed);
    }

    #[test]
    fn test_serializes_with_code_and_message() {
        let err = RegisterError::busy();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "BUSY");
        assert!(json["message"].is_string());
    }
}
