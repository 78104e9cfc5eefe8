//! # Catalog Error Types
//!
//! Failures surfaced by the catalog collaborator. Both variants are
//! terminal for one user action; the register reports them and leaves the
//! transaction untouched.

use thiserror::Error;

/// Catalog operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Exact-match lookup failed: the scanned barcode is not in the
    /// catalog.
    #[error("item not found for barcode {0}")]
    NotFound(String),

    /// The backend refused to acknowledge a void.
    ///
    /// The mock backend never produces this; the variant exists for real
    /// backends and for test doubles exercising the void-failure path.
    #[error("void acknowledgment failed for barcode {0}")]
    VoidRejected(String),
}

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;
