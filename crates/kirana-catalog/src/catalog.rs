//! # Catalog Trait
//!
//! The contract between the register and whatever backs item master data.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Contract                                  │
//! │                                                                         │
//! │  lookup(barcode)         exact match; NotFound on miss                  │
//! │  search(query)           case-insensitive substring over descriptions;  │
//! │                          empty result is Ok(vec![]), never an error     │
//! │  acknowledge_void(bc)    idempotent acknowledgment                      │
//! │                                                                         │
//! │  All three may be slow (network, database). Callers must treat them     │
//! │  as pending operations and block duplicate submission while one is      │
//! │  in flight — see Register's busy flag.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use kirana_core::Item;

use crate::error::CatalogResult;

/// Item master data access.
///
/// An implementer may back this with any data source as long as the
/// contract above holds. This version ships [`crate::MockCatalog`].
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Exact-match retrieval by barcode. Fails with
    /// [`crate::CatalogError::NotFound`] when the barcode is absent.
    async fn lookup(&self, barcode: &str) -> CatalogResult<Item>;

    /// Returns all items whose description contains `query`
    /// case-insensitively. Nothing matching is an empty vec, not an error.
    ///
    /// Callers are expected to have normalized the query already (the
    /// empty-query short-circuit happens upstream).
    async fn search(&self, query: &str) -> CatalogResult<Vec<Item>>;

    /// Acknowledges the void of a line with the backend.
    async fn acknowledge_void(&self, barcode: &str) -> CatalogResult<()>;
}
