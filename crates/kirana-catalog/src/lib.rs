//! # kirana-catalog: Item Catalog Lookup Service
//!
//! The transaction engine's external collaborator: barcode lookup,
//! description search and void acknowledgment.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Register session ──► Catalog trait ──► MockCatalog (this version)     │
//! │                                      └─► real service (future)          │
//! │                                                                         │
//! │   All calls carry artificial latency so the register exercises the      │
//! │   same single-in-flight discipline a networked backend would demand.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - The `Catalog` trait (the contract)
//! - [`mock`] - `MockCatalog`, the seeded in-memory backend
//! - [`error`] - `CatalogError`

pub mod catalog;
pub mod error;
pub mod mock;

pub use catalog::Catalog;
pub use error::{CatalogError, CatalogResult};
pub use mock::{MockCatalog, DEFAULT_LATENCY};
