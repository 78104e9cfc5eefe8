//! # kirana-core: Pure Business Logic for Kirana POS
//!
//! This crate is the **heart** of Kirana POS. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kirana POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front-end (scan field, keypad, prompts)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Register session (apps/register)             │   │
//! │  │    scan_barcode, search, void_selected, set_quantity, ...       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kirana-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌─────────────┐  ┌───────────┐ │   │
//! │  │   │   types   │  │   money   │  │ transaction │  │ validation│ │   │
//! │  │   │   Item    │  │   Money   │  │ Transaction │  │   rules   │ │   │
//! │  │   │ LineItem  │  │  TaxCalc  │  │   Summary   │  │  parsing  │ │   │
//! │  │   └───────────┘  └───────────┘  └─────────────┘  └───────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CATALOG • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              kirana-catalog (lookup collaborator)               │   │
//! │  │        exact barcode lookup, substring search, void ack         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, LineItem, Summary, TaxRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`transaction`] - The transaction engine
//! - [`error`] - Domain error types
//! - [`validation`] - Keypad input parsing and rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Catalog, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use kirana_core::money::Money;
//! use kirana_core::transaction::Transaction;
//! use kirana_core::types::Item;
//!
//! let mut txn = Transaction::new();
//! txn.add_item(&Item {
//!     barcode: "1234567890123".to_string(),
//!     description: "Dove Soap Original 100g".to_string(),
//!     qty: 1,
//!     weight: 0.1,
//!     price_paise: 2500,
//! });
//!
//! // ₹25.00 at 5% tax → total ₹26.25
//! assert_eq!(txn.summary().total, Money::from_paise(2625));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod transaction;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kirana_core::Money` instead of
// `use kirana_core::money::Money`

pub use error::{TransactionError, TransactionResult};
pub use money::Money;
pub use transaction::{Transaction, MAX_AMOUNT_PAISE, MAX_LINE_QUANTITY};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The single process-wide tax rate: 5%, applied flat to the receipt net.
///
/// ## Why a constant?
/// This version has exactly one deployment locale with one flat rate.
/// Making it runtime-configurable is explicitly out of scope; a future
/// version would move it to per-store configuration.
pub const TAX_RATE: types::TaxRate = types::TaxRate::from_bps(500);
