//! # Domain Types
//!
//! Core domain types used throughout Kirana POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │    LineItem     │   │    Summary      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  barcode        │──►│  barcode        │──►│  item_count     │       │
//! │  │  description    │   │  quantity (±)   │   │  subtotal       │       │
//! │  │  qty (default)  │   │  unit_price     │   │  net, tax       │       │
//! │  │  price_paise    │   │  is_returned    │   │  total          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │     catalog master        one receipt row       fully derived           │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │    TaxRate      │   500 bps = 5%, the single process-wide rate       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5% (the flat receipt tax in this version)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Item
// =============================================================================

/// Catalog master data for one scannable product.
///
/// This is what the catalog lookup returns; the transaction engine copies
/// it into a [`LineItem`] and never reaches back into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Barcode (EAN-13 in the seeded catalog).
    pub barcode: String,

    /// Display text shown to the cashier and on the receipt.
    pub description: String,

    /// Default quantity applied when the item is scanned.
    pub qty: i64,

    /// Unit weight in kilograms. Informational only, never used in
    /// arithmetic.
    pub weight: f64,

    /// Unit price in paise.
    pub price_paise: i64,
}

impl Item {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One row of the current transaction, corresponding to one add/scan event.
///
/// ## Design Notes
/// - Catalog data is frozen on add (snapshot pattern): a later catalog
///   price change does not touch rows already on the receipt.
/// - `quantity` is signed: positive for a sale line, negative exactly when
///   `is_returned` is set. It is never zero after any mutation.
/// - The line total is a derived method, not a field, so it can never
///   drift out of sync with `quantity * unit_price`.
/// - The same barcode may appear on several rows; each scan is its own row.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Barcode of the catalog item this row was built from.
    pub barcode: String,

    /// Description at time of adding (frozen).
    pub description: String,

    /// Signed quantity. Negative iff the row has been marked for return.
    pub quantity: i64,

    /// Unit weight in kilograms (informational).
    pub weight: f64,

    /// Unit price at time of adding (frozen until a price override).
    pub unit_price: Money,

    /// Set once by a return; a second return on the same row is rejected.
    pub is_returned: bool,

    /// When this row was added to the receipt.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Builds a receipt row from catalog master data.
    pub fn from_item(item: &Item) -> Self {
        LineItem {
            barcode: item.barcode.clone(),
            description: item.description.clone(),
            quantity: item.qty,
            weight: item.weight,
            unit_price: item.price(),
            is_returned: false,
            added_at: Utc::now(),
        }
    }

    /// The line total: `quantity * unit_price`, recomputed on demand.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Summary
// =============================================================================

/// The running transaction summary shown next to the cart.
///
/// Fully derived from the line items and the receipt discount; never
/// mutated independently. See [`crate::transaction::Transaction::summary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Summary {
    /// Number of rows on the receipt (not the sum of quantities).
    pub item_count: usize,

    /// Sum of all line totals, before discount and tax.
    pub subtotal: Money,

    /// The flat receipt-level discount.
    pub discount: Money,

    /// `subtotal - discount`.
    pub net: Money,

    /// `net × TAX_RATE`.
    pub tax: Money,

    /// `net + tax`.
    pub total: Money,
}

impl Summary {
    /// The all-zero summary of an empty transaction.
    pub const fn empty() -> Self {
        Summary {
            item_count: 0,
            subtotal: Money::zero(),
            discount: Money::zero(),
            net: Money::zero(),
            tax: Money::zero(),
            total: Money::zero(),
        }
    }
}

impl Default for Summary {
    fn default() -> Self {
        Summary::empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn soap() -> Item {
        Item {
            barcode: "1234567890123".to_string(),
            description: "Dove Soap Original 100g".to_string(),
            qty: 1,
            weight: 0.1,
            price_paise: 2500,
        }
    }

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(500);
        assert_eq!(rate.bps(), 500);
        assert!((rate.percentage() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_line_item_from_item_freezes_catalog_data() {
        let line = LineItem::from_item(&soap());
        assert_eq!(line.barcode, "1234567890123");
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_price.paise(), 2500);
        assert!(!line.is_returned);
        assert_eq!(line.line_total().paise(), 2500);
    }

    #[test]
    fn test_line_total_follows_signed_quantity() {
        let mut line = LineItem::from_item(&soap());
        line.quantity = -3;
        assert_eq!(line.line_total().paise(), -7500);
    }

    #[test]
    fn test_empty_summary_is_all_zero() {
        let summary = Summary::empty();
        assert_eq!(summary.item_count, 0);
        assert!(summary.subtotal.is_zero());
        assert!(summary.total.is_zero());
    }
}
