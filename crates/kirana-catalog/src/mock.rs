//! # Mock Catalog
//!
//! The in-memory catalog backend used in this version: a fixed table of
//! 25 grocery items keyed by EAN-13 barcode, with artificial latency on
//! every call so callers exercise the same pending/busy discipline a real
//! backend would force on them.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use kirana_core::Item;
use tokio::time::sleep;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};

/// Simulated round-trip to the (imaginary) catalog service.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(300);

// =============================================================================
// Mock Catalog
// =============================================================================

/// In-memory [`Catalog`] implementation with artificial latency.
///
/// ## Usage
/// ```rust
/// use kirana_catalog::{Catalog, MockCatalog};
/// use std::time::Duration;
///
/// # async fn demo() {
/// let catalog = MockCatalog::with_latency(Duration::ZERO);
/// let item = catalog.lookup("1234567890123").await.unwrap();
/// assert_eq!(item.description, "Dove Soap Original 100g");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockCatalog {
    items: HashMap<String, Item>,
    latency: Duration,
}

impl MockCatalog {
    /// Creates the mock catalog with the default 300 ms latency.
    pub fn new() -> Self {
        Self::with_latency(DEFAULT_LATENCY)
    }

    /// Creates the mock catalog with a custom latency. Tests use
    /// `Duration::ZERO`.
    pub fn with_latency(latency: Duration) -> Self {
        MockCatalog {
            items: seed_items(),
            latency,
        }
    }

    /// Number of items in the table.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the table is empty (never, for the seeded mock).
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn lookup(&self, barcode: &str) -> CatalogResult<Item> {
        sleep(self.latency).await;
        debug!(barcode = %barcode, "catalog lookup");

        self.items
            .get(barcode)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(barcode.to_string()))
    }

    async fn search(&self, query: &str) -> CatalogResult<Vec<Item>> {
        sleep(self.latency).await;
        let needle = query.to_lowercase();

        let mut results: Vec<Item> = self
            .items
            .values()
            .filter(|item| item.description.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        // HashMap iteration order is arbitrary; keep results stable for display
        results.sort_by(|a, b| a.barcode.cmp(&b.barcode));

        debug!(query = %query, count = results.len(), "catalog search");
        Ok(results)
    }

    async fn acknowledge_void(&self, barcode: &str) -> CatalogResult<()> {
        sleep(self.latency).await;
        debug!(barcode = %barcode, "void acknowledged");
        // The mock backend accepts every void unconditionally
        Ok(())
    }
}

// =============================================================================
// Seed Data
// =============================================================================

/// The fixed item table, prices in paise.
fn seed_items() -> HashMap<String, Item> {
    let rows: &[(&str, &str, i64, f64, i64)] = &[
        ("1234567890123", "Dove Soap Original 100g", 1, 0.1, 2500),
        ("1234567890124", "Head & Shoulders Shampoo 400ml", 1, 0.4, 12000),
        ("1234567890125", "Colgate Strong Teeth 200g", 1, 0.2, 4800),
        ("1234567890126", "Lux Soap Rose 100g", 1, 0.1, 2200),
        ("1234567890127", "Pantene Shampoo Gold 340ml", 1, 0.34, 9500),
        ("1234567890128", "Dettol Antiseptic Liquid 550ml", 1, 0.55, 8500),
        ("1234567890129", "Maggi Noodles Masala 70g", 2, 0.07, 1400),
        ("1234567890130", "Britannia Good Day Cookies 100g", 1, 0.1, 3000),
        ("1234567890131", "Tata Salt 1kg", 1, 1.0, 2000),
        ("1234567890132", "Amul Butter 500g", 1, 0.5, 25000),
        ("1234567890133", "Parle-G Biscuits 200g", 3, 0.2, 2500),
        ("1234567890134", "Surf Excel Detergent 1kg", 1, 1.0, 18000),
        ("1234567890135", "Clinic Plus Shampoo 175ml", 1, 0.175, 6500),
        ("1234567890136", "Cadbury Dairy Milk 55g", 2, 0.055, 3500),
        ("1234567890137", "Vim Dishwash Gel 500ml", 1, 0.5, 7500),
        ("1234567890138", "Sunsilk Shampoo Black Shine 340ml", 1, 0.34, 11000),
        ("1234567890139", "Kurkure Masala Munch 90g", 1, 0.09, 2000),
        ("1234567890140", "Pepsodent Toothpaste 200g", 1, 0.2, 5500),
        ("1234567890141", "Rin Detergent Bar 250g", 2, 0.25, 1500),
        ("1234567890142", "Nestle Maggi Sauce 1kg", 1, 1.0, 12000),
        ("1234567890143", "Fair & Lovely Cream 50g", 1, 0.05, 8500),
        ("1234567890144", "Haldiram Bhujia 200g", 1, 0.2, 4500),
        ("1234567890145", "Johnson Baby Powder 200g", 1, 0.2, 9500),
        ("1234567890146", "Lizol Disinfectant 500ml", 1, 0.5, 7000),
        ("1234567890147", "Bingo Mad Angles 72g", 1, 0.072, 1800),
    ];

    rows.iter()
        .map(|&(barcode, description, qty, weight, price_paise)| {
            (
                barcode.to_string(),
                Item {
                    barcode: barcode.to_string(),
                    description: description.to_string(),
                    qty,
                    weight,
                    price_paise,
                },
            )
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
