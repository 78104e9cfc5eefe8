//! # Transaction Engine
//!
//! The core of Kirana POS: the rules governing how scanning, voiding,
//! returning and adjusting items mutate the list of line items, and how
//! the monetary summary is derived from that list.
//!
//! ## State Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Transaction State                                 │
//! │                                                                         │
//! │  items: Vec<LineItem>          ordered, insertion = scan order          │
//! │  selected: Option<usize>       None whenever items is empty             │
//! │  receipt_discount: Money       flat, receipt-level, never per-line      │
//! │                                                                         │
//! │  Per-line state machine (the only state-like behavior):                 │
//! │                                                                         │
//! │      ┌────────┐  mark_return   ┌──────────┐                             │
//! │      │ normal │ ──────────────►│ returned │   (one-way, no un-return)   │
//! │      └────┬───┘                └────┬─────┘                             │
//! │           │      remove_selected    │                                   │
//! │           └──────────┬──────────────┘                                   │
//! │                      ▼                                                  │
//! │                   removed          (one-way)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! Every operation either applies fully or returns an error leaving the
//! transaction untouched. Validation happens before any field is written.

use serde::{Deserialize, Serialize};

use crate::error::{TransactionError, TransactionResult};
use crate::money::Money;
use crate::types::{Item, LineItem, Summary};
use crate::TAX_RATE;

// =============================================================================
// Keyed-input bounds
// =============================================================================

/// Largest quantity magnitude a single row accepts.
///
/// Far beyond any real basket; the bound exists so a fat-fingered keypad
/// entry is rejected instead of overflowing the line-total arithmetic.
pub const MAX_LINE_QUANTITY: i64 = 9_999;

/// Largest keyed unit price or receipt discount, in paise (₹10,00,000.00).
pub const MAX_AMOUNT_PAISE: i64 = 100_000_000;

// =============================================================================
// Transaction
// =============================================================================

/// The current in-memory transaction: one receipt being rung up.
///
/// Created empty at session start; lives only for the session. There is no
/// cross-transaction state and nothing is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transaction {
    items: Vec<LineItem>,
    selected: Option<usize>,
    receipt_discount: Money,
}

impl Transaction {
    /// Creates a new empty transaction.
    pub fn new() -> Self {
        Transaction::default()
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    /// The ordered receipt rows, in scan/add order.
    #[inline]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The currently selected row index, if any.
    #[inline]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The currently selected row, if any.
    pub fn selected_item(&self) -> Option<&LineItem> {
        self.selected.map(|i| &self.items[i])
    }

    /// The flat receipt-level discount.
    #[inline]
    pub fn receipt_discount(&self) -> Money {
        self.receipt_discount
    }

    /// Checks whether the receipt has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Appends a row built from catalog data and selects it.
    ///
    /// Pure append, no failure mode: invalid items were already rejected
    /// upstream by the catalog lookup. Scanning the same barcode twice
    /// produces two rows.
    ///
    /// ## Returns
    /// The index of the new row.
    pub fn add_item(&mut self, item: &Item) -> usize {
        self.items.push(LineItem::from_item(item));
        let index = self.items.len() - 1;
        self.selected = Some(index);
        index
    }

    /// Selects the row at `index`.
    pub fn select(&mut self, index: usize) -> TransactionResult<()> {
        if index >= self.items.len() {
            return Err(TransactionError::NoSuchLine { index });
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Removes the selected row and clears the selection.
    ///
    /// The selection is never left dangling: it goes straight to `None`,
    /// whatever row was removed.
    ///
    /// ## Returns
    /// The removed row (the void flow logs its barcode).
    pub fn remove_selected(&mut self) -> TransactionResult<LineItem> {
        let index = self.selected.ok_or(TransactionError::NoSelection)?;
        let removed = self.items.remove(index);
        self.selected = None;
        Ok(removed)
    }

    /// Overrides the selected row's quantity.
    ///
    /// Zero is rejected; a row with nothing on it is a void, not a
    /// quantity change. Magnitudes above [`MAX_LINE_QUANTITY`] are
    /// rejected too. The magnitude of the input is taken and the sign
    /// re-applied from `is_returned`, so a returned row stays negative
    /// whatever sign the cashier typed. (Sign normalization confirmed as
    /// intended product behavior.)
    pub fn set_quantity(&mut self, new_quantity: i64) -> TransactionResult<()> {
        let index = self.selected.ok_or(TransactionError::NoSelection)?;
        if new_quantity == 0 {
            return Err(TransactionError::InvalidQuantity {
                reason: "quantity cannot be zero".to_string(),
            });
        }
        // checked_abs also catches i64::MIN, whose magnitude has no i64 form
        let magnitude = new_quantity
            .checked_abs()
            .filter(|m| *m <= MAX_LINE_QUANTITY)
            .ok_or_else(|| TransactionError::InvalidQuantity {
                reason: format!("quantity cannot exceed {MAX_LINE_QUANTITY}"),
            })?;

        let line = &mut self.items[index];
        line.quantity = if line.is_returned { -magnitude } else { magnitude };
        Ok(())
    }

    /// Overrides the selected row's unit price.
    ///
    /// Negative prices and prices above [`MAX_AMOUNT_PAISE`] are rejected;
    /// the signed quantity is preserved, so repricing a returned row keeps
    /// its total negative.
    pub fn set_unit_price(&mut self, new_price: Money) -> TransactionResult<()> {
        let index = self.selected.ok_or(TransactionError::NoSelection)?;
        if new_price.is_negative() {
            return Err(TransactionError::InvalidPrice {
                reason: "price cannot be negative".to_string(),
            });
        }
        if new_price.paise() > MAX_AMOUNT_PAISE {
            return Err(TransactionError::InvalidPrice {
                reason: format!("price cannot exceed {}", Money::from_paise(MAX_AMOUNT_PAISE)),
            });
        }

        self.items[index].unit_price = new_price;
        Ok(())
    }

    /// Converts the selected row to a return.
    ///
    /// One-directional: the quantity is forced to `-abs(quantity)` and the
    /// flag set. A second return request on the same row is rejected with
    /// [`TransactionError::AlreadyReturned`] — an idempotence guard, not a
    /// toggle.
    pub fn mark_return(&mut self) -> TransactionResult<()> {
        let index = self.selected.ok_or(TransactionError::NoSelection)?;
        let line = &mut self.items[index];
        if line.is_returned {
            return Err(TransactionError::AlreadyReturned);
        }

        line.quantity = -line.quantity.abs();
        line.is_returned = true;
        Ok(())
    }

    /// Sets the flat receipt discount.
    ///
    /// Absolute set, not additive: repeated calls overwrite, they do not
    /// accumulate. Negative amounts and amounts above [`MAX_AMOUNT_PAISE`]
    /// are rejected.
    pub fn apply_discount(&mut self, amount: Money) -> TransactionResult<()> {
        if amount.is_negative() {
            return Err(TransactionError::InvalidDiscount {
                reason: "discount cannot be negative".to_string(),
            });
        }
        if amount.paise() > MAX_AMOUNT_PAISE {
            return Err(TransactionError::InvalidDiscount {
                reason: format!("discount cannot exceed {}", Money::from_paise(MAX_AMOUNT_PAISE)),
            });
        }
        self.receipt_discount = amount;
        Ok(())
    }

    /// Aborts the receipt: unconditionally clears rows, selection and
    /// discount back to the initial empty state.
    ///
    /// Destructive. The explicit "are you sure" confirmation is the
    /// front-end's contract, not enforced here.
    pub fn abort(&mut self) {
        self.items.clear();
        self.selected = None;
        self.receipt_discount = Money::zero();
    }

    // -------------------------------------------------------------------------
    // Derived summary
    // -------------------------------------------------------------------------

    /// Computes the transaction summary from current state.
    ///
    /// Pure recomputation on every call — nothing is cached, so the
    /// summary can never go stale relative to the rows. Safe on an empty
    /// transaction (all fields zero).
    ///
    /// ## Formulas
    /// ```text
    /// item_count = rows on the receipt (not sum of quantities)
    /// subtotal   = Σ line_total
    /// net        = subtotal - discount
    /// tax        = net × 5%
    /// total      = net + tax
    /// ```
    pub fn summary(&self) -> Summary {
        let subtotal = self
            .items
            .iter()
            .fold(Money::zero(), |sum, line| sum + line.line_total());
        let discount = self.receipt_discount;
        let net = subtotal - discount;
        let tax = net.calculate_tax(TAX_RATE);

        Summary {
            item_count: self.items.len(),
            subtotal,
            discount,
            net,
            tax,
            total: net + tax,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
