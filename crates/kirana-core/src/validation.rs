//! # Validation Module
//!
//! Input validation for values typed at the register prompts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-end prompt                                             │
//! │  ├── Collects raw keypad text                                          │
//! │  └── No trust placed here                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Numeric parsing (exact, no floats)                                │
//! │  └── Range rules (zero quantity, negative price/discount)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Transaction engine                                           │
//! │  └── Re-checks its own invariants before mutating                      │
//! │                                                                         │
//! │  Defense in depth: a bad value never reaches a line item               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kirana_core::validation::{parse_quantity, parse_price};
//!
//! assert_eq!(parse_quantity("3").unwrap(), 3);
//! assert!(parse_quantity("0").is_err());
//! assert_eq!(parse_price("25.50").unwrap().paise(), 2550);
//! ```

use crate::error::{TransactionError, TransactionResult};
use crate::money::Money;
use crate::transaction::{MAX_AMOUNT_PAISE, MAX_LINE_QUANTITY};

// =============================================================================
// Quantity
// =============================================================================

/// Parses a quantity typed at the prompt.
///
/// ## Rules
/// - Must parse as a whole number (sign allowed; the engine normalizes it)
/// - Zero is rejected: an empty row is a void, not a quantity change
/// - Magnitudes above [`MAX_LINE_QUANTITY`] are rejected
pub fn parse_quantity(input: &str) -> TransactionResult<i64> {
    let qty: i64 = input.trim().parse().map_err(|_| {
        TransactionError::InvalidQuantity {
            reason: format!("'{}' is not a number", input.trim()),
        }
    })?;

    if qty == 0 {
        return Err(TransactionError::InvalidQuantity {
            reason: "quantity cannot be zero".to_string(),
        });
    }
    if qty.checked_abs().map_or(true, |m| m > MAX_LINE_QUANTITY) {
        return Err(TransactionError::InvalidQuantity {
            reason: format!("quantity cannot exceed {MAX_LINE_QUANTITY}"),
        });
    }

    Ok(qty)
}

// =============================================================================
// Monetary amounts
// =============================================================================

/// Parses a unit price typed at the prompt.
///
/// ## Rules
/// - Must be a valid decimal amount (at most two fraction digits)
/// - Must be non-negative; zero is allowed (free items)
/// - Must be at most [`MAX_AMOUNT_PAISE`]
pub fn parse_price(input: &str) -> TransactionResult<Money> {
    let price: Money = input.parse().map_err(|_| TransactionError::InvalidPrice {
        reason: format!("'{}' is not a valid amount", input.trim()),
    })?;

    if price.is_negative() {
        return Err(TransactionError::InvalidPrice {
            reason: "price cannot be negative".to_string(),
        });
    }
    if price.paise() > MAX_AMOUNT_PAISE {
        return Err(TransactionError::InvalidPrice {
            reason: format!("price cannot exceed {}", Money::from_paise(MAX_AMOUNT_PAISE)),
        });
    }

    Ok(price)
}

/// Parses a receipt discount typed at the prompt.
///
/// ## Rules
/// - Must be a valid decimal amount (at most two fraction digits)
/// - Must be non-negative; zero clears the discount
/// - Must be at most [`MAX_AMOUNT_PAISE`]
pub fn parse_discount(input: &str) -> TransactionResult<Money> {
    let amount: Money = input
        .parse()
        .map_err(|_| TransactionError::InvalidDiscount {
            reason: format!("'{}' is not a valid amount", input.trim()),
        })?;

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

    Ok(amount)
}

// =============================================================================
// Search query
// =============================================================================

/// Normalizes a search query.
///
/// Empty or whitespace-only queries come back as `None`: the caller
/// short-circuits to an empty result set without touching the catalog.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3").unwrap(), 3);
        assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
        assert_eq!(parse_quantity("-2").unwrap(), -2);

        assert!(matches!(
            parse_quantity("0"),
            Err(TransactionError::InvalidQuantity { .. })
        ));
        assert!(parse_quantity("abc").is_err());
        assert!(parse_quantity("1.5").is_err());
        assert!(parse_quantity("").is_err());
    }

    #[test]
    fn test_parse_quantity_out_of_range() {
        assert_eq!(parse_quantity("9999").unwrap(), MAX_LINE_QUANTITY);

        assert!(matches!(
            parse_quantity("10000"),
            Err(TransactionError::InvalidQuantity { .. })
        ));
        assert!(parse_quantity("4000000000000000").is_err());
        // i64::MIN, whose magnitude has no i64 form
        assert!(parse_quantity("-9223372036854775808").is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("120.00").unwrap().paise(), 12000);
        assert_eq!(parse_price("0").unwrap().paise(), 0);
        assert_eq!(parse_price("25.5").unwrap().paise(), 2550);

        assert!(matches!(
            parse_price("-5"),
            Err(TransactionError::InvalidPrice { .. })
        ));
        assert!(parse_price("lots").is_err());
        assert!(parse_price("1.234").is_err());
        // Over the keyed-amount cap (₹10,00,000.00)
        assert!(matches!(
            parse_price("1000000.01"),
            Err(TransactionError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_parse_discount() {
        assert_eq!(parse_discount("3.00").unwrap().paise(), 300);
        assert_eq!(parse_discount("0").unwrap().paise(), 0);

        assert!(matches!(
            parse_discount("-1"),
            Err(TransactionError::InvalidDiscount { .. })
        ));
        assert!(parse_discount("x").is_err());
        assert!(matches!(
            parse_discount("1000000.01"),
            Err(TransactionError::InvalidDiscount { .. })
        ));
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("soap"), Some("soap".to_string()));
        assert_eq!(normalize_query("  soap  "), Some("soap".to_string()));
        assert_eq!(normalize_query(""), None);
        assert_eq!(normalize_query("   "), None);
    }
}
