//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A receipt is a long chain of additions; float drift accumulates.       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹25.00 is stored as 2500. Every sum, discount and tax line is        │
//! │    exact integer arithmetic; only Display renders decimals.             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kirana_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(2500); // ₹25.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // ₹50.00
//! let total = price + Money::from_paise(500);    // ₹30.00
//!
//! // Parse keypad input exactly (no floats involved)
//! let typed: Money = "120.50".parse().unwrap();
//! assert_eq!(typed.paise(), 12050);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for returned lines
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the system flows through this type:
/// unit prices, line totals, the receipt discount, tax and totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::money::Money;
    ///
    /// let price = Money::from_paise(2500); // Represents ₹25.00
    /// assert_eq!(price.paise(), 2500);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from major and minor units (rupees and paise).
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::money::Money;
    ///
    /// let price = Money::from_rupees_paise(120, 50); // ₹120.50
    /// assert_eq!(price.paise(), 12050);
    ///
    /// let refund = Money::from_rupees_paise(-5, 50); // -₹5.50 (returned line)
    /// assert_eq!(refund.paise(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_rupees_paise(-5, 50)` = -₹5.50, not -₹4.50
    #[inline]
    pub const fn from_rupees_paise(rupees: i64, paise: i64) -> Self {
        if rupees < 0 {
            Money(rupees * 100 - paise)
        } else {
            Money(rupees * 100 + paise)
        }
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (paise) portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates tax on this amount.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides half-up rounding (5000/10000 = 0.5) so a
    /// half-paisa of tax rounds to a whole paisa instead of truncating.
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::money::Money;
    /// use kirana_core::types::TaxRate;
    ///
    /// let net = Money::from_paise(2500);  // ₹25.00
    /// let rate = TaxRate::from_bps(500);  // 5%
    ///
    /// // ₹25.00 × 5% = ₹1.25
    /// assert_eq!(net.calculate_tax(rate).paise(), 125);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 to prevent overflow on large amounts
        let tax_paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(tax_paise as i64)
    }

    /// Multiplies money by a signed quantity.
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(1400); // ₹14.00
    /// assert_eq!(unit_price.multiply_quantity(2).paise(), 2800);
    /// assert_eq!(unit_price.multiply_quantity(-1).paise(), -1400);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Error parsing a decimal money string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid amount: {input}")]
pub struct ParseMoneyError {
    pub input: String,
}

/// Parses keypad-style decimal input (`"25"`, `"25.5"`, `"25.00"`, `"-3.50"`)
/// into exact paise. Anything non-numeric, or with more than two fraction
/// digits, is rejected — never rounded.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParseMoneyError {
            input: s.to_string(),
        };

        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() || frac.len() > 2 {
            return Err(err());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(err());
        }

        let rupees: i64 = whole.parse().map_err(|_| err())?;
        // "5" after the point means 50 paise, not 5
        let paise: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| err())? * 10,
            _ => frac.parse().map_err(|_| err())?,
        };

        let magnitude = rupees
            .checked_mul(100)
            .and_then(|r| r.checked_add(paise))
            .ok_or_else(err)?;

        Ok(Money(if negative { -magnitude } else { magnitude }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays money with exactly two decimals and the ₹ glyph, e.g. `₹25.00`,
/// `-₹120.50`. This is the deployment locale's receipt format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(12050);
        assert_eq!(money.paise(), 12050);
        assert_eq!(money.rupees(), 120);
        assert_eq!(money.paise_part(), 50);
    }

    #[test]
    fn test_from_rupees_paise() {
        let money = Money::from_rupees_paise(25, 0);
        assert_eq!(money.paise(), 2500);

        let negative = Money::from_rupees_paise(-5, 50);
        assert_eq!(negative.paise(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(2500)), "₹25.00");
        assert_eq!(format!("{}", Money::from_paise(2625)), "₹26.25");
        assert_eq!(format!("{}", Money::from_paise(-12000)), "-₹120.00");
        assert_eq!(format!("{}", Money::from_paise(0)), "₹0.00");
        assert_eq!(format!("{}", Money::from_paise(5)), "₹0.05");
    }

    #[test]
    fn test_parse_whole_and_decimals() {
        assert_eq!("25".parse::<Money>().unwrap().paise(), 2500);
        assert_eq!("25.00".parse::<Money>().unwrap().paise(), 2500);
        assert_eq!("25.5".parse::<Money>().unwrap().paise(), 2550);
        assert_eq!("0.05".parse::<Money>().unwrap().paise(), 5);
        assert_eq!("-3.50".parse::<Money>().unwrap().paise(), -350);
        assert_eq!(" 14.00 ".parse::<Money>().unwrap().paise(), 1400);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("abc".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
        assert!("12.345".parse::<Money>().is_err()); // sub-paisa precision
        assert!("1.2.3".parse::<Money>().is_err());
        assert!(".50".parse::<Money>().is_err());
        assert!("12,00".parse::<Money>().is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((a * 3).paise(), 3000);

        let mut c = a;
        c += b;
        c -= Money::from_paise(100);
        assert_eq!(c.paise(), 1400);
    }

    #[test]
    fn test_tax_at_five_percent() {
        // ₹25.00 at 5% = ₹1.25, no rounding needed
        let net = Money::from_paise(2500);
        assert_eq!(net.calculate_tax(TaxRate::from_bps(500)).paise(), 125);

        // ₹0.10 at 5% = ₹0.005 → rounds up to ₹0.01
        let tiny = Money::from_paise(10);
        assert_eq!(tiny.calculate_tax(TaxRate::from_bps(500)).paise(), 1);

        // Zero net, zero tax
        assert_eq!(Money::zero().calculate_tax(TaxRate::from_bps(500)).paise(), 0);
    }

    #[test]
    fn test_multiply_quantity_signed() {
        let unit_price = Money::from_paise(12000);
        assert_eq!(unit_price.multiply_quantity(3).paise(), 36000);
        assert_eq!(unit_price.multiply_quantity(-1).paise(), -12000);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_paise(100).is_positive());
        assert!(Money::from_paise(-100).is_negative());
        assert_eq!(Money::from_paise(-550).abs().paise(), 550);
    }
}
