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
//! │  OUR SOLUTION: Integer Won                                              │
//! │    The won has no minor unit in everyday use, so every price,          │
//! │    order total and report total is a whole i64 number of won.          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kiosk_core::money::Money;
//!
//! let americano = Money::from_won(4000);
//! let latte = Money::from_won(4500);
//!
//! let total = Money::checked_sum([americano, latte]).unwrap();
//! assert_eq!(total.won(), 8500);
//! ```
//!
//! Totals are built with checked addition only. A sum past `i64::MAX` is a
//! `None`, never a wrapped or panicking value.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in won.
///
/// ## Design Decisions
/// - **i64 (signed)**: Same width as the SQLite INTEGER columns it maps to
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Transparent serde**: Serializes as a bare number (`4000`)
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Product.price ──► Σ over ordered products ──► Order.total_price        │
/// │                                                                         │
/// │  Σ Order.total_price (PAYMENT_COMPLETED, one day) ──► report mail text  │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from a whole number of won.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    ///
    /// let price = Money::from_won(4000);
    /// assert_eq!(price.won(), 4000);
    /// ```
    #[inline]
    pub const fn from_won(won: i64) -> Self {
        Money(won)
    }

    /// Returns the value in won.
    #[inline]
    pub const fn won(&self) -> i64 {
        self.0
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

    /// Adds two amounts, or `None` if the result does not fit in an `i64`.
    #[inline]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(won) => Some(Money(won)),
            None => None,
        }
    }

    /// Sums every amount, or `None` as soon as the running total overflows.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    ///
    /// let total = Money::checked_sum([Money::from_won(1000), Money::from_won(3000)]);
    /// assert_eq!(total, Some(Money::from_won(4000)));
    ///
    /// let huge = Money::checked_sum([Money::from_won(i64::MAX), Money::from_won(1)]);
    /// assert_eq!(huge, None);
    /// ```
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), Money::checked_add)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the bare amount ("12000").
///
/// ## Note
/// The report mail embeds this literally, so no grouping separators or
/// currency symbol are added here.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_won() {
        let money = Money::from_won(4500);
        assert_eq!(money.won(), 4500);
        assert!(money.is_positive());
    }

    #[test]
    fn test_display_is_bare_number() {
        assert_eq!(format!("{}", Money::from_won(12000)), "12000");
        assert_eq!(format!("{}", Money::zero()), "0");
    }

    #[test]
    fn test_checked_add() {
        let a = Money::from_won(1000);
        let b = Money::from_won(500);

        assert_eq!(a.checked_add(b), Some(Money::from_won(1500)));
        assert_eq!(Money::from_won(i64::MAX).checked_add(b), None);
    }

    #[test]
    fn test_checked_sum_of_empty_is_zero() {
        assert_eq!(Money::checked_sum(Vec::new()), Some(Money::zero()));
    }

    #[test]
    fn test_checked_sum() {
        let prices = [Money::from_won(1000), Money::from_won(3000), Money::from_won(5000)];
        assert_eq!(Money::checked_sum(prices), Some(Money::from_won(9000)));
    }

    #[test]
    fn test_checked_sum_stops_at_overflow() {
        let prices = [Money::from_won(i64::MAX), Money::from_won(i64::MAX), Money::from_won(-5)];
        assert_eq!(Money::checked_sum(prices), None);
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Money::from_won(4000)).unwrap();
        assert_eq!(json, "4000");
    }
}
