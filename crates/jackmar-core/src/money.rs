//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floating point prices:                                            │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart total summed from float line totals drifts by fractions of a   │
//! │  cent and only looks right because it is rounded for display.          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "10.00" is parsed once into 1000 cents                               │
//! │    every line total and cart total is exact                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use jackmar_core::money::Money;
//!
//! let price = Money::parse("1,234.5").unwrap();
//! assert_eq!(price.cents(), 123450);
//! assert_eq!(price.to_string(), "$1,234.50");
//! assert_eq!(price.to_amount_string(), "1,234.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money is Used
/// ```text
/// catalog price "10.00" ──► Money::parse ──► LineItem.unit_price
///                                                   │
///                              × quantity ◄─────────┘
///                                   │
///                                   ▼
///                   LineItem::line_total ──► Cart::total ──► "$25.50"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use jackmar_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal price string such as `"10"`, `"5.5"`, `"$1,234.50"`.
    ///
    /// ## Rules
    /// - Optional leading `-`, then an optional `$`
    /// - Commas are accepted as thousands separators and ignored
    /// - At most two fraction digits (no silent rounding)
    ///
    /// ## Example
    /// ```rust
    /// use jackmar_core::money::Money;
    ///
    /// assert_eq!(Money::parse("10.00").unwrap().cents(), 1000);
    /// assert_eq!(Money::parse("5.5").unwrap().cents(), 550);
    /// assert!(Money::parse("1.999").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let digits: String = rest.chars().filter(|c| *c != ',').collect();

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits.as_str(), ""),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected digits before the decimal point"));
        }
        if fraction.len() > 2 || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("at most two decimal places are allowed"));
        }

        let too_large = || invalid("amount is too large");
        let whole: i64 = whole.parse().map_err(|_| too_large())?;
        let minor: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| too_large())? * 10,
            _ => fraction.parse().map_err(|_| too_large())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(too_large)?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// `Cart` refuses adds whose totals would not fit, so amounts read back
    /// from a cart never saturate.
    ///
    /// ## Example
    /// ```rust
    /// use jackmar_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// `self × qty`, or `None` if the product does not fit in an `i64`.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// `self + other`, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Formats the amount with exactly two decimals and en-US thousands
    /// grouping, without a currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use jackmar_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(2550).to_amount_string(), "25.50");
    /// assert_eq!(Money::from_cents(123456789).to_amount_string(), "1,234,567.89");
    /// assert_eq!(Money::zero().to_amount_string(), "0.00");
    /// ```
    pub fn to_amount_string(&self) -> String {
        let abs = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, group_thousands(abs / 100), abs % 100)
    }
}

/// Inserts a comma between every group of three digits.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the value the way it appears on the cart and receipt:
/// `$1,234.50`, `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.to_amount_string();
        match amount.strip_prefix('-') {
            Some(positive) => write!(f, "-${}", positive),
            None => write!(f, "${}", amount),
        }
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturating addition; see `multiply_quantity`.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
