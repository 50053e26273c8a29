//! # Money Module
//!
//! Provides the `Money` type for car prices and sales revenue.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  As a binary float:                                                     │
//! │    18500.555 is stored as 18500.55499999...  → rounds to 18500.55  ❌  │
//! │                                                                         │
//! │  OUR SOLUTION: parse the decimal text digit by digit into cents         │
//! │    "18500.555" → 1850055 cents + third digit 5 → 1850056 cents  ✅     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The database column is `NUMERIC(12, 2)`; values cross the boundary as
//! integer cents and never pass through `f64`.
//!
//! ## Usage
//! ```rust
//! use dealership_core::money::Money;
//!
//! let price: Money = "18500.555".parse().unwrap();
//! assert_eq!(price.cents(), 1_850_056);
//! assert_eq!(price.to_string(), "18500.56");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: the parser accepts a sign; validation rejects negatives
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Display**: plain two-decimal text ("18500.56"), the format report
///   rows use for prices and revenue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use dealership_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (dollars).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Why a piece of text is not a decimal amount.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseMoneyError {
    #[error("empty amount")]
    Empty,

    #[error("not a decimal number: {0:?}")]
    NotDecimal(String),

    #[error("amount too large")]
    TooLarge,
}

/// Parses decimal text into cents, rounding half-up at the second decimal.
///
/// Accepts an optional sign, digits, and an optional fractional part
/// (`"18500"`, `"18500.5"`, `".5"`, `"5."`, `"-3.25"`). Exponents, `inf`
/// and `nan` are rejected. Rounding is applied to the magnitude, so
/// `-0.005` becomes `-0.01`.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (negative, unsigned) = match text.as_bytes()[0] {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(ParseMoneyError::NotDecimal(text.to_string()));
        }

        let mut cents: i64 = 0;
        for digit in whole.bytes() {
            cents = cents
                .checked_mul(10)
                .and_then(|c| c.checked_add(i64::from(digit - b'0')))
                .ok_or(ParseMoneyError::TooLarge)?;
        }
        cents = cents.checked_mul(100).ok_or(ParseMoneyError::TooLarge)?;

        let mut fraction_digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = fraction_digits.next().unwrap_or(0);
        let hundredths = fraction_digits.next().unwrap_or(0);
        let round_up = fraction_digits.next().is_some_and(|d| d >= 5);

        cents = cents
            .checked_add(tenths * 10 + hundredths + i64::from(round_up))
            .ok_or(ParseMoneyError::TooLarge)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal text without a currency symbol: `18500.56`, `-5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
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

    fn parse(s: &str) -> Result<Money, ParseMoneyError> {
        s.parse()
    }

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1_850_056).to_string(), "18500.56");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_rounds_half_up_at_third_decimal() {
        assert_eq!(parse("18500.555").unwrap().cents(), 1_850_056);
        assert_eq!(parse("18500.554").unwrap().cents(), 1_850_055);
        assert_eq!(parse("0.995").unwrap().cents(), 100);
        assert_eq!(parse("19.999999").unwrap().cents(), 2000);
        assert_eq!(parse("1.00499").unwrap().cents(), 100);
    }

    #[test]
    fn test_parse_accepts_plain_forms() {
        assert_eq!(parse("18500").unwrap().cents(), 1_850_000);
        assert_eq!(parse("  42.5 ").unwrap().cents(), 4250);
        assert_eq!(parse(".5").unwrap().cents(), 50);
        assert_eq!(parse("5.").unwrap().cents(), 500);
        assert_eq!(parse("+7.01").unwrap().cents(), 701);
        assert_eq!(parse("0").unwrap(), Money::zero());
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!(parse("-0.01").unwrap().cents(), -1);
        assert_eq!(parse("-3.255").unwrap().cents(), -326);
        assert!(parse("-0.01").unwrap().is_negative());
    }

    #[test]
    fn test_parse_rejects_non_decimal_text() {
        assert_eq!(parse(""), Err(ParseMoneyError::Empty));
        assert_eq!(parse("   "), Err(ParseMoneyError::Empty));
        for bad in ["abc", "1e3", "1.2.3", ".", "-", "12,50", "inf", "NaN", "$10"] {
            assert!(
                matches!(parse(bad), Err(ParseMoneyError::NotDecimal(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_overflow() {
        assert_eq!(parse("99999999999999999999"), Err(ParseMoneyError::TooLarge));
    }
}
