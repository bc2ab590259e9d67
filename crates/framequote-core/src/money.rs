//! # Money Module
//!
//! Provides the `Money` type every quote amount ends up in.
//!
//! ## Where Floats Stop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FRAME PRICING IS RATE × AREA ARITHMETIC                                │
//! │                                                                         │
//! │  Acrylic: 0.009 $/sq in × 880 sq in × 3.0  = 23.76                      │
//! │  Frame:   2.5634 $/ft  × 15 ft            = 38.451                     │
//! │                                                                         │
//! │  Rates carry 3-4 decimals, so the pipeline runs in f64 dollars.        │
//! │  Rounding happens ONCE, at the edge:                                    │
//! │                                                                         │
//! │    f64 dollars ──► Money::from_dollars() ──► i64 cents ──► "105.74"    │
//! │                                                                         │
//! │  Never round intermediate values; that is how golden quotes drift.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use framequote_core::money::Money;
//!
//! let item_total = Money::from_dollars(38.451 * 2.75); // 105.74025
//! assert_eq!(item_total.cents(), 10574);
//! assert_eq!(item_total.to_fixed(), "105.74");
//!
//! let total = item_total + Money::from_cents(1900);
//! assert_eq!(total.to_string(), "$124.74");
//! ```

use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: balance goes negative when the deposit exceeds the total
/// - **Serialized as a fixed two-decimal string**: `"105.74"`, never `105.74`,
///   so the order form never re-rounds a float. Fields holding Money are
///   exported to TypeScript with `#[ts(type = "string")]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts f64 dollars to cents, rounding half away from zero.
    ///
    /// Non-finite input (NaN, ±inf) becomes zero; the engine never lets a
    /// broken rate poison a whole quote.
    ///
    /// ## Example
    /// ```rust
    /// use framequote_core::money::Money;
    ///
    /// assert_eq!(Money::from_dollars(115.3485).cents(), 11535);
    /// assert_eq!(Money::from_dollars(-0.005).cents(), -1);
    /// assert_eq!(Money::from_dollars(f64::NAN).cents(), 0);
    /// ```
    pub fn from_dollars(dollars: f64) -> Self {
        if !dollars.is_finite() {
            return Money::zero();
        }
        // Nudge past representation error: 1.005 * 100 = 100.49999999999999.
        let scaled = dollars * 100.0;
        let nudged = scaled + scaled.signum() * 1e-7;
        Money(nudged.round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value as f64 dollars.
    #[inline]
    pub fn as_dollars(&self) -> f64 {
        self.0 as f64 / 100.0
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

    /// Renders as a fixed two-decimal string without currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use framequote_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(11800).to_fixed(), "118.00");
    /// assert_eq!(Money::from_cents(-550).to_fixed(), "-5.50");
    /// assert_eq!(Money::from_cents(-5).to_fixed(), "-0.05");
    /// ```
    pub fn to_fixed(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }

}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    /// Saturates at the i64 bounds.
    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_fixed())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
