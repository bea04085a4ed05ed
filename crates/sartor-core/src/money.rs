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
//! │  OUR SOLUTION: Integer Kobo                                             │
//! │    ₦450.00 = 45000 kobo, always exact                                   │
//! │    The database, calculations, and gateway all use kobo                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Gateway Boundary
//! Paystack's amount field is denominated in kobo, the Naira minor unit.
//! Operator input arrives as a decimal Naira amount; the ONLY place a float
//! may touch money is [`Money::from_naira`], which converts `×100` with
//! round-half-away-from-zero and immediately returns to integer space.
//!
//! ## Usage
//! ```rust
//! use sartor_core::money::Money;
//!
//! // Create from kobo (preferred)
//! let price = Money::from_kobo(45_000_00); // ₦45,000.00
//!
//! // Arithmetic operations
//! let deposit = Money::from_kobo(10_000_00);
//! let outstanding = price - deposit;
//! assert_eq!(outstanding.kobo(), 35_000_00);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in kobo (the Naira minor unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for adjustments/refunds
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from kobo.
    ///
    /// ## Example
    /// ```rust
    /// use sartor_core::money::Money;
    ///
    /// let price = Money::from_kobo(4_500_000); // ₦45,000.00
    /// assert_eq!(price.kobo(), 4_500_000);
    /// ```
    #[inline]
    pub const fn from_kobo(kobo: i64) -> Self {
        Money(kobo)
    }

    /// Converts a decimal Naira amount to Money at the gateway boundary.
    ///
    /// Multiplies by 100 and rounds half away from zero, matching the
    /// conversion the payment gateway expects for its kobo amount field.
    ///
    /// ## Example
    /// ```rust
    /// use sartor_core::money::Money;
    ///
    /// assert_eq!(Money::from_naira(45000.0).kobo(), 4_500_000);
    /// assert_eq!(Money::from_naira(10.505).kobo(), 1051);
    /// ```
    ///
    /// ## Warning
    /// This is the ONLY float entry point. Never use it for values already
    /// at rest - those are kobo integers end to end.
    pub fn from_naira(naira: f64) -> Self {
        Money((naira * 100.0).round() as i64)
    }

    /// Returns the value in kobo.
    #[inline]
    pub const fn kobo(&self) -> i64 {
        self.0
    }

    /// Returns the whole-Naira portion.
    #[inline]
    pub const fn naira(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the kobo remainder (always 0-99).
    #[inline]
    pub const fn kobo_part(&self) -> i64 {
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

    /// Subtraction that never goes below zero.
    ///
    /// Used for outstanding-balance math: an over-settled order reports
    /// zero outstanding rather than a negative balance.
    #[inline]
    pub const fn saturating_sub(&self, other: Money) -> Money {
        let diff = self.0 - other.0;
        if diff < 0 {
            Money(0)
        } else {
            Money(diff)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. UI display formatting (thousand
/// separators, locale) is a frontend concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₦{}.{:02}", sign, self.naira().abs(), self.kobo_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kobo() {
        let money = Money::from_kobo(4_500_099);
        assert_eq!(money.kobo(), 4_500_099);
        assert_eq!(money.naira(), 45_000);
        assert_eq!(money.kobo_part(), 99);
    }

    #[test]
    fn test_from_naira_rounds() {
        assert_eq!(Money::from_naira(45000.0).kobo(), 4_500_000);
        assert_eq!(Money::from_naira(0.005).kobo(), 1);
        assert_eq!(Money::from_naira(10.994).kobo(), 1099);
        assert_eq!(Money::from_naira(10.995).kobo(), 1100);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_kobo(1099)), "₦10.99");
        assert_eq!(format!("{}", Money::from_kobo(500)), "₦5.00");
        assert_eq!(format!("{}", Money::from_kobo(-550)), "-₦5.50");
        assert_eq!(format!("{}", Money::from_kobo(0)), "₦0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_kobo(1000);
        let b = Money::from_kobo(500);

        assert_eq!((a + b).kobo(), 1500);
        assert_eq!((a - b).kobo(), 500);

        let mut c = a;
        c += b;
        assert_eq!(c.kobo(), 1500);
    }

    #[test]
    fn test_saturating_sub() {
        let price = Money::from_kobo(1000);
        let paid = Money::from_kobo(1000);
        assert_eq!(price.saturating_sub(paid).kobo(), 0);

        let overpaid = Money::from_kobo(1500);
        assert_eq!(price.saturating_sub(overpaid).kobo(), 0);

        let partial = Money::from_kobo(400);
        assert_eq!(price.saturating_sub(partial).kobo(), 600);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_kobo(100);
        assert!(positive.is_positive());

        let negative = Money::from_kobo(-100);
        assert!(negative.is_negative());
    }
}
