//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point drift in
//! the running balance. Fractions only enter through budget splits, where
//! [`Money::scale`] rounds back to whole cents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Symbol used by `Display`; the CLI can substitute its configured symbol
pub const DEFAULT_CURRENCY_SYMBOL: &str = "€";

/// Represents a monetary amount stored as cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use finanzgarten::models::Money;
    /// let amount = Money::from_cents(1050); // €10.50
    /// assert_eq!(amount.to_string(), "€10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert a decimal amount in whole units (e.g. `12.5`), rounding to cents
    pub fn from_decimal(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    /// Create a Money amount from whole units and cents
    pub const fn from_units(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiply by a fraction, rounding half away from zero to whole cents
    ///
    /// # Examples
    /// ```
    /// use finanzgarten::models::Money;
    /// assert_eq!(Money::from_cents(100_000).scale(0.3), Money::from_cents(30_000));
    /// ```
    pub fn scale(&self, fraction: f64) -> Self {
        Self((self.0 as f64 * fraction).round() as i64)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "10.50", "10,50", "-10.50", "€10.50", "$10.50" and "10" (whole units).
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        let s = s
            .strip_prefix('€')
            .or_else(|| s.strip_prefix('$'))
            .unwrap_or(s)
            .trim();

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());
        let normalized = s.replace(',', ".");

        let cents = if let Some((units, fraction)) = normalized.split_once('.') {
            if fraction.contains('.') || !fraction.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }

            let units: i64 = if units.is_empty() {
                0
            } else {
                units.parse().map_err(|_| invalid())?
            };

            // Pad or truncate to 2 digits
            let cents: i64 = match fraction.len() {
                0 => 0,
                1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
                _ => fraction[..2].parse().map_err(|_| invalid())?,
            };

            units * 100 + cents
        } else {
            normalized.parse::<i64>().map_err(|_| invalid())? * 100
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}.{:02}", sign, symbol, self.units().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(DEFAULT_CURRENCY_SYMBOL))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "€10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "€0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-€10.50");
        assert_eq!(format!("{}", Money::from_cents(-5)), "-€0.05");
        assert_eq!(Money::from_cents(5).format_with_symbol("$"), "$0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10,50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("€10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("1.x").is_err());
    }

    #[test]
    fn test_scale_rounds_to_cents() {
        assert_eq!(Money::from_cents(100_000).scale(0.5).cents(), 50_000);
        assert_eq!(Money::from_cents(100_000).scale(0.1).cents(), 10_000);
        // 333.33 * 0.5 = 166.665 -> 166.67
        assert_eq!(Money::from_cents(33_333).scale(0.5).cents(), 16_667);
        assert_eq!(Money::from_cents(1000).scale(0.0), Money::zero());
    }

    #[test]
    fn test_from_decimal() {
        assert_eq!(Money::from_decimal(12.5), Money::from_cents(1_250));
        assert_eq!(Money::from_decimal(5000.0), Money::from_units(5000, 0));
        assert_eq!(Money::from_decimal(0.1 + 0.2), Money::from_cents(30));
        assert_eq!(Money::from_decimal(-3.75), Money::from_cents(-375));
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
