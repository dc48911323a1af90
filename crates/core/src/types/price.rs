//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog sends prices as JSON numbers (`19.99`, `10`). They are parsed
//! into a [`Decimal`] through their shortest textual form, so `19.99` stays
//! exactly `19.99` and line totals never pick up binary floating point noise.
//!
//! Two display forms exist:
//!
//! - [`Display`](std::fmt::Display) shows the amount as the catalog sent it
//!   (`$10`, `$19.99`). Product cards and cart lines use this.
//! - [`Price::rounded`] always shows two decimals (`$39.98`). Totals use this.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative price in the store's single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// Returns `None` for negative amounts.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            None
        } else {
            Some(Self(amount))
        }
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// This price multiplied by a quantity, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Format with two-decimal rounding (e.g., "$39.98").
    #[must_use]
    pub fn rounded(&self) -> String {
        format!("${:.2}", self.0.round_dp(2))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0.normalize())
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates at [`Decimal::MAX`].
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).ok_or_else(|| {
            serde::de::Error::custom(format!("price cannot be negative: {amount}"))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_catalog_precision() {
        assert_eq!(Price::from_cents(1000).to_string(), "$10");
        assert_eq!(Price::from_cents(1999).to_string(), "$19.99");
        assert_eq!(Price::from_cents(10995).to_string(), "$109.95");
    }

    #[test]
    fn test_rounded_total() {
        let total = Price::from_cents(1999).times(2);
        assert_eq!(total.rounded(), "$39.98");
        assert_eq!(Price::ZERO.rounded(), "$0.00");
        assert_eq!(Price::from_cents(1000).rounded(), "$10.00");
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_cents(1999), Price::from_cents(1), Price::from_cents(500)]
            .into_iter()
            .sum();
        assert_eq!(total.rounded(), "$25.00");
    }

    #[test]
    fn test_deserialize_json_numbers_exactly() {
        let price: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(price, Price::from_cents(1999));

        let price: Price = serde_json::from_str("10").unwrap();
        assert_eq!(price, Price::from_cents(1000));

        let price: Price = serde_json::from_str("22.3").unwrap();
        assert_eq!(price.times(3).rounded(), "$66.90");
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let price: Price = serde_json::from_str("100000000000000000000").unwrap();
        let line = price.times(u32::MAX);
        assert_eq!(line.amount(), Decimal::MAX);

        let total: Price = [line, price, Price::from_cents(1)].into_iter().sum();
        assert_eq!(total.amount(), Decimal::MAX);
        assert!(total.rounded().starts_with('$'));
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let result: Result<Price, _> = serde_json::from_str("-1.5");
        assert!(result.is_err());
    }

    #[test]
    fn test_new_rejects_negative() {
        assert!(Price::new(Decimal::new(-1, 0)).is_none());
        assert_eq!(Price::new(Decimal::ZERO), Some(Price::ZERO));
    }
}
