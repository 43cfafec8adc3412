//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are kept as exact decimals; rounding to cents only happens for
/// display and for cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in US dollars.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Adds another amount, keeping this price's currency.
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        Self::new(self.amount + other.amount, self.currency_code)
    }

    /// The amount rounded to two decimal places, halves away from zero.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(
            self.amount
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            self.currency_code,
        )
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.rounded().amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Currency symbol used when formatting prices.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Price::usd(Decimal::from(110)).display(), "$110.00");
        assert_eq!(Price::usd(Decimal::new(1999, 2)).display(), "$19.99");
        assert_eq!(
            Price::new(Decimal::new(5, 1), CurrencyCode::GBP).display(),
            "£0.50"
        );
    }

    #[test]
    fn test_times_and_plus() {
        let unit = Price::usd(Decimal::from(110));
        let total = unit.times(2).plus(Price::usd(Decimal::from(170)));
        assert_eq!(total.amount, Decimal::from(390));
        assert_eq!(unit.times(0), Price::zero(CurrencyCode::USD));
    }

    #[test]
    fn test_rounded() {
        let price = Price::usd(Decimal::new(10_005, 3));
        assert_eq!(price.rounded().amount, Decimal::new(1001, 2));
        assert_eq!(price.display(), "$10.01");
    }

    #[test]
    fn test_is_negative() {
        assert!(Price::usd(Decimal::new(-1, 0)).is_negative());
        assert!(!Price::usd(Decimal::ZERO).is_negative());
    }

    #[test]
    fn test_currency_defaults_to_usd_when_missing() {
        let price: Price = serde_json::from_str(r#"{"amount":"90"}"#).unwrap();
        assert_eq!(price.currency_code, CurrencyCode::USD);
        assert_eq!(price.amount, Decimal::from(90));
    }
}
