//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. Catalog and cart
//! records carry prices as plain JSON numbers (`29.99`); the [`decimal`] and
//! [`decimal_opt`] serde adapters convert at that boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            _ => None,
        }
    }

    fn minor_units_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest
    /// minor unit.
    ///
    /// ```
    /// use storefront_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let scaled = (amount * currency.minor_units_per_major() as f64).round();
        Self::new(scaled as i64, currency)
    }

    /// Exact conversion: rejects NaN, infinities, values that don't fit in an
    /// `i64` of minor units, and amounts finer than one minor unit (`0.125`
    /// USD), so a parsed price always converts back to the same number.
    pub fn try_from_decimal(amount: f64, currency: Currency) -> Option<Self> {
        let scaled = (amount * currency.minor_units_per_major() as f64).round();
        if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
            return None;
        }
        let money = Self::new(scaled as i64, currency);
        (money.to_decimal() == amount).then_some(money)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is below zero.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / self.currency.minor_units_per_major() as f64
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }

    /// Try to add another Money value, returning None if currencies don't
    /// match or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a scalar, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values, returning None on currency mismatch
    /// or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter: `Money` as a JSON number in major units of the default
/// currency (`29.99`).
///
/// ```rust,ignore
/// #[serde(with = "crate::money::decimal")]
/// pub price: Money,
/// ```
pub mod decimal {
    use super::{Currency, Money};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::try_from_decimal(amount, Currency::default())
            .ok_or_else(|| D::Error::custom(format!("not an exact amount: {}", amount)))
    }
}

/// Serde adapter for optional prices such as `compare_at_price`.
///
/// Use together with `#[serde(default)]` so a missing field reads as `None`.
pub mod decimal_opt {
    use super::{Currency, Money};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Option<Money>, serializer: S) -> Result<S::Ok, S::Error> {
        match money {
            Some(m) => serializer.serialize_some(&m.to_decimal()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Money>, D::Error> {
        match Option::<f64>::deserialize(deserializer)? {
            Some(amount) => Money::try_from_decimal(amount, Currency::default())
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("not an exact amount: {}", amount))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(29.99, Currency::USD);
        assert_eq!(m.amount_cents, 2999);

        let m = Money::from_decimal(100.0, Currency::JPY);
        assert_eq!(m.amount_cents, 100); // JPY has no decimals
    }

    #[test]
    fn test_try_from_decimal_rejects_non_finite() {
        assert!(Money::try_from_decimal(f64::NAN, Currency::USD).is_none());
        assert!(Money::try_from_decimal(f64::INFINITY, Currency::USD).is_none());
        assert!(Money::try_from_decimal(1e30, Currency::USD).is_none());
        assert!(Money::try_from_decimal(19.99, Currency::USD).is_some());
    }

    #[test]
    fn test_try_from_decimal_is_exact() {
        assert_eq!(Money::try_from_decimal(29.99, Currency::USD).unwrap().amount_cents, 2999);
        assert_eq!(Money::try_from_decimal(55.0, Currency::USD).unwrap().amount_cents, 5500);
        assert_eq!(Money::try_from_decimal(0.1, Currency::USD).unwrap().amount_cents, 10);
        assert!(Money::try_from_decimal(0.125, Currency::USD).is_none());
        assert!(Money::try_from_decimal(19.999, Currency::USD).is_none());
        assert!(Money::try_from_decimal(100.5, Currency::JPY).is_none());
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.display(), "$49.99");
        assert_eq!(m.display_amount(), "49.99");

        let m = Money::new(100, Currency::JPY);
        assert_eq!(m.display(), "\u{00a5}100");

        assert_eq!(Money::zero(Currency::USD).display_amount(), "0.00");
    }

    #[test]
    fn test_money_checked_arithmetic() {
        let a = Money::new(1000, Currency::USD);
        let b = Money::new(500, Currency::USD);
        assert_eq!(a.try_add(&b).unwrap().amount_cents, 1500);
        assert_eq!(a.try_multiply(3).unwrap().amount_cents, 3000);

        let huge = Money::new(i64::MAX, Currency::USD);
        assert!(huge.try_add(&a).is_none());
        assert!(huge.try_multiply(2).is_none());
    }

    #[test]
    fn test_money_currency_mismatch() {
        let usd = Money::new(1000, Currency::USD);
        let eur = Money::new(1000, Currency::EUR);
        assert!(usd.try_add(&eur).is_none());
    }

    #[test]
    fn test_try_sum() {
        let values = [Money::new(2999, Currency::USD), Money::new(14997, Currency::USD)];
        let total = Money::try_sum(values.iter(), Currency::USD).unwrap();
        assert_eq!(total.amount_cents, 17996);

        let empty: [Money; 0] = [];
        assert!(Money::try_sum(empty.iter(), Currency::USD).unwrap().is_zero());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }

    #[test]
    fn test_decimal_adapter() {
        #[derive(Serialize, Deserialize)]
        struct Priced {
            #[serde(with = "decimal")]
            price: Money,
            #[serde(default, with = "decimal_opt", skip_serializing_if = "Option::is_none")]
            compare_at_price: Option<Money>,
        }

        let parsed: Priced = serde_json::from_str(r#"{"price": 19.99}"#).unwrap();
        assert_eq!(parsed.price.amount_cents, 1999);
        assert!(parsed.compare_at_price.is_none());
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#"{"price":19.99}"#);

        let parsed: Priced =
            serde_json::from_str(r#"{"price": 55, "compare_at_price": 75}"#).unwrap();
        assert_eq!(parsed.price.amount_cents, 5500);
        assert_eq!(parsed.compare_at_price.unwrap().amount_cents, 7500);

        assert!(serde_json::from_str::<Priced>(r#"{"price": 0.125}"#).is_err());
        assert!(serde_json::from_str::<Priced>(r#"{"price": 1, "compare_at_price": 0.001}"#).is_err());
    }
}
