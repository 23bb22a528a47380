//! Fixed-point monetary amount with two decimal places.
//!
//! Stored as integer cents (`NUMERIC(18,2)` semantics without floating point
//! drift). Text form is always `<units>.<two digits>`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Largest amount representable in 18 digits with scale 2.
const MAX_CENTS: i64 = 999_999_999_999_999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    pub fn from_cents(cents: i64) -> Option<Self> {
        (0..=MAX_CENTS).contains(&cents).then_some(Self(cents))
    }

    pub fn cents(self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePriceError(String);

impl Display for ParsePriceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid price `{}`", self.0)
    }
}

impl std::error::Error for ParsePriceError {}

impl FromStr for Price {
    type Err = ParsePriceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParsePriceError(value.to_string());
        let trimmed = value.trim();
        let (units, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

        let digits_only = |text: &str| text.bytes().all(|b| b.is_ascii_digit());
        if units.is_empty() || !digits_only(units) || !digits_only(fraction) || fraction.len() > 2
        {
            return Err(invalid());
        }

        let units: i64 = units.parse().map_err(|_| invalid())?;
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        units
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .and_then(Self::from_cents)
            .ok_or_else(invalid)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a non-negative amount with at most two decimal places")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Price, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Price, E> {
        i64::try_from(value)
            .ok()
            .and_then(|units| units.checked_mul(100))
            .and_then(Price::from_cents)
            .ok_or_else(|| E::custom(format!("price {value} out of range")))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Price, E> {
        value
            .checked_mul(100)
            .and_then(Price::from_cents)
            .ok_or_else(|| E::custom(format!("price {value} out of range")))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Price, E> {
        // JSON numbers like 19.9 arrive as floats; re-read them through text.
        format!("{value:.2}").parse().map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::Price;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!("100".parse::<Price>().unwrap().cents(), 10_000);
        assert_eq!("100.5".parse::<Price>().unwrap().cents(), 10_050);
        assert_eq!("0.07".parse::<Price>().unwrap().cents(), 7);
    }

    #[test]
    fn rejects_malformed_amounts() {
        for value in ["", "-1", "1.234", "abc", ".50", "1.-2", "1e3"] {
            assert!(value.parse::<Price>().is_err(), "accepted `{value}`");
        }
    }

    #[test]
    fn displays_with_two_decimals() {
        assert_eq!(Price::from_cents(10_000).unwrap().to_string(), "100.00");
        assert_eq!(Price::from_cents(5).unwrap().to_string(), "0.05");
        assert!(Price::from_cents(-1).is_none());
    }

    #[test]
    fn json_accepts_strings_and_numbers() {
        let from_text: Price = serde_json::from_str("\"19.90\"").unwrap();
        let from_float: Price = serde_json::from_str("19.9").unwrap();
        let from_int: Price = serde_json::from_str("200").unwrap();
        assert_eq!(from_text, from_float);
        assert_eq!(from_int.cents(), 20_000);
        assert_eq!(serde_json::to_string(&from_text).unwrap(), "\"19.90\"");
    }
}
