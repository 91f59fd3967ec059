//! Num type for handling loosely-formatted numeric input.
//!
//! This module provides the `Num` type which wraps an optional `Decimal` and
//! handles values typed the way people actually type them: decimal commas,
//! dot thousands separators, currency suffixes, stray whitespace.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Rendered in place of a missing value. An empty field is not zero and must
/// never display as one.
const EMPTY_PLACEHOLDER: &str = "—";

/// A numeric field value: either a finite `Decimal` or explicitly empty.
///
/// Parsing never fails. Anything that cannot be read as a number becomes the
/// empty value, which keeps data entry forgiving: "120,50", "120.50 €" and
/// "  120,5" all land on the same `Decimal`, while "abc" or "" land on empty.
///
/// # Examples
///
/// Decimal-comma input:
/// ```
/// # use drivelog::model::Num;
/// let n = Num::parse_loose("10,5");
/// assert_eq!(n.value().unwrap().to_string(), "10.5");
/// ```
///
/// European thousands separators and a currency suffix:
/// ```
/// # use drivelog::model::Num;
/// let n = Num::parse_loose("1.234,56 €");
/// assert_eq!(n.value().unwrap().to_string(), "1234.56");
/// ```
///
/// Empty is not zero:
/// ```
/// # use drivelog::model::Num;
/// assert!(Num::parse_loose("").is_empty());
/// assert_eq!(Num::parse_loose("").display_plain(), "—");
/// assert_eq!(Num::parse_loose("0").display_plain(), "0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Num(Option<Decimal>);

impl Num {
    /// The empty value.
    pub const EMPTY: Num = Num(None);

    /// Creates a `Num` holding `value`.
    pub const fn new(value: Decimal) -> Self {
        Self(Some(value))
    }

    /// Returns the underlying `Decimal`, or `None` when empty.
    pub fn value(&self) -> Option<Decimal> {
        self.0
    }

    /// Returns true if no value is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Parses user input, leniently.
    ///
    /// Everything except ASCII digits, commas, dots and minus signs is
    /// discarded first, so currency symbols, spaces and unit suffixes vanish.
    /// When both `.` and `,` remain, dots are treated as thousands separators
    /// and removed, and the first comma becomes the decimal point. With only
    /// commas present, the first comma becomes the decimal point. Blank or
    /// unparseable input yields the empty value, never an error.
    ///
    /// There is no range or sign validation: a minus sign that survives the
    /// character filter is kept.
    pub fn parse_loose(raw: &str) -> Num {
        let filtered: String = raw
            .trim()
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
            .collect();
        if filtered.is_empty() {
            return Num::EMPTY;
        }

        let normalized = if filtered.contains(',') && filtered.contains('.') {
            filtered.replace('.', "").replacen(',', ".", 1)
        } else {
            filtered.replacen(',', ".", 1)
        };
        let normalized = normalized.strip_suffix('.').unwrap_or(&normalized);

        match Decimal::from_str(normalized) {
            Ok(value) => Num(Some(value)),
            Err(_) => Num::EMPTY,
        }
    }

    /// Formats a non-monetary value: thousands grouping, natural fraction of
    /// up to three decimal places. Empty renders as the placeholder.
    ///
    /// ```
    /// # use drivelog::model::Num;
    /// assert_eq!(Num::parse_loose("152340").display_plain(), "152.340");
    /// assert_eq!(Num::parse_loose("10,5").display_plain(), "10,5");
    /// ```
    pub fn display_plain(&self) -> String {
        let Some(value) = self.0 else {
            return EMPTY_PLACEHOLDER.to_string();
        };

        let rounded = value.round_dp(3).normalize();
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let magnitude = rounded.abs();

        let int_part = magnitude.trunc();
        let mut out = european(&format_num::format_num!(
            ",.0",
            int_part.to_f64().unwrap_or_default()
        ));

        let frac = magnitude.fract().normalize();
        if !frac.is_zero() {
            out.push(',');
            out.push_str(frac.to_string().trim_start_matches("0."));
        }

        if negative {
            format!("-{out}")
        } else {
            out
        }
    }

    /// Formats a monetary value: thousands grouping, exactly two decimal
    /// places, ` €` suffix. Empty renders as the placeholder.
    ///
    /// ```
    /// # use drivelog::model::Num;
    /// assert_eq!(Num::parse_loose("1234,56").display_eur(), "1.234,56 €");
    /// assert_eq!(Num::EMPTY.display_eur(), "—");
    /// ```
    pub fn display_eur(&self) -> String {
        let Some(value) = self.0 else {
            return EMPTY_PLACEHOLDER.to_string();
        };
        let grouped = european(&format_num::format_num!(
            ",.2",
            value.to_f64().unwrap_or_default()
        ));
        format!("{grouped} €")
    }
}

/// Swaps the anglophone separators produced by `format_num` for the European
/// convention: `.` groups thousands, `,` marks the decimal.
fn european(formatted: &str) -> String {
    formatted
        .chars()
        .map(|c| match c {
            ',' => '.',
            '.' => ',',
            other => other,
        })
        .collect()
}

/// Loose parsing cannot fail, so `FromStr` is infallible. This lets clap use
/// `Num` directly as an argument type.
impl FromStr for Num {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Num::parse_loose(s))
    }
}

impl From<Decimal> for Num {
    fn from(value: Decimal) -> Self {
        Num::new(value)
    }
}

impl From<i64> for Num {
    fn from(value: i64) -> Self {
        Num::new(Decimal::from(value))
    }
}

/// In the datastore a present value is a native JSON number and an empty
/// value is the empty string. Zero and empty stay distinguishable.
impl Serialize for Num {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Some(value) => {
                if value.fract().is_zero() {
                    if let Some(int) = value.to_i64() {
                        return serializer.serialize_i64(int);
                    }
                }
                serializer.serialize_f64(value.to_f64().unwrap_or_default())
            }
            None => serializer.serialize_str(""),
        }
    }
}

impl<'de> Deserialize<'de> for Num {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NumVisitor)
    }
}

struct NumVisitor;

impl serde::de::Visitor<'_> for NumVisitor {
    type Value = Num;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number or an empty string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        // A stored string goes back through loose parsing; junk degrades to
        // empty instead of poisoning the whole load.
        Ok(Num::parse_loose(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        // Rust prints the shortest round-tripping representation, so going
        // through the string keeps 10.5 as exactly 10.5.
        Ok(Decimal::from_str(&v.to_string())
            .map(Num::new)
            .unwrap_or(Num::EMPTY))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Num::new(Decimal::from(v)))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Num::new(Decimal::from(v)))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Num::EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_integer() {
        let n = Num::parse_loose("10");
        assert_eq!(n.value(), Some(Decimal::from(10)));
    }

    #[test]
    fn test_parse_decimal_comma() {
        let n = Num::parse_loose("10,5");
        assert_eq!(n.value(), Some(Decimal::from_str("10.5").unwrap()));
    }

    #[test]
    fn test_parse_thousands_dot_decimal_comma() {
        let n = Num::parse_loose("1.234,56");
        assert_eq!(n.value(), Some(Decimal::from_str("1234.56").unwrap()));
    }

    #[test]
    fn test_parse_currency_suffix() {
        let n = Num::parse_loose("10 €");
        assert_eq!(n.value(), Some(Decimal::from(10)));
    }

    #[test]
    fn test_parse_currency_suffix_with_comma() {
        let n = Num::parse_loose("32,40€");
        assert_eq!(n.value(), Some(Decimal::from_str("32.40").unwrap()));
    }

    #[test]
    fn test_parse_empty_string() {
        assert!(Num::parse_loose("").is_empty());
    }

    #[test]
    fn test_parse_whitespace_only() {
        assert!(Num::parse_loose("   ").is_empty());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(Num::parse_loose("abc").is_empty());
    }

    #[test]
    fn test_parse_negative_passes_through() {
        let n = Num::parse_loose("-12,5");
        assert_eq!(n.value(), Some(Decimal::from_str("-12.5").unwrap()));
    }

    #[test]
    fn test_parse_trailing_decimal_point() {
        let n = Num::parse_loose("10.");
        assert_eq!(n.value(), Some(Decimal::from(10)));
    }

    #[test]
    fn test_parse_multiple_commas_is_empty() {
        // Only the first comma becomes a decimal point; the leftover comma
        // makes the value unparseable.
        assert!(Num::parse_loose("1,2,3").is_empty());
    }

    #[test]
    fn test_parse_us_style_both_separators() {
        // With both separators present, dots are always treated as grouping.
        let n = Num::parse_loose("1,234.56");
        assert_eq!(n.value(), Some(Decimal::from_str("1.23456").unwrap()));
    }

    #[test]
    fn test_display_plain_grouping() {
        assert_eq!(Num::parse_loose("152340").display_plain(), "152.340");
    }

    #[test]
    fn test_display_plain_fraction() {
        assert_eq!(Num::parse_loose("10,5").display_plain(), "10,5");
    }

    #[test]
    fn test_display_plain_small_fraction_keeps_leading_zero() {
        assert_eq!(Num::parse_loose("10,05").display_plain(), "10,05");
    }

    #[test]
    fn test_display_plain_zero_is_not_placeholder() {
        assert_eq!(Num::parse_loose("0").display_plain(), "0");
    }

    #[test]
    fn test_display_plain_empty() {
        assert_eq!(Num::EMPTY.display_plain(), "—");
    }

    #[test]
    fn test_display_plain_negative_fraction() {
        assert_eq!(Num::parse_loose("-0,5").display_plain(), "-0,5");
    }

    #[test]
    fn test_display_eur() {
        assert_eq!(Num::parse_loose("120,5").display_eur(), "120,50 €");
    }

    #[test]
    fn test_display_eur_grouping() {
        assert_eq!(Num::parse_loose("1234,56").display_eur(), "1.234,56 €");
    }

    #[test]
    fn test_display_eur_zero() {
        assert_eq!(Num::parse_loose("0").display_eur(), "0,00 €");
    }

    #[test]
    fn test_display_eur_empty() {
        assert_eq!(Num::EMPTY.display_eur(), "—");
    }

    #[test]
    fn test_display_eur_negative() {
        assert_eq!(Num::parse_loose("-1234,5").display_eur(), "-1.234,50 €");
    }

    #[test]
    fn test_eur_round_trip_two_decimals() {
        for raw in ["0,01", "7", "85,00", "1234,56", "99999,99"] {
            let original = Num::parse_loose(raw);
            let reparsed = Num::parse_loose(&original.display_eur());
            assert_eq!(
                reparsed.value().unwrap().round_dp(2),
                original.value().unwrap().round_dp(2),
                "round trip failed for {raw}"
            );
        }
    }

    #[test]
    fn test_serialize_value_as_number() {
        let json = serde_json::to_string(&Num::parse_loose("10,5")).unwrap();
        assert_eq!(json, "10.5");
    }

    #[test]
    fn test_serialize_integer_without_fraction() {
        let json = serde_json::to_string(&Num::parse_loose("152340")).unwrap();
        assert_eq!(json, "152340");
    }

    #[test]
    fn test_serialize_empty_as_empty_string() {
        let json = serde_json::to_string(&Num::EMPTY).unwrap();
        assert_eq!(json, "\"\"");
    }

    #[test]
    fn test_deserialize_number() {
        let n: Num = serde_json::from_str("10.5").unwrap();
        assert_eq!(n.value(), Some(Decimal::from_str("10.5").unwrap()));
    }

    #[test]
    fn test_deserialize_integer() {
        let n: Num = serde_json::from_str("152340").unwrap();
        assert_eq!(n.value(), Some(Decimal::from(152340)));
    }

    #[test]
    fn test_deserialize_empty_string() {
        let n: Num = serde_json::from_str("\"\"").unwrap();
        assert!(n.is_empty());
    }

    #[test]
    fn test_deserialize_loose_string() {
        let n: Num = serde_json::from_str("\"120,50 €\"").unwrap();
        assert_eq!(n.value(), Some(Decimal::from_str("120.50").unwrap()));
    }

    #[test]
    fn test_deserialize_null_degrades_to_empty() {
        let n: Num = serde_json::from_str("null").unwrap();
        assert!(n.is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        for raw in ["", "0", "10,5", "152340", "-4,25"] {
            let original = Num::parse_loose(raw);
            let json = serde_json::to_string(&original).unwrap();
            let back: Num = serde_json::from_str(&json).unwrap();
            assert_eq!(back, original, "serde round trip failed for {raw:?}");
        }
    }

    #[test]
    fn test_default_is_empty() {
        assert!(Num::default().is_empty());
    }
}
