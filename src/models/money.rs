//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so sums stay decimal-exact. On the
//! wire an amount is a plain JSON number in currency units (`123.45`); the
//! decoder also takes numeric strings and coerces anything non-numeric to zero.

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use fintrack::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Convert a floating-point currency value, rounding to the nearest cent.
    /// Non-finite input becomes zero.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self::zero();
        }
        Self((value * 100.0).round() as i64)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Value in currency units as a float, for display and export only
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
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

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Divide by a whole number, rounding half away from zero to the cent.
    /// Division by zero yields zero.
    pub fn div_rounded(&self, divisor: i64) -> Self {
        if divisor == 0 {
            return Self::zero();
        }
        let (value, divisor) = (i128::from(self.0), i128::from(divisor));
        let quotient = value / divisor;
        let remainder = value % divisor;
        let rounded = if remainder.abs() * 2 >= divisor.abs() {
            quotient + value.signum() * divisor.signum()
        } else {
            quotient
        };
        Self(i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX }))
    }

    /// This amount as a percentage of `whole`; zero when `whole` is zero
    pub fn percent_of(&self, whole: Money) -> f64 {
        if whole.is_zero() {
            return 0.0;
        }
        self.0 as f64 * 100.0 / whole.0 as f64
    }

    /// Parse a money amount from user input
    ///
    /// Accepts "10.50", "-10.50", "R$ 10,50", "1.234,56", "R$ 1.500", "$10", "10".
    /// A lone comma is read as the decimal separator; when both separators
    /// appear the last one is the decimal separator. Dots that split the
    /// digits into groups of three ("1.500", "2.000.000") are thousands
    /// separators. More than two fraction digits is an error.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped.trim_start()),
            None => (false, s),
        };

        let s = s
            .strip_prefix("R$")
            .or_else(|| s.strip_prefix('$'))
            .unwrap_or(s)
            .trim();

        let normalized = normalize_separators(s);
        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        if normalized.is_empty() {
            return Err(invalid());
        }

        let cents = match normalized.split_once('.') {
            Some((units, fraction)) => {
                let units: i64 = if units.is_empty() {
                    0
                } else {
                    units.parse().map_err(|_| invalid())?
                };
                if !fraction.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                let cents: i64 = match fraction.len() {
                    0 => 0,
                    1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => fraction.parse().map_err(|_| invalid())?,
                    _ => return Err(invalid()),
                };
                units
                    .checked_mul(100)
                    .and_then(|c| c.checked_add(cents))
                    .ok_or_else(invalid)?
            }
            None => normalized
                .parse::<i64>()
                .map_err(|_| invalid())?
                .checked_mul(100)
                .ok_or_else(invalid)?,
        };

        if cents < 0 {
            return Err(invalid());
        }

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Parse, rounding plain decimals with extra precision ("33.3333") to the
    /// cent and falling back to zero on anything non-numeric
    pub fn parse_lenient(s: &str) -> Self {
        Self::parse(s)
            .or_else(|_| s.trim().parse::<f64>().map(Self::from_f64))
            .unwrap_or_default()
    }
}

/// Rewrite "1.234,56" / "12,5" into "1234.56" / "12.5"
fn normalize_separators(s: &str) -> String {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    match (compact.rfind(','), compact.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => compact.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => compact.replace(',', ""),
        (Some(_), None) if compact.matches(',').count() == 1 => compact.replace(',', "."),
        (None, Some(_)) if is_thousands_grouped(&compact, '.') => compact.replace('.', ""),
        _ => compact,
    }
}

/// "1.500" or "12.345.678": a leading group of one to three digits (no
/// leading zero) followed by groups of exactly three
fn is_thousands_grouped(s: &str, separator: char) -> bool {
    let mut groups = s.split(separator);
    let leading_ok = groups.next().map_or(false, |head| {
        (1..=3).contains(&head.len())
            && !head.starts_with('0')
            && head.chars().all(|c| c.is_ascii_digit())
    });
    let mut rest = groups.peekable();
    leading_ok
        && rest.peek().is_some()
        && rest.all(|group| group.len() == 3 && group.chars().all(|c| c.is_ascii_digit()))
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if self.is_negative() {
            format!("-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            format!("{}.{:02}", self.units(), self.cents_part())
        };
        f.pad(&text)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// Accepts numbers and numeric strings; everything else coerces to zero
struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a currency amount")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(Money::from_cents(v.saturating_mul(100)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Ok(Money::from_cents(i64::try_from(v).unwrap_or(i64::MAX).saturating_mul(100)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Ok(Money::from_f64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Ok(Money::parse_lenient(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Money, E> {
        Ok(Money::zero())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Money, E> {
        Ok(Money::zero())
    }

    fn visit_none<E: de::Error>(self) -> Result<Money, E> {
        Ok(Money::zero())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Money, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Money, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Money::zero())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Money, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Money::zero())
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
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(format!("{:>8}", Money::from_cents(5)), "    0.05");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("R$ 10,50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("1.234,56").unwrap().cents(), 123456);
        assert_eq!(Money::parse("1,234.56").unwrap().cents(), 123456);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("1.2x").is_err());
    }

    #[test]
    fn test_parse_thousands_dots() {
        assert_eq!(Money::parse("R$ 1.500").unwrap(), Money::from_units(1500));
        assert_eq!(Money::parse("1.500").unwrap(), Money::from_units(1500));
        assert_eq!(Money::parse("2.000.000").unwrap(), Money::from_units(2_000_000));
        assert_eq!(Money::parse("R$ 10.50").unwrap().cents(), 1050);
        assert!(Money::parse("1.50.000").is_err());
    }

    #[test]
    fn test_parse_rejects_extra_fraction_digits() {
        assert!(Money::parse("10.9999").is_err());
        assert!(Money::parse("10,999").is_err());
        assert!(Money::parse("0.125").is_err());
        assert!(Money::parse("1.234,567").is_err());
        assert_eq!(Money::parse("10.999").unwrap(), Money::from_units(10_999));
    }

    #[test]
    fn test_parse_overflow_is_error() {
        assert!(Money::parse("99999999999999999999").is_err());
        assert!(Money::parse("999999999999999999").is_err());
    }

    #[test]
    fn test_parse_lenient_coerces_to_zero() {
        assert_eq!(Money::parse_lenient("not a number"), Money::zero());
        assert_eq!(Money::parse_lenient("12,30").cents(), 1230);
        assert_eq!(Money::parse_lenient("33.3333").cents(), 3333);
    }

    #[test]
    fn test_decimal_exact_sums() {
        let total: Money = [Money::parse("0.10").unwrap(), Money::parse("0.20").unwrap()]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_cents(30));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        let min = Money::from_cents(i64::MIN);

        assert_eq!(max + Money::from_units(1), max);
        assert_eq!(min - Money::from_units(1), min);
        assert_eq!(-min, max);
        assert_eq!(min.abs(), max);

        let total: Money = [max, Money::from_cents(1), Money::from_units(50)].into_iter().sum();
        assert_eq!(total, max);

        let mut running = min;
        running -= Money::from_cents(1);
        assert_eq!(running, min);
        running += max;
        assert_eq!(running, Money::from_cents(-1));
    }

    #[test]
    fn test_div_rounded() {
        assert_eq!(Money::from_units(400).div_rounded(10), Money::from_units(40));
        assert_eq!(Money::from_cents(100).div_rounded(3), Money::from_cents(33));
        assert_eq!(Money::from_cents(200).div_rounded(3), Money::from_cents(67));
        assert_eq!(Money::from_cents(-200).div_rounded(3), Money::from_cents(-67));
        assert_eq!(Money::from_cents(5).div_rounded(2), Money::from_cents(3));
        assert_eq!(Money::from_units(10).div_rounded(0), Money::zero());
        assert_eq!(Money::from_cents(i64::MIN).div_rounded(-1), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(Money::from_units(600).percent_of(Money::from_units(1000)), 60.0);
        assert_eq!(Money::from_units(600).percent_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_serializes_as_decimal_number() {
        let json = serde_json::to_string(&Money::from_cents(1050)).unwrap();
        assert_eq!(json, "10.5");
    }

    #[test]
    fn test_deserialize_coercions() {
        let from_float: Money = serde_json::from_str("123.45").unwrap();
        assert_eq!(from_float.cents(), 12345);
        let from_int: Money = serde_json::from_str("7").unwrap();
        assert_eq!(from_int.cents(), 700);
        let from_string: Money = serde_json::from_str("\"19,90\"").unwrap();
        assert_eq!(from_string.cents(), 1990);
        let from_junk: Money = serde_json::from_str("\"abc\"").unwrap();
        assert!(from_junk.is_zero());
        let from_null: Money = serde_json::from_str("null").unwrap();
        assert!(from_null.is_zero());
        let from_object: Money = serde_json::from_str("{\"a\": 1}").unwrap();
        assert!(from_object.is_zero());
    }
}
