//! Integer-cent money handling.
//!
//! The backend transmits prices as decimal strings (`"19.99"`, `"0.00"` for
//! free titles) and occasionally as bare JSON numbers. Everything the client
//! computes happens on whole cents so totals never drift.
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount `{0}`")]
    Invalid(String),
}

/// An amount of money in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parse a decimal amount such as `"19.99"`, `"5"` or `"-1.5"`.
    ///
    /// Digits past the second decimal place round half-up on the magnitude.
    ///
    /// # Errors
    /// Returns [`MoneyError`] when the text is empty or not a plain decimal.
    pub fn parse(text: &str) -> Result<Self, MoneyError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(MoneyError::Empty);
        }
        let invalid = || MoneyError::Invalid(trimmed.to_string());

        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .ok()
                .and_then(|w| w.checked_mul(100))
                .ok_or_else(invalid)?
        };
        let mut frac_digits = frac.bytes().map(|b| i64::from(b - b'0'));
        let tens = frac_digits.next().unwrap_or(0);
        let ones = frac_digits.next().unwrap_or(0);
        let round_up = frac_digits.next().is_some_and(|d| d >= 5);
        let cents = whole_cents
            .checked_add(tens * 10 + ones + i64::from(round_up))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Parse leniently, treating unreadable amounts as zero.
    #[must_use]
    pub fn parse_or_zero(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|err| {
            log::warn!("treating unreadable price as zero: {err}");
            Self::ZERO
        })
    }

    /// Two-decimal rendering without a currency symbol (`"44.98"`).
    #[must_use]
    pub fn to_decimal_string(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }

    /// Display form used in the storefront: `"Free"` for zero, `"$19.99"` otherwise.
    #[must_use]
    pub fn display_price(self) -> String {
        if self.is_zero() {
            String::from("Free")
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(rhs)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Int(i64),
    Float(f64),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawAmount::deserialize(deserializer)? {
            RawAmount::Text(text) => Ok(Self::parse_or_zero(&text)),
            RawAmount::Int(whole) => Ok(Self(whole.saturating_mul(100))),
            // Float amounts go through their shortest decimal form to avoid binary drift.
            RawAmount::Float(value) => Ok(Self::parse_or_zero(&value.to_string())),
        }
    }
}

/// `null` decodes as the default. Rows joined against a deleted game come
/// back with `price`, `subtotal` or `quantity` set to `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_price_shapes() {
        assert_eq!(Money::parse("19.99"), Ok(Money::from_cents(1999)));
        assert_eq!(Money::parse("5"), Ok(Money::from_cents(500)));
        assert_eq!(Money::parse("5.5"), Ok(Money::from_cents(550)));
        assert_eq!(Money::parse(".75"), Ok(Money::from_cents(75)));
        assert_eq!(Money::parse("-1.00"), Ok(Money::from_cents(-100)));
        assert_eq!(Money::parse(" 0.00 "), Ok(Money::ZERO));
    }

    #[test]
    fn rounds_extra_fraction_digits_half_up() {
        assert_eq!(Money::parse("1.005"), Ok(Money::from_cents(101)));
        assert_eq!(Money::parse("1.004"), Ok(Money::from_cents(100)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Money::parse(""), Err(MoneyError::Empty));
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse(".").is_err());
        assert_eq!(Money::parse_or_zero("n/a"), Money::ZERO);
    }

    #[test]
    fn formats_for_display() {
        assert_eq!(Money::from_cents(4498).to_decimal_string(), "44.98");
        assert_eq!(Money::from_cents(-250).to_string(), "-$2.50");
        assert_eq!(Money::ZERO.display_price(), "Free");
        assert_eq!(Money::from_cents(1999).display_price(), "$19.99");
    }

    #[test]
    fn deserializes_strings_and_numbers() {
        let parsed: Vec<Money> = serde_json::from_str(r#"["19.99", 5, 12.5]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                Money::from_cents(1999),
                Money::from_cents(500),
                Money::from_cents(1250)
            ]
        );
        assert_eq!(serde_json::to_string(&Money::from_cents(500)).unwrap(), "\"5.00\"");
    }
}
