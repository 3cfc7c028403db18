//! Exact decimal quantities attached to ingredient lines.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors raised when parsing user-entered quantity text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityParseError {
    NotANumber { input: String },
    Negative { input: String },
}

impl fmt::Display for QuantityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber { input } => write!(f, "quantity '{input}' is not a number"),
            Self::Negative { input } => write!(f, "quantity '{input}' must not be negative"),
        }
    }
}

impl std::error::Error for QuantityParseError {}

/// Non-negative decimal amount.
///
/// Stored documents may carry the amount as a JSON string or number; both
/// deserialise to the same exact value, so `"0.1"` and `0.1` sum without
/// binary floating point drift.
///
/// # Examples
/// ```
/// use recipe_companion::domain::Quantity;
///
/// let a: Quantity = "0.1".parse().expect("number");
/// let b: Quantity = "0.2".parse().expect("number");
/// assert_eq!((a + b).to_string(), "0.3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    /// The additive identity.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Parse optional form input: blank text means "no quantity".
    ///
    /// # Examples
    /// ```
    /// use recipe_companion::domain::Quantity;
    ///
    /// assert_eq!(Quantity::parse_optional("  ").expect("blank"), None);
    /// assert!(Quantity::parse_optional("2").expect("number").is_some());
    /// assert!(Quantity::parse_optional("two").is_err());
    /// ```
    pub fn parse_optional(input: &str) -> Result<Option<Self>, QuantityParseError> {
        if input.trim().is_empty() {
            return Ok(None);
        }
        input.parse().map(Some)
    }

    /// Render with a fixed number of decimal places (`3` → `"3.00"`).
    ///
    /// Midpoints round away from zero, so `0.125` renders as `"0.13"`.
    pub fn to_fixed(&self, scale: u32) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
        let precision = usize::try_from(scale).unwrap_or(usize::MAX);
        format!("{rounded:.precision$}")
    }
}

impl FromStr for Quantity {
    type Err = QuantityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| QuantityParseError::NotANumber {
                input: s.to_owned(),
            })?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(QuantityParseError::Negative {
                input: s.to_owned(),
            });
        }
        Ok(Self(value.normalize()))
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = QuantityParseError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(QuantityParseError::Negative {
                input: value.to_string(),
            });
        }
        Ok(Self(value.normalize()))
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(Decimal::from(value))
    }
}

/// Saturates at [`Decimal::MAX`] instead of overflowing.
impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let total = self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX);
        Self(total.normalize())
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2", "2")]
    #[case(" 1.50 ", "1.5")]
    #[case("0", "0")]
    #[case("1e2", "100")]
    fn parses_numeric_text(#[case] raw: &str, #[case] expected: &str) {
        let quantity: Quantity = raw.parse().expect("numeric input");
        assert_eq!(quantity.to_string(), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("1,5")]
    fn rejects_non_numeric_text(#[case] raw: &str) {
        assert!(matches!(
            raw.parse::<Quantity>(),
            Err(QuantityParseError::NotANumber { .. })
        ));
    }

    #[rstest]
    fn rejects_negative_amounts() {
        assert!(matches!(
            "-1".parse::<Quantity>(),
            Err(QuantityParseError::Negative { .. })
        ));
    }

    #[rstest]
    fn sums_exactly() {
        let total: Quantity = ["0.1", "0.2", "0.7"]
            .into_iter()
            .map(|raw| raw.parse::<Quantity>().expect("number"))
            .sum();
        assert_eq!(total, Quantity::from(1));
    }

    #[rstest]
    #[case(Quantity::from(3), 2, "3.00")]
    #[case(Quantity::from(3), 0, "3")]
    fn renders_fixed_scale(#[case] quantity: Quantity, #[case] scale: u32, #[case] expected: &str) {
        assert_eq!(quantity.to_fixed(scale), expected);
    }

    #[rstest]
    #[case("0.333", "0.33")]
    #[case("0.125", "0.13")]
    #[case("0.005", "0.01")]
    #[case("2.675", "2.68")]
    fn renders_rounded_fraction(#[case] raw: &str, #[case] expected: &str) {
        let quantity: Quantity = raw.parse().expect("number");
        assert_eq!(quantity.to_fixed(2), expected);
    }

    #[rstest]
    fn addition_saturates_at_the_largest_decimal() {
        let largest: Quantity = "79228162514264337593543950335".parse().expect("number");
        let total = largest + largest;
        assert_eq!(total.to_string(), Decimal::MAX.to_string());
        assert_eq!(total + Quantity::from(1), total);
    }

    #[rstest]
    fn deserialises_from_string_or_number() {
        let from_string: Quantity = serde_json::from_str("\"2.5\"").expect("string form");
        let from_number: Quantity = serde_json::from_str("2.5").expect("number form");
        assert_eq!(from_string, from_number);
    }
}
