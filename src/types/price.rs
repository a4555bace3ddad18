use crate::types::errors::PriceError;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const DECIMAL_PLACES: u32 = 4;

/// The magnitude of a transaction amount.
///
/// A price is never negative: whether money came in or went out is carried by
/// the transaction type, not by the sign of the amount.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Result<Self, PriceError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PriceError::Negative);
        }

        //NOTE: Trailing zeros are not precision, "1.50000" is the same amount as "1.5"
        let value = value.normalize();

        if value.scale() > DECIMAL_PLACES {
            return Err(PriceError::TooPrecise(DECIMAL_PLACES));
        }

        Ok(Price(value.abs()))
    }

    pub fn zero() -> Self {
        Price(Decimal::ZERO)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Display for Price {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        if self.0.scale() <= 2 {
            write!(formatter, "{:.2}", self.0)
        } else {
            write!(formatter, "{}", self.0)
        }
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(PriceError::InvalidFormat("Value is an empty string".to_string()));
        }

        let literal = value.strip_prefix('+').unwrap_or(value);

        //NOTE: Number inputs accept exponent notation ("1e3"), Decimal::from_str does not
        let (mantissa, exponent) = match literal.find(['e', 'E']) {
            Some(position) => (&literal[..position], Some(&literal[position + 1..])),
            None => (literal, None)
        };

        //NOTE: Decimal::from_str is more lenient than a number input (it accepts "1_000" for example),
        //      so anything that is not a plain decimal literal is turned away first.
        if !is_plain_decimal(mantissa) || !exponent.is_none_or(is_plain_exponent) {
            return Err(PriceError::InvalidFormat(format!("Value is not a number: {value}")));
        }

        let decimal = match exponent {
            Some(exponent) => {
                let exponent = exponent.strip_prefix('+').unwrap_or(exponent);
                Decimal::from_scientific(&format!("{mantissa}e{exponent}"))?
            }
            None => Decimal::from_str(mantissa)?
        };

        Price::new(decimal)
    }
}

fn is_plain_decimal(literal: &str) -> bool {
    let unsigned = literal.strip_prefix('-').unwrap_or(literal);

    unsigned.chars().all(|c| c.is_ascii_digit() || c == '.')
        && unsigned.chars().filter(|c| *c == '.').count() <= 1
        && unsigned.chars().any(|c| c.is_ascii_digit())
}

fn is_plain_exponent(literal: &str) -> bool {
    let unsigned = literal.strip_prefix(['+', '-']).unwrap_or(literal);

    !unsigned.is_empty() && unsigned.chars().all(|c| c.is_ascii_digit())
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Price::new(value)
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Price::from_str(&value).map_err(de::Error::custom)
    }
}
