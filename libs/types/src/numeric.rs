//! Base-unit amounts
//!
//! An [`Amount`] is a whole, non-negative count of the smallest indivisible
//! unit of value (wei, satoshi, cent). Arithmetic is checked: an operation
//! that would leave the representable range returns `None` instead of wrapping.
//!
//! Human-unit values ("1.5" tokens at 18 decimals) go through `rust_decimal`
//! so that parsing never touches floating point.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::NumericError;

/// Non-negative integer amount in base units.
///
/// Serialized as a decimal string so values above 2^53 survive JSON consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);
    pub const MAX: Amount = Amount(u128::MAX);

    pub const fn new(base_units: u128) -> Self {
        Self(base_units)
    }

    /// Raw base-unit count.
    pub const fn get(self) -> u128 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    /// Sum an iterator of amounts, `None` on overflow.
    pub fn checked_sum<I>(amounts: I) -> Option<Amount>
    where
        I: IntoIterator<Item = Amount>,
    {
        amounts
            .into_iter()
            .try_fold(Amount::ZERO, |acc, a| acc.checked_add(a))
    }

    /// Convert a human-unit decimal into base units.
    ///
    /// `from_units(1.5, 18)` is `1_500_000_000_000_000_000`. Fails if the value
    /// is negative, carries more fractional digits than `decimals`, or does
    /// not fit in 128 bits.
    pub fn from_units(value: Decimal, decimals: u32) -> Result<Amount, NumericError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(NumericError::Negative {
                value: value.to_string(),
            });
        }

        let normalized = value.normalize();
        let scale = normalized.scale();
        if scale > decimals {
            return Err(NumericError::FractionalBaseUnits {
                value: value.to_string(),
                decimals,
            });
        }

        let out_of_range = || NumericError::OutOfRange {
            value: value.to_string(),
        };

        let mantissa = u128::try_from(normalized.mantissa()).map_err(|_| out_of_range())?;
        let factor = 10u128
            .checked_pow(decimals - scale)
            .ok_or_else(out_of_range)?;

        mantissa
            .checked_mul(factor)
            .map(Amount)
            .ok_or_else(out_of_range)
    }

    /// Parse a human-unit string such as `"2.0"` into base units.
    pub fn parse_units(text: &str, decimals: u32) -> Result<Amount, NumericError> {
        let value = Decimal::from_str(text.trim()).map_err(|_| NumericError::Parse {
            input: text.to_string(),
        })?;
        Self::from_units(value, decimals)
    }

    /// Render in human units. Fails when the amount is too large for `Decimal`.
    pub fn to_units(self, decimals: u32) -> Result<Decimal, NumericError> {
        let out_of_range = || NumericError::OutOfRange {
            value: self.0.to_string(),
        };
        let mantissa = i128::try_from(self.0).map_err(|_| out_of_range())?;
        Decimal::try_from_i128_with_scale(mantissa, decimals)
            .map(|d| d.normalize())
            .map_err(|_| out_of_range())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(v: u64) -> Self {
        Self(u128::from(v))
    }
}

impl From<u128> for Amount {
    fn from(v: u128) -> Self {
        Self(v)
    }
}

impl From<Amount> for String {
    fn from(a: Amount) -> Self {
        a.0.to_string()
    }
}

impl TryFrom<String> for Amount {
    type Error = NumericError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Parses a plain base-unit integer, e.g. `"1000000"`.
impl FromStr for Amount {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u128>()
            .map(Amount)
            .map_err(|_| NumericError::Parse {
                input: s.to_string(),
            })
    }
}
