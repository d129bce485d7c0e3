//! Monetary value module
//!
//! A `MonetaryValue` is the validated input of every formatting call. It only
//! admits finite numbers and carries the exact rational equivalent of the
//! value, so rounding never goes through a second lossy float conversion.

use std::fmt;
use std::str::FromStr;

use log::debug;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use rust_decimal::Decimal;
use thiserror::Error;

/// Number of digits after the decimal separator
pub type Precision = u16;

/// Errors that can occur while preparing or formatting a value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Input that cannot be formatted, such as NaN or infinity
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for formatting operations
pub type FormatResult<T> = Result<T, FormatError>;

/// A finite amount ready to be formatted
///
/// Holds both the original value and its exact rational expansion. For a
/// value built from an `f64` this is the exact binary value of the double,
/// e.g. `1.005` is really `1.00499999999999989...`.
#[derive(Clone, PartialEq, Eq)]
pub struct MonetaryValue {
    quantity: BigRational,
}

impl MonetaryValue {
    /// Create a monetary value from a double
    ///
    /// NaN and the infinities are rejected with `FormatError::InvalidArgument`.
    pub fn new(value: f64) -> FormatResult<Self> {
        if !value.is_finite() {
            debug!("rejecting non-finite monetary value {}", value);
            return Err(FormatError::InvalidArgument(format!(
                "Cannot format non-finite value: {}",
                value
            )));
        }

        let quantity = BigRational::from_float(value).ok_or_else(|| {
            FormatError::InvalidArgument(format!("Cannot convert {} to a rational", value))
        })?;

        Ok(Self { quantity })
    }

    /// Create a monetary value from an exact decimal
    pub fn from_decimal(decimal: Decimal) -> Self {
        let numerator = BigInt::from(decimal.mantissa());
        let denominator = BigInt::from(10).pow(decimal.scale());

        Self { quantity: BigRational::new(numerator, denominator) }
    }

    /// Create a monetary value from an integer amount
    pub fn from_i64(value: i64) -> Self {
        Self { quantity: BigRational::from_integer(BigInt::from(value)) }
    }

    /// The exact rational quantity
    pub fn as_rational(&self) -> &BigRational {
        &self.quantity
    }

    /// Whether the exact value is zero
    pub fn is_zero(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Whether the exact value is below zero
    pub fn is_negative(&self) -> bool {
        self.quantity.is_negative()
    }
}

impl TryFrom<f64> for MonetaryValue {
    type Error = FormatError;

    fn try_from(value: f64) -> FormatResult<Self> {
        Self::new(value)
    }
}

impl From<Decimal> for MonetaryValue {
    fn from(decimal: Decimal) -> Self {
        Self::from_decimal(decimal)
    }
}

impl From<i64> for MonetaryValue {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl FromStr for MonetaryValue {
    type Err = FormatError;

    /// Parse a plain machine-formatted number such as `1234.5` or `-42.1`
    ///
    /// Input is read as a double, matching what display code hands over.
    fn from_str(s: &str) -> FormatResult<Self> {
        let trimmed = s.trim();
        let value = trimmed.parse::<f64>().map_err(|e| {
            FormatError::InvalidArgument(format!("Cannot parse '{}' as a number: {}", trimmed, e))
        })?;
        Self::new(value)
    }
}

impl fmt::Debug for MonetaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MONETARY({})", self.quantity)
    }
}
