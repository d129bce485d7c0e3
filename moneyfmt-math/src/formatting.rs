//! Fixed-point monetary formatting
//!
//! The locale engine sits behind the `NumberFormatter` trait. The built-in
//! `RationalFormatter` rounds the exact rational value of the input, so the
//! result never depends on how the platform prints floats. `MonetaryFormatter`
//! is the entry point display code talks to.

use log::trace;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::amount::{FormatError, FormatResult, MonetaryValue, Precision};
use crate::locale::Locale;

/// Digits after the decimal separator for monetary output
pub const MONETARY_PRECISION: Precision = 2;

/// Largest column width padding will produce
pub const MAX_WIDTH: usize = 1024;

/// How a value exactly halfway between two representable results is rounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Ties away from zero: `0.125` -> `0.13`, `-0.125` -> `-0.13`
    #[default]
    HalfUp,
    /// Ties to the even neighbour: `0.125` -> `0.12`, `0.375` -> `0.38`
    HalfEven,
}

impl std::str::FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "half-up" | "halfup" | "up" => Ok(RoundingMode::HalfUp),
            "half-even" | "halfeven" | "even" | "bankers" => Ok(RoundingMode::HalfEven),
            other => Err(format!("unknown rounding mode '{}'", other)),
        }
    }
}

/// Format configuration for monetary output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Digits after the decimal separator
    pub fraction_digits: Precision,

    /// Tie-breaking rule
    pub rounding: RoundingMode,

    /// Separator convention
    pub locale: Locale,

    /// Pad output to at least this many characters
    pub min_width: Option<usize>,

    /// Pad on the left instead of the right
    pub right_justify: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            fraction_digits: MONETARY_PRECISION,
            rounding: RoundingMode::default(),
            locale: Locale::default(),
            min_width: None,
            right_justify: false,
        }
    }
}

impl FormatConfig {
    /// Two decimals, half-up, pt-BR, no padding
    pub fn new() -> Self {
        Default::default()
    }

    /// Check settings that come from user input
    ///
    /// Widths above `MAX_WIDTH` are rejected.
    pub fn validate(&self) -> FormatResult<()> {
        match self.min_width {
            Some(width) if width > MAX_WIDTH => Err(FormatError::InvalidArgument(format!(
                "Width {} exceeds the maximum of {}",
                width, MAX_WIDTH
            ))),
            _ => Ok(()),
        }
    }

    /// Set the number of fractional digits
    pub fn with_fraction_digits(mut self, digits: Precision) -> Self {
        self.fraction_digits = digits;
        self
    }

    /// Set the tie-breaking rule
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Set the separator convention
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Pad output to at least `min` characters
    pub fn with_width(mut self, min: usize) -> Self {
        self.min_width = Some(min);
        self
    }

    /// Pad on the left
    pub fn right_justify(mut self) -> Self {
        self.right_justify = true;
        self
    }
}

/// A locale-aware fixed-point number engine
pub trait NumberFormatter: Send + Sync {
    /// Render `value` with exactly `fraction_digits` digits after the
    /// locale's decimal separator
    fn format_fixed(
        &self,
        value: &MonetaryValue,
        fraction_digits: Precision,
        locale: &Locale,
        rounding: RoundingMode,
    ) -> String;
}

/// Exact rational rounding engine
#[derive(Debug, Clone, Copy, Default)]
pub struct RationalFormatter;

impl NumberFormatter for RationalFormatter {
    fn format_fixed(
        &self,
        value: &MonetaryValue,
        fraction_digits: Precision,
        locale: &Locale,
        rounding: RoundingMode,
    ) -> String {
        format_rational(value.as_rational(), fraction_digits, locale, rounding)
    }
}

/// Round `rational` to an integer number of `10^-precision` units
fn round_scaled(rational: &BigRational, precision: Precision, rounding: RoundingMode) -> BigInt {
    let scale = BigInt::from(10).pow(u32::from(precision));
    let scaled = rational * BigRational::from_integer(scale);
    let half = BigRational::new(BigInt::from(1), BigInt::from(2));

    match rounding {
        RoundingMode::HalfUp => {
            let rounded = if scaled.is_negative() {
                (&scaled - &half).ceil()
            } else {
                (&scaled + &half).floor()
            };
            rounded.to_integer()
        }
        RoundingMode::HalfEven => {
            let floor = scaled.floor();
            let fraction = &scaled - &floor;
            let floor = floor.to_integer();

            if fraction < half {
                floor
            } else if fraction > half {
                floor + 1u32
            } else if (&floor % 2u32).is_zero() {
                floor
            } else {
                floor + 1u32
            }
        }
    }
}

/// Format a rational number with a fixed number of fractional digits
pub fn format_rational(
    rational: &BigRational,
    precision: Precision,
    locale: &Locale,
    rounding: RoundingMode,
) -> String {
    let rounded = round_scaled(rational, precision, rounding);

    // A value that rounds to zero prints unsigned
    let negative = rounded.is_negative();
    let mut digits = rounded.abs().to_string();

    let precision = precision as usize;
    if digits.len() <= precision {
        digits = format!("{}{}", "0".repeat(precision + 1 - digits.len()), digits);
    }

    let split_pos = digits.len() - precision;
    let (integer_part, decimal_part) = digits.split_at(split_pos);

    let mut result = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if negative {
        result.push(locale.minus_sign);
    }
    result.push_str(&locale.group_digits(integer_part));
    if precision > 0 {
        result.push(locale.decimal_separator);
        result.push_str(decimal_part);
    }

    result
}

/// Pad text to the configured minimum width
///
/// Monetary text is never truncated. Widths are clamped to `MAX_WIDTH`.
pub fn apply_width_formatting(text: &str, config: &FormatConfig) -> String {
    let width = config.min_width.unwrap_or(0).min(MAX_WIDTH);

    if config.right_justify {
        format!("{:>width$}", text, width = width)
    } else {
        format!("{:<width$}", text, width = width)
    }
}

/// Converts numeric values into localized monetary strings
///
/// Stateless apart from its immutable configuration, so one instance can be
/// shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct MonetaryFormatter<F: NumberFormatter = RationalFormatter> {
    engine: F,
    config: FormatConfig,
}

impl MonetaryFormatter<RationalFormatter> {
    /// Formatter backed by `RationalFormatter`
    pub fn new(config: FormatConfig) -> Self {
        Self { engine: RationalFormatter, config }
    }
}

impl<F: NumberFormatter> MonetaryFormatter<F> {
    /// Use a different number engine
    pub fn with_engine(engine: F, config: FormatConfig) -> Self {
        Self { engine, config }
    }

    /// The active configuration
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Format a double
    ///
    /// Fails with `FormatError::InvalidArgument` for NaN and the infinities.
    pub fn format(&self, value: f64) -> FormatResult<String> {
        let value = MonetaryValue::new(value)?;
        Ok(self.format_value(&value))
    }

    /// Format an already validated value
    pub fn format_value(&self, value: &MonetaryValue) -> String {
        trace!(
            "formatting {:?} with {} fraction digits ({}, {:?})",
            value,
            self.config.fraction_digits,
            self.config.locale.tag,
            self.config.rounding
        );

        let text = self.engine.format_fixed(
            value,
            self.config.fraction_digits,
            &self.config.locale,
            self.config.rounding,
        );
        apply_width_formatting(&text, &self.config)
    }
}

/// Format a value as a pt-BR monetary string with two decimals
///
/// `format_np(1234.5)` yields `"1.234,50"`. No currency symbol is added.
pub fn format_np(value: f64) -> FormatResult<String> {
    MonetaryFormatter::new(FormatConfig::default()).format(value)
}
