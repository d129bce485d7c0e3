//! Locale-aware monetary formatting
//!
//! This crate renders numeric amounts as display strings with a fixed number
//! of fractional digits and the separator convention of a configured locale
//! (Brazilian Portuguese by default). Rounding is done on the exact rational
//! value of the input using BigRational arithmetic. A small class-name
//! merging helper for display code lives alongside it.

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod amount;
pub mod class_names;
pub mod formatting;
pub mod locale;

// Re-export main types
pub use amount::{FormatError, FormatResult, MonetaryValue, Precision};
pub use class_names::{cn, ClassMerger, ClassToken, LastWriteMerger};
pub use formatting::{
    apply_width_formatting, format_np, format_rational, FormatConfig, MonetaryFormatter,
    NumberFormatter, RationalFormatter, RoundingMode, MAX_WIDTH, MONETARY_PRECISION,
};
pub use locale::Locale;

// Re-export for convenience
pub use num_rational::BigRational;
pub use rust_decimal::Decimal;
