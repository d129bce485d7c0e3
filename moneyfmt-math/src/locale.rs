//! Locale separator conventions
//!
//! Only the separator characters of a locale matter for fixed-point
//! monetary output. The default is Brazilian Portuguese: period for digit
//! groups, comma before the fraction.

use serde::{Deserialize, Serialize};

use crate::amount::{FormatError, FormatResult};

/// Separator convention used when rendering numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    /// BCP 47 style tag, informational only
    pub tag: String,

    /// Inserted every `grouping_size` integer digits
    pub grouping_separator: char,

    /// Separates the integer part from the fraction
    pub decimal_separator: char,

    /// Digits per group; zero disables grouping
    pub grouping_size: usize,

    /// Prefix for negative amounts
    pub minus_sign: char,
}

impl Locale {
    /// Build a custom locale
    ///
    /// The two separators must differ and neither may be a digit, otherwise
    /// the output would be ambiguous.
    pub fn new(
        tag: impl Into<String>,
        grouping_separator: char,
        decimal_separator: char,
    ) -> FormatResult<Self> {
        if grouping_separator == decimal_separator {
            return Err(FormatError::InvalidArgument(format!(
                "Grouping and decimal separators must differ (both '{}')",
                decimal_separator
            )));
        }
        if grouping_separator.is_ascii_digit() || decimal_separator.is_ascii_digit() {
            return Err(FormatError::InvalidArgument(
                "Separators cannot be digits".to_string(),
            ));
        }

        Ok(Self {
            tag: tag.into(),
            grouping_separator,
            decimal_separator,
            grouping_size: 3,
            minus_sign: '-',
        })
    }

    /// Brazilian Portuguese: `1.234.567,89`
    pub fn pt_br() -> Self {
        Self {
            tag: "pt-BR".to_string(),
            grouping_separator: '.',
            decimal_separator: ',',
            grouping_size: 3,
            minus_sign: '-',
        }
    }

    /// Set the digits per group; zero disables grouping
    pub fn with_grouping_size(mut self, size: usize) -> Self {
        self.grouping_size = size;
        self
    }

    /// Set the negative prefix
    pub fn with_minus_sign(mut self, sign: char) -> Self {
        self.minus_sign = sign;
        self
    }

    /// Insert grouping separators into a run of ASCII digits
    pub fn group_digits(&self, digits: &str) -> String {
        if self.grouping_size == 0 || digits.len() <= self.grouping_size {
            return digits.to_string();
        }

        let mut result = String::with_capacity(digits.len() + digits.len() / self.grouping_size);
        let len = digits.len();

        for (i, ch) in digits.chars().enumerate() {
            result.push(ch);
            let remaining = len - i - 1;
            if remaining > 0 && remaining % self.grouping_size == 0 {
                result.push(self.grouping_separator);
            }
        }

        result
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::pt_br()
    }
}
