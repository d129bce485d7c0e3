//! Command-line interface definitions using Clap

use clap::Parser;
use moneyfmt_math::RoundingMode;

/// moneyfmt - format numbers as localized monetary strings
#[derive(Parser, Debug)]
#[command(name = "moneyfmt")]
#[command(version, about = "Format numbers as localized monetary strings", long_about = None)]
pub struct Cli {
    /// Values to format; read one per line from stdin when omitted or `-`
    #[arg(allow_negative_numbers = true)]
    pub values: Vec<String>,

    /// Digits after the decimal separator
    #[arg(short = 'd', long = "digits")]
    pub digits: Option<u16>,

    /// Tie-breaking rule: half-up or half-even
    #[arg(short = 'r', long = "rounding")]
    pub rounding: Option<RoundingMode>,

    /// Pad each result to this many columns
    #[arg(short = 'w', long = "width")]
    pub width: Option<usize>,

    /// Right-justify padded output
    #[arg(long = "right")]
    pub right: bool,

    /// Character inserted between digit groups
    #[arg(long = "grouping-separator")]
    pub grouping_separator: Option<char>,

    /// Character before the fractional digits
    #[arg(long = "decimal-separator")]
    pub decimal_separator: Option<char>,

    /// Initialization file to use
    #[arg(short = 'i', long = "init-file")]
    pub init_file: Option<String>,

    /// Do not read any initialization file
    #[arg(long = "no-init-file", conflicts_with = "init_file")]
    pub no_init_file: bool,

    /// Enable verbose output
    #[arg(long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long = "debug")]
    pub debug: bool,

    /// Enable trace logging
    #[arg(long = "trace")]
    pub trace: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_values_are_positional() {
        let cli = Cli::try_parse_from(["moneyfmt", "-42.1", "1234.5"]).unwrap();
        assert_eq!(cli.values, vec!["-42.1", "1234.5"]);
    }

    #[test]
    fn test_options() {
        let cli =
            Cli::try_parse_from(["moneyfmt", "-d", "3", "--rounding", "half-even", "-w", "10"])
                .unwrap();
        assert_eq!(cli.digits, Some(3));
        assert_eq!(cli.rounding, Some(RoundingMode::HalfEven));
        assert_eq!(cli.width, Some(10));
        assert!(cli.values.is_empty());
    }

    #[test]
    fn test_dash_among_values() {
        let cli = Cli::try_parse_from(["moneyfmt", "1", "-", "2"]).unwrap();
        assert_eq!(cli.values, vec!["1", "-", "2"]);
    }

    #[test]
    fn test_bad_rounding_rejected() {
        assert!(Cli::try_parse_from(["moneyfmt", "--rounding", "ceiling"]).is_err());
    }
}
