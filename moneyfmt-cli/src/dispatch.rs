//! Value dispatch
//!
//! Feeds every input value through the configured formatter, writing results
//! to the output and per-value errors to the error stream.

use crate::cli::Cli;
use crate::session::Session;
use anyhow::{Context, Result};
use log::{debug, warn};
use moneyfmt_math::{FormatError, MonetaryFormatter, MonetaryValue};
use std::io::{self, BufRead, Write};

/// Main dispatcher
pub struct Dispatcher {
    formatter: MonetaryFormatter,
}

impl Dispatcher {
    pub fn new(session: Session) -> Self {
        if let Some(ref path) = session.init_file {
            debug!("configured from {}", path.display());
        }
        Self { formatter: MonetaryFormatter::new(session.format) }
    }

    /// Format the values named on the command line
    ///
    /// Each `-` splices in the lines of stdin at that position; with no
    /// values at all, stdin is read on its own.
    pub fn execute(&self, cli: &Cli) -> Result<i32> {
        let stdout = io::stdout();
        let stderr = io::stderr();
        let mut out = stdout.lock();
        let mut err = stderr.lock();

        let mut failures = 0usize;

        if cli.values.is_empty() {
            failures += self.format_lines(io::stdin().lock(), &mut out, &mut err)?;
        } else {
            for raw in &cli.values {
                if raw == "-" {
                    debug!("reading values from stdin");
                    failures += self.format_lines(io::stdin().lock(), &mut out, &mut err)?;
                } else {
                    failures += self.format_one(raw, &mut out, &mut err)?;
                }
            }
        }

        out.flush().context("Failed to flush output")?;
        Ok(exit_code(failures))
    }

    /// Format each value on its own line
    ///
    /// Blank values are skipped. Invalid values are reported and processing
    /// continues; the returned exit code is 1 if any value failed.
    pub fn format_all<'a, I, W, E>(&self, values: I, out: &mut W, err: &mut E) -> Result<i32>
    where
        I: IntoIterator<Item = &'a str>,
        W: Write,
        E: Write,
    {
        let mut failures = 0usize;
        for raw in values {
            failures += self.format_one(raw, out, err)?;
        }

        out.flush().context("Failed to flush output")?;
        Ok(exit_code(failures))
    }

    /// Stream newline-separated values from a reader
    ///
    /// A line that is not valid UTF-8 is reported like any other bad value.
    /// Returns the number of failed values.
    pub fn format_lines<R, W, E>(&self, reader: R, out: &mut W, err: &mut E) -> Result<usize>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut failures = 0usize;

        for (line_num, line) in reader.split(b'\n').enumerate() {
            let bytes = line.context("Failed to read values from stdin")?;
            match String::from_utf8(bytes) {
                Ok(text) => failures += self.format_one(&text, out, err)?,
                Err(_) => {
                    let e = FormatError::InvalidArgument(format!(
                        "Input line {} is not valid UTF-8",
                        line_num + 1
                    ));
                    report(&e, "<binary>", err)?;
                    failures += 1;
                }
            }
        }

        Ok(failures)
    }

    /// Format a single value, returning 1 if it failed
    fn format_one<W: Write, E: Write>(&self, raw: &str, out: &mut W, err: &mut E) -> Result<usize> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(0);
        }

        match raw.parse::<MonetaryValue>() {
            Ok(value) => {
                writeln!(out, "{}", self.formatter.format_value(&value))
                    .context("Failed to write output")?;
                Ok(0)
            }
            Err(e) => {
                report(&e, raw, err)?;
                Ok(1)
            }
        }
    }
}

fn report<E: Write>(e: &FormatError, raw: &str, err: &mut E) -> Result<()> {
    warn!("skipping value '{}': {}", raw, e);
    writeln!(err, "Error: {}", e).context("Failed to write error output")
}

fn exit_code(failures: usize) -> i32 {
    if failures > 0 {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneyfmt_math::FormatConfig;

    fn dispatcher(format: FormatConfig) -> Dispatcher {
        Dispatcher { formatter: MonetaryFormatter::new(format) }
    }

    fn run(dispatcher: &Dispatcher, values: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = dispatcher.format_all(values.iter().copied(), &mut out, &mut err).unwrap();
        (code, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_format_all() {
        let (code, out, err) =
            run(&dispatcher(FormatConfig::default()), &["0", "1234.5", "", "1000000", "-42.1"]);
        assert_eq!(code, 0);
        assert_eq!(out, "0,00\n1.234,50\n1.000.000,00\n-42,10\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_invalid_values_continue() {
        let (code, out, err) = run(&dispatcher(FormatConfig::default()), &["abc", "999.99", "NaN"]);
        assert_eq!(code, 1);
        assert_eq!(out, "999,99\n");
        assert_eq!(err.lines().count(), 2);
        assert!(err.contains("Invalid argument"));
    }

    #[test]
    fn test_padded_output() {
        let config = FormatConfig::default().with_width(10).right_justify();
        let (_, out, _) = run(&dispatcher(config), &["1", "-1234.5"]);
        assert_eq!(out, "      1,00\n -1.234,50\n");
    }

    #[test]
    fn test_format_lines_skips_invalid_utf8() {
        let dispatcher = dispatcher(FormatConfig::default());
        let input: &[u8] = b"12\n\xff\xfe\n3\r\n";
        let mut out = Vec::new();
        let mut err = Vec::new();

        let failures = dispatcher.format_lines(input, &mut out, &mut err).unwrap();

        assert_eq!(failures, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "12,00\n3,00\n");
        let err = String::from_utf8(err).unwrap();
        assert!(err.contains("line 2 is not valid UTF-8"));
    }
}
