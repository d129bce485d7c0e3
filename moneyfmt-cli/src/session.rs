//! Session configuration
//!
//! Builds the effective `FormatConfig` from an init file of `--option value`
//! lines, then applies command-line flags on top.

use crate::cli::Cli;
use anyhow::{anyhow, Context, Result};
use log::debug;
use moneyfmt_math::{FormatConfig, Locale, RoundingMode};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Global session state for the formatter
pub struct Session {
    /// Effective formatting configuration
    pub format: FormatConfig,

    /// Raw options read from the init file
    pub options: HashMap<String, String>,

    /// Init file that was loaded, if any
    pub init_file: Option<PathBuf>,
}

impl Session {
    /// Create a session from command-line arguments
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut session = Session {
            format: FormatConfig::default(),
            options: HashMap::new(),
            init_file: None,
        };

        if !cli.no_init_file {
            session.load_init_file(cli)?;
        }

        session.apply_options()?;
        session.apply_cli(cli)?;
        session.format.validate().context("Invalid format configuration")?;

        debug!("effective format configuration: {:?}", session.format);
        Ok(session)
    }

    /// Load configuration from the init file
    fn load_init_file(&mut self, cli: &Cli) -> Result<()> {
        let init_file_path = if let Some(ref path) = cli.init_file {
            let path = PathBuf::from(path);
            if !path.exists() {
                return Err(anyhow!("Init file not found: {}", path.display()));
            }
            path
        } else {
            match default_init_file() {
                Some(path) => path,
                None => return Ok(()),
            }
        };

        if init_file_path.exists() {
            debug!("reading init file {}", init_file_path.display());
            self.parse_init_file(&init_file_path)?;
            self.init_file = Some(init_file_path);
        }

        Ok(())
    }

    /// Parse an init file and load its options
    fn parse_init_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read init file: {}", path.display()))?;

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if !line.starts_with("--") {
                return Err(anyhow!(
                    "Error parsing init file {} at line {}: expected an option, found '{}'",
                    path.display(),
                    line_num + 1,
                    line
                ));
            }

            let (option, value) = match line.split_once(char::is_whitespace) {
                Some((option, value)) => (option, value.trim().to_string()),
                None => (line, "true".to_string()),
            };
            let option = option.strip_prefix("--").unwrap_or(option);
            self.options.insert(option.to_string(), value);
        }

        Ok(())
    }

    /// Apply init-file options to the format configuration
    fn apply_options(&mut self) -> Result<()> {
        let mut grouping = None;
        let mut decimal = None;

        for (option, value) in &self.options {
            match option.as_str() {
                "digits" => {
                    self.format.fraction_digits = value
                        .parse()
                        .with_context(|| format!("Invalid value for --digits: {}", value))?;
                }
                "rounding" => {
                    self.format.rounding = value.parse::<RoundingMode>().map_err(|e| anyhow!(e))?;
                }
                "width" => {
                    self.format.min_width = Some(
                        value
                            .parse()
                            .with_context(|| format!("Invalid value for --width: {}", value))?,
                    );
                }
                "right" => {
                    self.format.right_justify = parse_flag(value)?;
                }
                "grouping-separator" => grouping = Some(parse_char(option, value)?),
                "decimal-separator" => decimal = Some(parse_char(option, value)?),
                other => {
                    debug!("ignoring unknown init file option --{}", other);
                }
            }
        }

        self.update_locale(grouping, decimal)
    }

    /// Command-line flags win over the init file
    fn apply_cli(&mut self, cli: &Cli) -> Result<()> {
        if let Some(digits) = cli.digits {
            self.format.fraction_digits = digits;
        }
        if let Some(rounding) = cli.rounding {
            self.format.rounding = rounding;
        }
        if let Some(width) = cli.width {
            self.format.min_width = Some(width);
        }
        if cli.right {
            self.format.right_justify = true;
        }

        self.update_locale(cli.grouping_separator, cli.decimal_separator)
    }

    fn update_locale(&mut self, grouping: Option<char>, decimal: Option<char>) -> Result<()> {
        if grouping.is_none() && decimal.is_none() {
            return Ok(());
        }

        let current = &self.format.locale;
        let locale = Locale::new(
            current.tag.clone(),
            grouping.unwrap_or(current.grouping_separator),
            decimal.unwrap_or(current.decimal_separator),
        )
        .context("Invalid separator configuration")?
        .with_grouping_size(current.grouping_size)
        .with_minus_sign(current.minus_sign);

        self.format.locale = locale;
        Ok(())
    }
}

/// Default init file locations, first existing one wins
fn default_init_file() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        candidates.push(PathBuf::from(xdg_config).join("moneyfmt").join("moneyfmtrc"));
    }
    if let Some(home_dir) = dirs::home_dir() {
        candidates.push(home_dir.join(".moneyfmtrc"));
        candidates.push(home_dir.join(".config").join("moneyfmt").join("moneyfmtrc"));
    }

    candidates.into_iter().find(|p| p.exists())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(anyhow!("Invalid boolean value: {}", other)),
    }
}

fn parse_char(option: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(anyhow!("--{} expects a single character, got '{}'", option, value)),
    }
}
