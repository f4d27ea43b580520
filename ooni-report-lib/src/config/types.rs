use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Output format of the rendered report
///
/// Parsed case-insensitively, both from the CLI and from configuration files.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "String")]
pub enum OutputFormat {
    /// Plain-text sections, one block per measurement
    #[default]
    Text,
    /// One JSON summary document per measurement
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    /// Default: "info"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Show module path (target) in log messages
    /// Default: false
    #[serde(default = "default_false")]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), show_target: default_false() }
    }
}

/// Report output configuration
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Default: text
    #[serde(default)]
    pub format: OutputFormat,
    /// Include HTTP response bodies in the report
    /// Default: true
    #[serde(default = "default_true")]
    pub include_bodies: bool,
    /// Bodies longer than this are truncated
    /// Default: 4096
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Pretty-print JSON output
    /// Default: true
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            include_bodies: default_true(),
            max_body_bytes: default_max_body_bytes(),
            pretty: default_true(),
        }
    }
}

/// Main configuration structure. Every section is optional.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Apply command-line overrides; flags that were given win over file values.
    pub fn apply_overrides(&mut self, format: Option<OutputFormat>, no_bodies: bool) {
        if let Some(format) = format {
            self.output.format = format;
        }
        if no_bodies {
            self.output.include_bodies = false;
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_body_bytes() -> usize {
    4096
}
