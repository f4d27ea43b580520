use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{ReportError, Result};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Load configuration from a TOML file, or YAML when the extension is
/// `.yaml`/`.yml`.
pub fn load_from_path<P: AsRef<Path>>(p: P) -> Result<Config> {
    let path = p.as_ref();
    let txt = fs::read_to_string(path)
        .map_err(|e| ReportError::Config(format!("Failed to read config file: {e}")))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let cfg: Config = if is_yaml {
        serde_norway::from_str(&txt)
            .map_err(|e| ReportError::Config(format!("Failed to parse config: {e}")))?
    } else {
        toml::from_str(&txt)
            .map_err(|e| ReportError::Config(format!("Failed to parse config: {e}")))?
    };

    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> Result<()> {
    let level = cfg.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ReportError::Config(format!(
            "Invalid log level: {}",
            cfg.logging.level
        )));
    }

    if cfg.output.max_body_bytes == 0 {
        return Err(ReportError::Config(
            "output.max_body_bytes must be greater than zero".to_string(),
        ));
    }

    Ok(())
}
