//! Configuration file sanity checks for `config --check`.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::fs;

/// Required top-level keys in the YAML config.
const REQUIRED_KEYS: [&str; 4] = ["database", "currency", "default_min_stock", "separator_char"];

/// Verify the config file exists, parses, and carries every expected key.
/// Missing optional keys are reported but do not fail the check: loading
/// falls back to defaults for them.
pub fn check_config_file() -> AppResult<()> {
    let path = Config::config_file();
    if !path.exists() {
        return Err(AppError::Config(format!(
            "Config file not found: {} (run 'stockpos init' first)",
            path.display()
        )));
    }

    let content = fs::read_to_string(&path)?;
    let doc: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;

    let mut missing = Vec::new();
    for key in REQUIRED_KEYS {
        if doc.get(key).is_none() {
            missing.push(key);
        }
    }

    if missing.is_empty() {
        success("Configuration file is complete.");
    } else {
        for key in &missing {
            warning(format!("Missing field '{}' (default will be used).", key));
        }
    }

    Ok(())
}
