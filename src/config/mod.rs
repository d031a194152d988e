mod schema;

pub use schema::{AggregatorSettings, Config, SourcePaths};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::scoring::validate_weights;

/// Get the config directory path (~/.config/apo-engine/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("apo-engine"))
}

/// Get the default config file path (~/.config/apo-engine/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/apo-engine/config.yaml)
///
/// A missing file at the default path yields the built-in defaults. A missing
/// file at an explicit path is an error.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

fn check_range(errors: &mut Vec<String>, field: &str, value: f64, max: f64) {
    if !value.is_finite() || !(0.0..=max).contains(&value) {
        errors.push(format!("{}: {} is outside 0..={}", field, value, max));
    }
}

/// Validate a loaded configuration.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Err(weight_errors) = validate_weights(&config.weights) {
        errors.extend(weight_errors);
    }

    if let Some(ref industry) = config.industry {
        check_range(&mut errors, "industry.tech_adoption_rate", industry.tech_adoption_rate, 100.0);
        check_range(&mut errors, "industry.labor_market_factor", industry.labor_market_factor, 100.0);
        check_range(&mut errors, "industry.regulation_impact", industry.regulation_impact, 1.0);
        check_range(&mut errors, "industry.human_interaction_level", industry.human_interaction_level, 1.0);
    }

    if config.aggregator.max_attempts < 1 {
        errors.push("aggregator.max_attempts: must be at least 1".to_string());
    }

    if let Err(e) = humantime::parse_duration(config.aggregator.timeout.trim()) {
        errors.push(format!(
            "aggregator.timeout: invalid '{}' - {}",
            config.aggregator.timeout, e
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
