// src/config/io.rs
use std::fs;
use std::path::Path;

use super::types::Config;
use crate::error::{Result, TaxonomyError};

pub const CONFIG_FILE: &str = "taxon.toml";

/// Reads `path`, falling back to defaults when the file does not exist.
///
/// # Errors
/// Returns `Io` if the file exists but cannot be read and `Config` if it is
/// not valid TOML for [`Config`].
pub fn load_toml_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    let config = parse_toml(&content)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// # Errors
/// Returns `Config` on malformed TOML or out-of-range values.
pub fn parse_toml(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.taxonomy.cancel_check_interval == 0 {
        return Err(TaxonomyError::Config(
            "taxonomy.cancel_check_interval must be at least 1".to_string(),
        ));
    }
    if config.export.separator.is_empty() {
        return Err(TaxonomyError::Config(
            "export.separator must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// # Errors
/// Returns error if serialization or the file write fails.
pub fn save_to_file(config: &Config, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content).map_err(|source| TaxonomyError::Io {
        source,
        path: path.to_path_buf(),
    })
}
