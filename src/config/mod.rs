// src/config/mod.rs
pub mod io;
pub mod types;

use std::path::Path;

pub use self::io::CONFIG_FILE;
pub use self::types::{Config, ExportConfig, TaxonomyConfig};
use crate::error::Result;

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `taxon.toml` from the working directory.
    ///
    /// # Errors
    /// Returns error if the file exists but is unreadable or malformed.
    pub fn load() -> Result<Self> {
        io::load_toml_config(Path::new(CONFIG_FILE))
    }

    /// # Errors
    /// Returns error if the file exists but is unreadable or malformed.
    pub fn from_path(path: &Path) -> Result<Self> {
        io::load_toml_config(path)
    }

    /// # Errors
    /// Returns `Config` on malformed TOML.
    pub fn parse_toml(content: &str) -> Result<Self> {
        io::parse_toml(content)
    }

    /// Writes the configuration as TOML to `path`.
    ///
    /// # Errors
    /// Returns error if file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        io::save_to_file(self, path)
    }
}
