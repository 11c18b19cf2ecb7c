// src/config/types.rs
use serde::{Deserialize, Serialize};

/// Root of `taxon.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Construction and traversal settings for one [`crate::taxonomy::Taxonomy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Vertex capacity reserved up front; edges reserve the same amount.
    #[serde(default)]
    pub initial_capacity: usize,
    /// Traversal steps between two polls of the cancellation flag.
    #[serde(default = "default_cancel_check_interval")]
    pub cancel_check_interval: usize,
    #[serde(default = "default_true")]
    pub parallel_warmup: bool,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            cancel_check_interval: default_cancel_check_interval(),
            parallel_warmup: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default)]
    pub include_probability: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            include_probability: false,
        }
    }
}

const fn default_true() -> bool { true }
const fn default_cancel_check_interval() -> usize { 1024 }
fn default_separator() -> String { ";".to_string() }
