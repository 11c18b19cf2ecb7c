//! Command dispatch logic extracted from binary to reduce main function size.

use std::path::Path;

use anyhow::{ensure, Context, Result};

use super::args::Commands;
use super::handlers;
use crate::config::Config;
use crate::exit::TaxonExit;

/// Loads the configuration and executes the parsed command.
///
/// # Errors
/// Returns error if the configuration is invalid or the command handler fails.
pub fn execute(command: Commands, config_path: Option<&Path>) -> Result<TaxonExit> {
    let config = load_config(config_path)?;
    match command {
        Commands::Stats { file, format } => handlers::handle_stats(&file, &config, format),
        Commands::Ancestors {
            file,
            id,
            include_self,
        } => handlers::handle_ancestors(&file, &config, id, include_self),
        Commands::Lcs { file, a, b, longest } => handlers::handle_lcs(&file, &config, a, b, longest),
        Commands::Mica { file, a, b } => handlers::handle_mica(&file, &config, a, b),
        Commands::Distance {
            file,
            a,
            b,
            weighted,
        } => handlers::handle_distance(&file, &config, a, b, weighted),
        Commands::Export {
            file,
            vertices,
            edges,
        } => handlers::handle_export(&file, &config, &vertices, edges.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            ensure!(path.exists(), "config file {} not found", path.display());
            Config::from_path(path).with_context(|| format!("failed to load {}", path.display()))
        }
        None => Config::load().context("failed to load taxon.toml"),
    }
}
