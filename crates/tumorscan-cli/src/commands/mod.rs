pub mod check;
pub mod config;
pub mod scan;

use std::path::Path;

use anyhow::{Context, Result};
use tumorscan_core::config::ScannerConfig;

/// Load the config file if one was given, otherwise use defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<ScannerConfig> {
    match path {
        Some(path) => ScannerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(ScannerConfig::default()),
    }
}
