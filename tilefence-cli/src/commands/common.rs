//! Common helpers shared across CLI commands.

use std::path::PathBuf;

use tilefence::config::ConfigFile;

use crate::error::CliError;

/// Load configuration from an explicit path or the default location.
pub fn load_config(path: Option<PathBuf>) -> Result<ConfigFile, CliError> {
    let result = match &path {
        Some(p) => ConfigFile::load_from(p),
        None => ConfigFile::load(),
    };

    result.map_err(|e| CliError::Config(e.to_string()))
}

/// Build the Tokio runtime the commands run on.
pub fn build_runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Runtime(format!("Failed to create Tokio runtime: {}", e)))
}
