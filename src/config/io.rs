//! Handles reading the configuration file.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use super::path::get_config_file_path;
use super::structure::Config;
use crate::error::{Error, Result};

/// Loads configuration from the default configuration file
///
/// A missing file, or a platform without a configuration directory, yields
/// the default configuration.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config() -> Result<Config> {
    match get_config_file_path() {
        Some(config_path) => load_config_from_file(config_path),
        None => Ok(Config::default()),
    }
}

/// Loads configuration from a specific file path
///
/// # Arguments
///
/// * `config_path` - Path to the configuration file
///
/// # Errors
///
/// Returns an error if file reading or JSON parsing fails
pub fn load_config_from_file<P: AsRef<Path>>(config_path: P) -> Result<Config> {
    let config_path = config_path.as_ref();
    let config_error = |message: String| Error::Config {
        path: config_path.to_path_buf(),
        message,
    };

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %config_path.display(), "No configuration file, using defaults");
            return Ok(Config::default());
        }
        Err(e) => return Err(config_error(e.to_string())),
    };

    // Trim any trailing whitespace or newlines that might cause parsing issues
    let trimmed_content = config_content.trim();

    // Handle empty file case
    if trimmed_content.is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_json::from_str(trimmed_content).map_err(|e| {
        config_error(format!(
            "failed to parse configuration file: {} (content length: {} chars)",
            e,
            trimmed_content.len()
        ))
    })?;

    debug!(path = %config_path.display(), "Loaded configuration");
    Ok(config)
}
