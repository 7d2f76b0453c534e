//! Handles the logic for determining the configuration file path.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::constants::{APP_NAME, CONFIG_FILE_NAME};

/// Returns the path to the default configuration file
///
/// Uses the platform-specific application configuration directory:
/// - Linux: `$XDG_CONFIG_HOME/rule-sync/config.json` or `$HOME/.config/rule-sync/config.json`
/// - macOS: `$HOME/Library/Application Support/rule-sync/config.json`
/// - Windows: `%APPDATA%/rule-sync/config.json`
///
/// Falls back to `$HOME/.config/rule-sync/config.json` when no platform
/// directory can be determined, and returns `None` if there is no home either.
pub fn get_config_file_path() -> Option<PathBuf> {
    if let Some(project_dirs) = ProjectDirs::from("", "", APP_NAME) {
        return Some(project_dirs.config_dir().join(CONFIG_FILE_NAME));
    }

    std::env::var_os("HOME").map(|home| {
        Path::new(&home)
            .join(".config")
            .join(APP_NAME)
            .join(CONFIG_FILE_NAME)
    })
}
