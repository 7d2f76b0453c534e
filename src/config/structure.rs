//! Defines the `Config` struct and how it resolves into run settings.

use std::time::Duration;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::Result;
use crate::manifest::RuleManifest;

/// Contents of the optional configuration file. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Remote location serving the rule files
    pub base_url: Option<String>,
    /// Per-file download timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Rules to sync instead of the built-in list
    pub rules: Option<Vec<String>>,
}

/// Settings for one run after applying overrides and defaults
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Duration,
    pub manifest: RuleManifest,
}

impl Config {
    /// Creates a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges command-line/environment overrides over the file values and
    /// fills the rest from built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured rule list is not a valid manifest.
    pub fn resolve(&self, base_url: Option<String>, timeout_secs: Option<u64>) -> Result<Settings> {
        let manifest = match &self.rules {
            Some(rules) => RuleManifest::new(rules.iter().map(String::as_str))?,
            None => RuleManifest::builtin(),
        };

        let base_url = base_url
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = timeout_secs
            .or(self.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Settings {
            base_url,
            timeout,
            manifest,
        })
    }
}
