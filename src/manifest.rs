//! The list of rule files a sync knows about.

use std::collections::HashSet;
use std::path::{Component, Path};

use crate::constants::BUILTIN_RULES;
use crate::error::{Error, Result};
use crate::filter::RuleFilter;

/// Ordered, duplicate-free list of rule identifiers
///
/// Identifiers are paths relative to the rules directory, e.g. `clean-code.mdc`
/// or `python/fastapi.mdc`. They double as the remote resource name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleManifest {
    identifiers: Vec<String>,
}

impl RuleManifest {
    /// Builds a manifest from the given identifiers, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidManifest`] if an identifier is empty, absolute,
    /// contains `..`, or appears more than once.
    pub fn new<I, S>(identifiers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut list = Vec::new();

        for identifier in identifiers {
            let identifier = identifier.into();
            validate_identifier(&identifier)?;
            if !seen.insert(identifier.clone()) {
                return Err(Error::InvalidManifest(format!(
                    "duplicate rule '{identifier}'"
                )));
            }
            list.push(identifier);
        }

        Ok(Self { identifiers: list })
    }

    /// The curated rule set shipped with the tool
    pub fn builtin() -> Self {
        Self {
            identifiers: BUILTIN_RULES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.identifiers.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.iter().any(|id| id == identifier)
    }

    /// Identifiers selected by `filter`, in manifest order. `None` selects all.
    pub fn matching<'a>(&'a self, filter: Option<&'a RuleFilter>) -> impl Iterator<Item = &'a str> {
        self.iter()
            .filter(move |id| filter.map_or(true, |f| f.matches(id)))
    }
}

impl Default for RuleManifest {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Rejects identifiers that would resolve outside the rules directory
fn validate_identifier(identifier: &str) -> Result<()> {
    if identifier.trim().is_empty() {
        return Err(Error::InvalidManifest("empty rule name".to_string()));
    }

    let escapes = Path::new(identifier)
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));
    if escapes || identifier.starts_with('/') || identifier.ends_with('/') {
        return Err(Error::InvalidManifest(format!(
            "rule '{identifier}' must be a relative file path inside the rules directory"
        )));
    }

    Ok(())
}
