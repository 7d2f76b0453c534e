//! Name filter narrowing which manifest entries a run processes.
//!
//! A pattern is a `|`-separated list of alternatives. Alternatives that
//! contain glob metacharacters must match the whole identifier; plain
//! alternatives match anywhere inside it. So `"react*|tailwind"` selects
//! `react.mdc` and `tailwind.mdc` but not `preact.mdc`.

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{Error, Result};

/// One `|`-separated piece of a filter pattern
#[derive(Debug, Clone)]
enum Alternative {
    Glob(GlobMatcher),
    Substring(String),
}

impl Alternative {
    fn matches(&self, identifier: &str) -> bool {
        match self {
            Self::Glob(matcher) => matcher.is_match(identifier),
            Self::Substring(needle) => identifier.contains(needle.as_str()),
        }
    }
}

/// A compiled filter pattern
#[derive(Debug, Clone)]
pub struct RuleFilter {
    pattern: String,
    alternatives: Vec<Alternative>,
}

impl RuleFilter {
    /// Compiles a filter pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFilter`] if the pattern has an empty
    /// alternative (e.g. `"a*||b*"`) or an alternative is not a valid glob.
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidFilter {
            pattern: pattern.to_string(),
            reason,
        };

        let mut alternatives = Vec::new();
        for raw in pattern.split('|') {
            let alternative = raw.trim();
            if alternative.is_empty() {
                return Err(invalid("empty alternative".to_string()));
            }

            if is_glob_pattern(alternative) {
                let glob = GlobBuilder::new(alternative)
                    .literal_separator(false)
                    .build()
                    .map_err(|e| invalid(e.kind().to_string()))?;
                alternatives.push(Alternative::Glob(glob.compile_matcher()));
            } else {
                alternatives.push(Alternative::Substring(alternative.to_string()));
            }
        }

        Ok(Self {
            pattern: pattern.to_string(),
            alternatives,
        })
    }

    /// Returns `true` if any alternative accepts the identifier
    pub fn matches(&self, identifier: &str) -> bool {
        self.alternatives.iter().any(|alt| alt.matches(identifier))
    }

    /// The pattern as given by the user
    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

/// Check if a string contains glob pattern characters
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_glob() {
        let filter = RuleFilter::parse("a*").unwrap();
        assert!(filter.matches("alpha.mdc"));
        assert!(!filter.matches("beta.mdc"));
    }

    #[test]
    fn test_alternatives() {
        let filter = RuleFilter::parse("a*|b*").unwrap();
        assert!(filter.matches("alpha.mdc"));
        assert!(filter.matches("beta.mdc"));
        assert!(!filter.matches("gamma.mdc"));
    }

    #[test]
    fn test_glob_must_match_whole_identifier() {
        let filter = RuleFilter::parse("react*").unwrap();
        assert!(filter.matches("react.mdc"));
        assert!(!filter.matches("preact.mdc"));
    }

    #[test]
    fn test_plain_alternative_is_substring() {
        let filter = RuleFilter::parse("svelte").unwrap();
        assert!(filter.matches("svelte.mdc"));
        assert!(filter.matches("sveltekit.mdc"));
        assert!(!filter.matches("vue.mdc"));
    }

    #[test]
    fn test_glob_crosses_nested_folders() {
        let filter = RuleFilter::parse("python*").unwrap();
        assert!(filter.matches("python/fastapi.mdc"));
    }

    #[test]
    fn test_whitespace_around_alternatives_is_ignored() {
        let filter = RuleFilter::parse(" go* | rust.mdc ").unwrap();
        assert!(filter.matches("go.mdc"));
        assert!(filter.matches("rust.mdc"));
    }

    #[test]
    fn test_empty_alternative_rejected() {
        let err = RuleFilter::parse("a*||b*").unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("a*||b*"));
    }

    #[test]
    fn test_invalid_glob_rejected() {
        let err = RuleFilter::parse("[abc").unwrap_err();
        assert!(matches!(err, Error::InvalidFilter { .. }));
    }
}
