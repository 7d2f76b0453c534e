//! Materializes the rule manifest into `<target>/.cursor/rules/`.
//!
//! Rules are processed one at a time in manifest order. Each rule ends in
//! exactly one of three states: skipped because it already exists, downloaded,
//! or failed. A failed rule never stops the loop; only the inability to create
//! the rules directory aborts a run.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::constants::CURSOR_RULES_DIR;
use crate::error::{Error, Result};
use crate::filter::RuleFilter;
use crate::manifest::RuleManifest;
use crate::source::RuleSource;

/// Resolved invocation parameters for one run
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Project root that receives `.cursor/rules/`
    pub target_dir: PathBuf,
    /// Replace rules that already exist locally
    pub overwrite: bool,
    /// Restricts the run to matching identifiers
    pub filter: Option<RuleFilter>,
}

impl SyncRequest {
    pub fn new<P: Into<PathBuf>>(target_dir: P) -> Self {
        Self {
            target_dir: target_dir.into(),
            overwrite: false,
            filter: None,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_filter(mut self, filter: Option<RuleFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// `<target>/.cursor/rules`
    pub fn rules_dir(&self) -> PathBuf {
        self.target_dir.join(CURSOR_RULES_DIR)
    }
}

/// Why a single rule could not be materialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    /// The remote answered with a non-success HTTP status
    Status(u16),
    /// The transfer exceeded the per-file timeout
    Timeout,
    /// Connection, TLS, or body transfer error
    Transport(String),
    /// The local file could not be written
    Io(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "HTTP status {code}"),
            Self::Timeout => write!(f, "timed out"),
            Self::Transport(msg) => write!(f, "transfer error: {msg}"),
            Self::Io(msg) => write!(f, "write error: {msg}"),
        }
    }
}

impl From<io::Error> for FailureReason {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Terminal state of one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Downloaded,
    SkippedExists,
    Failed { reason: FailureReason },
}

/// Result for a single manifest entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub identifier: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Every outcome of a run, in manifest order
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub target: PathBuf,
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    fn new(target: PathBuf) -> Self {
        Self {
            target,
            outcomes: Vec::new(),
        }
    }

    fn record(&mut self, identifier: &str, outcome: Outcome) {
        self.outcomes.push(FileOutcome {
            identifier: identifier.to_string(),
            outcome,
        });
    }

    pub fn downloaded(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Downloaded))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::SkippedExists))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    /// Failed identifiers with their reasons
    pub fn failures(&self) -> impl Iterator<Item = (&str, &FailureReason)> {
        self.outcomes.iter().filter_map(|f| match &f.outcome {
            Outcome::Failed { reason } => Some((f.identifier.as_str(), reason)),
            _ => None,
        })
    }

    /// Looks up the outcome recorded for `identifier`
    pub fn outcome_of(&self, identifier: &str) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|f| f.identifier == identifier)
            .map(|f| &f.outcome)
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|f| pred(&f.outcome)).count()
    }
}

/// Syncs a manifest from a [`RuleSource`] into a project
pub struct RuleSyncer<S> {
    manifest: RuleManifest,
    source: S,
}

impl<S: RuleSource> RuleSyncer<S> {
    pub fn new(manifest: RuleManifest, source: S) -> Self {
        Self { manifest, source }
    }

    /// Runs one sync.
    ///
    /// # Behavior
    ///
    /// 1. Creates `<target>/.cursor/rules` including any missing parents
    /// 2. For every identifier accepted by the filter, in manifest order:
    ///    - existing file and no overwrite: recorded as skipped, not fetched
    ///    - otherwise fetched and written atomically over the destination
    /// 3. Per-rule failures are recorded and the loop continues
    ///
    /// # Errors
    ///
    /// Returns [`Error::Setup`] if the rules directory cannot be created. No
    /// rule is processed in that case.
    pub async fn run(&self, request: &SyncRequest) -> Result<RunSummary> {
        let rules_dir = request.rules_dir();
        fs::create_dir_all(&rules_dir)
            .await
            .map_err(|source| Error::Setup {
                path: rules_dir.clone(),
                source,
            })?;

        info!(
            rules_dir = %rules_dir.display(),
            overwrite = request.overwrite,
            filter = request.filter.as_ref().map(RuleFilter::as_str),
            "Starting rule sync"
        );

        let mut summary = RunSummary::new(request.target_dir.clone());
        for identifier in self.manifest.matching(request.filter.as_ref()) {
            let outcome = self
                .sync_rule(&rules_dir, identifier, request.overwrite)
                .await;
            summary.record(identifier, outcome);
        }

        info!(
            downloaded = summary.downloaded(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            "Rule sync finished"
        );
        Ok(summary)
    }

    async fn sync_rule(&self, rules_dir: &Path, identifier: &str, overwrite: bool) -> Outcome {
        let dest = rules_dir.join(identifier);

        if !overwrite {
            match fs::try_exists(&dest).await {
                Ok(true) => {
                    debug!(rule = %identifier, "Rule exists, skipping");
                    return Outcome::SkippedExists;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(
                        rule = %identifier,
                        path = %dest.display(),
                        error = %e,
                        "Cannot check for existing rule"
                    );
                    return Outcome::Failed { reason: e.into() };
                }
            }
        }

        match self.download(&dest, identifier).await {
            Ok(bytes) => {
                info!(rule = %identifier, bytes, "Downloaded rule");
                Outcome::Downloaded
            }
            Err(reason) => {
                warn!(
                    rule = %identifier,
                    location = %self.source.location(identifier),
                    %reason,
                    "Failed to sync rule"
                );
                Outcome::Failed { reason }
            }
        }
    }

    async fn download(&self, dest: &Path, identifier: &str) -> std::result::Result<usize, FailureReason> {
        let contents = self.source.fetch(identifier).await?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await?;
        }
        write_atomically(dest, &contents).await?;

        Ok(contents.len())
    }
}

/// Writes to a hidden sibling file and renames it over `dest`, so `dest`
/// holds either its previous content or all of `contents`.
async fn write_atomically(dest: &Path, contents: &[u8]) -> io::Result<()> {
    let file_name = dest
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = dest.with_file_name(format!(".{file_name}.tmp"));

    let written = match fs::write(&temp_path, contents).await {
        Ok(()) => fs::rename(&temp_path, dest).await,
        Err(e) => Err(e),
    };

    if written.is_err() {
        let _ = fs::remove_file(&temp_path).await;
    }
    written
}
