//! A Rust library for syncing editor rule files into a project.
//!
//! A fixed manifest of rule files (e.g. `clean-code.mdc`) is downloaded from a
//! remote base location into `<project>/.cursor/rules/`. Existing files are
//! left alone unless overwrite is requested, and a rule that fails to download
//! is reported without stopping the others.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use rule_sync::{HttpRuleSource, RuleManifest, RuleSyncer, SyncRequest};
//!
//! # async fn example() -> rule_sync::Result<()> {
//! let source = HttpRuleSource::new("https://example.com/rules", Duration::from_secs(30))?;
//! let syncer = RuleSyncer::new(RuleManifest::builtin(), source);
//! let summary = syncer.run(&SyncRequest::new("my-project")).await?;
//! println!("{} downloaded, {} failed", summary.downloaded(), summary.failed());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod manifest;
pub mod report;
pub mod source;
pub mod sync;

pub use config::{load_config, load_config_from_file, Config, Settings};
pub use error::{Error, Result};
pub use filter::RuleFilter;
pub use manifest::RuleManifest;
pub use report::OutputFormat;
pub use source::{HttpRuleSource, RuleSource};
pub use sync::{FailureReason, FileOutcome, Outcome, RuleSyncer, RunSummary, SyncRequest};
