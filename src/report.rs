//! Rendering of a [`RunSummary`] for the terminal.

use std::io::{self, Write};

use serde_json::json;

use crate::sync::{Outcome, RunSummary};

/// How the binary prints a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Writes the per-rule lines (unless `quiet`), the totals, and the failures
pub fn write_human<W: Write>(out: &mut W, summary: &RunSummary, quiet: bool) -> io::Result<()> {
    if !quiet {
        for file in &summary.outcomes {
            match &file.outcome {
                Outcome::Downloaded => writeln!(out, "\u{2713} {} downloaded", file.identifier)?,
                Outcome::SkippedExists => {
                    writeln!(out, "\u{2022} {} skipped (exists)", file.identifier)?
                }
                Outcome::Failed { reason } => {
                    writeln!(out, "\u{26a0} {} failed: {}", file.identifier, reason)?
                }
            }
        }
    }

    writeln!(
        out,
        "{} downloaded, {} skipped, {} failed",
        summary.downloaded(),
        summary.skipped(),
        summary.failed()
    )?;

    if summary.failed() > 0 {
        writeln!(out, "Warning: the following rules could not be synced:")?;
        for (identifier, reason) in summary.failures() {
            writeln!(out, "  - {identifier}: {reason}")?;
        }
        writeln!(
            out,
            "Check connectivity and re-run; use --overwrite to refresh rules that already exist."
        )?;
    }

    Ok(())
}

/// Builds the machine-readable form of a summary
pub fn to_json(summary: &RunSummary) -> serde_json::Value {
    json!({
        "target": summary.target.display().to_string(),
        "downloaded": summary.downloaded(),
        "skipped": summary.skipped(),
        "failed": summary.failed(),
        "outcomes": summary.outcomes,
    })
}

/// Prints a summary to stdout in the requested format
pub fn print_summary(summary: &RunSummary, format: OutputFormat, quiet: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => write_human(&mut out, summary, quiet),
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(&to_json(summary))
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            writeln!(out, "{rendered}")
        }
    }
}
