//! Shared constants used across the application.

use std::time::Duration;

/// The directory, relative to the target project, that receives rule files
pub const CURSOR_RULES_DIR: &str = ".cursor/rules";

/// Remote location serving every rule file as `<base>/<identifier>`
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/cursor-rules/collection/main/.cursor/rules";

/// Upper bound for a single rule download
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Application name used for the platform configuration directory
pub const APP_NAME: &str = "rule-sync";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Rules synced when no manifest is configured. Keep this list alphabetical.
pub const BUILTIN_RULES: &[&str] = &[
    "clean-code.mdc",
    "code-review.mdc",
    "codequality.mdc",
    "commit-messages.mdc",
    "database.mdc",
    "docker.mdc",
    "fastapi.mdc",
    "gitflow.mdc",
    "go.mdc",
    "nextjs.mdc",
    "node-express.mdc",
    "python.mdc",
    "react.mdc",
    "rust.mdc",
    "svelte.mdc",
    "sveltekit.mdc",
    "tailwind.mdc",
    "testing.mdc",
    "typescript.mdc",
    "vue.mdc",
];
