//! Optional configuration file for the remote location, timeout, and rule list.
//!
//! The file is JSON and every field is optional:
//!
//! ```json
//! {
//!   "base_url": "https://example.com/rules",
//!   "timeout_secs": 20,
//!   "rules": ["clean-code.mdc", "rust.mdc"]
//! }
//! ```

pub mod io;
pub mod path;
pub mod structure;

pub use io::{load_config, load_config_from_file};
pub use path::get_config_file_path;
pub use structure::{Config, Settings};
