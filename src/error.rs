//! Error types for configuration loading and application lookup.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading `~/.no-xdg-open`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `HOME` is unset, so the dotfile cannot be located
    #[error("HOME is not set")]
    MissingHome,

    /// The file is missing or unreadable
    #[error("cannot read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid TOML
    #[error("malformed document")]
    Parse(#[from] toml::de::Error),

    /// A known group holds something other than a table
    #[error("configuration groups must be tables (group '{group}')")]
    NotATable { group: String },

    /// A leaf value is not a string
    #[error("configuration values must be strings ({group}.{key})")]
    NonString { group: String, key: String },

    /// A key under `[patterns]` is not a valid regular expression
    #[error("invalid pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Raised when no rule in the configuration matches the target.
#[derive(Debug, Error)]
#[error("Couldn't find a way to open {target}")]
pub struct NotFound {
    pub target: String,
}
