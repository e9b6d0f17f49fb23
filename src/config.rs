//! Configuration management module for no-xdg-open.
//!
//! This module loads `~/.no-xdg-open` and partitions it into the three
//! mappings the resolver works from: application command templates, a flat
//! lookup table of protocols, MIME types and extensions, and an ordered list
//! of regex patterns.

use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use toml::{Table, Value};
use tracing::debug;

/// File name of the configuration dotfile inside `$HOME`.
pub const CONFIG_FILE_NAME: &str = ".no-xdg-open";

/// Root configuration built once per run.
#[derive(Debug, Default)]
pub struct Config {
    /// Map of application names to command-line templates
    pub applications: HashMap<String, String>,
    /// Protocol prefixes, MIME types and extensions mapped to application names
    pub lookup: HashMap<String, String>,
    /// Patterns in declaration order, each mapped to an application name
    pub patterns: Vec<(Regex, String)>,
}

impl Config {
    /// Loads configuration from the given file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&text)?;
        debug!(
            path = %path.display(),
            applications = config.applications.len(),
            lookup = config.lookup.len(),
            patterns = config.patterns.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Parses a configuration document.
    ///
    /// Groups are visited in document order, so a key repeated across
    /// `protocols`, `mimes` and `extensions` keeps the last value seen.
    /// Unrecognised groups are ignored.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let document: Table = toml::from_str(text)?;
        let mut config = Self::default();

        for (group, entries) in &document {
            match group.as_str() {
                "applications" => {
                    for (name, command) in string_entries(group, entries)? {
                        config.applications.insert(name, command);
                    }
                }
                "protocols" | "mimes" | "extensions" => {
                    for (key, app) in string_entries(group, entries)? {
                        config.lookup.insert(key, app);
                    }
                }
                "patterns" => {
                    for (pattern, app) in string_entries(group, entries)? {
                        let regex = Regex::new(&pattern)
                            .map_err(|source| ConfigError::InvalidPattern { pattern, source })?;
                        config.patterns.push((regex, app));
                    }
                }
                _ => debug!(group = %group, "ignoring unknown configuration group"),
            }
        }

        Ok(config)
    }

    /// Returns the path to the configuration file, `$HOME/.no-xdg-open`.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .ok_or(ConfigError::MissingHome)?;
        Ok(PathBuf::from(home).join(CONFIG_FILE_NAME))
    }
}

/// Collects a group's entries, rejecting anything that isn't a string.
fn string_entries(group: &str, entries: &Value) -> Result<Vec<(String, String)>, ConfigError> {
    let Value::Table(table) = entries else {
        return Err(ConfigError::NotATable {
            group: group.to_string(),
        });
    };

    table
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => Ok((key.clone(), s.clone())),
            _ => Err(ConfigError::NonString {
                group: group.to_string(),
                key: key.clone(),
            }),
        })
        .collect()
}
