//! Rule-based lookup of the application that opens a target.
//!
//! Rules are tried in a fixed order and the first hit wins:
//! protocol prefix, detected MIME type, file extension, then patterns.

use crate::config::Config;
use crate::mime;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Matches a URL scheme prefix such as `https://`.
#[allow(clippy::expect_used)]
static PROTOCOL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-z]+://").expect("protocol regex is valid"));

/// Application names that can be overridden from the environment.
const ENV_OVERRIDABLE: [&str; 2] = ["browser", "editor"];

impl Config {
    /// Finds the application name for `target`, probing its MIME type with
    /// the `file` utility when no protocol rule applies.
    pub async fn find_app_name(&self, target: &str) -> Option<&str> {
        if let Some(app) = self.match_protocol(target) {
            return Some(app);
        }

        let mime = match mime::detect_mime(target).await {
            Ok(mime) => Some(mime),
            Err(e) => {
                debug!(file = target, error = %e, "MIME detection skipped");
                None
            }
        };
        self.match_local(target, mime.as_deref())
    }

    /// Runs every lookup stage against `target`, asking `probe` for the MIME
    /// type. The probe is not called when a protocol rule matches.
    pub fn find_app_name_with<P>(&self, target: &str, probe: P) -> Option<&str>
    where
        P: FnOnce(&str) -> Option<String>,
    {
        if let Some(app) = self.match_protocol(target) {
            return Some(app);
        }

        let mime = probe(target);
        self.match_local(target, mime.as_deref())
    }

    /// MIME, extension and pattern stages, in that order.
    ///
    /// A protocol prefix without a rule ends up here too.
    fn match_local(&self, target: &str, mime: Option<&str>) -> Option<&str> {
        if let Some(app) = mime.and_then(|mime| self.lookup.get(mime)) {
            debug!(file = target, mime, app = %app, "matched MIME type");
            return Some(app.as_str());
        }

        if let Some(app) = extension(target).and_then(|ext| self.lookup.get(ext)) {
            debug!(file = target, app = %app, "matched extension");
            return Some(app.as_str());
        }

        let (regex, app) = self.patterns.iter().find(|(regex, _)| regex.is_match(target))?;
        debug!(file = target, pattern = regex.as_str(), app = %app, "matched pattern");
        Some(app.as_str())
    }

    /// Expands an application name into a command-line template.
    pub fn resolve_app_name(&self, app_name: &str) -> String {
        self.resolve_app_name_with(app_name, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::resolve_app_name`] with a custom environment lookup.
    ///
    /// `browser` and `editor` defer to `$BROWSER`/`$EDITOR` when set and
    /// non-empty, giving `"<value> $0"`. Otherwise the name is looked up in
    /// `applications`, and an unknown name is used as the command itself.
    pub fn resolve_app_name_with<F>(&self, app_name: &str, env: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        if ENV_OVERRIDABLE.contains(&app_name) {
            let var = app_name.to_uppercase();
            match env(&var) {
                Some(value) if !value.is_empty() => {
                    debug!(app_name, var = %var, "using environment override");
                    return format!("{} $0", value);
                }
                _ => {}
            }
        }

        self.applications
            .get(app_name)
            .cloned()
            .unwrap_or_else(|| app_name.to_string())
    }

    fn match_protocol(&self, target: &str) -> Option<&str> {
        let protocol = PROTOCOL_PATTERN.find(target)?.as_str();
        let app = self.lookup.get(protocol);
        match app {
            Some(app) => debug!(file = target, protocol, app = %app, "matched protocol"),
            None => debug!(file = target, protocol, "no rule for protocol"),
        }
        app.map(String::as_str)
    }
}

/// Returns the extension of the last path element, dot included.
fn extension(target: &str) -> Option<&str> {
    let name_start = target.rfind('/').map_or(0, |i| i + 1);
    let name = &target[name_start..];
    name.rfind('.').map(|dot| &name[dot..])
}
