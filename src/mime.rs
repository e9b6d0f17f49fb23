//! MIME type detection through the `file` utility.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::process::Command;

/// Path of the classification utility.
const FILE_UTILITY: &str = "/usr/bin/file";

/// Classifies a local file and returns its MIME type, e.g. `application/pdf`.
///
/// Targets that are not local paths (URLs, typos) fail without running the
/// utility at all.
pub async fn detect_mime(target: &str) -> Result<String> {
    if !Path::new(target).exists() {
        anyhow::bail!("'{}' is not a local file", target);
    }

    let output = Command::new(FILE_UTILITY)
        .args(["--mime-type", "-b", target])
        .output()
        .await
        .with_context(|| format!("Failed to execute {}", FILE_UTILITY))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("{} failed on '{}': {}", FILE_UTILITY, target, stderr.trim());
    }

    let mime = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if mime.is_empty() {
        anyhow::bail!("{} printed no MIME type for '{}'", FILE_UTILITY, target);
    }
    Ok(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn text_file_is_classified() {
        if !Path::new(FILE_UTILITY).exists() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "shopping list\nmilk\neggs\n").unwrap();

        let mime = detect_mime(path.to_str().unwrap()).await.unwrap();
        assert_eq!(mime, "text/plain");
    }

    #[tokio::test]
    async fn urls_are_not_probed() {
        assert!(detect_mime("https://example.com/doc.pdf").await.is_err());
    }

    #[tokio::test]
    async fn missing_files_are_not_probed() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nothing-here.txt");
        assert!(detect_mime(missing.to_str().unwrap()).await.is_err());
    }
}
