//! Application launcher module.
//!
//! This module starts the resolved command line in the background through
//! `/bin/sh`, so templates may use `$0`, pipes, variable assignments and
//! builtins.

use anyhow::{Context, Result};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Shell used to interpret command templates.
const SHELL: &str = "/bin/sh";

/// Launches `command` for `target` without waiting for the application.
///
/// Runs `/bin/sh -c "<command> &" <target>`, so the target is the shell's
/// `$0`. Only the short-lived shell is waited for. The resolved command is
/// echoed to stderr first.
///
/// # Returns
/// * `Ok(())` once the shell has put the application in the background
/// * `Err(_)` if the shell could not be started or rejected the template
pub async fn launch(target: &str, command: &str) -> Result<()> {
    eprintln!("{}", command);

    if command.trim().is_empty() {
        anyhow::bail!("No command to launch");
    }

    debug!(command, "launching through {}", SHELL);
    let status = Command::new(SHELL)
        .arg("-c")
        .arg(format!("{} &", command))
        .arg(target)
        .stdin(Stdio::null())
        .status()
        .await
        .with_context(|| format!("Failed to launch {}", command))?;

    if !status.success() {
        anyhow::bail!("{} exited with {} while launching {}", SHELL, status, command);
    }

    Ok(())
}
