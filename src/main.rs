//! no-xdg-open - Open a file or URL with the application picked by a
//! plain rule file.
//!
//! The target is matched against `~/.no-xdg-open` by URL protocol, detected
//! MIME type, file extension and finally regex patterns. The winning
//! application is launched in the background.

mod config;
mod error;
mod launcher;
mod mime;
mod resolver;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::NotFound;

/// Exit code for a wrong command line.
const EXIT_USAGE: u8 = 1;
/// Exit code for configuration, lookup and launch failures.
const EXIT_FAILURE: u8 = 4;

/// Command-line arguments parser.
///
/// There are no flags: anything passed, `-foo` or `--help` included, is the
/// target.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// The file or URL to open
    #[arg(allow_hyphen_values = true)]
    target: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EXIT_USAGE);
        }
    };

    // Quiet by default, RUST_LOG=debug shows how the target was matched.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    debug!(?args, "CLI arguments parsed");

    match run(&args.target).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

async fn run(target: &str) -> Result<()> {
    // 1. Load configuration
    let config = Config::config_path()
        .and_then(|path| Config::load(&path))
        .context("Could not load ~/.no-xdg-open")?;

    // 2. Pick the application
    let app_name = config.find_app_name(target).await.ok_or_else(|| NotFound {
        target: target.to_string(),
    })?;

    // 3. Expand it and launch
    let command = config.resolve_app_name(app_name);
    launcher::launch(target, &command).await
}
