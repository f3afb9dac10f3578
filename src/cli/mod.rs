//! cli
//!
//! Command-line interface layer for trellocli.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load the configuration once and hand it to command handlers
//! - Turn non-success service statuses into errors for `main`
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! handlers that call [`crate::service::TrelloService`]. No handler talks
//! to the network directly.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::{Context as _, Result};

use crate::config::Config;
use crate::logging;
use crate::ui::output::Verbosity;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    if let Err(e) = logging::init(cli.debug) {
        tracing::debug!(error = %e, "logging already initialized");
    }

    let config = match &cli.config {
        Some(path) => Config::load_or_new(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let ctx = commands::Context {
        config,
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        json: cli.json,
        interactive: cli.interactive(),
    };

    commands::dispatch(cli.command, &ctx)
}
