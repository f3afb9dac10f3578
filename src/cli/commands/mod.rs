//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls the service to execute the command
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! Trello calls are async. Handlers that need them build a tokio runtime
//! and `block_on` a single async function; calls inside it run one after
//! another.

mod add_label;
mod auth;
mod board;
mod card;
mod comment;
mod completion;
mod config_cmd;
mod create;
mod init;
mod list_cmd;

// Re-export command functions for testing and direct invocation
pub use add_label::add_label;
pub use auth::auth;
pub use board::{board, boards};
pub use card::card;
pub use comment::comment;
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, path as config_path, set as config_set};
pub use create::{create_card, create_label};
pub use init::init;
pub use list_cmd::list;

use std::fmt::Display;
use std::sync::Arc;

use anyhow::{anyhow, Context as _, Result};
use serde::Serialize;
use tracing::debug;

use crate::auth::CredentialStore;
use crate::cli::args::{Command, ConfigAction};
use crate::config::Config;
use crate::secrets;
use crate::service::{Envelope, TrelloService};
use crate::trello::{TrelloApi, TrelloClient};
use crate::ui::output::{self, Verbosity};

/// Per-invocation state shared by all handlers.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub verbosity: Verbosity,
    pub json: bool,
    pub interactive: bool,
}

impl Context {
    pub fn quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    /// Print a status message unless `--quiet` or `--json`.
    pub fn say(&self, message: impl Display) {
        if !self.json {
            output::print(message, self.verbosity);
        }
    }
}

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Init {
            credentials,
            no_browser,
        } => init::init(ctx, &credentials, no_browser),
        Command::Auth {
            credentials,
            status,
            logout,
        } => auth::auth(ctx, &credentials, status, logout),

        Command::Boards => board::boards(ctx),
        Command::Board { board_id } => board::board(ctx, &board_id),
        Command::List { list_id } => list_cmd::list(ctx, &list_id),
        Command::Card { card_id } => card::card(ctx, &card_id),

        Command::CreateCard { list_id, name } => {
            create::create_card(ctx, &list_id, name.as_deref())
        }
        Command::Comment { card_id, text } => comment::comment(ctx, &card_id, text.as_deref()),
        Command::CreateLabel {
            board_id,
            name,
            color,
        } => create::create_label(ctx, &board_id, &name, &color),
        Command::AddLabel { card_id, label_id } => add_label::add_label(ctx, &card_id, &label_id),

        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(ctx),
            ConfigAction::Path => config_cmd::path(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Credential store for the configured secrets provider.
pub(crate) fn credential_store(config: &Config) -> Result<CredentialStore> {
    let store = secrets::create_store(config.secrets_provider())
        .context("Failed to initialize secret store")?;
    Ok(CredentialStore::new(store))
}

/// Service over the REST API using the stored credentials.
pub(crate) fn service(ctx: &Context) -> Result<TrelloService> {
    let credentials = credential_store(&ctx.config)?
        .load()
        .context("Failed to read stored credentials")?;
    debug!(?credentials, "building client");
    let client =
        TrelloClient::new(&ctx.config, credentials).context("Failed to build HTTP client")?;
    Ok(TrelloService::new(Arc::new(TrelloApi::new(client))))
}

/// Payload of a successful envelope; otherwise an error carrying the
/// status message and its cause.
pub(crate) fn require<T>(envelope: Envelope<T>) -> Result<T> {
    if envelope.is_success() {
        return Ok(envelope.payload);
    }
    match envelope.detail {
        Some(detail) => Err(anyhow!("{} ({})", envelope.status.message(), detail)),
        None => Err(anyhow!("{}", envelope.status.message())),
    }
}

/// Print `value` as JSON in `--json` mode, otherwise run `human`.
pub(crate) fn emit<T: Serialize + ?Sized>(ctx: &Context, value: &T, human: impl FnOnce()) -> Result<()> {
    if ctx.json {
        output::json(value).context("Failed to serialize output")?;
    } else if !ctx.quiet() {
        human();
    }
    Ok(())
}

/// The runtime handlers block on.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("Failed to start async runtime")
}
