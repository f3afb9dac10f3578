//! init command - Set up credentials, authorize, and list boards

use anyhow::{bail, Context as _, Result};
use tracing::info;

use super::auth::store_api_args;
use super::{board::print_boards, credential_store, require, runtime, service, Context};
use crate::auth::{AuthError, CredentialStore, OAuthFlowManager, APP_KEY_URL};
use crate::cli::args::ApiCredentialArgs;
use crate::ui::prompts::{self, TerminalVerifierPrompt};

/// Run the init command.
///
/// Missing API values are prompted for in interactive mode. The OAuth
/// handshake runs only when no access token is stored.
pub fn init(ctx: &Context, args: &ApiCredentialArgs, no_browser: bool) -> Result<()> {
    let store = credential_store(&ctx.config)?;
    store_api_args(&store, args)?;
    prompt_for_api_pair(ctx, &store)?;

    let rt = runtime()?;
    rt.block_on(init_async(ctx, &store, no_browser))
}

async fn init_async(ctx: &Context, store: &CredentialStore, no_browser: bool) -> Result<()> {
    let mut flow = OAuthFlowManager::new(&ctx.config, store)?;
    let mut prompt = TerminalVerifierPrompt {
        open_browser: !no_browser,
        interactive: ctx.interactive,
    };

    match flow.ensure_authorized(&mut prompt).await {
        Ok(_) => info!(state = ?flow.state(), "authorized"),
        Err(AuthError::Cancelled) => bail!("Authorization cancelled"),
        Err(e) => return Err(e).context("Authorization failed"),
    }

    ctx.say("Authorized. Your boards:\n");

    let boards = require(service(ctx)?.list_boards().await)?;
    print_boards(ctx, &boards)
}

/// Ask for the API key and secret if either is missing.
fn prompt_for_api_pair(ctx: &Context, store: &CredentialStore) -> Result<()> {
    let credentials = store.load().context("Failed to read stored credentials")?;
    if credentials.has_api_pair() {
        return Ok(());
    }
    if !ctx.interactive {
        return Err(AuthError::MissingApiCredentials.into());
    }

    eprintln!("Get your API key and secret at {}", APP_KEY_URL);
    let key = match credentials.api_key {
        Some(_) => None,
        None => Some(prompts::input("API key", None, ctx.interactive)?),
    };
    let secret = match credentials.api_secret {
        Some(_) => None,
        None => Some(prompts::password("API secret", ctx.interactive)?),
    };

    store
        .save_api(key.as_deref(), secret.as_deref(), None)
        .context("Failed to store API credentials")?;

    if !store.load()?.has_api_pair() {
        return Err(AuthError::MissingApiCredentials.into());
    }
    Ok(())
}
