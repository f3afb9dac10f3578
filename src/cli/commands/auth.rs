//! cli::commands::auth
//!
//! Store, inspect, or clear credentials.
//!
//! # Design
//!
//! - Values given with `--api-key`/`--api-secret`/`--api-token` (or the
//!   matching `TRELLO_*` variables) are stored as-is
//! - `--status` reports which values are stored, never the values
//! - `--logout` removes the OAuth access token and keeps the API pair
//!
//! # Example
//!
//! ```bash
//! trello auth --api-key KEY --api-secret SECRET
//! trello auth --status
//! trello auth --logout
//! ```

use anyhow::{Context as _, Result};
use serde::Serialize;

use super::{credential_store, emit, Context};
use crate::auth::{CredentialStore, Credentials, APP_KEY_URL};
use crate::cli::args::ApiCredentialArgs;

/// Which credentials are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthStatus {
    pub api_key: bool,
    pub api_secret: bool,
    pub api_token: bool,
    pub access_token: bool,
    pub authorized: bool,
}

impl AuthStatus {
    pub fn of(credentials: &Credentials) -> Self {
        Self {
            api_key: credentials.api_key.is_some(),
            api_secret: credentials.api_secret.is_some(),
            api_token: credentials.api_token.is_some(),
            access_token: credentials.has_access_token(),
            authorized: credentials.is_complete(),
        }
    }
}

/// Run the auth command.
///
/// This function NEVER prints a secret. It only reports presence.
pub fn auth(ctx: &Context, args: &ApiCredentialArgs, status: bool, logout: bool) -> Result<()> {
    let store = credential_store(&ctx.config)?;

    if logout {
        return do_logout(ctx, &store);
    }

    let stored = store_api_args(&store, args)?;
    if stored > 0 {
        ctx.say(format!("Stored {} credential value(s).", stored));
    }

    if status || stored == 0 {
        return show_status(ctx, &store);
    }
    Ok(())
}

/// Save whichever API values were given. Returns how many.
pub(crate) fn store_api_args(store: &CredentialStore, args: &ApiCredentialArgs) -> Result<usize> {
    let given = [&args.api_key, &args.api_secret, &args.api_token]
        .iter()
        .filter(|v| v.as_deref().is_some_and(|v| !v.trim().is_empty()))
        .count();
    if given > 0 {
        store
            .save_api(
                args.api_key.as_deref(),
                args.api_secret.as_deref(),
                args.api_token.as_deref(),
            )
            .context("Failed to store API credentials")?;
    }
    Ok(given)
}

fn show_status(ctx: &Context, store: &CredentialStore) -> Result<()> {
    let credentials = store.load().context("Failed to read stored credentials")?;
    let status = AuthStatus::of(&credentials);

    emit(ctx, &status, || {
        let mark = |set: bool| if set { "set" } else { "not set" };
        println!("API key:      {}", mark(status.api_key));
        println!("API secret:   {}", mark(status.api_secret));
        println!("API token:    {}", mark(status.api_token));
        println!("Access token: {}", mark(status.access_token));
        if status.authorized {
            println!("\nAuthorized.");
        } else if !credentials.has_api_pair() {
            println!("\nGet an API key and secret at {} and run 'trello init'.", APP_KEY_URL);
        } else {
            println!("\nNot authorized. Run 'trello init'.");
        }
    })?;

    // `--quiet` still answers the question through the exit status.
    if ctx.quiet() && !ctx.json && !status.authorized {
        anyhow::bail!("not authorized");
    }
    Ok(())
}

fn do_logout(ctx: &Context, store: &CredentialStore) -> Result<()> {
    store
        .clear_access_token()
        .context("Failed to remove stored access token")?;

    ctx.say("Logged out. Run 'trello init' to authorize again.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::MemorySecretStore;

    #[test]
    fn status_reports_presence_only() {
        let creds = Credentials::new("k", "s", "t", "ts");
        let status = AuthStatus::of(&creds);
        assert!(status.api_key && status.api_secret && status.access_token);
        assert!(!status.api_token);
        assert!(status.authorized);

        let json = serde_json::to_string(&status).unwrap();
        assert!(!json.contains("\"k\""));
    }

    #[test]
    fn store_api_args_counts_non_empty_values() {
        let store = CredentialStore::new(Box::new(MemorySecretStore::new()));
        let args = ApiCredentialArgs {
            api_key: Some("key".into()),
            api_secret: Some("  ".into()),
            api_token: None,
        };
        assert_eq!(store_api_args(&store, &args).unwrap(), 1);

        let creds = store.load().unwrap();
        assert_eq!(creds.api_key.as_deref(), Some("key"));
        assert!(creds.api_secret.is_none());
    }

    #[test]
    fn store_api_args_with_nothing_given() {
        let store = CredentialStore::new(Box::new(MemorySecretStore::new()));
        assert_eq!(store_api_args(&store, &ApiCredentialArgs::default()).unwrap(), 0);
    }
}
