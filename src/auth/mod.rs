//! auth - Trello OAuth1 authorization
//!
//! # Architecture
//!
//! - [`CredentialStore`] - the five named secrets over a [`SecretStore`](crate::secrets::SecretStore)
//! - [`OAuth1Signer`] - HMAC-SHA1 request signing, shared with the HTTP client
//! - [`OAuthFlowManager`] - the request-token / authorize / access-token handshake
//!
//! The handshake only runs when no access token is stored. After it
//! succeeds, every API call is signed with the stored quadruple of API
//! key, API secret, OAuth token and OAuth secret.
//!
//! # Security
//!
//! Secret values never appear in logs, error messages or `Debug` output.
//!
//! # Example
//!
//! ```ignore
//! use trellocli::auth::{CredentialStore, OAuthFlowManager};
//! use trellocli::config::Config;
//! use trellocli::secrets;
//! use trellocli::ui::prompts::TerminalVerifierPrompt;
//!
//! let config = Config::load()?;
//! let store = CredentialStore::new(secrets::create_store(config.secrets_provider())?);
//! let mut flow = OAuthFlowManager::new(&config, &store)?;
//! let mut prompt = TerminalVerifierPrompt { open_browser: true, interactive: true };
//! let credentials = flow.ensure_authorized(&mut prompt).await?;
//! ```

pub mod credentials;
mod errors;
mod flow;
pub mod oauth1;

pub use credentials::{AccessToken, CredentialStore, Credentials};
pub use errors::{AuthError, APP_KEY_URL};
pub use flow::{FlowState, OAuthFlowManager, RequestToken, VerifierPrompt};
pub use oauth1::OAuth1Signer;
