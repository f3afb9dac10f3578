//! auth::errors
//!
//! Error types for credential handling and the OAuth1 handshake.
//!
//! Messages never carry token or secret values.
//!
//! # Example
//!
//! ```
//! use trellocli::auth::AuthError;
//!
//! let err = AuthError::MissingApiCredentials;
//! assert!(err.to_string().contains("https://trello.com/app-key"));
//! ```

use thiserror::Error;

/// Where to obtain an API key and secret.
pub const APP_KEY_URL: &str = "https://trello.com/app-key";

/// Errors from authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// API key or secret not stored.
    #[error("API key and secret not set. Visit https://trello.com/app-key to obtain them, then run 'trello init'.")]
    MissingApiCredentials,

    /// No OAuth token stored.
    #[error("not authorized. Run 'trello init' to authorize this client.")]
    NotAuthorized,

    /// The provider answered 401.
    #[error("authorization rejected by Trello: {0}")]
    Rejected(String),

    /// The verifier string was empty.
    #[error("verification code must not be empty")]
    EmptyVerifier,

    /// Refused to persist an empty token or secret.
    #[error("refusing to store an empty access token")]
    EmptyAccessToken,

    /// Every verifier attempt failed.
    #[error("authorization failed after {attempts} attempt(s): {last}")]
    AttemptsExhausted {
        attempts: u32,
        last: Box<AuthError>,
    },

    /// The provider answered with something other than a token pair.
    #[error("invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    /// The request could not be signed.
    #[error("failed to sign request: {0}")]
    Signing(String),

    /// Network error during the handshake.
    #[error("network error: {0}")]
    Network(String),

    /// Error from secret storage.
    #[error("secret store error: {0}")]
    SecretStore(String),

    /// Failed to read a verifier from the user.
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// The user gave up.
    #[error("authorization cancelled")]
    Cancelled,
}

impl AuthError {
    /// True for verifier-step errors that another attempt might fix.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AuthError::Rejected(_)
                | AuthError::EmptyVerifier
                | AuthError::InvalidResponse { .. }
                | AuthError::Network(_)
        )
    }

    /// True when the user must supply an API key and secret first.
    pub fn needs_api_credentials(&self) -> bool {
        matches!(self, AuthError::MissingApiCredentials)
    }
}

impl From<crate::secrets::SecretError> for AuthError {
    fn from(err: crate::secrets::SecretError) -> Self {
        AuthError::SecretStore(err.to_string())
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Network(err.without_url().to_string())
    }
}

impl From<crate::ui::prompts::PromptError> for AuthError {
    fn from(err: crate::ui::prompts::PromptError) -> Self {
        match err {
            crate::ui::prompts::PromptError::Cancelled => AuthError::Cancelled,
            other => AuthError::Prompt(other.to_string()),
        }
    }
}
