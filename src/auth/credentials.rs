//! auth::credentials
//!
//! The five named secrets and the store that holds them.
//!
//! # Keys
//!
//! | Key | Meaning |
//! |---|---|
//! | `trello.api_key` | application key (OAuth consumer key) |
//! | `trello.api_secret` | application secret (OAuth consumer secret) |
//! | `trello.api_token` | user token sent as `token` on write calls |
//! | `trello.oauth_token` | access token from the handshake |
//! | `trello.oauth_secret` | access token secret from the handshake |
//!
//! Empty values are treated as absent.

use std::fmt;

use super::errors::AuthError;
use crate::secrets::{SecretError, SecretStore};

pub const API_KEY: &str = "trello.api_key";
pub const API_SECRET: &str = "trello.api_secret";
pub const API_TOKEN: &str = "trello.api_token";
pub const OAUTH_TOKEN: &str = "trello.oauth_token";
pub const OAUTH_SECRET: &str = "trello.oauth_secret";

/// A snapshot of stored credentials.
///
/// `Debug` shows which values are present, never the values.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub api_token: Option<String>,
    pub oauth_token: Option<String>,
    pub oauth_secret: Option<String>,
}

impl Credentials {
    /// Credentials with all four signing values set.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        oauth_token: impl Into<String>,
        oauth_secret: impl Into<String>,
    ) -> Self {
        Self {
            api_key: non_empty(Some(api_key.into())),
            api_secret: non_empty(Some(api_secret.into())),
            api_token: None,
            oauth_token: non_empty(Some(oauth_token.into())),
            oauth_secret: non_empty(Some(oauth_secret.into())),
        }
    }

    /// API key and secret are both present.
    pub fn has_api_pair(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some()
    }

    /// OAuth token and secret are both present.
    pub fn has_access_token(&self) -> bool {
        self.oauth_token.is_some() && self.oauth_secret.is_some()
    }

    /// Everything needed to sign a request is present.
    pub fn is_complete(&self) -> bool {
        self.has_api_pair() && self.has_access_token()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |v: &Option<String>| if v.is_some() { "[set]" } else { "[unset]" };
        f.debug_struct("Credentials")
            .field("api_key", &mark(&self.api_key))
            .field("api_secret", &mark(&self.api_secret))
            .field("api_token", &mark(&self.api_token))
            .field("oauth_token", &mark(&self.oauth_token))
            .field("oauth_secret", &mark(&self.oauth_secret))
            .finish()
    }
}

/// An access token and its secret, as returned by the exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub secret: String,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[REDACTED]")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Named-key view over a [`SecretStore`].
pub struct CredentialStore {
    store: Box<dyn SecretStore>,
}

impl CredentialStore {
    pub fn new(store: Box<dyn SecretStore>) -> Self {
        Self { store }
    }

    fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        Ok(non_empty(self.store.get(key)?))
    }

    /// Read all five values.
    pub fn load(&self) -> Result<Credentials, SecretError> {
        Ok(Credentials {
            api_key: self.get(API_KEY)?,
            api_secret: self.get(API_SECRET)?,
            api_token: self.get(API_TOKEN)?,
            oauth_token: self.get(OAUTH_TOKEN)?,
            oauth_secret: self.get(OAUTH_SECRET)?,
        })
    }

    /// Store the application credentials. `None` leaves a value unchanged.
    pub fn save_api(
        &self,
        api_key: Option<&str>,
        api_secret: Option<&str>,
        api_token: Option<&str>,
    ) -> Result<(), SecretError> {
        let entries: Vec<(&str, &str)> = [
            (API_KEY, api_key),
            (API_SECRET, api_secret),
            (API_TOKEN, api_token),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(str::trim).filter(|v| !v.is_empty()).map(|v| (k, v)))
        .collect();
        if entries.is_empty() {
            return Ok(());
        }
        self.store.set_many(&entries)
    }

    /// Replace the stored access token pair.
    ///
    /// Both values must be non-empty; nothing is written otherwise.
    pub fn save_access_token(&self, token: &AccessToken) -> Result<(), AuthError> {
        if token.token.trim().is_empty() || token.secret.trim().is_empty() {
            return Err(AuthError::EmptyAccessToken);
        }
        self.store
            .set_many(&[
                (OAUTH_TOKEN, token.token.as_str()),
                (OAUTH_SECRET, token.secret.as_str()),
            ])?;
        Ok(())
    }

    /// Remove the access token pair. The API key and secret are kept.
    pub fn clear_access_token(&self) -> Result<(), SecretError> {
        self.store.delete_many(&[OAUTH_TOKEN, OAUTH_SECRET])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::MemorySecretStore;

    fn store_with(entries: &[(&str, &str)]) -> (MemorySecretStore, CredentialStore) {
        let memory = MemorySecretStore::with_entries(entries);
        (memory.clone(), CredentialStore::new(Box::new(memory)))
    }

    #[test]
    fn load_empty_store() {
        let (_, store) = store_with(&[]);
        let creds = store.load().unwrap();
        assert_eq!(creds, Credentials::default());
        assert!(!creds.has_api_pair());
        assert!(!creds.is_complete());
    }

    #[test]
    fn empty_values_count_as_absent() {
        let (_, store) = store_with(&[(API_KEY, "k"), (API_SECRET, "  ")]);
        let creds = store.load().unwrap();
        assert_eq!(creds.api_key.as_deref(), Some("k"));
        assert!(creds.api_secret.is_none());
        assert!(!creds.has_api_pair());
    }

    #[test]
    fn complete_credentials() {
        let (_, store) = store_with(&[
            (API_KEY, "k"),
            (API_SECRET, "s"),
            (OAUTH_TOKEN, "t"),
            (OAUTH_SECRET, "ts"),
        ]);
        let creds = store.load().unwrap();
        assert!(creds.has_api_pair());
        assert!(creds.has_access_token());
        assert!(creds.is_complete());
    }

    #[test]
    fn save_api_skips_missing_values() {
        let (memory, store) = store_with(&[(API_SECRET, "old")]);
        store.save_api(Some("k"), None, Some("")).unwrap();

        assert_eq!(memory.get(API_KEY).unwrap().as_deref(), Some("k"));
        assert_eq!(memory.get(API_SECRET).unwrap().as_deref(), Some("old"));
        assert!(memory.get(API_TOKEN).unwrap().is_none());
    }

    #[test]
    fn save_access_token_replaces_pair() {
        let (memory, store) = store_with(&[(OAUTH_TOKEN, "old"), (OAUTH_SECRET, "old-s")]);
        store
            .save_access_token(&AccessToken {
                token: "new".into(),
                secret: "new-s".into(),
            })
            .unwrap();

        assert_eq!(memory.get(OAUTH_TOKEN).unwrap().as_deref(), Some("new"));
        assert_eq!(memory.get(OAUTH_SECRET).unwrap().as_deref(), Some("new-s"));
    }

    #[test]
    fn save_access_token_refuses_empty() {
        let (memory, store) = store_with(&[]);
        let err = store
            .save_access_token(&AccessToken {
                token: "t".into(),
                secret: "".into(),
            })
            .unwrap_err();

        assert!(matches!(err, AuthError::EmptyAccessToken));
        assert!(memory.get(OAUTH_TOKEN).unwrap().is_none());
    }

    #[test]
    fn clear_access_token_keeps_api_pair() {
        let (_, store) = store_with(&[
            (API_KEY, "k"),
            (API_SECRET, "s"),
            (OAUTH_TOKEN, "t"),
            (OAUTH_SECRET, "ts"),
        ]);
        store.clear_access_token().unwrap();

        let creds = store.load().unwrap();
        assert!(creds.has_api_pair());
        assert!(!creds.has_access_token());
    }

    #[test]
    fn debug_never_shows_values() {
        let creds = Credentials::new("key-123", "secret-456", "token-789", "tsecret-000");
        let debug = format!("{:?}", creds);
        for value in ["key-123", "secret-456", "token-789", "tsecret-000"] {
            assert!(!debug.contains(value), "debug output leaked {}", value);
        }
        assert!(debug.contains("[set]"));

        let token = AccessToken {
            token: "token-789".into(),
            secret: "tsecret-000".into(),
        };
        let debug = format!("{:?}", token);
        assert!(!debug.contains("token-789"));
        assert!(debug.contains("REDACTED"));
    }
}
