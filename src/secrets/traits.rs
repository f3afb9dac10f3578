//! secrets::traits
//!
//! Key-value storage for credentials.
//!
//! Keys are dotted names under the `trello.` namespace (for example
//! `trello.api_key`). Stores keep them as opaque strings.
//!
//! Implementations must never log a value or put one in an error message.

use thiserror::Error;

/// Errors from secret storage operations.
///
/// Messages carry the key or the I/O cause, never the value.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("failed to read secret: {0}")]
    ReadError(String),

    #[error("failed to write secret: {0}")]
    WriteError(String),

    #[error("failed to delete secret: {0}")]
    DeleteError(String),

    #[error("secret provider not available: {0}")]
    ProviderNotAvailable(String),
}

/// A place credentials live between runs.
pub trait SecretStore: Send + Sync {
    /// Get a secret by key. `Ok(None)` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, SecretError>;

    /// Set a secret, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), SecretError>;

    /// Delete a secret. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), SecretError>;

    /// Whether a secret exists.
    fn exists(&self, key: &str) -> Result<bool, SecretError> {
        Ok(self.get(key)?.is_some())
    }

    /// Set several secrets together.
    ///
    /// Stores that can write all entries in one step override this so a
    /// crash never leaves half of a pair on disk.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), SecretError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Delete several secrets together.
    fn delete_many(&self, keys: &[&str]) -> Result<(), SecretError> {
        for key in keys {
            self.delete(key)?;
        }
        Ok(())
    }
}
