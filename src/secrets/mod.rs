//! secrets
//!
//! Where credentials are kept between runs.
//!
//! # Providers
//!
//! - [`FileSecretStore`]: `~/.trellocli/secrets.toml`, mode 0600 (default)
//! - `KeychainSecretStore`: OS keychain, behind the `keychain` feature
//! - [`MemorySecretStore`]: process-local, for tests and dry runs
//!
//! Values are never logged and never appear in error messages.

mod file_store;
#[cfg(feature = "keychain")]
mod keychain_store;
mod memory_store;
mod traits;

pub use file_store::FileSecretStore;
#[cfg(feature = "keychain")]
pub use keychain_store::KeychainSecretStore;
pub use memory_store::MemorySecretStore;
pub use traits::{SecretError, SecretStore};

/// The default secret store provider name.
pub const DEFAULT_PROVIDER: &str = "file";

/// Create a secret store by provider name.
///
/// # Errors
///
/// Unknown provider, or `"keychain"` without the `keychain` feature.
pub fn create_store(provider: &str) -> Result<Box<dyn SecretStore>, SecretError> {
    match provider {
        "file" => Ok(Box::new(FileSecretStore::new()?)),
        #[cfg(feature = "keychain")]
        "keychain" => Ok(Box::new(KeychainSecretStore::new()?)),
        #[cfg(not(feature = "keychain"))]
        "keychain" => Err(SecretError::ProviderNotAvailable(
            "keychain support not enabled (compile with --features keychain)".into(),
        )),
        other => Err(SecretError::ProviderNotAvailable(format!(
            "unknown secret provider: '{}' (valid: file, keychain)",
            other
        ))),
    }
}
