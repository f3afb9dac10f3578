//! config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! The configuration is read once at process start and handed by reference
//! to the HTTP client, the OAuth flow, and the service layer. No other
//! component consults the process environment.
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$TRELLOCLI_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/trellocli/config.toml`
//! 3. `~/.trellocli/config.toml` (canonical write location)
//!
//! A missing file is not an error; defaults apply.
//!
//! # Example
//!
//! ```no_run
//! use trellocli::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("API: {}", config.api_base());
//! println!("Timeout: {:?}", config.timeout());
//! ```

pub mod schema;

pub use schema::{ConfigFile, OAuthConfig, SecretsConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.trello.com/1";

/// Default request-token endpoint.
pub const DEFAULT_REQUEST_TOKEN_URL: &str = "https://trello.com/1/OAuthGetRequestToken";

/// Default authorization page.
pub const DEFAULT_AUTHORIZE_URL: &str = "https://trello.com/1/OAuthAuthorizeToken";

/// Default access-token endpoint.
pub const DEFAULT_ACCESS_TOKEN_URL: &str = "https://trello.com/1/OAuthGetAccessToken";

/// Default per-call timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of verifier attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Resolved configuration.
///
/// Accessor methods apply defaults for anything the file leaves unset.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents
    pub file: ConfigFile,
    /// Path the file was loaded from (if any)
    path: Option<PathBuf>,
}

impl Config {
    /// Build a configuration from already-parsed file contents.
    pub fn new(file: ConfigFile) -> Self {
        Self { file, path: None }
    }

    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Like [`Config::load_from`], but a missing file yields defaults that
    /// [`Config::write`] will save to `path`.
    pub fn load_or_new(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self {
                file: ConfigFile::default(),
                path: Some(path.to_path_buf()),
            })
        }
    }

    fn find_config_file() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("TRELLOCLI_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("trellocli/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        let path = dirs::home_dir()?.join(".trellocli/config.toml");
        path.exists().then_some(path)
    }

    /// Path the configuration was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the canonical config path (`~/.trellocli/config.toml`).
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".trellocli/config.toml"))
    }

    /// Write the configuration atomically.
    ///
    /// Writes back to the file it was loaded from, or to the canonical
    /// location if it was not loaded from disk.
    pub fn write(&self) -> Result<PathBuf, ConfigError> {
        let path = match &self.path {
            Some(p) => p.clone(),
            None => Self::default_path()?,
        };
        Self::write_to(&path, &self.file)?;
        Ok(path)
    }

    /// Write a config file atomically.
    pub fn write_to(path: &Path, file: &ConfigFile) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(file).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut out = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        out.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        out.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessors with defaults
    // =========================================================================

    /// REST API base URL, without a trailing slash.
    pub fn api_base(&self) -> &str {
        self.file
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
    }

    /// Hard timeout for one HTTP call.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    fn oauth(&self) -> Option<&OAuthConfig> {
        self.file.oauth.as_ref()
    }

    /// Request-token endpoint.
    pub fn request_token_url(&self) -> &str {
        self.oauth()
            .and_then(|o| o.request_token_url.as_deref())
            .unwrap_or(DEFAULT_REQUEST_TOKEN_URL)
    }

    /// Authorization page the user visits.
    pub fn authorize_url(&self) -> &str {
        self.oauth()
            .and_then(|o| o.authorize_url.as_deref())
            .unwrap_or(DEFAULT_AUTHORIZE_URL)
    }

    /// Access-token exchange endpoint.
    pub fn access_token_url(&self) -> &str {
        self.oauth()
            .and_then(|o| o.access_token_url.as_deref())
            .unwrap_or(DEFAULT_ACCESS_TOKEN_URL)
    }

    /// Application name shown during authorization.
    pub fn app_name(&self) -> &str {
        self.oauth()
            .and_then(|o| o.app_name.as_deref())
            .unwrap_or("trello_cli")
    }

    /// Requested scope.
    pub fn scope(&self) -> &str {
        self.oauth()
            .and_then(|o| o.scope.as_deref())
            .unwrap_or("read,write")
    }

    /// Requested token lifetime.
    pub fn expiration(&self) -> &str {
        self.oauth()
            .and_then(|o| o.expiration.as_deref())
            .unwrap_or("30days")
    }

    /// Maximum verifier attempts before the handshake gives up.
    pub fn max_auth_attempts(&self) -> u32 {
        self.oauth()
            .and_then(|o| o.max_attempts)
            .unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }

    /// Secret store provider. Defaults to "file".
    pub fn secrets_provider(&self) -> &str {
        self.file
            .secrets
            .as_ref()
            .and_then(|s| s.provider.as_deref())
            .unwrap_or(crate::secrets::DEFAULT_PROVIDER)
    }

    // =========================================================================
    // Key access for `config get/set/list`
    // =========================================================================

    /// Keys understood by [`Config::get_value`] and [`Config::set_value`].
    pub const KEYS: &'static [&'static str] = &[
        "api_base",
        "timeout_secs",
        "oauth.request_token_url",
        "oauth.authorize_url",
        "oauth.access_token_url",
        "oauth.app_name",
        "oauth.scope",
        "oauth.expiration",
        "oauth.max_attempts",
        "secrets.provider",
    ];

    /// Effective value for a key, defaults applied.
    pub fn get_value(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "api_base" => self.api_base().to_string(),
            "timeout_secs" => self.timeout().as_secs().to_string(),
            "oauth.request_token_url" => self.request_token_url().to_string(),
            "oauth.authorize_url" => self.authorize_url().to_string(),
            "oauth.access_token_url" => self.access_token_url().to_string(),
            "oauth.app_name" => self.app_name().to_string(),
            "oauth.scope" => self.scope().to_string(),
            "oauth.expiration" => self.expiration().to_string(),
            "oauth.max_attempts" => self.max_auth_attempts().to_string(),
            "secrets.provider" => self.secrets_provider().to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Set a key, validating the resulting configuration.
    ///
    /// The in-memory file is only updated if validation passes.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut file = self.file.clone();
        let parse_number = |v: &str| {
            v.parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue(format!("{} must be a number", key)))
        };

        match key {
            "api_base" => file.api_base = Some(value.to_string()),
            "timeout_secs" => file.timeout_secs = Some(parse_number(value)?),
            "secrets.provider" => {
                file.secrets.get_or_insert_with(Default::default).provider =
                    Some(value.to_string())
            }
            k if k.starts_with("oauth.") => {
                let oauth = file.oauth.get_or_insert_with(Default::default);
                let value = Some(value.to_string());
                match k {
                    "oauth.request_token_url" => oauth.request_token_url = value,
                    "oauth.authorize_url" => oauth.authorize_url = value,
                    "oauth.access_token_url" => oauth.access_token_url = value,
                    "oauth.app_name" => oauth.app_name = value,
                    "oauth.scope" => oauth.scope = value,
                    "oauth.expiration" => oauth.expiration = value,
                    "oauth.max_attempts" => {
                        let n = parse_number(value.as_deref().unwrap_or_default())?;
                        let n = u32::try_from(n).map_err(|_| {
                            ConfigError::InvalidValue("oauth.max_attempts is too large".into())
                        })?;
                        oauth.max_attempts = Some(n)
                    }
                    other => return Err(ConfigError::UnknownKey(other.to_string())),
                }
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }

        file.validate()?;
        self.file = file;
        Ok(())
    }
}
