//! config::schema
//!
//! Configuration file schema.
//!
//! # Example
//!
//! ```toml
//! api_base = "https://api.trello.com/1"
//! timeout_secs = 30
//!
//! [oauth]
//! scope = "read,write"
//! expiration = "30days"
//! max_attempts = 3
//!
//! [secrets]
//! provider = "file"
//! ```
//!
//! Every field is optional. Accessors on [`super::Config`] apply defaults.

use serde::{Deserialize, Serialize};
use url::Url;

use super::ConfigError;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// REST API base URL
    pub api_base: Option<String>,

    /// Hard timeout for a single HTTP call, in seconds
    pub timeout_secs: Option<u64>,

    /// OAuth1 handshake settings
    pub oauth: Option<OAuthConfig>,

    /// Secret storage settings
    pub secrets: Option<SecretsConfig>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base) = &self.api_base {
            validate_url("api_base", base)?;
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        if let Some(oauth) = &self.oauth {
            oauth.validate()?;
        }

        if let Some(secrets) = &self.secrets {
            secrets.validate()?;
        }

        Ok(())
    }
}

/// OAuth1 endpoint and authorization settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OAuthConfig {
    /// Request-token endpoint
    pub request_token_url: Option<String>,

    /// Interactive authorization page
    pub authorize_url: Option<String>,

    /// Access-token exchange endpoint
    pub access_token_url: Option<String>,

    /// Application name shown on the authorization page
    pub app_name: Option<String>,

    /// Requested scope (e.g. "read,write")
    pub scope: Option<String>,

    /// Requested token lifetime (e.g. "30days", "never")
    pub expiration: Option<String>,

    /// Verifier attempts before giving up
    pub max_attempts: Option<u32>,
}

impl OAuthConfig {
    /// Validate the OAuth settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("oauth.request_token_url", &self.request_token_url),
            ("oauth.authorize_url", &self.authorize_url),
            ("oauth.access_token_url", &self.access_token_url),
        ] {
            if let Some(url) = value {
                validate_url(name, url)?;
            }
        }

        if self.max_attempts == Some(0) {
            return Err(ConfigError::InvalidValue(
                "oauth.max_attempts must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Secrets configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SecretsConfig {
    /// Provider to use ("file" or "keychain")
    pub provider: Option<String>,
}

impl SecretsConfig {
    /// Valid secret providers.
    pub const VALID_PROVIDERS: &'static [&'static str] = &["file", "keychain"];

    /// Validate the secrets configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(provider) = &self.provider {
            if !Self::VALID_PROVIDERS.contains(&provider.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid secrets provider '{}', must be one of: {}",
                    provider,
                    Self::VALID_PROVIDERS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

fn validate_url(name: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidValue(format!("invalid {} '{}': {}", name, value, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidValue(format!(
            "invalid {} '{}': unsupported scheme '{}'",
            name, value, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod config_file {
        use super::*;

        #[test]
        fn defaults() {
            let config = ConfigFile::default();
            assert!(config.api_base.is_none());
            assert!(config.timeout_secs.is_none());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn zero_timeout_rejected() {
            let config = ConfigFile {
                timeout_secs: Some(0),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn bad_api_base_rejected() {
            let config = ConfigFile {
                api_base: Some("not a url".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err());

            let config = ConfigFile {
                api_base: Some("ftp://api.trello.com/1".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn roundtrip() {
            let config = ConfigFile {
                api_base: Some("https://api.trello.com/1".to_string()),
                timeout_secs: Some(10),
                oauth: Some(OAuthConfig {
                    scope: Some("read".to_string()),
                    max_attempts: Some(5),
                    ..Default::default()
                }),
                secrets: Some(SecretsConfig {
                    provider: Some("file".to_string()),
                }),
            };

            let toml = toml::to_string_pretty(&config).unwrap();
            let parsed: ConfigFile = toml::from_str(&toml).unwrap();
            assert_eq!(config, parsed);
        }

        #[test]
        fn reject_unknown_fields() {
            let toml = r#"
                api_base = "https://api.trello.com/1"
                unknown_field = true
            "#;

            let result: Result<ConfigFile, _> = toml::from_str(toml);
            assert!(result.is_err());
        }
    }

    mod oauth_config {
        use super::*;

        #[test]
        fn zero_attempts_rejected() {
            let config = OAuthConfig {
                max_attempts: Some(0),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn bad_endpoint_rejected() {
            let config = OAuthConfig {
                access_token_url: Some("::".to_string()),
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("oauth.access_token_url"));
        }
    }

    mod secrets_config {
        use super::*;

        #[test]
        fn valid_file_provider() {
            let config = SecretsConfig {
                provider: Some("file".to_string()),
            };
            assert!(config.validate().is_ok());
        }

        #[test]
        fn valid_keychain_provider() {
            let config = SecretsConfig {
                provider: Some("keychain".to_string()),
            };
            assert!(config.validate().is_ok());
        }

        #[test]
        fn invalid_provider() {
            let config = SecretsConfig {
                provider: Some("invalid".to_string()),
            };
            assert!(config.validate().is_err());
        }
    }
}
