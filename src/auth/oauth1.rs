//! auth::oauth1
//!
//! OAuth 1.0a request signing (HMAC-SHA1, RFC 5849).
//!
//! # Signature
//!
//! 1. Collect the request parameters, the URL query, and the `oauth_*`
//!    protocol parameters.
//! 2. Percent-encode keys and values (RFC 3986 unreserved set), sort by key
//!    then value, and join as `k=v&k=v`.
//! 3. Base string: `METHOD&enc(base_url)&enc(param_string)`.
//! 4. Key: `enc(consumer_secret)&enc(token_secret)`.
//! 5. HMAC-SHA1, base64.
//!
//! # Example
//!
//! ```
//! use trellocli::auth::OAuth1Signer;
//! use url::Url;
//!
//! let signer = OAuth1Signer::new("key", "secret").with_token("token", "token-secret");
//! let url = Url::parse("https://api.trello.com/1/members/me/boards").unwrap();
//! let header = signer
//!     .authorization_header("GET", &url, &[("filter".into(), "all".into())], &[])
//!     .unwrap();
//! assert!(header.starts_with("OAuth "));
//! ```

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use url::Url;

use super::errors::AuthError;

type HmacSha1 = Hmac<Sha1>;

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";

/// Percent-encode per RFC 3986: everything but `A-Z a-z 0-9 - . _ ~`.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Signs requests with a consumer key/secret and an optional token pair.
#[derive(Clone)]
pub struct OAuth1Signer {
    consumer_key: String,
    consumer_secret: String,
    token: Option<String>,
    token_secret: Option<String>,
}

impl fmt::Debug for OAuth1Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth1Signer")
            .field("consumer_key", &"[REDACTED]")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl OAuth1Signer {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: None,
            token_secret: None,
        }
    }

    /// Sign on behalf of a token (request token or access token).
    pub fn with_token(mut self, token: impl Into<String>, token_secret: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self.token_secret = Some(token_secret.into());
        self
    }

    /// Build an `Authorization` header value with a fresh nonce and the
    /// current timestamp.
    ///
    /// `params` are the request's own parameters (query or form body).
    /// `extra_oauth` are additional protocol parameters such as
    /// `oauth_callback` or `oauth_verifier`.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &Url,
        params: &[(String, String)],
        extra_oauth: &[(&str, &str)],
    ) -> Result<String, AuthError> {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.authorization_header_at(method, url, params, extra_oauth, &nonce, &timestamp)
    }

    /// Same as [`authorization_header`](Self::authorization_header) with a
    /// fixed nonce and timestamp.
    pub fn authorization_header_at(
        &self,
        method: &str,
        url: &Url,
        params: &[(String, String)],
        extra_oauth: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> Result<String, AuthError> {
        let mut oauth: Vec<(String, String)> = vec![
            ("oauth_consumer_key".into(), self.consumer_key.clone()),
            ("oauth_nonce".into(), nonce.to_string()),
            ("oauth_signature_method".into(), SIGNATURE_METHOD.into()),
            ("oauth_timestamp".into(), timestamp.to_string()),
            ("oauth_version".into(), OAUTH_VERSION.into()),
        ];
        if let Some(token) = &self.token {
            oauth.push(("oauth_token".into(), token.clone()));
        }
        for (k, v) in extra_oauth {
            oauth.push((k.to_string(), v.to_string()));
        }

        let mut all = oauth.clone();
        all.extend(params.iter().cloned());
        let signature = self.signature(method, url, &all)?;
        oauth.push(("oauth_signature".into(), signature));
        oauth.sort();

        let fields = oauth
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {}", fields))
    }

    /// Compute the base64 HMAC-SHA1 signature over every parameter given.
    ///
    /// Query parameters already on `url` are included.
    pub fn signature(
        &self,
        method: &str,
        url: &Url,
        params: &[(String, String)],
    ) -> Result<String, AuthError> {
        let base = signature_base_string(method, url, params);
        let key = format!(
            "{}&{}",
            percent_encode(&self.consumer_secret),
            percent_encode(self.token_secret.as_deref().unwrap_or(""))
        );

        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| AuthError::Signing(e.to_string()))?;
        mac.update(base.as_bytes());
        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }
}

/// `scheme://host[:port]/path` with scheme and host lowercased and the
/// default port dropped.
pub fn base_string_uri(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let port = url.port().map(|p| format!(":{}", p)).unwrap_or_default();
    format!(
        "{}://{}{}{}",
        url.scheme().to_ascii_lowercase(),
        host,
        port,
        url.path()
    )
}

/// `METHOD&enc(base_uri)&enc(normalized_params)`.
pub fn signature_base_string(method: &str, url: &Url, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (percent_encode(&k), percent_encode(&v)))
        .chain(
            params
                .iter()
                .map(|(k, v)| (percent_encode(k), percent_encode(v))),
        )
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(&base_string_uri(url)),
        percent_encode(&normalized)
    )
}
