//! trello::client
//!
//! Signed HTTP calls to the REST API.
//!
//! # Outcomes
//!
//! | Response | [`RawResult`] |
//! |---|---|
//! | 200, 201 | `Success(body)` |
//! | 401 | `AuthFailure(Unauthorized)` |
//! | 400, 403, 404 | `ClientRejection { status, body }` |
//! | anything else, timeout, connection error | `TransportFailure(cause)` |
//!
//! A client built without all four signing values answers every call with
//! `AuthFailure(MissingCredentials)` and never touches the network.
//!
//! The client does not retry. Request parameters travel on the query string
//! for both GET and POST and are covered by the signature.

use std::fmt;

use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use super::traits::TrelloError;
use crate::auth::{Credentials, OAuth1Signer};
use crate::config::Config;

/// HTTP methods the API layer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a call was refused for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailureReason {
    /// A signing value was not available; no request was sent.
    MissingCredentials,
    /// The service answered 401.
    Unauthorized,
}

/// Classified outcome of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResult {
    Success(String),
    AuthFailure(AuthFailureReason),
    ClientRejection { status: u16, body: String },
    TransportFailure(String),
}

impl RawResult {
    /// The body on success, or the matching [`TrelloError`].
    pub fn into_body(self) -> Result<String, TrelloError> {
        match self {
            RawResult::Success(body) => Ok(body),
            RawResult::AuthFailure(AuthFailureReason::MissingCredentials) => Err(
                TrelloError::Auth("API key, secret or OAuth token not set".into()),
            ),
            RawResult::AuthFailure(AuthFailureReason::Unauthorized) => Err(TrelloError::Auth(
                "credentials rejected, run 'trello auth --logout' then 'trello init'".into(),
            )),
            RawResult::ClientRejection { status, body } => Err(TrelloError::Rejected {
                status,
                message: body.trim().to_string(),
            }),
            RawResult::TransportFailure(cause) => Err(TrelloError::Transport(cause)),
        }
    }
}

/// Sole network boundary for data operations.
#[derive(Clone)]
pub struct TrelloClient {
    http: reqwest::Client,
    api_base: String,
    credentials: Credentials,
    signer: Option<OAuth1Signer>,
}

impl fmt::Debug for TrelloClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrelloClient")
            .field("api_base", &self.api_base)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl TrelloClient {
    pub fn new(config: &Config, credentials: Credentials) -> Result<Self, TrelloError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TrelloError::Transport(e.to_string()))?;

        let signer = match (
            &credentials.api_key,
            &credentials.api_secret,
            &credentials.oauth_token,
            &credentials.oauth_secret,
        ) {
            (Some(key), Some(secret), Some(token), Some(token_secret)) => {
                Some(OAuth1Signer::new(key, secret).with_token(token, token_secret))
            }
            _ => None,
        };

        Ok(Self {
            http,
            api_base: config.api_base().to_string(),
            credentials,
            signer,
        })
    }

    /// `key` and `token` parameters that write calls carry.
    ///
    /// `token` is only present when an API token is stored.
    pub fn key_token_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(key) = &self.credentials.api_key {
            params.push(("key", key.clone()));
        }
        if let Some(token) = &self.credentials.api_token {
            params.push(("token", token.clone()));
        }
        params
    }

    /// Issue one signed call. `path` is relative to the API base.
    pub async fn call(&self, method: HttpMethod, path: &str, params: &[(&str, &str)]) -> RawResult {
        let Some(signer) = &self.signer else {
            debug!(%method, path, "missing credentials, request not sent");
            return RawResult::AuthFailure(AuthFailureReason::MissingCredentials);
        };

        let mut url = match Url::parse(&format!(
            "{}/{}",
            self.api_base,
            path.trim_start_matches('/')
        )) {
            Ok(url) => url,
            Err(e) => return RawResult::TransportFailure(format!("invalid URL: {}", e)),
        };
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        let header = match signer
            .authorization_header(method.as_str(), &url, &[], &[])
            .map_err(|e| e.to_string())
            .and_then(|h| HeaderValue::from_str(&h).map_err(|e| e.to_string()))
        {
            Ok(header) => header,
            Err(e) => return RawResult::TransportFailure(format!("cannot sign request: {}", e)),
        };

        let request = match method {
            HttpMethod::Get => self.http.get(url),
            HttpMethod::Post => self.http.post(url),
        };

        let response = match request
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, header)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!(%method, path, timeout = e.is_timeout(), "request failed");
                return RawResult::TransportFailure(describe(e));
            }
        };

        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "response");

        match status {
            StatusCode::OK | StatusCode::CREATED => match response.text().await {
                Ok(body) => RawResult::Success(body),
                Err(e) => RawResult::TransportFailure(describe(e)),
            },
            StatusCode::UNAUTHORIZED => RawResult::AuthFailure(AuthFailureReason::Unauthorized),
            StatusCode::BAD_REQUEST | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                RawResult::ClientRejection {
                    status: status.as_u16(),
                    body: response.text().await.unwrap_or_default(),
                }
            }
            other => RawResult::TransportFailure(format!("unexpected status {}", other.as_u16())),
        }
    }
}

/// Error text without the URL, which may carry `key` and `token`.
fn describe(err: reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else {
        err.without_url().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_body_maps_outcomes() {
        assert_eq!(RawResult::Success("[]".into()).into_body().unwrap(), "[]");
        assert!(RawResult::AuthFailure(AuthFailureReason::MissingCredentials)
            .into_body()
            .unwrap_err()
            .is_auth());
        assert!(RawResult::ClientRejection {
            status: 404,
            body: "model not found\n".into()
        }
        .into_body()
        .unwrap_err()
        .is_not_found());
        assert!(matches!(
            RawResult::TransportFailure("timeout".into()).into_body(),
            Err(TrelloError::Transport(_))
        ));
    }

    #[test]
    fn key_token_params_only_include_stored_values() {
        let mut creds = Credentials::new("k", "s", "t", "ts");
        let client = TrelloClient::new(&Config::default(), creds.clone()).unwrap();
        assert_eq!(client.key_token_params(), vec![("key", "k".to_string())]);

        creds.api_token = Some("api-tok".into());
        let client = TrelloClient::new(&Config::default(), creds).unwrap();
        assert_eq!(
            client.key_token_params(),
            vec![("key", "k".to_string()), ("token", "api-tok".to_string())]
        );
    }

    #[tokio::test]
    async fn missing_credentials_short_circuit() {
        let client = TrelloClient::new(&Config::default(), Credentials::default()).unwrap();
        let result = client
            .call(HttpMethod::Get, "/members/me/boards/", &[("filter", "all")])
            .await;
        assert_eq!(
            result,
            RawResult::AuthFailure(AuthFailureReason::MissingCredentials)
        );
    }

    #[test]
    fn debug_redacts_credentials() {
        let creds = Credentials::new("key-abc", "secret-abc", "token-abc", "tsecret-abc");
        let client = TrelloClient::new(&Config::default(), creds).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret-abc"));
        assert!(!debug.contains("token-abc"));
    }
}
