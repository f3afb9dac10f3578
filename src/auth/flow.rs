//! auth::flow
//!
//! The three-legged OAuth1 handshake.
//!
//! # States
//!
//! ```text
//! NoCredentials -> RequestTokenObtained -> AwaitingUserVerifier
//!               -> AccessTokenObtained -> Persisted
//! ```
//!
//! A rejected verifier sends the flow back to `initiate()` for a fresh
//! request token. [`OAuthFlowManager::authorize`] bounds this with
//! `oauth.max_attempts` and fails with [`AuthError::AttemptsExhausted`].
//! A failure of `initiate()` itself ends the handshake at once.
//!
//! The manager never opens a browser. It hands the authorization URL to a
//! [`VerifierPrompt`] and waits for the code the user copies back.

use std::collections::HashMap;
use std::fmt;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use tracing::{debug, info, warn};
use url::Url;

use super::credentials::{AccessToken, CredentialStore, Credentials};
use super::errors::AuthError;
use super::oauth1::OAuth1Signer;
use crate::config::Config;
use crate::ui::prompts::PromptError;

/// Handshake progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    NoCredentials,
    RequestTokenObtained,
    AwaitingUserVerifier,
    AccessTokenObtained,
    Persisted,
}

/// Short-lived token from the request-token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestToken {
    pub token: String,
    pub secret: String,
}

impl fmt::Debug for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestToken")
            .field("token", &"[REDACTED]")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Supplies the verifier code for an authorization URL.
///
/// `attempt` starts at 1.
pub trait VerifierPrompt {
    fn verifier(&mut self, url: &str, attempt: u32) -> Result<String, PromptError>;
}

/// Drives the handshake against the configured endpoints.
pub struct OAuthFlowManager<'a> {
    config: &'a Config,
    store: &'a CredentialStore,
    http: reqwest::Client,
    state: FlowState,
    history: Vec<FlowState>,
}

impl<'a> OAuthFlowManager<'a> {
    pub fn new(config: &'a Config, store: &'a CredentialStore) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            config,
            store,
            http,
            state: FlowState::NoCredentials,
            history: vec![FlowState::NoCredentials],
        })
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Every state entered so far, in order.
    pub fn history(&self) -> &[FlowState] {
        &self.history
    }

    fn enter(&mut self, state: FlowState) {
        debug!(from = ?self.state, to = ?state, "oauth state transition");
        self.state = state;
        self.history.push(state);
    }

    fn consumer_signer(&self) -> Result<OAuth1Signer, AuthError> {
        let creds = self.store.load()?;
        match (creds.api_key, creds.api_secret) {
            (Some(key), Some(secret)) => Ok(OAuth1Signer::new(key, secret)),
            _ => Err(AuthError::MissingApiCredentials),
        }
    }

    /// Obtain a request token using the API key and secret.
    ///
    /// Fails without any network call when the pair is not stored.
    pub async fn initiate(&mut self) -> Result<RequestToken, AuthError> {
        let signer = self.consumer_signer()?;
        let endpoint = self.config.request_token_url();

        let (token, secret) = self
            .token_request(endpoint, &signer, &[("oauth_callback", "oob")])
            .await?;

        self.enter(FlowState::RequestTokenObtained);
        Ok(RequestToken { token, secret })
    }

    /// URL the user visits to approve the request token.
    pub fn authorization_url(&mut self, request_token: &RequestToken) -> Result<String, AuthError> {
        let url = Url::parse_with_params(
            self.config.authorize_url(),
            &[
                ("oauth_token", request_token.token.as_str()),
                ("scope", self.config.scope()),
                ("expiration", self.config.expiration()),
                ("name", self.config.app_name()),
            ],
        )
        .map_err(|e| AuthError::InvalidResponse {
            endpoint: self.config.authorize_url().to_string(),
            message: e.to_string(),
        })?;

        self.enter(FlowState::AwaitingUserVerifier);
        Ok(url.into())
    }

    /// Trade an approved request token and its verifier for an access token.
    pub async fn exchange(
        &mut self,
        request_token: &RequestToken,
        verifier: &str,
    ) -> Result<AccessToken, AuthError> {
        let verifier = verifier.trim();
        if verifier.is_empty() {
            return Err(AuthError::EmptyVerifier);
        }

        let signer = self
            .consumer_signer()?
            .with_token(&request_token.token, &request_token.secret);
        let endpoint = self.config.access_token_url();

        let (token, secret) = self
            .token_request(endpoint, &signer, &[("oauth_verifier", verifier)])
            .await?;

        self.enter(FlowState::AccessTokenObtained);
        Ok(AccessToken { token, secret })
    }

    /// Store the access token. Writing the same pair twice is harmless.
    pub fn persist(&mut self, access_token: &AccessToken) -> Result<(), AuthError> {
        self.store.save_access_token(access_token)?;
        self.enter(FlowState::Persisted);
        info!("oauth access token stored");
        Ok(())
    }

    /// Run the whole handshake, persisting only after a successful exchange.
    ///
    /// Only a failed verifier step starts another attempt. Errors from
    /// [`OAuthFlowManager::initiate`] are returned as they are, since a
    /// rejected API key stays rejected.
    pub async fn authorize(
        &mut self,
        prompt: &mut dyn VerifierPrompt,
    ) -> Result<AccessToken, AuthError> {
        let max_attempts = self.config.max_auth_attempts();
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            let request_token = self.initiate().await?;
            let url = self.authorization_url(&request_token)?;

            match self.verify(prompt, &request_token, &url, attempt).await {
                Ok(token) => {
                    self.persist(&token)?;
                    return Ok(token);
                }
                Err(e) if e.is_retryable() => {
                    warn!(attempt, max_attempts, error = %e, "authorization attempt failed");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AuthError::AttemptsExhausted {
            attempts: max_attempts,
            last: Box::new(last_error.unwrap_or(AuthError::NotAuthorized)),
        })
    }

    async fn verify(
        &mut self,
        prompt: &mut dyn VerifierPrompt,
        request_token: &RequestToken,
        url: &str,
        attempt: u32,
    ) -> Result<AccessToken, AuthError> {
        let verifier = prompt.verifier(url, attempt)?;
        self.exchange(request_token, &verifier).await
    }

    /// Make sure an access token is stored, running the handshake if not.
    ///
    /// Returns the credentials as stored afterwards.
    pub async fn ensure_authorized(
        &mut self,
        prompt: &mut dyn VerifierPrompt,
    ) -> Result<Credentials, AuthError> {
        let creds = self.store.load()?;
        if !creds.has_api_pair() {
            return Err(AuthError::MissingApiCredentials);
        }
        if creds.has_access_token() {
            debug!("access token already stored, skipping handshake");
            self.enter(FlowState::Persisted);
            return Ok(creds);
        }

        self.authorize(prompt).await?;
        Ok(self.store.load()?)
    }

    /// POST a signed token request and parse `oauth_token` /
    /// `oauth_token_secret` from the form-encoded reply.
    async fn token_request(
        &self,
        endpoint: &str,
        signer: &OAuth1Signer,
        extra_oauth: &[(&str, &str)],
    ) -> Result<(String, String), AuthError> {
        let invalid = |message: String| AuthError::InvalidResponse {
            endpoint: endpoint.to_string(),
            message,
        };

        let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        let header = signer.authorization_header("POST", &url, &[], extra_oauth)?;
        let header = HeaderValue::from_str(&header).map_err(|e| AuthError::Signing(e.to_string()))?;

        debug!(endpoint, "oauth token request");
        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, header)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(endpoint, status = status.as_u16(), "oauth token response");

        // 401 for a bad key or verifier; Trello also uses 400 for a used token.
        if status.is_client_error() {
            return Err(AuthError::Rejected(format!(
                "{} {}",
                status.as_u16(),
                body.trim()
            )));
        }
        if !status.is_success() {
            return Err(invalid(format!("unexpected status {}", status.as_u16())));
        }

        let mut fields: HashMap<String, String> = url::form_urlencoded::parse(body.as_bytes())
            .into_owned()
            .collect();
        match (
            fields.remove("oauth_token").filter(|v| !v.is_empty()),
            fields.remove("oauth_token_secret").filter(|v| !v.is_empty()),
        ) {
            (Some(token), Some(secret)) => Ok((token, secret)),
            _ => Err(invalid("missing oauth_token or oauth_token_secret".into())),
        }
    }
}
