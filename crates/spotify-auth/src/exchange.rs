use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::config::AuthConfig;

/// Spotify token endpoint
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Tokens returned by a successful authorization code exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    /// Access token for Web API requests
    pub access_token: String,
    /// Long-lived token used to mint new access tokens
    pub refresh_token: String,
    /// Token type (usually "Bearer")
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: u64,
    /// Scopes granted for the access token, space-separated
    #[serde(default)]
    pub scope: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Failure modes of the token endpoint, classified where the provider
/// response is parsed so callers never match on message text.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The provider answered `invalid_grant`: the code expired or was
    /// already redeemed.
    #[error("authorization code expired or already used")]
    CodeExpiredOrUsed,
    /// The provider answered `invalid_client`: the client ID or secret is
    /// wrong.
    #[error("Spotify rejected the client credentials")]
    InvalidCredentials,
    /// Any other refusal from the token endpoint.
    #[error("token endpoint rejected the exchange (status {status}): {body}")]
    Rejected { status: StatusCode, body: String },
    /// The request never completed.
    #[error("token request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ExchangeError {
    /// Operator-facing remediation hint for this failure.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::CodeExpiredOrUsed => {
                "The authorization code has expired or been used already. \
                 Run this tool again and complete the flow with a fresh code."
            }
            Self::InvalidCredentials => {
                "Invalid client credentials. Check SPOTIFY_CLIENT_ID and \
                 SPOTIFY_CLIENT_SECRET against your app in the Spotify developer dashboard."
            }
            _ => "Make sure the authorization code is valid and has not been used already.",
        }
    }
}

/// The one collaborator the callback handler depends on. Implemented by
/// [`SpotifyTokenClient`] in production and by stubs in tests.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Exchange an authorization code for tokens.
    async fn exchange_code(&self, code: &str) -> Result<TokenGrant, ExchangeError>;
}

/// Token exchange client backed by the Spotify accounts service.
pub struct SpotifyTokenClient {
    http: reqwest::Client,
    config: AuthConfig,
    token_url: String,
}

impl SpotifyTokenClient {
    /// Create a client pointed at the Spotify token endpoint.
    pub fn new(config: AuthConfig) -> Self {
        Self::with_token_url(config, SPOTIFY_TOKEN_URL.to_string())
    }

    /// Create a client pointed at a custom token endpoint, so tests can run
    /// the exchange against a local stub server.
    pub fn with_token_url(config: AuthConfig, token_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            token_url,
        }
    }
}

#[async_trait]
impl TokenExchange for SpotifyTokenClient {
    async fn exchange_code(&self, code: &str) -> Result<TokenGrant, ExchangeError> {
        tracing::debug!(endpoint = %self.token_url, "exchanging authorization code for tokens");

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            let error = classify_rejection(status, body);
            tracing::debug!(%status, %error, "token endpoint refused the exchange");
            return Err(error);
        }

        Ok(response.json().await?)
    }
}

/// Map a token endpoint refusal onto a structured error kind.
///
/// Spotify reports failures as an RFC 6749 error object; the `error` field
/// drives the classification, with a raw-body check as fallback for
/// non-JSON bodies.
fn classify_rejection(status: StatusCode, body: String) -> ExchangeError {
    let code = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned));

    match code.as_deref() {
        Some("invalid_grant") => ExchangeError::CodeExpiredOrUsed,
        Some("invalid_client") => ExchangeError::InvalidCredentials,
        Some(_) => ExchangeError::Rejected { status, body },
        None if body.contains("invalid_grant") => ExchangeError::CodeExpiredOrUsed,
        None if body.contains("invalid_client") => ExchangeError::InvalidCredentials,
        None => ExchangeError::Rejected { status, body },
    }
}
