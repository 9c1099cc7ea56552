use thiserror::Error;

use crate::scope::{self, Scope};

/// Fixed OAuth callback port. The redirect URI registered in the Spotify
/// dashboard must use this exact port.
pub const CALLBACK_PORT: u16 = 8888;

/// Startup configuration errors, detected before any socket is bound.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing Spotify client ID (set SPOTIFY_CLIENT_ID or pass --client-id)")]
    MissingClientId,
    #[error("missing Spotify client secret (set SPOTIFY_CLIENT_SECRET or pass --client-secret)")]
    MissingClientSecret,
}

/// OAuth configuration, built once at startup and shared with the listener
/// and the token exchange client.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Spotify application client ID
    pub client_id: String,
    /// Spotify application client secret
    pub client_secret: String,
    /// Redirect URI for the OAuth callback; must match the Spotify
    /// dashboard registration verbatim.
    pub redirect_uri: String,
    /// Scopes requested during authorization
    pub scopes: Vec<Scope>,
}

impl AuthConfig {
    /// Create a new configuration with Spotify defaults.
    ///
    /// Fails when either credential is empty so the process stops before
    /// the callback listener opens its port.
    pub fn new(client_id: String, client_secret: String) -> Result<Self, ConfigError> {
        if client_id.trim().is_empty() {
            return Err(ConfigError::MissingClientId);
        }
        if client_secret.trim().is_empty() {
            return Err(ConfigError::MissingClientSecret);
        }

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri: format!("http://127.0.0.1:{CALLBACK_PORT}/callback"),
            scopes: scope::DEFAULT_SCOPES.to_vec(),
        })
    }
}
