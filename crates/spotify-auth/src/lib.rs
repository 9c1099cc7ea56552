//! OAuth 2.0 authorization code flow for the Spotify Web API.
//!
//! The flow is a single pass: build an authorization URL, catch the
//! provider redirect on a loopback listener, exchange the code for tokens,
//! report the result. The listener never terminates the process itself; it
//! signals an exit intent to the owning binary.

pub mod authorize;
pub mod config;
pub mod exchange;
pub mod outcome;
pub mod pages;
pub mod scope;
pub mod server;

pub use authorize::authorize_url;
pub use config::{AuthConfig, CALLBACK_PORT, ConfigError};
pub use exchange::{ExchangeError, SpotifyTokenClient, TokenExchange, TokenGrant};
pub use outcome::{CallbackOutcome, CallbackParams};
pub use scope::Scope;
pub use server::{AppState, router};
