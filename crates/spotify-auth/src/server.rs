use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use tokio::sync::mpsc;

use crate::authorize;
use crate::config::AuthConfig;
use crate::exchange::TokenExchange;
use crate::outcome::{CallbackOutcome, CallbackParams};
use crate::pages;

/// Shared state for the loopback redirect listener.
#[derive(Clone)]
pub struct AppState {
    pub config: AuthConfig,
    pub exchanger: Arc<dyn TokenExchange>,
    /// Carries the process exit code once a terminal outcome is reached.
    /// The owning binary decides when the listener actually stops.
    pub shutdown: mpsc::Sender<i32>,
}

impl AppState {
    pub fn new(
        config: AuthConfig,
        exchanger: Arc<dyn TokenExchange>,
        shutdown: mpsc::Sender<i32>,
    ) -> Self {
        Self {
            config,
            exchanger,
            shutdown,
        }
    }
}

/// Build the two-route listener: a diagnostic root page and the OAuth
/// callback target.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/callback", get(callback))
        .with_state(state)
}

async fn status(State(state): State<AppState>) -> Html<String> {
    let auth_url = authorize::authorize_url(&state.config);
    Html(pages::status(&auth_url, &state.config.redirect_uri))
}

async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Html<String> {
    tracing::info!(
        code_present = params.code.is_some(),
        error = params.error.as_deref(),
        "callback received"
    );

    let outcome = CallbackOutcome::resolve(params, state.exchanger.as_ref()).await;
    outcome.report(&state.config.redirect_uri);

    let body = pages::for_outcome(&outcome, &state.config.redirect_uri);

    // A second callback while the first is draining has nowhere to go; the
    // process is already on its way out.
    let _ = state.shutdown.try_send(outcome.exit_code());

    Html(body)
}
