use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use spotify_auth::{AppState, AuthConfig, CALLBACK_PORT, SpotifyTokenClient, authorize_url, router};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};

/// Obtain a Spotify refresh token via the OAuth 2.0 authorization code flow
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Spotify application client ID
    #[arg(long, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
    client_id: Option<String>,

    /// Spotify application client secret
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// Do not try to open the authorization URL in a browser
    #[arg(long)]
    no_browser: bool,
}

/// Grace period letting the browser finish rendering the final page before
/// the listener is torn down.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

async fn run() -> anyhow::Result<i32> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Fail fast on missing credentials, before any socket is bound.
    let config = AuthConfig::new(
        args.client_id.unwrap_or_default(),
        args.client_secret.unwrap_or_default(),
    )?;

    let auth_url = authorize_url(&config);

    eprintln!("=================================================");
    eprintln!("Spotify Refresh Token Helper");
    eprintln!("=================================================");
    eprintln!();
    eprintln!("STEP 1: Visit this URL in your browser to authorize the app:");
    eprintln!();
    eprintln!("{auth_url}");
    eprintln!();
    eprintln!(
        "STEP 2: After authorizing you will be redirected to {}",
        config.redirect_uri
    );
    eprintln!("STEP 3: The code is captured and exchanged for tokens automatically");
    eprintln!();

    let listener = TcpListener::bind(("127.0.0.1", CALLBACK_PORT))
        .await
        .with_context(|| {
            format!("failed to bind 127.0.0.1:{CALLBACK_PORT} (is another instance still running?)")
        })?;
    tracing::debug!(port = CALLBACK_PORT, "callback listener bound");

    let (intent_tx, mut intent_rx) = mpsc::channel::<i32>(1);
    let exchanger = Arc::new(SpotifyTokenClient::new(config.clone()));
    let app = router(AppState::new(config, exchanger, intent_tx));

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    eprintln!("Listening on http://127.0.0.1:{CALLBACK_PORT}");
    eprintln!("Waiting for authorization...");
    eprintln!();

    if !args.no_browser && open::that(&auth_url).is_err() {
        eprintln!("Could not open a browser automatically; visit the URL above manually.");
        eprintln!();
    }

    let code = wait_for_exit(&mut intent_rx).await?;

    let _ = stop_tx.send(());
    server
        .await
        .context("callback listener task failed")?
        .context("callback listener error")?;

    Ok(code)
}

/// Wait for a terminal outcome from the callback handler or an operator
/// signal. Outcomes get a short grace period so the final browser page
/// flushes before the listener goes away.
#[cfg(unix)]
async fn wait_for_exit(intent_rx: &mut mpsc::Receiver<i32>) -> anyhow::Result<i32> {
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        .context("failed to install SIGTERM handler")?;

    tokio::select! {
        intent = intent_rx.recv() => {
            // None means the listener died without an outcome; treat as fatal.
            let code = intent.unwrap_or(1);
            tokio::time::sleep(SHUTDOWN_GRACE).await;
            Ok(code)
        }
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Received SIGINT, shutting down...");
            Ok(0)
        }
        _ = sigterm.recv() => {
            eprintln!("Received SIGTERM, shutting down...");
            Ok(0)
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_exit(intent_rx: &mut mpsc::Receiver<i32>) -> anyhow::Result<i32> {
    tokio::select! {
        intent = intent_rx.recv() => {
            let code = intent.unwrap_or(1);
            tokio::time::sleep(SHUTDOWN_GRACE).await;
            Ok(code)
        }
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Received SIGINT, shutting down...");
            Ok(0)
        }
    }
}
