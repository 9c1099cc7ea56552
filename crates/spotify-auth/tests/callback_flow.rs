//! Drives the real callback listener on an ephemeral loopback port and
//! checks every terminal outcome: browser body, shutdown intent code, and
//! whether the token exchange collaborator was consulted.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use spotify_auth::{
    AppState, AuthConfig, ExchangeError, TokenExchange, TokenGrant, router,
};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

enum Behavior {
    Issue,
    FailExpired,
}

struct StubExchange {
    calls: AtomicUsize,
    behavior: Behavior,
}

impl StubExchange {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            behavior,
        })
    }
}

#[async_trait]
impl TokenExchange for StubExchange {
    async fn exchange_code(&self, _code: &str) -> Result<TokenGrant, ExchangeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Issue => Ok(TokenGrant {
                access_token: "A".to_string(),
                refresh_token: "R".to_string(),
                token_type: "Bearer".to_string(),
                expires_in: 3600,
                scope: None,
            }),
            Behavior::FailExpired => Err(ExchangeError::CodeExpiredOrUsed),
        }
    }
}

/// Bind the router to an ephemeral port and serve it in the background.
async fn spawn_listener(exchanger: Arc<StubExchange>) -> (SocketAddr, mpsc::Receiver<i32>) {
    let config = AuthConfig::new("test-client".to_string(), "test-secret".to_string()).unwrap();
    let (intent_tx, intent_rx) = mpsc::channel(1);
    let app = router(AppState::new(config, exchanger, intent_tx));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, intent_rx)
}

#[tokio::test]
async fn valid_code_returns_refresh_token_and_schedules_exit_zero() {
    let stub = StubExchange::new(Behavior::Issue);
    let (addr, mut intent_rx) = spawn_listener(stub.clone()).await;

    let response = reqwest::get(format!("http://{addr}/callback?code=VALID123"))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("R"));
    assert!(body.contains("SPOTIFY_REFRESH_TOKEN=R"));

    assert_eq!(intent_rx.recv().await, Some(0));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn provider_denial_schedules_exit_one_without_exchanging() {
    let stub = StubExchange::new(Behavior::Issue);
    let (addr, mut intent_rx) = spawn_listener(stub.clone()).await;

    let response = reqwest::get(format!("http://{addr}/callback?error=access_denied"))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Authorization Failed"));
    assert!(body.contains("access_denied"));

    assert_eq!(intent_rx.recv().await, Some(1));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn bare_callback_serves_troubleshooting_and_schedules_exit_one() {
    let stub = StubExchange::new(Behavior::Issue);
    let (addr, mut intent_rx) = spawn_listener(stub.clone()).await;

    let response = reqwest::get(format!("http://{addr}/callback")).await.unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("No Authorization Code"));
    assert!(body.contains("http://127.0.0.1:8888/callback"));

    assert_eq!(intent_rx.recv().await, Some(1));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn expired_code_surfaces_the_classified_hint() {
    let stub = StubExchange::new(Behavior::FailExpired);
    let (addr, mut intent_rx) = spawn_listener(stub.clone()).await;

    let response = reqwest::get(format!("http://{addr}/callback?code=EXPIRED"))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("expired or been used already"));

    assert_eq!(intent_rx.recv().await, Some(1));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn root_route_serves_the_authorization_link() {
    let stub = StubExchange::new(Behavior::Issue);
    let (addr, _intent_rx) = spawn_listener(stub).await;

    let response = reqwest::get(format!("http://{addr}/")).await.unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("https://accounts.spotify.com/authorize?"));
    assert!(body.contains("client_id=test-client"));
}
