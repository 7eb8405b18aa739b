#![allow(dead_code)]

pub mod memory;

use axum::{Router, extract::ConnectInfo};
use axum_test::TestServer;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tower::Layer;

use shortlinks::application::services::LinkPolicy;
use shortlinks::application::services::auth_service::hash_token;
use shortlinks::domain::click_event::ClickEvent;
use shortlinks::domain::repositories::TokenRole;
use shortlinks::routes::router;
use shortlinks::state::{AppState, Repositories, StateSettings};

pub use memory::MemoryStore;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const BASE_URL: &str = "https://2lnx.ru";
pub const CLIENT_TOKEN: &str = "client-test-token";
pub const ADMIN_TOKEN: &str = "admin-test-token";
pub const USER: i64 = 1001;
pub const OTHER_USER: i64 = 2002;

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

pub fn repositories(store: &Arc<MemoryStore>) -> Repositories {
    Repositories {
        users: store.clone(),
        links: store.clone(),
        stats: store.clone(),
        suspects: store.clone(),
        feedback: store.clone(),
        tokens: store.clone(),
    }
}

/// Seeds one client and one admin token.
pub fn seed_tokens(store: &MemoryStore) {
    store.insert_token(
        "client",
        &hash_token(TEST_SECRET, CLIENT_TOKEN),
        TokenRole::Client,
    );
    store.insert_token(
        "admin",
        &hash_token(TEST_SECRET, ADMIN_TOKEN),
        TokenRole::Admin,
    );
}

pub fn create_test_state(
    store: &Arc<MemoryStore>,
    queue_capacity: usize,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(queue_capacity);

    let state = AppState::new(
        repositories(store),
        tx,
        StateSettings {
            base_url: BASE_URL.to_string(),
            behind_proxy: false,
            token_signing_secret: TEST_SECRET.to_string(),
            link_policy: LinkPolicy::default(),
            session_ttl: Duration::from_secs(900),
        },
    );

    (state, rx)
}

/// A running app over a fresh in-memory store.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub clicks: mpsc::Receiver<ClickEvent>,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with_queue(100)
}

pub fn spawn_app_with_queue(queue_capacity: usize) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    seed_tokens(&store);

    let (state, clicks) = create_test_state(&store, queue_capacity);
    let app: Router = router(state, false).layer(MockConnectInfoLayer);

    TestApp {
        server: TestServer::new(app).unwrap(),
        store,
        clicks,
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
