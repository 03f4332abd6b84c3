//! # Common Test Utilities
//!
//! This module centralizes the test harness used across the `nisa-server`
//! integration tests:
//!
//! - `TestApp`: spawns the real router on a random port over an in-memory store,
//!   with the image host and the Gemini API pointed at an `httpmock::MockServer`.
//! - Helpers for admin sessions and mocked provider payloads.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use httpmock::MockServer;
use nisa::{
    providers::{
        ai::gemini::GeminiProvider,
        store::{memory::MemoryStore, DocumentStore},
        upload::{cloudinary::CloudinaryUploader, ImageUploader},
    },
    TripSearch,
};
use nisa_server::{
    config::{AdminConfig, AppConfig, CloudinaryConfig, FirebaseConfig, GeminiConfig},
    router,
    state::build_app_state_with,
};
use reqwest::Client;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::{net::TcpListener, task::JoinHandle};

pub const TEST_ADMIN_PASSWORD: &str = "open-sesame";
pub const TEST_JWT_SECRET: &str = "test-jwt-secret";
pub const TEST_CLOUD_NAME: &str = "demo-cloud";
pub const TEST_UPLOAD_PRESET: &str = "nisa_unsigned";
pub const TEST_GEMINI_KEY: &str = "test-gemini-key";
pub const GEMINI_PATH: &str = "/v1beta/models/gemini-pro:generateContent";
pub const UPLOAD_PATH: &str = "/v1_1/demo-cloud/image/upload";

/// A configuration whose external services all live on `mock_server`.
pub fn test_config(mock_server: &MockServer) -> AppConfig {
    AppConfig {
        port: 0,
        firebase: FirebaseConfig::default(),
        cloudinary: CloudinaryConfig {
            cloud_name: TEST_CLOUD_NAME.to_string(),
            upload_preset: TEST_UPLOAD_PRESET.to_string(),
            api_base: mock_server.base_url(),
        },
        gemini: GeminiConfig {
            api_key: Some(TEST_GEMINI_KEY.to_string()),
            model_name: "gemini-pro".to_string(),
            api_url: Some(mock_server.url(GEMINI_PATH)),
        },
        admin: AdminConfig {
            password: TEST_ADMIN_PASSWORD.to_string(),
            jwt_secret: TEST_JWT_SECRET.to_string(),
            token_ttl_secs: 3600,
        },
    }
}

/// Wraps `text` the way the Gemini API returns a single candidate.
pub fn gemini_body(text: &str) -> Value {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
}

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server over a fresh in-memory store.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_store(Box::new(MemoryStore::new())).await
    }

    /// Spawns the server over the given store. Uploads and trip search go to
    /// the mock server.
    pub async fn spawn_with_store(store: Box<dyn DocumentStore>) -> Result<Self> {
        Self::spawn_inner(store, |config| {
            let uploader = CloudinaryUploader::new(
                &config.cloudinary.api_base,
                &config.cloudinary.cloud_name,
                config.cloudinary.upload_preset.clone(),
            )?;
            let provider = GeminiProvider::new(
                config.gemini.resolved_api_url(),
                TEST_GEMINI_KEY.to_string(),
            )?;
            Ok((
                Box::new(uploader) as Box<dyn ImageUploader>,
                TripSearch::new(Box::new(provider)),
            ))
        })
        .await
    }

    /// Spawns the server with in-process doubles for the image host and the
    /// trip search provider.
    pub async fn spawn_with(
        store: Box<dyn DocumentStore>,
        uploader: Box<dyn ImageUploader>,
        trip_search: TripSearch,
    ) -> Result<Self> {
        Self::spawn_inner(store, move |_| Ok((uploader, trip_search))).await
    }

    async fn spawn_inner<F>(store: Box<dyn DocumentStore>, collaborators: F) -> Result<Self>
    where
        F: FnOnce(&AppConfig) -> Result<(Box<dyn ImageUploader>, TripSearch)>,
    {
        dotenvy::dotenv().ok();
        // `try_init` is used to prevent panic if the logger is already initialized.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();
        let config = test_config(&mock_server);
        let (uploader, trip_search) = collaborators(&config)?;
        let app_state = build_app_state_with(config, store, uploader, trip_search);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        // Give the server a moment to start up.
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }

    /// Logs in with the test password and returns the bearer token.
    pub async fn admin_token(&self) -> Result<String> {
        let response = self
            .client
            .post(self.url("/admin/login"))
            .json(&json!({ "password": TEST_ADMIN_PASSWORD }))
            .send()
            .await?
            .error_for_status()?;
        let body: Value = response.json().await?;
        body["result"]["token"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("login response had no token: {body}"))
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            // The receiver might already be gone if the server task panicked,
            // so we ignore the result of send.
            let _ = tx.send(());
        }
    }
}
