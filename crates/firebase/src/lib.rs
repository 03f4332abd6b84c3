//! # `nisa-firebase`: Realtime Database Backend
//!
//! A [`DocumentStore`] over the Firebase Realtime Database REST interface.
//! Every node is addressed as `{database_url}/{path}.json`, with each path
//! segment percent-encoded; reads, overwrites, merges, and removals map onto
//! GET, PUT, PATCH, and DELETE.

use async_trait::async_trait;
use nisa::errors::StoreError;
use nisa::providers::store::{DocumentStore, FORBIDDEN_KEY_CHARS};
use reqwest::{Client as ReqwestClient, RequestBuilder, Response, Url};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error};

// --- Error Definitions ---

#[derive(Error, Debug)]
pub enum FirebaseError {
    #[error("Failed to build Reqwest client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Realtime Database request failed: {0}")]
    Request(reqwest::Error),
    #[error("Realtime Database returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Failed to decode Realtime Database response: {0}")]
    Decode(reqwest::Error),
    #[error("Invalid database path '{0}'")]
    InvalidPath(String),
    #[error("Invalid database URL '{0}'")]
    InvalidUrl(String),
}

impl From<FirebaseError> for StoreError {
    fn from(err: FirebaseError) -> Self {
        match err {
            FirebaseError::ClientBuild(e) => StoreError::ReqwestClientBuild(e),
            FirebaseError::Request(e) | FirebaseError::Decode(e) => StoreError::Request(e),
            FirebaseError::Api { status, body } => StoreError::Api { status, body },
            FirebaseError::InvalidPath(path) => StoreError::InvalidPath(path),
            FirebaseError::InvalidUrl(url) => StoreError::Unavailable(format!("invalid database URL '{url}'")),
        }
    }
}

// --- Store Implementation ---

#[derive(Clone, Debug)]
pub struct RealtimeDatabase {
    client: ReqwestClient,
    database_url: String,
    base: Url,
    auth_token: Option<String>,
}

impl RealtimeDatabase {
    /// Creates a client for `database_url` (e.g. `https://my-app-default-rtdb.firebaseio.com`).
    ///
    /// `auth_token`, when set, is sent as the `auth` query parameter on every request.
    pub fn new(database_url: &str, auth_token: Option<String>) -> Result<Self, FirebaseError> {
        let database_url = database_url.trim_end_matches('/').to_string();
        if !(database_url.starts_with("http://") || database_url.starts_with("https://")) {
            return Err(FirebaseError::InvalidUrl(database_url));
        }
        let base = Url::parse(&database_url)
            .map_err(|_| FirebaseError::InvalidUrl(database_url.clone()))?;
        let client = ReqwestClient::builder()
            .build()
            .map_err(FirebaseError::ClientBuild)?;
        Ok(Self {
            client,
            database_url,
            base,
            auth_token,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    fn node_url(&self, path: &str) -> Result<Url, FirebaseError> {
        let path = sanitize_path(path)?;
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| FirebaseError::InvalidUrl(self.database_url.clone()))?;
            segments.pop_if_empty();
            match path.rsplit_once('/') {
                Some((parent, last)) => {
                    segments.extend(parent.split('/'));
                    segments.push(&format!("{last}.json"));
                }
                None => {
                    segments.push(&format!("{path}.json"));
                }
            }
        }
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token)]),
            None => request,
        }
    }

    /// Writes return the written data unless asked not to.
    fn silent(request: RequestBuilder) -> RequestBuilder {
        request.query(&[("print", "silent")])
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, FirebaseError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(FirebaseError::Request)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Realtime Database error: {body}");
            return Err(FirebaseError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl DocumentStore for RealtimeDatabase {
    fn name(&self) -> &str {
        "realtime-database"
    }

    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let url = self.node_url(path)?;
        debug!(%url, "GET");
        let response = self.send(self.client.get(url)).await?;
        let value: Value = response.json().await.map_err(FirebaseError::Decode)?;
        Ok((!value.is_null()).then_some(value))
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let url = self.node_url(path)?;
        debug!(%url, "PUT");
        self.send(Self::silent(self.client.put(url)).json(&value))
            .await?;
        Ok(())
    }

    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), StoreError> {
        let url = self.node_url(path)?;
        debug!(%url, keys = fields.len(), "PATCH");
        self.send(Self::silent(self.client.patch(url)).json(&fields))
            .await?;
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        let url = self.node_url(path)?;
        debug!(%url, "DELETE");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

// --- Helper Functions ---

/// Normalizes a slash-separated path, rejecting keys the database would refuse.
pub fn sanitize_path(path: &str) -> Result<String, FirebaseError> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments
        .iter()
        .any(|s| s.contains(&FORBIDDEN_KEY_CHARS[..5]))
    {
        return Err(FirebaseError::InvalidPath(path.to_string()));
    }
    Ok(segments.join("/"))
}
