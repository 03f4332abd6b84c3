#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared mocks for the integration tests: a store that always fails, a
//! scripted text provider, and in-memory repositories.

use async_trait::async_trait;
use dotenvy::dotenv;
use nisa::errors::{AiError, StoreError};
use nisa::providers::ai::AiProvider;
use nisa::providers::store::{memory::MemoryStore, DocumentStore};
use nisa::repository::Repositories;
use serde_json::{Map, Value};
use std::sync::{Arc, Once, RwLock};

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        tracing_subscriber::fmt::init();
    });
}

/// Repositories over a fresh in-memory store, plus the store itself for
/// inspecting the raw tree.
pub fn memory_repos() -> (MemoryStore, Repositories) {
    let store = MemoryStore::new();
    let repos = Repositories::new(Box::new(store.clone()));
    (store, repos)
}

// --- Failing Store ---

#[derive(Clone, Debug)]
pub struct FailingStore;

fn offline() -> StoreError {
    StoreError::Unavailable("offline".to_string())
}

#[async_trait]
impl DocumentStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }
    async fn get(&self, _path: &str) -> Result<Option<Value>, StoreError> {
        Err(offline())
    }
    async fn set(&self, _path: &str, _value: Value) -> Result<(), StoreError> {
        Err(offline())
    }
    async fn update(&self, _path: &str, _fields: Map<String, Value>) -> Result<(), StoreError> {
        Err(offline())
    }
    async fn remove(&self, _path: &str) -> Result<(), StoreError> {
        Err(offline())
    }
}

/// A store that reads normally but rejects every write.
#[derive(Clone, Debug)]
pub struct ReadOnlyStore(pub MemoryStore);

#[async_trait]
impl DocumentStore for ReadOnlyStore {
    fn name(&self) -> &str {
        "read-only"
    }
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        self.0.get(path).await
    }
    async fn set(&self, _path: &str, _value: Value) -> Result<(), StoreError> {
        Err(offline())
    }
    async fn update(&self, _path: &str, _fields: Map<String, Value>) -> Result<(), StoreError> {
        Err(offline())
    }
    async fn remove(&self, _path: &str) -> Result<(), StoreError> {
        Err(offline())
    }
}

// --- Mock AI Provider for Logic Testing ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    pub call_history: Arc<RwLock<Vec<(String, String)>>>,
    pub responses: Arc<RwLock<Vec<Result<String, String>>>>,
}

impl MockAiProvider {
    pub fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            call_history: Arc::new(RwLock::new(Vec::new())),
            responses: Arc::new(RwLock::new(responses.into_iter().rev().collect())),
        }
    }

    pub fn answering(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(message.to_string())])
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AiError> {
        self.call_history
            .write()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        match self.responses.write().unwrap().pop() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(AiError::AiApi(message)),
            None => Ok("Default mock response".to_string()),
        }
    }
}
