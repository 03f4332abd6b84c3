//! Shared doubles for the `nisa-server` integration tests.

use async_trait::async_trait;
use nisa::errors::{AiError, StoreError, UploadError};
use nisa::providers::ai::AiProvider;
use nisa::providers::store::{memory::MemoryStore, DocumentStore};
use nisa::providers::upload::{ImageFile, ImageUploader};
use nisa::repository::Repositories;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// --- Test Setup ---

/// An isolated in-memory store with repositories over it.
pub struct TestSetup {
    pub store: MemoryStore,
    pub repos: Repositories,
}

impl TestSetup {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let repos = Repositories::new(Box::new(store.clone()));
        Self { store, repos }
    }
}

impl Default for TestSetup {
    fn default() -> Self {
        Self::new()
    }
}

// --- Failing Store ---

#[derive(Clone, Debug)]
pub struct FailingStore;

fn unreachable_error() -> StoreError {
    StoreError::Unavailable("FailingStore: database unreachable".to_string())
}

#[async_trait]
impl DocumentStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    async fn get(&self, _path: &str) -> Result<Option<Value>, StoreError> {
        Err(unreachable_error())
    }

    async fn set(&self, _path: &str, _value: Value) -> Result<(), StoreError> {
        Err(unreachable_error())
    }

    async fn update(&self, _path: &str, _fields: Map<String, Value>) -> Result<(), StoreError> {
        Err(unreachable_error())
    }

    async fn remove(&self, _path: &str) -> Result<(), StoreError> {
        Err(unreachable_error())
    }
}

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs a response. The key should be a unique substring of the
    /// user prompt (a destination name works well).
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AiError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if user_prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        Err(AiError::AiApi(format!(
            "MockAiProvider: No response programmed for user prompt. Got: '{user_prompt}'"
        )))
    }
}

// --- Mock Uploaders ---

/// Accepts every file and answers with a URL derived from its name.
#[derive(Clone, Debug, Default)]
pub struct MockUploader {
    uploads: Arc<Mutex<Vec<String>>>,
}

impl MockUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url_for(file_name: &str) -> String {
        format!("https://res.cloudinary.test/image/upload/{file_name}")
    }

    /// File names received so far.
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageUploader for MockUploader {
    async fn upload(&self, file: ImageFile) -> Result<String, UploadError> {
        self.uploads.lock().unwrap().push(file.file_name.clone());
        Ok(Self::url_for(&file.file_name))
    }
}

/// Rejects every file with the given HTTP status.
#[derive(Clone, Debug)]
pub struct FailingUploader {
    pub status: u16,
}

#[async_trait]
impl ImageUploader for FailingUploader {
    async fn upload(&self, _file: ImageFile) -> Result<String, UploadError> {
        Err(UploadError::Api {
            status: self.status,
            body: "{\"error\":{\"message\":\"Upload preset not found\"}}".to_string(),
        })
    }
}
