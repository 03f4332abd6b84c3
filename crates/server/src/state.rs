//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup: the document store behind every repository, the
//! image uploader, and the trip search provider.

use crate::config::AppConfig;
use nisa::{
    providers::{
        ai::gemini::GeminiProvider,
        store::{memory::MemoryStore, DocumentStore},
        upload::{cloudinary::CloudinaryUploader, ImageUploader},
    },
    Repositories, TripSearch,
};
use nisa_firebase::RealtimeDatabase;
use std::sync::Arc;
use tracing::{info, warn};

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// One repository per entity kind, all over the same store.
    pub repos: Repositories,
    pub uploader: Box<dyn ImageUploader>,
    pub trip_search: TripSearch,
}

/// Builds the shared application state from the configuration.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let store: Box<dyn DocumentStore> = match &config.firebase.database_url {
        Some(url) => {
            let db = RealtimeDatabase::new(url, config.firebase.auth_token.clone())?;
            info!(database_url = %db.database_url(), "Using Realtime Database store.");
            Box::new(db)
        }
        None => {
            warn!("No firebase.database_url configured; records are kept in memory only.");
            Box::new(MemoryStore::new())
        }
    };

    let uploader = CloudinaryUploader::new(
        &config.cloudinary.api_base,
        &config.cloudinary.cloud_name,
        config.cloudinary.upload_preset.clone(),
    )?;
    info!(upload_url = %uploader.upload_url(), "Initialized image uploader.");

    let trip_search = match &config.gemini.api_key {
        Some(api_key) => {
            let provider = GeminiProvider::new(config.gemini.resolved_api_url(), api_key.clone())?;
            info!(model = %config.gemini.model_name, "Initialized trip search provider (Gemini).");
            TripSearch::new(Box::new(provider))
        }
        None => {
            warn!("No gemini.api_key configured; trip search answers with sample packages.");
            TripSearch::offline()
        }
    };

    Ok(build_app_state_with(config, store, Box::new(uploader), trip_search))
}

/// Assembles the state from already-built collaborators.
pub fn build_app_state_with(
    config: AppConfig,
    store: Box<dyn DocumentStore>,
    uploader: Box<dyn ImageUploader>,
    trip_search: TripSearch,
) -> AppState {
    AppState {
        config: Arc::new(config),
        repos: Repositories::new(store),
        uploader,
        trip_search,
    }
}
