//! # Public Route Handlers
//!
//! Content feeds for the public pages and the two public intake forms.

use super::{plain_response, wrap_response, ApiResponse, AppError, AppState, DebugParams, ResourceKind};
use crate::types::CreatedResponse;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use nisa::{
    entities::{Booking, BookingDraft, Draft, UmrahApplication, UmrahApplicationDraft},
    PublicContent, PublicFeed,
};
use serde_json::json;
use tracing::info;

/// Lists a public collection, newest first. Never fails: an unreachable store
/// yields the built-in samples (`?debug=true` reports which one was served).
pub async fn public_feed_handler<E: ResourceKind + PublicContent>(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
) -> Json<ApiResponse<Vec<E>>> {
    let mut feed = PublicFeed::new(E::repository(&app_state.repos).clone());
    let records = feed.load().await.to_vec();
    let debug_info = Some(json!({
        "collection": E::COLLECTION,
        "source": feed.source(),
    }));
    wrap_response(records, debug_params, debug_info)
}

async fn submit_intake<E: ResourceKind>(
    app_state: &AppState,
    draft: E::Draft,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), AppError> {
    let validation = draft.validate();
    if !validation.is_valid() {
        return Err(AppError::Validation(validation));
    }
    let id = E::repository(&app_state.repos).add(draft).await?;
    info!(collection = E::COLLECTION, %id, "Accepted public {}", E::LABEL);
    Ok((StatusCode::CREATED, plain_response(CreatedResponse { id })))
}

/// The handler for `POST /bookings`.
pub async fn create_booking_handler(
    State(app_state): State<AppState>,
    Json(draft): Json<BookingDraft>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), AppError> {
    submit_intake::<Booking>(&app_state, draft).await
}

/// The handler for `POST /umrah-applications`.
pub async fn create_umrah_application_handler(
    State(app_state): State<AppState>,
    Json(draft): Json<UmrahApplicationDraft>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), AppError> {
    submit_intake::<UmrahApplication>(&app_state, draft).await
}
