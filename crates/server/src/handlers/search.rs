//! # Trip Search Handler

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use crate::types::SearchRequest;
use axum::{
    extract::{Query, State},
    Json,
};
use nisa::{
    entities::{BookingDraft, Draft},
    search::refine_results,
    SearchResult,
};
use serde_json::json;

/// The handler for `POST /search`. Provider failures never reach the client:
/// the search itself falls back to sample packages.
pub async fn trip_search_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<ApiResponse<Vec<SearchResult>>>, AppError> {
    let SearchRequest {
        params,
        filter,
        sort,
    } = request;

    // Same required fields as the booking the search form files.
    let validation = BookingDraft {
        destination: params.destination.clone(),
        date: params.date.clone(),
        travelers: params.travelers,
        ..Default::default()
    }
    .validate();
    if !validation.is_valid() {
        return Err(AppError::Validation(validation));
    }

    let results = app_state.trip_search.search(&params).await;
    let unfiltered = results.len();
    let refined = refine_results(results, filter, sort);

    let debug_info = Some(json!({
        "params": params,
        "filter": filter,
        "sort": sort,
        "provider": app_state.trip_search.has_provider(),
        "unfiltered_count": unfiltered,
    }));
    Ok(wrap_response(refined, debug_params, debug_info))
}
