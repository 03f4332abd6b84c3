//! # Admin Route Handlers
//!
//! Content management for packages, offers, and travel moments, status review
//! for bookings and visa applications, and sample data seeding. Every handler
//! requires an [`AdminSession`].

use super::{plain_response, ApiResponse, AppError, AppState, ResourceKind};
use crate::{
    auth::middleware::AdminSession,
    types::{CreatedResponse, DeletedResponse},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use nisa::{
    admin::{DeleteOutcome, SubmitOutcome},
    entities::{Deletable, Entity, MomentVisibility, Reviewable, StatusUpdate, TravelMoment},
    samples::{seed_sample_data, SeedSummary},
    FormController, StatusReview,
};

fn not_found<E: Entity>(id: &str) -> AppError {
    AppError::NotFound(format!("No {} with id '{id}'.", E::LABEL))
}

fn submit_error(outcome: SubmitOutcome) -> AppError {
    match outcome {
        SubmitOutcome::Rejected(validation) => AppError::Validation(validation),
        SubmitOutcome::Failed(e) => AppError::Store(e),
        SubmitOutcome::NotEditing | SubmitOutcome::Saved { .. } => {
            AppError::Internal(anyhow::anyhow!("form was not open for editing"))
        }
    }
}

/// `GET /admin/{kind}`: every record, newest first, without fallback data.
pub async fn list_records_handler<E: ResourceKind>(
    _session: AdminSession,
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<E>>>, AppError> {
    let mut form = FormController::new(E::repository(&app_state.repos).clone());
    form.load().await?;
    Ok(plain_response(form.records().to_vec()))
}

/// `POST /admin/{kind}`
pub async fn create_record_handler<E: ResourceKind>(
    _session: AdminSession,
    State(app_state): State<AppState>,
    Json(draft): Json<E::Draft>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), AppError> {
    let mut form = FormController::<E>::new(E::repository(&app_state.repos).clone());
    form.open_create();
    if let Some(slot) = form.draft_mut() {
        *slot = draft;
    }
    match form.submit().await {
        SubmitOutcome::Saved { id, .. } => {
            Ok((StatusCode::CREATED, plain_response(CreatedResponse { id })))
        }
        other => Err(submit_error(other)),
    }
}

/// `PUT /admin/{kind}/{id}`: replaces the editable fields, keeping the id
/// and creation time. Optional fields that are omitted or `null` are cleared.
pub async fn update_record_handler<E: ResourceKind>(
    _session: AdminSession,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<E::Draft>,
) -> Result<Json<ApiResponse<E>>, AppError> {
    let repo = E::repository(&app_state.repos);
    let mut form = FormController::<E>::new(repo.clone());
    form.load().await?;
    if !form.open_edit(&id) {
        return Err(not_found::<E>(&id));
    }
    if let Some(slot) = form.draft_mut() {
        *slot = draft;
    }
    match form.submit().await {
        SubmitOutcome::Saved { .. } => {
            let record = repo.get(&id).await?.ok_or_else(|| not_found::<E>(&id))?;
            Ok(plain_response(record))
        }
        other => Err(submit_error(other)),
    }
}

/// `DELETE /admin/{kind}/{id}`. Deleting a missing record succeeds.
pub async fn delete_record_handler<E: ResourceKind + Deletable>(
    _session: AdminSession,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedResponse>>, AppError> {
    let mut form = FormController::<E>::new(E::repository(&app_state.repos).clone());
    match form.delete(&id, true).await {
        DeleteOutcome::Deleted => Ok(plain_response(DeletedResponse { deleted: id })),
        DeleteOutcome::Failed(e) => Err(e.into()),
        DeleteOutcome::Declined | DeleteOutcome::Busy => Err(AppError::Internal(
            anyhow::anyhow!("delete of {id} was not performed"),
        )),
    }
}

/// `GET /admin/bookings`, `GET /admin/umrah-applications`
pub async fn list_reviews_handler<E: ResourceKind + Reviewable>(
    _session: AdminSession,
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<E>>>, AppError> {
    let mut review = StatusReview::new(E::repository(&app_state.repos).clone());
    review.load().await?;
    Ok(plain_response(review.records().to_vec()))
}

/// `PATCH /admin/{kind}/{id}/status`: writes only the status field.
pub async fn update_status_handler<E: ResourceKind + Reviewable>(
    _session: AdminSession,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate<E::Status>>,
) -> Result<Json<ApiResponse<E>>, AppError> {
    let repo = E::repository(&app_state.repos);
    // A merge on a missing path would create a stub record.
    if repo.get(&id).await?.is_none() {
        return Err(not_found::<E>(&id));
    }
    let mut review = StatusReview::new(repo.clone());
    review.set_status(&id, update.status).await?;
    let record = repo.get(&id).await?.ok_or_else(|| not_found::<E>(&id))?;
    Ok(plain_response(record))
}

/// `PATCH /admin/travel-moments/{id}/visibility`: shows or hides a moment in
/// the public gallery without touching its other fields.
pub async fn moment_visibility_handler(
    _session: AdminSession,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(visibility): Json<MomentVisibility>,
) -> Result<Json<ApiResponse<TravelMoment>>, AppError> {
    let repo = &app_state.repos.travel_moments;
    if repo.get(&id).await?.is_none() {
        return Err(not_found::<TravelMoment>(&id));
    }
    repo.update(&id, &visibility).await?;
    let record = repo
        .get(&id)
        .await?
        .ok_or_else(|| not_found::<TravelMoment>(&id))?;
    Ok(plain_response(record))
}

/// `POST /admin/seed`
pub async fn seed_handler(
    _session: AdminSession,
    State(app_state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<SeedSummary>>), AppError> {
    let summary = seed_sample_data(&app_state.repos).await?;
    Ok((StatusCode::CREATED, plain_response(summary)))
}
