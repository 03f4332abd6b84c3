//! # Image Upload Handler

use super::{plain_response, ApiResponse, AppError, AppState};
use crate::{auth::middleware::AdminSession, types::UploadResponse};
use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use nisa::providers::upload::ImageFile;
use tracing::{info, warn};

/// `POST /admin/images`: forwards the multipart `file` field to the image host
/// and returns the hosted URL.
pub async fn upload_image_handler(
    _session: AdminSession,
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, AppError> {
    let mut file: Option<ImageFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name != "file" {
            warn!("Ignoring unknown multipart field: {}", name);
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?
            .to_vec();
        file = Some(ImageFile {
            file_name,
            content_type,
            bytes,
        });
    }

    let file = file.ok_or_else(|| AppError::BadRequest("Missing 'file' field.".to_string()))?;
    if file.bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty.".to_string()));
    }
    info!(file = %file.file_name, size = file.bytes.len(), "Received image upload");

    let url = app_state.uploader.upload(file).await?;
    Ok(plain_response(UploadResponse { url }))
}
