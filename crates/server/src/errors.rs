use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nisa::{StoreError, UploadError, Validation};
use serde_json::json;
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
pub enum AppError {
    /// Errors from the document store.
    Store(StoreError),
    /// Errors from the image host.
    Upload(UploadError),
    /// A draft failed its required-field checks.
    Validation(Validation),
    Unauthorized(String),
    BadRequest(String),
    NotFound(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError::Upload(err)
    }
}

/// Conversion from `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Store(err) => {
                error!("StoreError: {:?}", err);
                match err {
                    StoreError::InvalidPath(path) => (
                        StatusCode::BAD_REQUEST,
                        format!("Invalid record id '{path}'."),
                    ),
                    StoreError::InvalidPatch(path) => (
                        StatusCode::BAD_REQUEST,
                        format!("Update for '{path}' must be a JSON object."),
                    ),
                    StoreError::Json(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Stored record could not be read: {e}"),
                    ),
                    other => (
                        StatusCode::BAD_GATEWAY,
                        format!("Database request failed: {other}"),
                    ),
                }
            }
            AppError::Upload(err) => {
                error!("UploadError: {:?}", err);
                match err {
                    UploadError::InvalidContentType(content_type) => (
                        StatusCode::BAD_REQUEST,
                        format!("Unsupported content type '{content_type}'."),
                    ),
                    other => (
                        StatusCode::BAD_GATEWAY,
                        format!("Image upload failed: {other}"),
                    ),
                }
            }
            AppError::Validation(validation) => {
                warn!("Validation failed: {validation}");
                let fields = validation.fields();
                let body = Json(json!({
                    "error": format!("Please fill in all required fields: {}.", fields.join(", ")),
                    "fields": fields,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
