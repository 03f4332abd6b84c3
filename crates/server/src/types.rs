use nisa::search::{SearchFilter, SearchParams, SearchSort};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Default)]
pub struct DebugParams {
    pub debug: Option<bool>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
    pub result: T,
}

/// Returned by every endpoint that creates a record.
#[derive(Serialize, Deserialize, Debug)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DeletedResponse {
    pub deleted: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    /// Expiry as seconds since the epoch.
    pub expires_at: usize,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Deserialize, Debug)]
pub struct SearchRequest {
    #[serde(flatten)]
    pub params: SearchParams,
    #[serde(default)]
    pub filter: SearchFilter,
    #[serde(default)]
    pub sort: SearchSort,
}
