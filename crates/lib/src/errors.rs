use thiserror::Error;

/// Errors raised by a `DocumentStore` backend or by the typed repositories on top of it.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to the document store: {0}")]
    Request(reqwest::Error),
    #[error("Document store returned an error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Failed to (de)serialize record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Partial update for '{0}' must serialize to a JSON object")]
    InvalidPatch(String),
    #[error("Invalid document path '{0}'")]
    InvalidPath(String),
    #[error("Document store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by the image upload gateway.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send image to the upload host: {0}")]
    Request(reqwest::Error),
    #[error("Upload failed ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Failed to deserialize upload response: {0}")]
    Deserialization(reqwest::Error),
    #[error("Invalid image content type: {0}")]
    InvalidContentType(String),
    #[error("Upload failed: no secure URL returned")]
    MissingUrl,
}

/// Errors raised while talking to a generative text provider.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
}
