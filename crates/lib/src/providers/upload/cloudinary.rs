use super::{ImageFile, ImageUploader};
use crate::errors::UploadError;
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client as ReqwestClient,
};
use serde::Deserialize;
use tracing::{error, info};

#[derive(Deserialize, Debug)]
struct UploadResponse {
    secure_url: Option<String>,
}

/// Unsigned uploads to Cloudinary using a fixed upload preset.
#[derive(Clone, Debug)]
pub struct CloudinaryUploader {
    client: ReqwestClient,
    upload_url: String,
    upload_preset: String,
}

impl CloudinaryUploader {
    /// Creates a new `CloudinaryUploader`.
    ///
    /// `api_base` is normally `https://api.cloudinary.com`; tests point it at a mock server.
    pub fn new(api_base: &str, cloud_name: &str, upload_preset: String) -> Result<Self, UploadError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(UploadError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            upload_url: format!(
                "{}/v1_1/{cloud_name}/image/upload",
                api_base.trim_end_matches('/')
            ),
            upload_preset,
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

#[async_trait]
impl ImageUploader for CloudinaryUploader {
    async fn upload(&self, file: ImageFile) -> Result<String, UploadError> {
        info!(file = %file.file_name, size = file.bytes.len(), "Starting image upload");

        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(content_type) = file.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|_| UploadError::InvalidContentType(content_type.to_string()))?;
        }
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(UploadError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Upload response error: {body}");
            return Err(UploadError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(UploadError::Deserialization)?;

        match upload.secure_url {
            Some(url) => {
                info!(%url, "Upload successful");
                Ok(url)
            }
            None => {
                error!("No secure URL in upload response");
                Err(UploadError::MissingUrl)
            }
        }
    }
}
