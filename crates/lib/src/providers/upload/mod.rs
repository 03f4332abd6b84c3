pub mod cloudinary;

use crate::errors::UploadError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// An image file picked in an admin form.
#[derive(Clone, Debug)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A trait for pushing images to an external host.
///
/// A single request per call: no retry, no chunking, no progress reporting.
#[async_trait]
pub trait ImageUploader: Send + Sync + Debug + DynClone {
    /// Uploads the file and returns its public URL.
    async fn upload(&self, file: ImageFile) -> Result<String, UploadError>;
}

dyn_clone::clone_trait_object!(ImageUploader);
