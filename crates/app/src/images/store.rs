//! Image store seam.

use std::path::PathBuf;

use async_trait::async_trait;
use mockall::automock;

use crate::images::ImageStoreError;

/// An uploaded file waiting to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Temporary location of the uploaded bytes.
    pub path: PathBuf,

    /// File name supplied by the client, if any.
    pub original_name: Option<String>,

    /// Declared MIME type, if any.
    pub content_type: Option<String>,
}

/// An image copied into permanent storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Generated file name, relative to the uploads root.
    pub file_name: String,

    pub path: PathBuf,
}

#[automock]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist an uploaded image and return where it ended up.
    async fn store_image(&self, upload: ImageUpload) -> Result<StoredImage, ImageStoreError>;
}
