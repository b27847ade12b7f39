//! Local disk image store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use jiff::Timestamp;
use rand::Rng;
use tokio::fs;
use tracing::debug;

use crate::images::{ImageStore, ImageStoreError, ImageUpload, StoredImage};

/// Longest file extension kept from the client's file name.
const MAX_EXTENSION_LEN: usize = 10;

/// Upper bound (exclusive) of the random file name component.
const RANDOM_SUFFIX_BOUND: u32 = 1_000_000_000;

/// Stores review images in a directory served under `/uploads`.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store_image(&self, upload: ImageUpload) -> Result<StoredImage, ImageStoreError> {
        let content_type = upload.content_type.as_deref().unwrap_or_default();

        if !is_image(content_type) {
            return Err(ImageStoreError::UnsupportedType(content_type.to_string()));
        }

        fs::create_dir_all(&self.root).await?;

        let file_name = generate_file_name(
            Timestamp::now().as_millisecond(),
            rand::thread_rng().gen_range(0..RANDOM_SUFFIX_BOUND),
            upload.original_name.as_deref(),
        );

        let path = self.root.join(&file_name);

        fs::copy(&upload.path, &path).await?;

        debug!(file_name, "stored uploaded image");

        Ok(StoredImage { file_name, path })
    }
}

fn is_image(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .and_then(|essence| essence.split_once('/'))
        .is_some_and(|(kind, subtype)| kind.eq_ignore_ascii_case("image") && !subtype.is_empty())
}

/// `{millis}-{random}{.ext}`, keeping a short alphanumeric extension only.
fn generate_file_name(millis: i64, random: u32, original_name: Option<&str>) -> String {
    let extension = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|extension| extension.to_str())
        .filter(|extension| {
            !extension.is_empty()
                && extension.len() <= MAX_EXTENSION_LEN
                && extension.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|extension| format!(".{}", extension.to_ascii_lowercase()))
        .unwrap_or_default();

    format!("{millis}-{random}{extension}")
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn file_name_keeps_a_clean_extension() {
        assert_eq!(
            generate_file_name(1_700_000_000_000, 42, Some("Holiday Photo.JPG")),
            "1700000000000-42.jpg"
        );
    }

    #[test]
    fn file_name_drops_suspicious_extensions() {
        assert_eq!(generate_file_name(1, 2, Some("x.p/h")), "1-2");
        assert_eq!(generate_file_name(1, 2, Some("x.averyverylongext")), "1-2");
        assert_eq!(generate_file_name(1, 2, Some("noext")), "1-2");
        assert_eq!(generate_file_name(1, 2, None), "1-2");
    }

    #[test]
    fn only_image_types_are_images() {
        assert!(is_image("image/png"));
        assert!(is_image("IMAGE/jpeg; charset=binary"));
        assert!(!is_image("image/"));
        assert!(!is_image("text/html"));
        assert!(!is_image(""));
    }

    #[tokio::test]
    async fn stores_images_in_a_created_directory() -> TestResult {
        let dir = tempfile::tempdir()?;
        let source = dir.path().join("upload.tmp");
        fs::write(&source, b"not really a png").await?;

        let store = LocalImageStore::new(dir.path().join("uploads"));

        let stored = store
            .store_image(ImageUpload {
                path: source,
                original_name: Some("teapot.png".to_string()),
                content_type: Some("image/png".to_string()),
            })
            .await?;

        assert!(stored.file_name.ends_with(".png"));
        assert_eq!(stored.path, store.root().join(&stored.file_name));
        assert_eq!(fs::read(&stored.path).await?, b"not really a png");

        Ok(())
    }

    #[tokio::test]
    async fn rejects_non_images_without_writing() -> TestResult {
        let dir = tempfile::tempdir()?;
        let source = dir.path().join("upload.tmp");
        fs::write(&source, b"<html>").await?;

        let store = LocalImageStore::new(dir.path().join("uploads"));

        let result = store
            .store_image(ImageUpload {
                path: source,
                original_name: Some("page.html".to_string()),
                content_type: Some("text/html".to_string()),
            })
            .await;

        assert!(matches!(result, Err(ImageStoreError::UnsupportedType(_))));
        assert!(!store.root().exists());

        Ok(())
    }
}
