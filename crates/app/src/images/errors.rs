//! Image storage errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("image storage error")]
    Io(#[from] std::io::Error),
}
