//! Uploads Config

use std::path::PathBuf;

use clap::Args;

/// Default request body limit for review submissions (5 MiB).
const DEFAULT_UPLOAD_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Review image upload settings.
#[derive(Debug, Args)]
pub struct UploadsConfig {
    /// Directory uploaded images are written to and served from
    #[arg(long, env = "UPLOADS_DIR", default_value = "uploads")]
    pub uploads_dir: PathBuf,

    /// Largest accepted submission body, in bytes
    #[arg(long, env = "UPLOAD_MAX_BYTES", default_value_t = DEFAULT_UPLOAD_MAX_BYTES)]
    pub upload_max_bytes: u64,

    /// Base URL used for image links instead of the request's host
    #[arg(long, env = "PUBLIC_BASE_URL")]
    pub public_base_url: Option<String>,
}
