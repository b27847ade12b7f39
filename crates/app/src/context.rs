//! App Context

use std::{path::PathBuf, sync::Arc};

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, SessionKey},
    database::{self, Db},
    domain::submissions::{PgSubmissionsService, SubmissionsService},
    images::{ImageStore, LocalImageStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub submissions: Arc<dyn SubmissionsService>,
    pub auth: Arc<dyn AuthService>,
    pub images: Arc<dyn ImageStore>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        session_key: SessionKey,
        uploads_dir: impl Into<PathBuf>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        Ok(Self {
            submissions: Arc::new(PgSubmissionsService::new(db)),
            auth: Arc::new(PgAuthService::new(pool, session_key)),
            images: Arc::new(LocalImageStore::new(uploads_dir)),
        })
    }
}
