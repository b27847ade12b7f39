//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::{SessionKeyError, SessionTokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("session not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("session token processing error")]
    Token(#[source] SessionTokenError),

    #[error("session signing error")]
    Signing(#[from] SessionKeyError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<SessionTokenError> for AuthServiceError {
    fn from(error: SessionTokenError) -> Self {
        Self::Token(error)
    }
}
