//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::{auth::SessionTokenVersion, domain::shops::ShopDomain};

/// Session data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    /// Shop that owns this session.
    pub shop: ShopDomain,

    /// Token format/hash version.
    pub version: SessionTokenVersion,

    /// HMAC verifier for the token secret material.
    pub token_hash: String,
}

/// Session metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct SessionMetadata {
    pub uuid: Uuid,
    pub shop: ShopDomain,
    pub version: SessionTokenVersion,
    pub scope: String,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

impl SessionMetadata {
    /// Whether the session can still authenticate at `now`.
    #[must_use]
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        self.revoked_at.is_none() && self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

/// New session persistence payload.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub uuid: Uuid,
    pub shop: ShopDomain,
    pub version: SessionTokenVersion,
    pub token_hash: String,
    pub scope: String,
    pub expires_at: Option<Timestamp>,
}

/// Session issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub metadata: SessionMetadata,
}
