//! Submission Records

use jiff::Timestamp;

use crate::{
    domain::{
        shops::ShopDomain,
        submissions::data::{SubmissionDetails, SubmissionKind},
    },
    uuids::TypedUuid,
};

/// Submission UUID
pub type SubmissionUuid = TypedUuid<SubmissionRecord>;

/// Submission Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub uuid: SubmissionUuid,
    pub shop: ShopDomain,
    pub details: SubmissionDetails,
    pub created_at: Timestamp,
}

impl SubmissionRecord {
    #[must_use]
    pub const fn kind(&self) -> SubmissionKind {
        self.details.kind()
    }
}
