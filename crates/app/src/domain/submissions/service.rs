//! Submissions service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        shops::ShopDomain,
        submissions::{
            data::{NewSubmission, SubmissionKind},
            errors::SubmissionsServiceError,
            ratings::RatingSummary,
            records::{SubmissionRecord, SubmissionUuid},
            repository::PgSubmissionsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgSubmissionsService {
    db: Db,
    repository: PgSubmissionsRepository,
}

impl PgSubmissionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSubmissionsRepository::new(),
        }
    }
}

#[async_trait]
impl SubmissionsService for PgSubmissionsService {
    async fn create_submission(
        &self,
        shop: &ShopDomain,
        submission: NewSubmission,
    ) -> Result<SubmissionRecord, SubmissionsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_submission(&mut tx, shop, submission)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_submissions(
        &self,
        shop: &ShopDomain,
        kind: Option<SubmissionKind>,
    ) -> Result<Vec<SubmissionRecord>, SubmissionsServiceError> {
        let mut tx = self.db.begin().await?;

        let submissions = self
            .repository
            .list_submissions(&mut tx, shop, kind)
            .await?;

        tx.commit().await?;

        Ok(submissions)
    }

    async fn get_submission(
        &self,
        shop: &ShopDomain,
        submission: SubmissionUuid,
    ) -> Result<SubmissionRecord, SubmissionsServiceError> {
        let mut tx = self.db.begin().await?;

        let submission = self
            .repository
            .get_submission(&mut tx, shop, submission)
            .await?;

        tx.commit().await?;

        Ok(submission)
    }

    async fn delete_submission(
        &self,
        shop: &ShopDomain,
        submission: SubmissionUuid,
    ) -> Result<(), SubmissionsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_submission(&mut tx, shop, submission)
            .await?;

        if rows_affected == 0 {
            return Err(SubmissionsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn rating_summary(
        &self,
        shop: &ShopDomain,
        product_id: &str,
    ) -> Result<RatingSummary, SubmissionsServiceError> {
        let mut tx = self.db.begin().await?;

        let (count, total) = self
            .repository
            .rating_totals(&mut tx, shop, product_id)
            .await?;

        tx.commit().await?;

        RatingSummary::from_totals(count, total)
    }
}

#[automock]
#[async_trait]
pub trait SubmissionsService: Send + Sync {
    /// Store a validated submission for a shop.
    async fn create_submission(
        &self,
        shop: &ShopDomain,
        submission: NewSubmission,
    ) -> Result<SubmissionRecord, SubmissionsServiceError>;

    /// List a shop's submissions, newest first, optionally of one kind.
    async fn list_submissions(
        &self,
        shop: &ShopDomain,
        kind: Option<SubmissionKind>,
    ) -> Result<Vec<SubmissionRecord>, SubmissionsServiceError>;

    /// Retrieve a single submission belonging to the shop.
    async fn get_submission(
        &self,
        shop: &ShopDomain,
        submission: SubmissionUuid,
    ) -> Result<SubmissionRecord, SubmissionsServiceError>;

    /// Delete a submission belonging to the shop.
    async fn delete_submission(
        &self,
        shop: &ShopDomain,
        submission: SubmissionUuid,
    ) -> Result<(), SubmissionsServiceError>;

    /// Average rating and review count for one product.
    async fn rating_summary(
        &self,
        shop: &ShopDomain,
        product_id: &str,
    ) -> Result<RatingSummary, SubmissionsServiceError>;
}
