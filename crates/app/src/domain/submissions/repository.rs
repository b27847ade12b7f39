//! Submissions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    shops::ShopDomain,
    submissions::{
        data::{
            NewSubmission, ProductReference, Rating, Registration, Review, SubmissionDetails,
            SubmissionKind,
        },
        records::{SubmissionRecord, SubmissionUuid},
    },
};

const CREATE_SUBMISSION_SQL: &str = include_str!("sql/create_submission.sql");
const LIST_SUBMISSIONS_SQL: &str = include_str!("sql/list_submissions.sql");
const GET_SUBMISSION_SQL: &str = include_str!("sql/get_submission.sql");
const DELETE_SUBMISSION_SQL: &str = include_str!("sql/delete_submission.sql");
const RATING_TOTALS_SQL: &str = include_str!("sql/rating_totals.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSubmissionsRepository;

impl PgSubmissionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_submission(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: &ShopDomain,
        submission: NewSubmission,
    ) -> Result<SubmissionRecord, sqlx::Error> {
        let kind = submission.details.kind();

        let query = query_as::<Postgres, SubmissionRecord>(CREATE_SUBMISSION_SQL)
            .bind(submission.uuid.into_uuid())
            .bind(shop.as_str())
            .bind(kind.as_str());

        let query = match submission.details {
            SubmissionDetails::Registration(registration) => query
                .bind(registration.display_name)
                .bind(Some(registration.email))
                .bind(None::<String>)
                .bind(None::<i16>)
                .bind(None::<String>)
                .bind(None::<String>)
                .bind(None::<String>),
            SubmissionDetails::Review(review) => query
                .bind(review.display_name)
                .bind(review.email)
                .bind(Some(review.message))
                .bind(Some(i16::from(review.rating)))
                .bind(Some(review.product.id))
                .bind(review.product.title)
                .bind(review.image_url),
        };

        query.fetch_one(&mut **tx).await
    }

    pub(crate) async fn list_submissions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: &ShopDomain,
        kind: Option<SubmissionKind>,
    ) -> Result<Vec<SubmissionRecord>, sqlx::Error> {
        query_as::<Postgres, SubmissionRecord>(LIST_SUBMISSIONS_SQL)
            .bind(shop.as_str())
            .bind(kind.map(SubmissionKind::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_submission(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: &ShopDomain,
        submission: SubmissionUuid,
    ) -> Result<SubmissionRecord, sqlx::Error> {
        query_as::<Postgres, SubmissionRecord>(GET_SUBMISSION_SQL)
            .bind(shop.as_str())
            .bind(submission.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_submission(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: &ShopDomain,
        submission: SubmissionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SUBMISSION_SQL)
            .bind(shop.as_str())
            .bind(submission.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Number of ratings and their sum for one product.
    pub(crate) async fn rating_totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: &ShopDomain,
        product_id: &str,
    ) -> Result<(i64, i64), sqlx::Error> {
        query_as::<Postgres, (i64, i64)>(RATING_TOTALS_SQL)
            .bind(shop.as_str())
            .bind(product_id)
            .fetch_one(&mut **tx)
            .await
    }
}

fn decode_error<E>(column: &str, error: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    }
}

fn required<T>(column: &str, value: Option<T>) -> sqlx::Result<T> {
    value.ok_or_else(|| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: format!("{column} is missing").into(),
    })
}

impl<'r> FromRow<'r, PgRow> for SubmissionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind = row
            .try_get::<String, _>("kind")?
            .parse::<SubmissionKind>()
            .map_err(|e| decode_error("kind", e))?;

        let shop = ShopDomain::parse(row.try_get::<&str, _>("shop")?)
            .map_err(|e| decode_error("shop", e))?;

        let display_name: String = row.try_get("display_name")?;
        let email: Option<String> = row.try_get("email")?;

        let details = match kind {
            SubmissionKind::Registration => SubmissionDetails::Registration(Registration {
                display_name,
                email: required("email", email)?,
            }),
            SubmissionKind::Review => {
                let rating: i16 = required("rating", row.try_get("rating")?)?;

                SubmissionDetails::Review(Review {
                    display_name,
                    email,
                    message: required("message", row.try_get("message")?)?,
                    rating: Rating::try_from(i64::from(rating))
                        .map_err(|e| decode_error("rating", e))?,
                    product: ProductReference {
                        id: required("product_id", row.try_get("product_id")?)?,
                        title: row.try_get("product_title")?,
                    },
                    image_url: row.try_get("image_url")?,
                })
            }
        };

        Ok(Self {
            uuid: SubmissionUuid::from_uuid(row.try_get("uuid")?),
            shop,
            details,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
