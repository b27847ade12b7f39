//! Submission Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopform_app::domain::submissions::{
    data::SubmissionDetails, ratings::RatingSummary, records::SubmissionRecord,
};

/// A stored registration or review.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmissionResponse {
    /// The unique identifier of the submission
    pub uuid: Uuid,

    /// The shop the submission belongs to
    pub shop: String,

    /// Either `registration` or `review`
    pub kind: String,

    /// The submitter's display name
    pub username: String,

    /// The submitter's email, always present on registrations
    pub email: Option<String>,

    /// Review text
    pub message: Option<String>,

    /// Star rating from 1 to 5
    pub rating: Option<u8>,

    /// The reviewed product's identifier
    pub product_id: Option<String>,

    /// The reviewed product's title at submission time
    pub product_title: Option<String>,

    /// Public URL of the attached review image
    pub image_url: Option<String>,

    /// The date and time the submission was received
    pub submitted_at: String,
}

impl From<SubmissionRecord> for SubmissionResponse {
    fn from(record: SubmissionRecord) -> Self {
        let kind = record.kind().as_str().to_string();

        let mut response = SubmissionResponse {
            uuid: record.uuid.into_uuid(),
            shop: record.shop.to_string(),
            kind,
            username: String::new(),
            email: None,
            message: None,
            rating: None,
            product_id: None,
            product_title: None,
            image_url: None,
            submitted_at: record.created_at.to_string(),
        };

        match record.details {
            SubmissionDetails::Registration(registration) => {
                response.username = registration.display_name;
                response.email = Some(registration.email);
            }
            SubmissionDetails::Review(review) => {
                response.username = review.display_name;
                response.email = review.email;
                response.message = Some(review.message);
                response.rating = Some(review.rating.get());
                response.product_id = Some(review.product.id);
                response.product_title = review.product.title;
                response.image_url = review.image_url;
            }
        }

        response
    }
}

/// A single submission.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubmissionEnvelope {
    pub success: bool,
    pub data: SubmissionResponse,
}

/// The submission stored by a storefront form.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubmissionCreatedResponse {
    pub success: bool,
    pub message: String,
    pub data: SubmissionResponse,
}

/// All submissions for a shop, newest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubmissionsResponse {
    pub success: bool,
    pub data: Vec<SubmissionResponse>,
    pub count: usize,
}

/// Average star rating of a product.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RatingResponse {
    pub success: bool,

    /// Mean rating rounded to one decimal, absent when there are no reviews
    pub average: Option<f64>,

    /// Number of reviews with a rating
    pub count: u64,
}

impl From<RatingSummary> for RatingResponse {
    fn from(summary: RatingSummary) -> Self {
        RatingResponse {
            success: true,
            average: summary.average,
            count: summary.count,
        }
    }
}

/// Error body returned to the storefront widget.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    pub success: bool,

    /// Human readable reason, shown next to the form
    pub error: String,
}

/// Acknowledgement without a payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SuccessResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use shopform_app::domain::submissions::records::SubmissionUuid;

    use crate::test_helpers::{make_registration, make_review};

    use super::*;

    #[test]
    fn registration_response_has_no_review_fields() {
        let record = make_registration(SubmissionUuid::new());
        let uuid = record.uuid.into_uuid();

        let response = SubmissionResponse::from(record);

        assert_eq!(response.uuid, uuid);
        assert_eq!(response.kind, "registration");
        assert_eq!(response.username, "Ada");
        assert_eq!(response.email.as_deref(), Some("ada@example.com"));
        assert!(response.rating.is_none());
        assert!(response.product_id.is_none());
    }

    #[test]
    fn review_response_serialises_camel_case() -> Result<(), serde_json::Error> {
        let response = SubmissionResponse::from(make_review(SubmissionUuid::new(), 4));

        let json = serde_json::to_value(&response)?;

        assert_eq!(json["kind"], "review");
        assert_eq!(json["rating"], 4);
        assert_eq!(json["productId"], "gid://shopify/Product/42");
        assert_eq!(json["productTitle"], "Teapot");
        assert_eq!(json["submittedAt"], "1970-01-01T00:00:00Z");
        assert!(json["imageUrl"].is_null());

        Ok(())
    }
}
