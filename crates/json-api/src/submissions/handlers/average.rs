//! Average Rating Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    submissions::{errors::into_status_error, models::RatingResponse},
};

/// Average Rating Handler
///
/// Returns the mean star rating of a product's reviews, rounded to one
/// decimal place.
#[endpoint(
    tags("storefront"),
    summary = "Average Rating",
    responses(
        (status_code = StatusCode::OK, description = "Rating summary"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing productId parameter"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Shop is not installed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<RatingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_or_401()?;

    let product_id = req
        .query::<String>("productId")
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| StatusError::bad_request().brief("Missing productId parameter"))?;

    let summary = state
        .app
        .submissions
        .rating_summary(&shop, &product_id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shopform_app::domain::submissions::{
        MockSubmissionsService, SubmissionsServiceError, ratings::RatingSummary,
    };

    use crate::test_helpers::{submissions_service, test_shop};

    use super::*;

    fn make_service(submissions: MockSubmissionsService) -> Service {
        submissions_service(submissions, Router::with_path("average-rating").get(handler))
    }

    #[tokio::test]
    async fn test_average_returns_summary() -> TestResult {
        let mut submissions = MockSubmissionsService::new();

        submissions
            .expect_rating_summary()
            .once()
            .withf(|shop, product_id| *shop == test_shop() && product_id == "42")
            .return_once(|_, _| {
                Ok(RatingSummary {
                    average: Some(4.3),
                    count: 4,
                })
            });

        let mut res = TestClient::get("http://example.com/average-rating?productId=42")
            .send(&make_service(submissions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: RatingResponse = res.take_json().await?;

        assert!(body.success);
        assert!(body.average.is_some_and(|average| (average - 4.3).abs() < f64::EPSILON));
        assert_eq!(body.count, 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_unreviewed_product_has_null_average() -> TestResult {
        let mut submissions = MockSubmissionsService::new();

        submissions
            .expect_rating_summary()
            .once()
            .return_once(|_, _| Ok(RatingSummary::empty()));

        let mut res = TestClient::get("http://example.com/average-rating?productId=7")
            .send(&make_service(submissions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: serde_json::Value = res.take_json().await?;

        assert!(body["average"].is_null());
        assert_eq!(body["count"], 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_product_id_returns_400() -> TestResult {
        let mut submissions = MockSubmissionsService::new();

        submissions.expect_rating_summary().never();

        let res = TestClient::get("http://example.com/average-rating?productId=%20")
            .send(&make_service(submissions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_inconsistent_totals_return_500() -> TestResult {
        let mut submissions = MockSubmissionsService::new();

        submissions
            .expect_rating_summary()
            .once()
            .return_once(|_, _| Err(SubmissionsServiceError::Inconsistent));

        let res = TestClient::get("http://example.com/average-rating?productId=42")
            .send(&make_service(submissions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
