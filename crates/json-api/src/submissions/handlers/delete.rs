//! Delete Submission Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use shopform_app::domain::submissions::records::SubmissionUuid;

use crate::{
    extensions::*,
    state::State,
    submissions::{errors::into_status_error, models::SuccessResponse},
};

/// Delete Submission Handler
#[endpoint(
    tags("submissions"),
    summary = "Delete Submission",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Submission deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Submission not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    submission: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SuccessResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_or_401()?;
    let submission = SubmissionUuid::from_uuid(submission.into_inner());

    state
        .app
        .submissions
        .delete_submission(&shop, submission)
        .await
        .map_err(into_status_error)?;

    info!(%shop, %submission, "submission deleted");

    Ok(Json(SuccessResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shopform_app::domain::submissions::{MockSubmissionsService, SubmissionsServiceError};

    use crate::test_helpers::{submissions_service, test_shop};

    use super::*;

    fn make_service(submissions: MockSubmissionsService) -> Service {
        submissions_service(
            submissions,
            Router::with_path("submissions/{submission}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_submission_success() -> TestResult {
        let uuid = SubmissionUuid::new();

        let mut submissions = MockSubmissionsService::new();

        submissions
            .expect_delete_submission()
            .once()
            .withf(move |shop, u| *shop == test_shop() && *u == uuid)
            .return_once(|_, _| Ok(()));

        let mut res = TestClient::delete(format!("http://example.com/submissions/{uuid}"))
            .send(&make_service(submissions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: SuccessResponse = res.take_json().await?;

        assert!(body.success);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_submission_not_found_returns_404() -> TestResult {
        let uuid = SubmissionUuid::new();

        let mut submissions = MockSubmissionsService::new();

        submissions
            .expect_delete_submission()
            .once()
            .return_once(|_, _| Err(SubmissionsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/submissions/{uuid}"))
            .send(&make_service(submissions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_submission_invalid_uuid_returns_400() -> TestResult {
        let res = TestClient::delete("http://example.com/submissions/123")
            .send(&make_service(MockSubmissionsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
