//! Get Submission Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use shopform_app::domain::submissions::records::SubmissionUuid;

use crate::{
    extensions::*,
    state::State,
    submissions::{errors::into_status_error, models::SubmissionEnvelope},
};

/// Get Submission Handler
#[endpoint(
    tags("submissions"),
    summary = "Get Submission",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Submission"),
        (status_code = StatusCode::NOT_FOUND, description = "Submission not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    submission: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SubmissionEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_or_401()?;

    let record = state
        .app
        .submissions
        .get_submission(&shop, SubmissionUuid::from_uuid(submission.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(SubmissionEnvelope {
        success: true,
        data: record.into(),
    }))
}
