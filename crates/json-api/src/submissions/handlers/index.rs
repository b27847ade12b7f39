//! List Submissions Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use shopform_app::domain::submissions::data::SubmissionKind;

use crate::{
    extensions::*,
    state::State,
    submissions::{errors::into_status_error, models::SubmissionsResponse},
};

/// List Submissions Handler
///
/// Returns the shop's submissions, newest first, optionally filtered by kind.
#[endpoint(
    tags("submissions"),
    summary = "List Submissions",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Submissions"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown kind"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid session"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    kind: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<SubmissionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_or_401()?;

    let kind = kind
        .into_inner()
        .map(|kind| kind.parse::<SubmissionKind>())
        .transpose()
        .or_400("Invalid kind parameter")?;

    let records = state
        .app
        .submissions
        .list_submissions(&shop, kind)
        .await
        .map_err(into_status_error)?;

    let data: Vec<_> = records.into_iter().map(Into::into).collect();

    Ok(Json(SubmissionsResponse {
        success: true,
        count: data.len(),
        data,
    }))
}
