//! Submit Form Handler

use std::sync::Arc;

use salvo::{
    http::{header::LOCATION, request::SecureMaxSize},
    prelude::*,
    size_limiter::max_size,
};
use tracing::info;

use shopform_app::domain::submissions::{data::NewSubmission, records::SubmissionUuid};

use crate::{
    extensions::*,
    observability::record_submission_created,
    state::State,
    submissions::{
        errors::{image_error, into_status_error, validation_error},
        form::{ParsedSubmission, parse_submission, public_image_url},
        models::SubmissionCreatedResponse,
    },
};

/// The submit route with its body limit.
///
/// `max_size` turns away bodies that announce a larger length, and
/// `SecureMaxSize` lifts salvo's default parsing cap to the same limit so
/// image uploads up to `max_bytes` are read in full.
pub(crate) fn router(max_bytes: u64) -> Router {
    let secure_max = usize::try_from(max_bytes).unwrap_or(usize::MAX);

    Router::with_path("submit-form")
        .hoop(max_size(max_bytes))
        .hoop(SecureMaxSize::new(secure_max))
        .post(handler)
}

/// Submit Form Handler
///
/// Stores a registration or a product review sent by the storefront widget.
/// Accepts JSON, urlencoded or multipart bodies; multipart bodies may carry a
/// review image in the `image` part.
#[endpoint(
    tags("storefront"),
    summary = "Submit Form",
    responses(
        (status_code = StatusCode::CREATED, description = "Submission stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid fields"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Shop is not installed"),
        (status_code = StatusCode::PAYLOAD_TOO_LARGE, description = "Body exceeds the upload limit"),
        (status_code = StatusCode::UNSUPPORTED_MEDIA_TYPE, description = "Attachment is not an image"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SubmissionCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_or_401()?;

    let ParsedSubmission { form, image } = parse_submission(req).await?;

    let mut details = form.validate().map_err(|error| validation_error(&error))?;

    if let Some(upload) = image {
        let stored = state
            .app
            .images
            .store_image(upload)
            .await
            .map_err(image_error)?;

        details.attach_image(public_image_url(
            req,
            state.public_base_url.as_deref(),
            &stored.file_name,
        ));
    }

    let record = state
        .app
        .submissions
        .create_submission(
            &shop,
            NewSubmission {
                uuid: SubmissionUuid::new(),
                details,
            },
        )
        .await
        .map_err(into_status_error)?;

    record_submission_created(record.kind().as_str());

    info!(%shop, kind = %record.kind(), submission = %record.uuid, "submission stored");

    res.add_header(LOCATION, format!("/api/submissions/{}", record.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(SubmissionCreatedResponse {
        success: true,
        message: "Form submitted successfully".to_string(),
        data: record.into(),
    }))
}
