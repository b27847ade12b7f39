//! Submission Errors

use salvo::{
    http::{ParseError, ResBody, StatusError},
    prelude::*,
};
use tracing::{debug, error};

use shopform_app::{
    domain::submissions::{SubmissionsServiceError, validation::SubmissionValidationError},
    images::ImageStoreError,
};

use crate::submissions::models::ErrorResponse;

pub(crate) fn into_status_error(error: SubmissionsServiceError) -> StatusError {
    match error {
        SubmissionsServiceError::NotFound => {
            StatusError::not_found().brief("Submission not found")
        }
        SubmissionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Submission already exists")
        }
        SubmissionsServiceError::MissingRequiredData | SubmissionsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid submission payload")
        }
        SubmissionsServiceError::Inconsistent => {
            error!("stored submission data is inconsistent");

            StatusError::internal_server_error()
        }
        SubmissionsServiceError::Sql(source) => {
            error!("submission storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn validation_error(error: &SubmissionValidationError) -> StatusError {
    StatusError::bad_request().brief(error.to_string())
}

/// Map a body parsing failure, keeping oversized bodies apart from malformed
/// ones.
pub(crate) fn body_error(error: ParseError, brief: &'static str) -> StatusError {
    match error {
        ParseError::PayloadTooLarge => {
            StatusError::payload_too_large().brief("Submission body is too large")
        }
        other => {
            debug!("rejected submission body: {other}");

            StatusError::bad_request().brief(brief)
        }
    }
}

pub(crate) fn image_error(error: ImageStoreError) -> StatusError {
    match error {
        ImageStoreError::UnsupportedType(content_type) => StatusError::unsupported_media_type()
            .brief(format!("Unsupported image type \"{content_type}\"")),
        ImageStoreError::Io(source) => {
            error!("failed to store uploaded image: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Storefront error middleware.
///
/// The storefront widget shows the `error` field of a JSON body, so error
/// responses rendered below this hoop become
/// `{ "success": false, "error": "<brief>" }` instead of an HTML page.
#[salvo::handler]
pub(crate) async fn storefront_errors(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    ctrl.call_next(req, depot, res).await;

    let Some(code) = res
        .status_code
        .filter(|code| code.is_client_error() || code.is_server_error())
    else {
        return;
    };

    let error = match res.take_body() {
        ResBody::Error(status) => status.brief,
        ResBody::None => code
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
        body => {
            res.body = body;

            return;
        }
    };

    res.render(Json(ErrorResponse {
        success: false,
        error,
    }));
}
