//! Submission request parsing.
//!
//! The storefront posts either JSON or a form body. Form bodies may carry a
//! review image in the `image` part.

use salvo::{
    http::{
        header::{HOST, HeaderName},
        mime,
    },
    prelude::*,
};
use serde::Deserialize;

use shopform_app::{domain::submissions::validation::SubmissionForm, images::ImageUpload};

use crate::submissions::errors::body_error;

const FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// Body of a JSON submission. Field names follow the storefront widget.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitFormRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub rating: Option<TextOrNumber>,
    pub product_id: Option<TextOrNumber>,
    pub product_title: Option<String>,
}

/// Widgets send ratings and platform product ids either as JSON numbers or
/// as the string value of a form control.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TextOrNumber {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            Self::Integer(value) => value.to_string(),
            // `4.0` renders as "4"; fractions survive and fail rating validation.
            Self::Float(value) => value.to_string(),
            Self::Text(value) => value,
        }
    }
}

impl From<SubmitFormRequest> for SubmissionForm {
    fn from(request: SubmitFormRequest) -> Self {
        SubmissionForm {
            username: request.username,
            email: request.email,
            message: request.message,
            rating: request.rating.map(TextOrNumber::into_text),
            product_id: request.product_id.map(TextOrNumber::into_text),
            product_title: request.product_title,
            has_image: false,
        }
    }
}

/// A parsed submission with its optional image part.
#[derive(Debug)]
pub(crate) struct ParsedSubmission {
    pub form: SubmissionForm,
    pub image: Option<ImageUpload>,
}

pub(crate) async fn parse_submission(req: &mut Request) -> Result<ParsedSubmission, StatusError> {
    let Some(content_type) = req.content_type() else {
        return Ok(ParsedSubmission {
            form: SubmissionForm::default(),
            image: None,
        });
    };

    if content_type.subtype() == mime::JSON || content_type.suffix() == Some(mime::JSON) {
        let request = req
            .parse_json::<SubmitFormRequest>()
            .await
            .map_err(|error| body_error(error, "Invalid JSON body"))?;

        return Ok(ParsedSubmission {
            form: request.into(),
            image: None,
        });
    }

    // Both parsers honour the request's secure max size, which the submit
    // route raises to the configured upload limit.
    let form_data = req
        .form_data()
        .await
        .map_err(|error| body_error(error, "Invalid form body"))?;

    let field = |name: &str| form_data.fields.get(name).cloned();

    // Browsers send an empty part when the file input is left blank.
    let image = form_data
        .files
        .get("image")
        .filter(|file| file.size() > 0)
        .map(|file| ImageUpload {
            path: file.path().clone(),
            original_name: file.name().map(ToString::to_string),
            content_type: file.content_type().map(|mime| mime.to_string()),
        });

    let form = SubmissionForm {
        username: field("username"),
        email: field("email"),
        message: field("message"),
        rating: field("rating"),
        product_id: field("productId"),
        product_title: field("productTitle"),
        has_image: image.is_some(),
    };

    Ok(ParsedSubmission { form, image })
}

/// Absolute URL of an uploaded image.
///
/// Uses `base_url` when configured, otherwise the scheme and host the client
/// reached us on.
pub(crate) fn public_image_url(req: &Request, base_url: Option<&str>, file_name: &str) -> String {
    let base = base_url.map_or_else(|| request_origin(req), ToString::to_string);

    format!("{base}/uploads/{file_name}")
}

fn request_origin(req: &Request) -> String {
    let scheme = req
        .headers()
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|scheme| scheme == "http" || scheme == "https")
        .or_else(|| req.uri().scheme_str().map(ToString::to_string))
        .unwrap_or_else(|| "http".to_string());

    let host = req
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
        .or_else(|| req.uri().authority().map(ToString::to_string))
        .unwrap_or_else(|| "localhost".to_string());

    format!("{scheme}://{host}")
}
