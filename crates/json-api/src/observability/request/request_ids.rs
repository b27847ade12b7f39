//! Request ids: taken from the storefront proxy when present, generated
//! otherwise, and echoed back on the response.

use salvo::{
    http::{StatusCode, header::HeaderValue},
    prelude::Response,
};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longer incoming ids are replaced rather than copied into every log line.
const MAX_REQUEST_ID_LEN: usize = 128;

pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty() && value.len() <= MAX_REQUEST_ID_LEN)
        .unwrap_or_else(generate_request_id)
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    let header_value = match HeaderValue::from_str(request_id) {
        Ok(value) => value,
        Err(source) => {
            warn!(
                request_id,
                "could not encode request id for response header: {source}"
            );

            return;
        }
    };

    res.headers_mut().insert(REQUEST_ID_HEADER, header_value);
}

pub(super) fn response_status_or_ok(status_code: Option<StatusCode>) -> StatusCode {
    status_code.unwrap_or(StatusCode::OK)
}

fn generate_request_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_request_ids_are_kept() {
        assert_eq!(
            resolve_request_id(Some(" req-42 ".to_string())),
            "req-42"
        );
    }

    #[test]
    fn blank_or_oversized_ids_are_regenerated() {
        for header in [None, Some("  ".to_string()), Some("x".repeat(200))] {
            let id = resolve_request_id(header);

            assert!(Uuid::parse_str(&id).is_ok(), "{id}");
        }
    }

    #[test]
    fn request_id_is_echoed_on_the_response() {
        let mut res = Response::new();

        set_request_id_header(&mut res, "req-42");

        assert_eq!(
            res.headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("req-42")
        );
    }

    #[test]
    fn missing_status_means_ok() {
        assert_eq!(response_status_or_ok(None), StatusCode::OK);
        assert_eq!(
            response_status_or_ok(Some(StatusCode::PAYLOAD_TOO_LARGE)),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }
}
