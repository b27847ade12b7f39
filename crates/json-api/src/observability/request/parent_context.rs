//! W3C trace parent extraction, so spans started by the storefront proxy
//! continue into submission handling.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    let extractor = HeaderExtractor { headers };

    global::get_text_map_propagator(|propagator| {
        // Start from an empty context; a request without trace headers must
        // not join whatever span is active in-process.
        let context = propagator.extract_with_context(&Context::new(), &extractor);

        let is_valid = context.span().span_context().is_valid();

        is_valid.then_some(context)
    })
}

#[derive(Debug)]
struct HeaderExtractor<'a> {
    headers: &'a HeaderMap,
}

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.headers.get(key)?.to_str().ok()
    }

    fn keys(&self) -> Vec<&str> {
        self.headers.keys().map(HeaderName::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::HeaderValue;

    use super::*;

    const TRACEPARENT: &str = "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01";

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert("traceparent", HeaderValue::from_static(TRACEPARENT));

        headers
    }

    #[test]
    fn extractor_reads_headers() {
        let headers = headers();
        let extractor = HeaderExtractor { headers: &headers };

        assert_eq!(extractor.get("traceparent"), Some(TRACEPARENT));
        assert_eq!(extractor.get("tracestate"), None);
        assert_eq!(extractor.keys(), vec!["traceparent"]);
    }

    #[test]
    fn requests_without_trace_headers_have_no_parent() {
        assert!(extract_parent_context(&HeaderMap::new()).is_none());
    }
}
