//! HTTP span helpers.

/// Routes served by the API. Anything else is labelled `unmatched` so scanners
/// and typos cannot grow metric cardinality.
const KNOWN_ROUTES: &[&str] = &[
    "/api/active-promotion",
    "/api/current-user-plan",
    "/api/muso",
    "/api/create-stripe-customer",
    "/api/test-webhook",
    "/api-doc/openapi.json",
    "/docs",
];

const UNMATCHED_ROUTE: &str = "unmatched";

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = route_label(path).to_owned();
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

fn route_label(path: &str) -> &'static str {
    let trimmed = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    if trimmed.starts_with("/docs/") {
        return "/docs";
    }

    KNOWN_ROUTES
        .iter()
        .find(|route| **route == trimmed)
        .copied()
        .unwrap_or(UNMATCHED_ROUTE)
}
