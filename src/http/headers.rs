//! Header names set by the ingress controller's default-backend hook.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Media type the caller wants.
pub const X_FORMAT: HeaderName = HeaderName::from_static("x-format");
/// Status code to render.
pub const X_CODE: HeaderName = HeaderName::from_static("x-code");
/// Original URI as seen by the ingress.
pub const X_ORIGINAL_URI: HeaderName = HeaderName::from_static("x-original-uri");
/// Namespace of the matched Ingress.
pub const X_NAMESPACE: HeaderName = HeaderName::from_static("x-namespace");
/// Name of the matched Ingress.
pub const X_INGRESS_NAME: HeaderName = HeaderName::from_static("x-ingress-name");
/// Service the Ingress routes to.
pub const X_SERVICE_NAME: HeaderName = HeaderName::from_static("x-service-name");
/// Port of that service.
pub const X_SERVICE_PORT: HeaderName = HeaderName::from_static("x-service-port");
/// Request ID shared with the backend.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Headers echoed back in debug mode.
pub const DIAGNOSTIC_HEADERS: [HeaderName; 8] = [
    X_FORMAT,
    X_CODE,
    X_ORIGINAL_URI,
    X_NAMESPACE,
    X_INGRESS_NAME,
    X_SERVICE_NAME,
    X_SERVICE_PORT,
    X_REQUEST_ID,
];

/// First value of `name` as text; missing or non-text values read as empty.
pub fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// Copy every diagnostic header from `request` onto `response`, empty when
/// the request lacks it.
pub fn echo_diagnostics(request: &HeaderMap, response: &mut HeaderMap) {
    for name in DIAGNOSTIC_HEADERS {
        let value = request
            .get(&name)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(""));
        response.insert(name, value);
    }
}
