//! Request handlers.
//!
//! # Responsibilities
//! - Echo diagnostic headers in debug mode
//! - Hand `X-Format` and `X-Code` to the resolver
//! - Write the content type, the resolved status and the page body
//! - Answer a bare 404 when no page matches
//!
//! # Design Decisions
//! - Nothing here fails the request: every problem degrades to a page or a 404
//! - Bodies are shared `Bytes`, never copied or interpolated

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::headers::{echo_diagnostics, header_str, X_CODE, X_FORMAT};
use crate::http::server::AppState;
use crate::observability::metrics;

/// Serve the custom error page for the status and format in the request
/// headers.
pub async fn error_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut response_headers = HeaderMap::new();
    if state.debug {
        echo_diagnostics(&headers, &mut response_headers);
    }

    let resolution = state
        .resolver
        .resolve(header_str(&headers, &X_FORMAT), header_str(&headers, &X_CODE));

    let Some(page) = resolution.page else {
        return not_found(response_headers);
    };

    let status = match u16::try_from(resolution.status)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
    {
        Some(status) => status,
        None => {
            tracing::warn!(
                status = resolution.status,
                page = %page.key,
                "Resolved status is not a valid HTTP status, returning 404"
            );
            return not_found(response_headers);
        }
    };

    match HeaderValue::from_str(&resolution.content_type) {
        Ok(value) => {
            response_headers.insert(header::CONTENT_TYPE, value);
        }
        Err(e) => {
            tracing::warn!(
                content_type = %resolution.content_type,
                error = %e,
                "Content type is not a valid header value"
            );
        }
    }

    tracing::info!(
        status = status.as_u16(),
        format = %resolution.content_type,
        page = %page.key,
        "Serving custom error response"
    );
    metrics::record_response(status.as_u16(), &page.key);

    (status, response_headers, Body::from(page.body)).into_response()
}

/// Liveness probe: always 200 with an empty body.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

fn not_found(headers: HeaderMap) -> Response {
    metrics::record_not_found();
    (StatusCode::NOT_FOUND, headers).into_response()
}
