//! Response envelope applied to every route of both services.
//!
//! Unlike `tower_http::cors::CorsLayer`, which only emits the allow-methods and
//! allow-headers pair on real preflight requests, this stamps all three headers
//! on every response and answers any `OPTIONS` request itself.

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

fn apply(headers: &mut HeaderMap) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOW_ORIGIN));
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
}

/// Middleware for `axum::middleware::from_fn`.
///
/// `OPTIONS` short-circuits with `200 OK` and an empty body; the handler is never called.
pub async fn cors_envelope(req: Request, next: Next) -> Response {
    let mut res = if req.method() == Method::OPTIONS {
        (StatusCode::OK, Body::empty()).into_response()
    } else {
        next.run(req).await
    };
    apply(res.headers_mut());
    res
}
