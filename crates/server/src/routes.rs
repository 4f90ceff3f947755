use axum::{middleware, Router};
use common::cors::cors_envelope;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod counter;
pub mod records;

/// Decoded query string in arrival order. Repeated keys are kept, not rejected.
pub type QueryPairs = Vec<(String, String)>;

/// First value given for `key`, if any.
pub fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// Wrap a finished router with the CORS envelope and request tracing.
pub fn with_envelope(router: Router) -> Router {
    router
        .layer(middleware::from_fn(cors_envelope))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR, once, here
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
