use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::errors::StoreError;
use thiserror::Error;

pub const NUM_NOT_INTEGER: &str = "num должен быть целым числом";
pub const AGE_NOT_INTEGER: &str = "Age должен быть целым числом";

/// Everything a handler can fail with. Rendered once, as a plain-text body.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A query parameter failed integer parsing.
    #[error("{0}")]
    Validation(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match &self {
            HandlerError::Validation(_) => StatusCode::BAD_REQUEST,
            HandlerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
