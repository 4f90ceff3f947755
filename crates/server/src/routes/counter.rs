//! Counter service routes: `/get`, `/post`, `/set`, `/clear`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use configs::ReadFailurePolicy;
use service::counter::CounterStore;
use service::errors::StoreError;
use tracing::{debug, warn};

use super::{first_value, QueryPairs};
use crate::errors::{HandlerError, NUM_NOT_INTEGER};

#[derive(Clone)]
pub struct CounterState {
    pub store: Arc<dyn CounterStore>,
    pub on_read_failure: ReadFailurePolicy,
}

impl CounterState {
    pub fn new(store: Arc<dyn CounterStore>, on_read_failure: ReadFailurePolicy) -> Self {
        Self { store, on_read_failure }
    }
}

pub fn build_router(state: CounterState) -> Router {
    let routes = Router::new()
        .route("/get", get(get_counter))
        .route("/post", post(post_counter))
        .route("/set", get(set_counter).post(set_counter))
        .route("/clear", get(clear_counter).post(clear_counter))
        .with_state(state);
    super::with_envelope(routes)
}

/// An empty `num` counts as absent.
fn parse_num(raw: Option<&str>) -> Result<Option<i32>, HandlerError> {
    match raw.filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s.parse::<i32>().map(Some).map_err(|_| HandlerError::Validation(NUM_NOT_INTEGER)),
    }
}

pub async fn get_counter(State(state): State<CounterState>) -> Result<String, HandlerError> {
    let value = match state.store.read_value().await {
        Ok(v) => v,
        Err(StoreError::NotFound(_)) => 0,
        Err(e) => match state.on_read_failure {
            ReadFailurePolicy::Zero => {
                warn!(error = %e, "counter read failed; reporting 0");
                0
            }
            ReadFailurePolicy::Propagate => return Err(e.into()),
        },
    };
    Ok(format!("Счётчик сейчас {value}"))
}

pub async fn post_counter(State(state): State<CounterState>) -> Result<StatusCode, HandlerError> {
    let value = state.store.increment().await?;
    debug!(value, "counter incremented");
    Ok(StatusCode::OK)
}

pub async fn set_counter(
    State(state): State<CounterState>,
    Query(params): Query<QueryPairs>,
) -> Result<String, HandlerError> {
    let requested = parse_num(first_value(&params, "num"))?;

    // No readable row: seed a 0 row so the update below has something to target.
    if state.store.read_value().await.is_err() {
        if let Err(e) = state.store.insert_value(0).await {
            debug!(error = %e, "seed insert skipped");
        }
    }

    let value = match requested {
        Some(v) => v,
        None => state.store.read_value().await?,
    };
    state.store.set_value(value).await?;
    Ok(format!("Значение {value} установлено"))
}

pub async fn clear_counter(State(state): State<CounterState>) -> Result<&'static str, HandlerError> {
    state.store.clear().await?;
    Ok("Счетик сброшен...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_parsing() {
        assert_eq!(parse_num(None).unwrap(), None);
        assert_eq!(parse_num(Some("")).unwrap(), None);
        assert_eq!(parse_num(Some("-12")).unwrap(), Some(-12));
        assert_eq!(parse_num(Some("+4")).unwrap(), Some(4));
        assert!(parse_num(Some("abc")).is_err());
        assert!(parse_num(Some("1.5")).is_err());
        assert!(parse_num(Some(" 3")).is_err());
        assert!(parse_num(Some("99999999999")).is_err());
    }
}
