//! Record service routes: `/get`, `/post`, `/clear`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use service::records::RecordStore;

use super::{first_value, QueryPairs};
use crate::errors::{HandlerError, AGE_NOT_INTEGER};

pub const DEFAULT_NAME: &str = "Guest";

#[derive(Clone)]
pub struct RecordState {
    pub store: Arc<dyn RecordStore>,
}

impl RecordState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self { Self { store } }
}

#[derive(Debug, Default)]
pub struct RecordParams {
    pub name: Option<String>,
    pub age: Option<String>,
}

impl RecordParams {
    /// The first `name` and first `age` of the query; later repeats are ignored.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            name: first_value(pairs, "name").map(str::to_string),
            age: first_value(pairs, "age").map(str::to_string),
        }
    }

    /// Apply defaults (`Guest`, `0`) for missing or empty values, then parse the age.
    fn resolve(self) -> Result<(String, i32), HandlerError> {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        let age = match self.age.as_deref().filter(|a| !a.is_empty()) {
            None => 0,
            Some(raw) => raw.parse::<i32>().map_err(|_| HandlerError::Validation(AGE_NOT_INTEGER))?,
        };
        Ok((name, age))
    }
}

pub fn build_router(state: RecordState) -> Router {
    let routes = Router::new()
        .route("/get", get(get_record))
        .route("/post", post(post_record))
        .route("/clear", get(clear_records).post(clear_records))
        .with_state(state);
    super::with_envelope(routes)
}

pub async fn get_record(State(state): State<RecordState>) -> Result<String, HandlerError> {
    let record = state.store.read_random().await?;
    Ok(format!("Name={} Age={}", record.name, record.age))
}

pub async fn post_record(
    State(state): State<RecordState>,
    Query(params): Query<QueryPairs>,
) -> Result<StatusCode, HandlerError> {
    let (name, age) = RecordParams::from_pairs(&params).resolve()?;
    state.store.insert(&name, age).await?;
    Ok(StatusCode::CREATED)
}

pub async fn clear_records(State(state): State<RecordState>) -> Result<&'static str, HandlerError> {
    state.store.clear().await?;
    Ok("База данных очищена...")
}
