use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use service::records::repository::mock::MockRecordStore;
use service::records::Record;
use tower::ServiceExt;

use server::routes::records::{build_router, RecordState};

fn app(store: &Arc<MockRecordStore>) -> Router {
    build_router(RecordState::new(store.clone()))
}

async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, String) {
    let res = app
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), 64 * 1024).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn append_then_read_back() {
    let store = Arc::new(MockRecordStore::default());
    let app = app(&store);

    assert_eq!(call(&app, Method::GET, "/clear").await.0, StatusCode::OK);
    assert_eq!(call(&app, Method::POST, "/post?name=Ann&age=30").await, (StatusCode::CREATED, String::new()));
    assert_eq!(call(&app, Method::GET, "/get").await, (StatusCode::OK, "Name=Ann Age=30".to_string()));
}

#[tokio::test]
async fn post_without_params_inserts_guest() {
    let store = Arc::new(MockRecordStore::default());
    let app = app(&store);
    assert_eq!(call(&app, Method::POST, "/post").await.0, StatusCode::CREATED);
    assert_eq!(call(&app, Method::POST, "/post?name=&age=").await.0, StatusCode::CREATED);
    assert_eq!(store.records(), vec![Record::new("Guest", 0), Record::new("Guest", 0)]);
    assert_eq!(call(&app, Method::GET, "/get").await.1, "Name=Guest Age=0");
}

#[tokio::test]
async fn names_are_url_decoded() {
    let store = Arc::new(MockRecordStore::default());
    let app = app(&store);
    call(&app, Method::POST, "/post?name=%D0%90%D0%BD%D1%8F+K&age=7").await;
    assert_eq!(store.records(), vec![Record::new("Аня K", 7)]);
}

#[tokio::test]
async fn repeated_keys_store_the_first_value() {
    let store = Arc::new(MockRecordStore::default());
    let app = app(&store);
    assert_eq!(
        call(&app, Method::POST, "/post?name=Ann&name=Bob&age=30").await,
        (StatusCode::CREATED, String::new())
    );
    assert_eq!(call(&app, Method::POST, "/post?age=41&name=Cy&age=x").await.0, StatusCode::CREATED);
    assert_eq!(store.records(), vec![Record::new("Ann", 30), Record::new("Cy", 41)]);
}

#[tokio::test]
async fn bad_age_is_400_and_nothing_is_stored() {
    let store = Arc::new(MockRecordStore::default());
    let app = app(&store);
    assert_eq!(
        call(&app, Method::POST, "/post?name=Ann&age=old").await,
        (StatusCode::BAD_REQUEST, "Age должен быть целым числом".to_string())
    );
    assert!(store.records().is_empty());
}

#[tokio::test]
async fn get_on_empty_store_is_500() {
    let store = Arc::new(MockRecordStore::default());
    let app = app(&store);
    let (status, body) = call(&app, Method::GET, "/get").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "record not found");
}

#[tokio::test]
async fn store_failures_are_500() {
    let store = Arc::new(MockRecordStore::with_records(vec![Record::new("Ann", 30)]));
    store.fail(true);
    let app = app(&store);
    assert_eq!(call(&app, Method::GET, "/get").await.0, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(call(&app, Method::POST, "/post?name=Bob").await.0, StatusCode::INTERNAL_SERVER_ERROR);
    let (status, body) = call(&app, Method::POST, "/clear").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("очищена"));
    store.fail(false);
    assert_eq!(store.records(), vec![Record::new("Ann", 30)]);
}

#[tokio::test]
async fn clear_is_idempotent() {
    let store = Arc::new(MockRecordStore::with_records(vec![Record::new("Ann", 30), Record::new("Ann", 30)]));
    let app = app(&store);
    for method in [Method::GET, Method::POST] {
        assert_eq!(
            call(&app, method, "/clear").await,
            (StatusCode::OK, "База данных очищена...".to_string())
        );
    }
    assert!(store.records().is_empty());
}

#[tokio::test]
async fn options_carries_envelope_and_skips_handler() {
    let store = Arc::new(MockRecordStore::default());
    let app = app(&store);
    let res = app
        .clone()
        .oneshot(Request::builder().method(Method::OPTIONS).uri("/post?name=Ann").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
    assert!(store.records().is_empty());
}

#[tokio::test]
async fn get_on_post_route_is_405() {
    let store = Arc::new(MockRecordStore::default());
    let app = app(&store);
    assert_eq!(call(&app, Method::GET, "/post?name=Ann").await.0, StatusCode::METHOD_NOT_ALLOWED);
    assert!(store.records().is_empty());
}
