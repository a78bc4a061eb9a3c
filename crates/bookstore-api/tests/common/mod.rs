//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bookstore_core::clock::Clock;
use bookstore_event_store::in_memory_event_repository::InMemoryEventRepository;
use bookstore_profile::InMemoryProfileStore;
use bookstore_test_support::{FixedClock, sample_catalog};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use bookstore_api::state::AppState;

/// Fresh state over the sample catalog with a real in-memory event store.
///
/// Clone the state to send several requests against the same cart.
pub fn test_state() -> AppState {
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock::standard());
    AppState::new(
        clock,
        Arc::new(InMemoryEventRepository::new()),
        Arc::new(sample_catalog()),
        Arc::new(InMemoryProfileStore::new()),
        Uuid::new_v4(),
    )
}

/// Build the full app router around `state`, as `main.rs` does.
pub fn build_test_app(state: &AppState) -> Router {
    bookstore_api::build_router(state.clone())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, json_request("POST", uri, body)).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, json_request("PUT", uri, body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}
