//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use storybranch_core::clock::Clock;
use storybranch_core::id::{StoryIdGenerator, UuidStoryIdGenerator};
use storybranch_store::InMemoryStoryRepository;
use storybranch_story::domain::generator::MockContentGenerator;
use storybranch_test_support::FixedClock;
use tower::ServiceExt;

use storybranch_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app over a fresh in-memory registry with UUID story ids.
/// Clone the returned router to send several requests against one registry.
pub fn build_test_app() -> Router {
    build_test_app_with_ids(Arc::new(UuidStoryIdGenerator))
}

/// Build the full app with a custom id generator, e.g. a `SequenceIdGenerator`
/// that repeats ids to provoke collisions.
pub fn build_test_app_with_ids(story_ids: Arc<dyn StoryIdGenerator>) -> Router {
    let app_state = AppState::new(
        fixed_clock(),
        story_ids,
        Arc::new(MockContentGenerator),
        Arc::new(InMemoryStoryRepository::new()),
    );

    storybranch_api::app(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Initialize a story and return its id.
pub async fn init_story(app: &Router) -> String {
    let (status, json) = post_json(
        app.clone(),
        "/api/stories/init",
        &serde_json::json!({ "source": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["story_id"].as_str().unwrap().to_owned()
}
