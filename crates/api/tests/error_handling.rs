//! Integration tests for transport-level error responses.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, post_raw};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: a body that is not JSON is rejected with the standard error shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_json_body_returns_invalid_data() {
    let (app, store) = common::build_test_app();
    let response = post_raw(app, "/api/journal/save", "application/json", "{not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid data");
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(store.entry_count().await, 0);
}

#[tokio::test]
async fn missing_content_type_returns_invalid_data() {
    let (app, _) = common::build_test_app();
    let response = post_raw(app, "/api/journal/save", "text/plain", r#"{"responses":{}}"#).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid data");
}

#[tokio::test]
async fn empty_body_returns_invalid_data() {
    let (app, _) = common::build_test_app();
    let response = post_raw(app, "/api/journal/save", "application/json", "").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid data");
}

// ---------------------------------------------------------------------------
// Test: wrong method on a known route returns 405
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_on_save_route_returns_405() {
    let (app, _) = common::build_test_app();
    let response = get(app, "/api/journal/save").await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ---------------------------------------------------------------------------
// Test: validation detail is logged, never returned
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_step_detail_is_not_leaked() {
    let (app, store) = common::build_test_app();
    let response = post_json(
        app,
        "/api/journal/save",
        json!({
            "responses": {
                "step1": {}, "step2": {}, "step3": {}, "step4": {}, "step5": {}
            },
            "currentStep": "42"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json, json!({ "error": "Invalid data", "code": "VALIDATION_ERROR" }));
    assert_eq!(store.entry_count().await, 0);
}
