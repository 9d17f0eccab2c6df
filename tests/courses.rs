mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn empty_course_list() {
    let app = TestApp::new().await;

    let response = app.get("/courses/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "courses": [] }));
}

#[tokio::test]
async fn create_and_fetch_course() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/courses/",
            json!({ "code": "CS1110", "name": "Intro", "description": "Python" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let course = response.json();
    assert_eq!(course["code"], "CS1110");
    assert_eq!(course["name"], "Intro");
    assert_eq!(course["description"], "Python");
    assert_eq!(course["notes"], json!([]));

    let fetched = app.get(&format!("/course/{}/", course["id"])).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), course);

    let listed = app.get("/courses/").await.json();
    assert_eq!(listed, json!({ "courses": [course] }));
}

#[tokio::test]
async fn create_course_with_missing_field() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/courses/", json!({ "code": "CS1110", "name": "Intro" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({ "error": "request body missing 'code', 'name', or 'description' fields" })
    );
    assert_eq!(app.get("/courses/").await.json(), json!({ "courses": [] }));
}

#[tokio::test]
async fn create_course_with_non_string_field() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/courses/",
            json!({ "code": 1110, "name": "Intro", "description": "Python" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({ "error": "'code', 'name', or 'description' value not of type string" })
    );
}

#[tokio::test]
async fn get_unknown_course() {
    let app = TestApp::new().await;

    let response = app.get("/course/5/").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.json(),
        json!({ "error": "Course with 'course_id' not found" })
    );
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let app = TestApp::new().await;

    let response = app.get("/api-docs/openapi.json").await;

    assert_eq!(response.status, StatusCode::OK);
    let doc = response.json();
    assert!(doc["paths"]["/courses/"].is_object());
    assert!(doc["paths"]["/users/{user_id}/"].is_object());
    assert!(doc["paths"]["/notes/{note_id}/"].is_object());
}
