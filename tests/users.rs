mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn empty_user_list() {
    let app = TestApp::new().await;

    for uri in ["/", "/users/"] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json(), json!({ "users": [] }));
    }
}

#[tokio::test]
async fn create_user_echoes_fields() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/users/", json!({ "name": "Ann", "profile_image": "a.png" }))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert!(body["id"].is_i64());
    assert_eq!(body["name"], "Ann");
    assert_eq!(body["profile_image"], "a.png");
    assert_eq!(body["notes"], json!([]));

    let listed = app.get("/users/").await.json();
    assert_eq!(listed["users"], json!([body]));
}

#[tokio::test]
async fn identical_payloads_get_distinct_ids() {
    let app = TestApp::new().await;

    let first = app.create_user("Ann").await;
    let second = app.create_user("Ann").await;

    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn create_user_with_missing_field_persists_nothing() {
    let app = TestApp::new().await;

    let response = app.post_json("/users/", json!({ "name": "Ann" })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({ "error": "request body missing 'name' or 'profile_image' fields" })
    );
    assert_eq!(app.get("/users/").await.json(), json!({ "users": [] }));
}

#[tokio::test]
async fn create_user_with_non_string_field() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/users/", json!({ "name": 7, "profile_image": "a.png" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({ "error": "'name' or 'profile_image' values not strings" })
    );
}

#[tokio::test]
async fn create_user_with_malformed_json() {
    let app = TestApp::new().await;

    let response = app.post_raw("/users/", "{\"name\": ").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({ "error": "request body is not valid JSON" })
    );
}

#[tokio::test]
async fn get_user_by_id() {
    let app = TestApp::new().await;
    let user = app.create_user("Ann").await;

    let response = app.get(&format!("/user/{}/", user["id"])).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), user);
}

#[tokio::test]
async fn get_unknown_user() {
    let app = TestApp::new().await;

    for uri in ["/user/999/", "/user/abc/"] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.json(), json!({ "error": "User not found!" }));
    }
}

#[tokio::test]
async fn partial_update_changes_only_given_field() {
    let app = TestApp::new().await;
    let user = app.create_user("Ann").await;
    let uri = format!("/users/{}/", user["id"]);

    let response = app.post_json(&uri, json!({ "name": "Bo" })).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["name"], "Bo");
    assert_eq!(body["profile_image"], user["profile_image"]);

    let fetched = app.get(&format!("/user/{}/", user["id"])).await.json();
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn update_with_empty_body_returns_user_unchanged() {
    let app = TestApp::new().await;
    let user = app.create_user("Ann").await;

    let response = app
        .post_raw(&format!("/users/{}/", user["id"]), "")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), user);
}

#[tokio::test]
async fn update_unknown_user() {
    let app = TestApp::new().await;

    let response = app.post_json("/users/42/", json!({ "name": "Bo" })).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json(), json!({ "error": "User not found!" }));
}

#[tokio::test]
async fn delete_user_twice() {
    let app = TestApp::new().await;
    let user = app.create_user("Ann").await;
    let uri = format!("/users/{}/", user["id"]);

    let first = app.delete(&uri).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.json(), user);

    let second = app.delete(&uri).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
    assert_eq!(second.json(), json!({ "error": "User not found!" }));

    let fetched = app.get(&format!("/user/{}/", user["id"])).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
}
