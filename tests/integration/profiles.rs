//! Integration tests for profiles and the follow graph.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_profile_lookup() {
    let app = TestApp::new().await;
    app.register("alice").await;

    let response = app.request("GET", "/v1/profiles/alice", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["followers"], 0);
    assert_eq!(response.body["following"], false);
    assert!(response.body["createdAt"].is_string());

    let response = app.request("GET", "/v1/profiles/nobody", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_type(), "NOT_FOUND");
}

#[tokio::test]
async fn test_follow_toggle() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    app.register("bobby").await;

    let response = app
        .request("POST", "/v1/profiles/bobby/follow", None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["following"], true);
    assert_eq!(response.body["followers"], 1);

    let response = app
        .request("GET", "/v1/profiles/alice", None, Some(&alice))
        .await;
    assert_eq!(response.body["followee"], 1);

    let response = app
        .request("POST", "/v1/profiles/bobby/follow", None, Some(&alice))
        .await;
    assert_eq!(response.body["following"], false);
    assert_eq!(response.body["followers"], 0);
}

#[tokio::test]
async fn test_follow_rules() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .request("POST", "/v1/profiles/alice/follow", None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("POST", "/v1/profiles/nobody/follow", None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("POST", "/v1/profiles/alice/follow", None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_search_profiles() {
    let app = TestApp::new().await;
    app.register("alice").await;
    app.register("alfred").await;
    app.register("bobby").await;

    let response = app
        .request("GET", "/v1/profiles/search?search=al", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alfred", "alice"]);

    let response = app.request("GET", "/v1/profiles/search", None, None).await;
    assert_eq!(response.body, serde_json::json!([]));
}
