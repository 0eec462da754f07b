//! Integration tests for the account flow.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{Part, TestApp, media_path};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-a-png";

#[tokio::test]
async fn test_register_sets_session_cookie() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/v1/accounts/register",
            Some(json!({
                "email": "Alice@Example.com",
                "username": "alice",
                "displayName": "Alice Liddell",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["email"], "alice@example.com");
    assert_eq!(response.body["displayName"], "Alice Liddell");
    assert!(
        response.body["image"]
            .as_str()
            .unwrap()
            .starts_with("https://gravatar.com/avatar/")
    );
    assert!(response.body.get("password").is_none());

    let cookie = response.set_cookie.as_deref().unwrap();
    assert!(cookie.starts_with("mqk="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_register_duplicate_is_conflict() {
    let app = TestApp::new().await;
    app.register("alice").await;

    let response = app
        .request(
            "POST",
            "/v1/accounts/register",
            Some(json!({
                "email": "someone@example.com",
                "username": "alice",
                "displayName": "Another Alice",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_type(), "CONFLICT");
}

#[tokio::test]
async fn test_register_invalid_input() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/v1/accounts/register",
            Some(json!({
                "email": "not-an-email",
                "username": "al",
                "displayName": "Alice Liddell",
                "password": "password123",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_type(), "VALIDATION");

    let response = app
        .request("POST", "/v1/accounts/register", Some(json!({"email": 1})), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_errors_are_identical() {
    let app = TestApp::new().await;
    app.register("alice").await;

    let ok = app
        .request(
            "POST",
            "/v1/accounts/login",
            Some(json!({"email": "alice@example.com", "password": "password123"})),
            None,
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["username"], "alice");
    assert!(ok.set_cookie.is_some());

    let wrong = app
        .request(
            "POST",
            "/v1/accounts/login",
            Some(json!({"email": "alice@example.com", "password": "wrong-password"})),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/v1/accounts/login",
            Some(json!({"email": "nobody@example.com", "password": "password123"})),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body, unknown.body);
    assert_eq!(wrong.error_message(), "Invalid email and password combination");
}

#[tokio::test]
async fn test_current_account_requires_session() {
    let app = TestApp::new().await;
    let session = app.register("alice").await;

    let response = app.request("GET", "/v1/accounts", None, Some(&session)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice");

    let response = app.request("GET", "/v1/accounts", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_type(), "AUTHENTICATION");

    let response = app
        .request("GET", "/v1/accounts", None, Some("mqk=forged.token.value"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new().await;
    let session = app.register("alice").await;

    let response = app
        .request("POST", "/v1/accounts/logout", None, Some(&session))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!(true));
    let cookie = response.set_cookie.unwrap();
    assert!(cookie.starts_with("mqk="));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_edit_account_with_avatar() {
    let app = TestApp::new().await;
    let session = app.register("alice").await;

    let response = app
        .multipart(
            "PUT",
            "/v1/accounts",
            &[
                Part::Text("username", "alice2"),
                Part::Text("displayName", "Alice Renamed"),
                Part::Text("email", "alice@example.com"),
                Part::Text("bio", "Down the rabbit hole"),
                Part::File {
                    name: "image",
                    filename: "me.png",
                    content_type: "image/png",
                    data: PNG,
                },
            ],
            Some(&session),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["username"], "alice2");
    assert_eq!(response.body["about"], "Down the rabbit hole");
    let image = response.body["image"].as_str().unwrap();
    assert!(image.starts_with("http://localhost:8080/media/profile_images/"));
    assert!(image.ends_with(".png"));

    let (status, bytes) = app.get_bytes(media_path(image)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, PNG);
}

#[tokio::test]
async fn test_edit_account_rejects_invalid_fields() {
    let app = TestApp::new().await;
    let session = app.register("alice").await;

    let response = app
        .multipart(
            "PUT",
            "/v1/accounts",
            &[
                Part::Text("username", "alice"),
                Part::Text("displayName", "Alice Liddell"),
                Part::Text("email", "alice@example.com"),
                Part::File {
                    name: "image",
                    filename: "anim.gif",
                    content_type: "image/gif",
                    data: b"GIF89a",
                },
            ],
            Some(&session),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_type(), "VALIDATION");
    assert_eq!(
        std::fs::read_dir(app.media_root.path()).unwrap().count(),
        0,
        "nothing may be uploaded"
    );

    let long_bio = "x".repeat(161);
    let response = app
        .multipart(
            "PUT",
            "/v1/accounts",
            &[
                Part::Text("username", "alice"),
                Part::Text("displayName", "Alice Liddell"),
                Part::Text("email", "alice@example.com"),
                Part::Text("bio", &long_bio),
            ],
            Some(&session),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_edit_account_conflicting_username() {
    let app = TestApp::new().await;
    app.register("bobby").await;
    let session = app.register("alice").await;

    let response = app
        .multipart(
            "PUT",
            "/v1/accounts",
            &[
                Part::Text("username", "bobby"),
                Part::Text("displayName", "Alice Liddell"),
                Part::Text("email", "alice@example.com"),
            ],
            Some(&session),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_message(), "Username 'bobby' is already taken");
}
