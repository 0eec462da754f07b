//! Integration tests for publishing and reacting to posts.

use axum::http::StatusCode;
use serde_json::Value;

use crate::helpers::{Part, TestApp, media_path};

/// Publish a text post and return its JSON.
pub async fn publish(app: &TestApp, session: &str, text: &str) -> Value {
    let response = app
        .multipart("POST", "/v1/posts", &[Part::Text("text", text)], Some(session))
        .await;
    assert_eq!(
        response.status,
        StatusCode::CREATED,
        "Publish failed: {:?}",
        response.body
    );
    response.body
}

#[tokio::test]
async fn test_create_text_post() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let post = publish(&app, &alice, "  hello #rust  ").await;
    assert_eq!(post["text"], "hello #rust");
    assert_eq!(post["author"]["username"], "alice");
    assert_eq!(post["likes"], 0);
    assert_eq!(post["isRetweet"], false);
    assert!(post["file"].is_null());

    let id = post["id"].as_str().unwrap();
    let response = app
        .request("GET", &format!("/v1/posts/{id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], post["id"]);
}

#[tokio::test]
async fn test_create_post_rejects_empty_and_anonymous() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .multipart("POST", "/v1/posts", &[Part::Text("text", "   ")], Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_message(), "A post needs text or an attachment");

    let too_long = "a".repeat(281);
    let response = app
        .multipart("POST", "/v1/posts", &[Part::Text("text", &too_long)], Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .multipart("POST", "/v1/posts", &[Part::Text("text", "hi")], None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_post_with_attachment() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .multipart(
            "POST",
            "/v1/posts",
            &[Part::File {
                name: "image",
                filename: "clip.mp4",
                content_type: "video/mp4",
                data: b"fake-mp4-bytes",
            }],
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert!(response.body["text"].is_null());
    assert_eq!(response.body["file"]["filetype"], "video/mp4");
    assert_eq!(response.body["file"]["filename"], "clip.mp4");

    let url = response.body["file"]["url"].as_str().unwrap();
    assert!(url.starts_with("http://localhost:8080/media/media/"));
    let (status, bytes) = app.get_bytes(media_path(url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"fake-mp4-bytes");

    let response = app
        .multipart(
            "POST",
            "/v1/posts",
            &[Part::File {
                name: "file",
                filename: "notes.txt",
                content_type: "text/plain",
                data: b"plain",
            }],
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_post() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bobby = app.register("bobby").await;

    let post = publish(&app, &alice, "short lived").await;
    let path = format!("/v1/posts/{}", post["id"].as_str().unwrap());

    let response = app.request("DELETE", &path, None, Some(&bobby)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_type(), "AUTHORIZATION");

    let response = app.request("DELETE", &path, None, Some(&alice)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["text"], "short lived");

    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_like_and_retweet_toggle() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bobby = app.register("bobby").await;

    let post = publish(&app, &alice, "react to me").await;
    let id = post["id"].as_str().unwrap();

    let response = app
        .request("POST", &format!("/v1/posts/{id}/like"), None, Some(&bobby))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["likes"], 1);
    assert_eq!(response.body["liked"], true);

    let response = app
        .request("POST", &format!("/v1/posts/{id}/like"), None, Some(&bobby))
        .await;
    assert_eq!(response.body["likes"], 0);
    assert_eq!(response.body["liked"], false);

    let response = app
        .request("POST", &format!("/v1/posts/{id}/retweet"), None, Some(&bobby))
        .await;
    assert_eq!(response.body["retweets"], 1);
    assert_eq!(response.body["retweeted"], true);

    let response = app
        .request("GET", "/v1/profiles/bobby/posts", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["posts"][0]["id"], post["id"]);
    assert_eq!(response.body["posts"][0]["isRetweet"], true);
}

#[tokio::test]
async fn test_liked_posts_listing() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bobby = app.register("bobby").await;

    let post = publish(&app, &alice, "likeable").await;
    let id = post["id"].as_str().unwrap();
    app.request("POST", &format!("/v1/posts/{id}/like"), None, Some(&bobby))
        .await;

    let response = app
        .request("GET", "/v1/profiles/bobby/likes", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["posts"].as_array().unwrap().len(), 1);
    assert_eq!(response.body["hasMore"], false);

    let response = app
        .request("GET", "/v1/profiles/nobody/likes", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_and_unknown_post_ids() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app.request("GET", "/v1/posts/not-a-uuid", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let unknown = "00000000-0000-4000-8000-000000000000";
    let response = app
        .request("POST", &format!("/v1/posts/{unknown}/like"), None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
