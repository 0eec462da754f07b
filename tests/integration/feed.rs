//! Integration tests for the home feed and hashtag listings.

use std::collections::HashSet;

use axum::http::StatusCode;
use serde_json::Value;

use crate::helpers::TestApp;
use crate::posts::publish;

async fn follow(app: &TestApp, session: &str, username: &str) {
    let response = app
        .request(
            "POST",
            &format!("/v1/profiles/{username}/follow"),
            None,
            Some(session),
        )
        .await;
    assert_eq!(response.body["following"], true);
}

fn ids(body: &Value) -> Vec<String> {
    body["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_feed_includes_followed_posts_and_retweets() {
    let app = TestApp::new().await;
    let viewer = app.register("viewer").await;
    let alice = app.register("alice").await;
    let bobby = app.register("bobby").await;
    let carol = app.register("carol").await;

    follow(&app, &viewer, "alice").await;
    follow(&app, &viewer, "bobby").await;

    let quoted = publish(&app, &carol, "from a stranger").await;
    let quoted_id = quoted["id"].as_str().unwrap().to_string();
    app.request(
        "POST",
        &format!("/v1/posts/{quoted_id}/retweet"),
        None,
        Some(&bobby),
    )
    .await;
    let own = publish(&app, &alice, "from a friend").await;
    let own_id = own["id"].as_str().unwrap().to_string();
    publish(&app, &carol, "never seen").await;

    let response = app.request("GET", "/v1/posts/feed", None, Some(&viewer)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["hasMore"], false);
    assert!(response.body["nextCursor"].is_null());

    let posts = response.body["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    for post in posts {
        let id = post["id"].as_str().unwrap();
        if id == own_id {
            assert_eq!(post["isRetweet"], false);
        } else {
            assert_eq!(id, quoted_id);
            assert_eq!(post["isRetweet"], true);
        }
    }
}

#[tokio::test]
async fn test_feed_requires_session() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/v1/posts/feed", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_feed_pages_with_cursor() {
    let app = TestApp::new().await;
    let viewer = app.register("viewer").await;
    let alice = app.register("alice").await;
    follow(&app, &viewer, "alice").await;

    for n in 0..25 {
        publish(&app, &alice, &format!("post number {n}")).await;
    }

    let first = app.request("GET", "/v1/posts/feed", None, Some(&viewer)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["hasMore"], true);
    let first_ids = ids(&first.body);
    assert_eq!(first_ids.len(), 20);

    let cursor = first.body["nextCursor"].as_str().unwrap();
    let second = app
        .request(
            "GET",
            &format!("/v1/posts/feed?cursor={cursor}"),
            None,
            Some(&viewer),
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["hasMore"], false);
    let second_ids = ids(&second.body);
    assert_eq!(second_ids.len(), 5);

    let all: HashSet<String> = first_ids.into_iter().chain(second_ids).collect();
    assert_eq!(all.len(), 25);

    let response = app
        .request("GET", "/v1/posts/feed?cursor=garbage", None, Some(&viewer))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_hashtag_listing() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bobby = app.register("bobby").await;

    publish(&app, &alice, "learning #Rust today").await;
    publish(&app, &bobby, "more #rust and #axum").await;
    publish(&app, &bobby, "nothing tagged").await;

    let response = app
        .request("GET", "/v1/posts/hashtag/rust", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(ids(&response.body).len(), 2);

    let response = app
        .request("GET", "/v1/posts/hashtag/%23axum", None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(ids(&response.body).len(), 1);

    let response = app
        .request("GET", "/v1/posts/hashtag/elixir", None, None)
        .await;
    assert_eq!(response.body["posts"], serde_json::json!([]));
}

#[tokio::test]
async fn test_bad_query_string_uses_error_envelope() {
    let app = TestApp::new().await;
    app.register("alice").await;

    let response = app
        .request("GET", "/v1/profiles/alice/posts?cursor=a&cursor=b", None, None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_type(), "VALIDATION");
}
