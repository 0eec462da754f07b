//! Post handlers: create, view, delete, reactions, feed, hashtag search.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;

use mirage_service::post::CreatePostInput;

use crate::dto::request::CursorQuery;
use crate::dto::response::{FeedResponse, PostResponse};
use crate::error::ApiResult;
use crate::extractors::path::parse_post_id;
use crate::extractors::{AuthUser, FormData, MaybeUser, QueryParams};
use crate::state::AppState;

/// POST /v1/posts
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<PostResponse>)> {
    let mut form = FormData::read(multipart, &["image", "file"]).await?;
    let input = CreatePostInput {
        text: form.text("text"),
        media: form.take_file(),
    };

    let post = state.post_service.create(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// GET /v1/posts/feed
pub async fn feed(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<CursorQuery>,
) -> ApiResult<Json<FeedResponse>> {
    let page = state
        .post_service
        .feed(&auth, query.cursor.as_deref())
        .await?;
    Ok(Json(page.into()))
}

/// GET /v1/posts/hashtag/{hashtag}
pub async fn hashtag(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(hashtag): Path<String>,
    QueryParams(query): QueryParams<CursorQuery>,
) -> ApiResult<Json<FeedResponse>> {
    let page = state
        .post_service
        .hashtag(&hashtag, viewer, query.cursor.as_deref())
        .await?;
    Ok(Json(page.into()))
}

/// GET /v1/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<String>,
) -> ApiResult<Json<PostResponse>> {
    let post = state.post_service.view(parse_post_id(&id)?, viewer).await?;
    Ok(Json(post.into()))
}

/// DELETE /v1/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<PostResponse>> {
    let post = state.post_service.delete(&auth, parse_post_id(&id)?).await?;
    Ok(Json(post.into()))
}

/// POST /v1/posts/{id}/like
pub async fn like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<PostResponse>> {
    let post = state.post_service.like(&auth, parse_post_id(&id)?).await?;
    Ok(Json(post.into()))
}

/// POST /v1/posts/{id}/retweet
pub async fn retweet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<PostResponse>> {
    let post = state.post_service.retweet(&auth, parse_post_id(&id)?).await?;
    Ok(Json(post.into()))
}
