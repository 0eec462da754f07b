//! Profile handlers: lookup, search, follow, and per-profile listings.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::request::{CursorQuery, SearchQuery};
use crate::dto::response::{FeedResponse, ProfileResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, MaybeUser, QueryParams};
use crate::state::AppState;

/// GET /v1/profiles/search?search=
pub async fn search(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    QueryParams(query): QueryParams<SearchQuery>,
) -> ApiResult<Json<Vec<ProfileResponse>>> {
    let profiles = state.user_service.search(&query.search, viewer).await?;
    Ok(Json(profiles.into_iter().map(ProfileResponse::from).collect()))
}

/// GET /v1/profiles/{username}
pub async fn get_profile(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(username): Path<String>,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = state.user_service.profile(&username, viewer).await?;
    Ok(Json(profile.into()))
}

/// POST /v1/profiles/{username}/follow
pub async fn follow(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = state.user_service.follow(&auth, &username).await?;
    Ok(Json(profile.into()))
}

/// GET /v1/profiles/{username}/posts
pub async fn posts(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(username): Path<String>,
    QueryParams(query): QueryParams<CursorQuery>,
) -> ApiResult<Json<FeedResponse>> {
    let page = state
        .post_service
        .profile_posts(&username, viewer, query.cursor.as_deref())
        .await?;
    Ok(Json(page.into()))
}

/// GET /v1/profiles/{username}/likes
pub async fn likes(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(username): Path<String>,
    QueryParams(query): QueryParams<CursorQuery>,
) -> ApiResult<Json<FeedResponse>> {
    let page = state
        .post_service
        .liked_posts(&username, viewer, query.cursor.as_deref())
        .await?;
    Ok(Json(page.into()))
}
