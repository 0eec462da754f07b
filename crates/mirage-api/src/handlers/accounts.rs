//! Account handlers: register, login, logout, current account, edit.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use mirage_service::user::EditAccountInput;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::AccountResponse;
use crate::error::ApiResult;
use crate::extractors::auth::{expired_session_cookie, session_cookie};
use crate::extractors::{AuthUser, FormData, JsonBody};
use crate::state::AppState;

/// POST /v1/accounts/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<AccountResponse>)> {
    let user = state.user_service.register(req.into()).await?;
    let jar = jar.add(session_cookie(&state, user.id)?);
    Ok((StatusCode::CREATED, jar, Json(user.into())))
}

/// POST /v1/accounts/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AccountResponse>)> {
    let user = state.user_service.login(req.into()).await?;
    let jar = jar.add(session_cookie(&state, user.id)?);
    Ok((jar, Json(user.into())))
}

/// POST /v1/accounts/logout
pub async fn logout(
    State(state): State<AppState>,
    _auth: AuthUser,
    jar: CookieJar,
) -> (CookieJar, Json<bool>) {
    (jar.remove(expired_session_cookie(&state)), Json(true))
}

/// GET /v1/accounts
pub async fn current(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<AccountResponse>> {
    let user = state.user_service.current(&auth).await?;
    Ok(Json(user.into()))
}

/// PUT /v1/accounts
pub async fn edit(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<Json<AccountResponse>> {
    let mut form = FormData::read(multipart, &["image"]).await?;
    let input = EditAccountInput {
        username: form.text_or_empty("username"),
        display_name: form.text_or_empty("displayName"),
        email: form.text_or_empty("email"),
        bio: form.text("bio"),
        avatar: form.take_file(),
    };

    let user = state.user_service.edit(&auth, input).await?;
    Ok(Json(user.into()))
}
