//! Session cookie extractors and cookie construction.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use mirage_core::error::AppError;
use mirage_core::result::AppResult;
use mirage_core::types::id::UserId;
use mirage_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// The signed-in account. Rejects with Authentication when the session
/// cookie is missing, forged, or expired.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts, state)
            .ok_or_else(|| AppError::authentication("Not signed in"))?;
        let user_id = state.signer.verify(&token)?;
        Ok(AuthUser(RequestContext::new(user_id)))
    }
}

/// The viewer on routes that also serve anonymous visitors. An invalid
/// session is treated as no session.
#[derive(Debug, Clone, Copy)]
pub struct MaybeUser(pub Option<UserId>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let viewer = session_token(parts, state).and_then(|token| state.signer.verify(&token).ok());
        Ok(MaybeUser(viewer))
    }
}

fn session_token(parts: &Parts, state: &AppState) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(&state.config.auth.cookie_name)
        .map(|cookie| cookie.value().to_string())
}

/// A fresh session cookie for `user`.
pub fn session_cookie(state: &AppState, user: UserId) -> AppResult<Cookie<'static>> {
    let issued = state.signer.issue(user)?;
    let max_age = time::Duration::seconds(state.signer.ttl().num_seconds());
    Ok(Cookie::build((state.config.auth.cookie_name.clone(), issued.token))
        .path("/")
        .http_only(true)
        .secure(state.config.auth.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build())
}

/// A cookie that, once removed from the jar, clears the session.
pub fn expired_session_cookie(state: &AppState) -> Cookie<'static> {
    Cookie::build((state.config.auth.cookie_name.clone(), ""))
        .path("/")
        .build()
}
