//! Route definitions for the Mirage HTTP API.
//!
//! JSON endpoints are mounted under `/v1`. When objects are kept on the
//! local filesystem they are also served from the configured mount path.

use axum::Router;
use axum::routing::{get, post};
use tower_http::services::ServeDir;

use mirage_core::config::StorageConfig;

use crate::handlers;
use crate::state::AppState;

/// All routes, without middleware or state.
pub fn build_router(storage: &StorageConfig) -> Router<AppState> {
    let api_routes = Router::new()
        .merge(account_routes())
        .merge(profile_routes())
        .merge(post_routes())
        .route("/health", get(handlers::health::health));

    let router = Router::new().nest("/v1", api_routes);

    if storage.provider == "local" {
        router.nest_service(
            &storage.local.mount_path,
            ServeDir::new(&storage.local.root_path),
        )
    } else {
        router
    }
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts/register", post(handlers::accounts::register))
        .route("/accounts/login", post(handlers::accounts::login))
        .route("/accounts/logout", post(handlers::accounts::logout))
        .route(
            "/accounts",
            get(handlers::accounts::current).put(handlers::accounts::edit),
        )
}

fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profiles/search", get(handlers::profiles::search))
        .route("/profiles/{username}", get(handlers::profiles::get_profile))
        .route("/profiles/{username}/follow", post(handlers::profiles::follow))
        .route("/profiles/{username}/posts", get(handlers::profiles::posts))
        .route("/profiles/{username}/likes", get(handlers::profiles::likes))
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(handlers::posts::create))
        .route("/posts/feed", get(handlers::posts::feed))
        .route("/posts/hashtag/{hashtag}", get(handlers::posts::hashtag))
        .route(
            "/posts/{id}",
            get(handlers::posts::get_post).delete(handlers::posts::delete_post),
        )
        .route("/posts/{id}/like", post(handlers::posts::like))
        .route("/posts/{id}/retweet", post(handlers::posts::retweet))
}
