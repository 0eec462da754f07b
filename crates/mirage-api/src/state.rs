//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use mirage_auth::password::PasswordHasher;
use mirage_auth::session::SessionSigner;
use mirage_core::config::AppConfig;
use mirage_core::traits::storage::StorageProvider;
use mirage_database::Repositories;
use mirage_service::{PostService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Repository set (PostgreSQL or in-memory)
    pub repositories: Repositories,
    /// Object store for avatars and post media
    pub storage: Arc<dyn StorageProvider>,
    /// Session token signer
    pub signer: Arc<SessionSigner>,
    /// Accounts, profiles, follows
    pub user_service: Arc<UserService>,
    /// Posts, reactions, listings
    pub post_service: Arc<PostService>,
}

impl AppState {
    /// Wire the services over the given store and repositories.
    pub fn new(
        config: AppConfig,
        repositories: Repositories,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        let hasher = Arc::new(PasswordHasher::new());
        let signer = Arc::new(SessionSigner::new(&config.auth));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&repositories.users),
            Arc::clone(&storage),
            hasher,
        ));
        let post_service = Arc::new(PostService::new(
            Arc::clone(&repositories.users),
            Arc::clone(&repositories.posts),
            Arc::clone(&storage),
            config.feed.page_size,
        ));

        Self {
            config: Arc::new(config),
            repositories,
            storage,
            signer,
            user_service,
            post_service,
        }
    }
}
