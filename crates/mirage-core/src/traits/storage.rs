//! Storage provider trait for pluggable object storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for object storage backends that serve uploads over public URLs.
///
/// Implementations exist for the local filesystem and S3-compatible
/// buckets in `mirage-storage`. Keys are `/`-separated relative paths such
/// as `profile_images/<user>/<name>.png`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Base URL that keys are appended to, without a trailing slash.
    fn public_base_url(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store `data` under `key` and return its public URL.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<String>;

    /// Delete the object stored under `key`. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Public URL for a key.
    fn url_for(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.public_base_url().trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }

    /// Recover the key from a URL produced by [`url_for`](Self::url_for).
    ///
    /// Returns `None` for URLs this provider did not issue, such as the
    /// generated default avatars.
    fn key_from_url(&self, url: &str) -> Option<String> {
        let base = self.public_base_url().trim_end_matches('/');
        url.strip_prefix(base)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }
}
