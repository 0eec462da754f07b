//! Uploaded media and its lifecycle in the object store.

use bytes::Bytes;
use tracing::{debug, warn};
use uuid::Uuid;

use mirage_core::error::AppError;
use mirage_core::result::AppResult;
use mirage_core::traits::storage::StorageProvider;
use mirage_storage::media;

/// A file received from a client.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Name supplied by the client.
    pub filename: String,
    /// Declared MIME type.
    pub content_type: String,
    pub data: Bytes,
}

impl Upload {
    /// Whether the declared type is one of `allowed`.
    pub fn is_one_of(&self, allowed: &[&str]) -> bool {
        media::is_allowed(&self.content_type, allowed)
    }
}

/// Store `upload` under `{prefix}/{random}.{ext}` and return its URL.
pub async fn store(storage: &dyn StorageProvider, prefix: &str, upload: &Upload) -> AppResult<String> {
    let ext = media::extension_for(&upload.content_type)
        .ok_or_else(|| AppError::validation("Unsupported media type"))?;
    let key = format!("{prefix}/{}.{ext}", Uuid::new_v4().simple());
    debug!(key = %key, size = upload.data.len(), "Storing upload");
    storage
        .put(&key, upload.data.clone(), &media::essence(&upload.content_type))
        .await
}

/// Remove the object behind `url`, if it lives in `storage`. Failures are
/// logged and swallowed.
pub async fn discard(storage: &dyn StorageProvider, url: &str) {
    let Some(key) = storage.key_from_url(url) else {
        return;
    };
    match storage.delete(&key).await {
        Ok(()) => debug!(key = %key, "Removed stored object"),
        Err(e) => warn!(key = %key, error = %e, "Failed to remove stored object"),
    }
}
