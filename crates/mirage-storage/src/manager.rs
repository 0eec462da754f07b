//! Provider selection from configuration.

use std::sync::Arc;

use tracing::info;

use mirage_core::config::StorageConfig;
use mirage_core::error::AppError;
use mirage_core::result::AppResult;
use mirage_core::traits::storage::StorageProvider;

/// Build the provider named by `storage.provider`.
pub async fn connect(config: &StorageConfig) -> AppResult<Arc<dyn StorageProvider>> {
    let provider: Arc<dyn StorageProvider> = match config.provider.as_str() {
        #[cfg(feature = "local")]
        "local" => {
            info!(root = %config.local.root_path, "Initializing local storage provider");
            let provider = crate::providers::local::LocalStorageProvider::new(
                &config.local.root_path,
                &config.public_base_url,
            )
            .await?;
            Arc::new(provider)
        }
        #[cfg(feature = "s3")]
        "s3" => {
            info!(bucket = %config.s3.bucket, "Initializing S3 storage provider");
            let provider =
                crate::providers::s3::S3StorageProvider::new(&config.s3, &config.public_base_url)
                    .await?;
            Arc::new(provider)
        }
        other => {
            return Err(AppError::internal(format!(
                "Unknown or disabled storage provider: '{other}'"
            )));
        }
    };

    match provider.health_check().await {
        Ok(true) => {}
        Ok(false) => tracing::warn!(provider = provider.provider_type(), "Storage provider is not healthy"),
        Err(e) => tracing::warn!(provider = provider.provider_type(), error = %e, "Storage health check failed"),
    }
    Ok(provider)
}
