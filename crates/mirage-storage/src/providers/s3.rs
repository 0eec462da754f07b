//! S3-compatible object storage provider.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::debug;

use mirage_core::config::S3StorageConfig;
use mirage_core::error::{AppError, ErrorKind};
use mirage_core::result::AppResult;
use mirage_core::traits::storage::StorageProvider;

/// Stores objects in one S3 bucket (AWS, MinIO, and compatible services).
#[derive(Debug, Clone)]
pub struct S3StorageProvider {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3StorageProvider {
    /// Build a client from explicit keys when configured, otherwise from the
    /// ambient AWS credential chain.
    pub async fn new(config: &S3StorageConfig, public_base_url: &str) -> AppResult<Self> {
        if config.bucket.is_empty() {
            return Err(AppError::internal("storage.s3.bucket must be set"));
        }

        let region = Region::new(config.region.clone());
        let mut builder = if config.access_key.is_empty() {
            let shared = aws_config::defaults(BehaviorVersion::latest())
                .region(region)
                .load()
                .await;
            aws_sdk_s3::config::Builder::from(&shared)
        } else {
            aws_sdk_s3::config::Builder::new()
                .behavior_version(BehaviorVersion::latest())
                .region(region)
                .credentials_provider(Credentials::new(
                    config.access_key.clone(),
                    config.secret_key.clone(),
                    None,
                    None,
                    "mirage-config",
                ))
        };
        if !config.endpoint.is_empty() {
            builder = builder.endpoint_url(&config.endpoint).force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl StorageProvider for S3StorageProvider {
    fn provider_type(&self) -> &str {
        "s3"
    }

    fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok())
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<String> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, format!("Failed to upload {key}"), e)
            })?;

        debug!(key, content_type, bytes = size, "Uploaded object");
        Ok(self.url_for(key))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, format!("Failed to delete {key}"), e)
            })?;
        debug!(key, "Deleted object");
        Ok(())
    }
}
