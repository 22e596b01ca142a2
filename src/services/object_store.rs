use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use bytes::Bytes;
use tracing::info;

/// Binary upload of submission videos
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key`; existing objects are overwritten
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<()>;
}

/// Service for storing videos in S3-compatible object storage
pub struct S3ObjectStore {
    client: S3Client,
    bucket_name: String,
}

impl S3ObjectStore {
    pub fn new(client: S3Client, bucket_name: String) -> Self {
        Self {
            client,
            bucket_name,
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        info!(
            "Uploading video to storage: bucket={}, key={}, size={}",
            self.bucket_name,
            key,
            data.len()
        );

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .context("Failed to upload video to S3")?;

        info!("Successfully uploaded video: {}", key);
        Ok(())
    }
}
