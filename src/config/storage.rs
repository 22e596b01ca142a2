use anyhow::Result;
use aws_sdk_s3::Client as S3Client;
use std::env;

/// Bucket holding all submission videos
pub const DEFAULT_VIDEO_BUCKET: &str = "fitness-videos";

/// Object storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket_name: String,
    /// Endpoint of an S3-compatible service; AWS defaults apply when unset
    pub endpoint_url: Option<String>,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bucket_name: env::var("VIDEO_BUCKET")
                .unwrap_or_else(|_| DEFAULT_VIDEO_BUCKET.to_string()),
            endpoint_url: env::var("S3_ENDPOINT_URL").ok().filter(|v| !v.is_empty()),
        })
    }

    /// Create an S3 client from the ambient AWS configuration
    pub async fn create_client(&self) -> Result<S3Client> {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &self.endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Ok(S3Client::from_conf(builder.build()))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket_name: DEFAULT_VIDEO_BUCKET.to_string(),
            endpoint_url: None,
        }
    }
}
