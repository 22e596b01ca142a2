use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub jwt_secret: String,
    pub upload_timeout_seconds: u64,
    pub max_video_size_mb: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());
        let jwt_secret = lookup("JWT_SECRET")
            .unwrap_or_else(|| "your-secret-key-change-in-production".to_string());
        let upload_timeout_seconds = lookup("UPLOAD_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "120".to_string())
            .parse()
            .context("UPLOAD_TIMEOUT_SECONDS must be a whole number of seconds")?;
        let max_video_size_mb = lookup("MAX_VIDEO_SIZE_MB")
            .unwrap_or_else(|| "200".to_string())
            .parse()
            .context("MAX_VIDEO_SIZE_MB must be a whole number")?;

        Ok(AppConfig {
            environment,
            jwt_secret,
            upload_timeout_seconds,
            max_video_size_mb,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn workflow_config(&self) -> WorkflowConfig {
        WorkflowConfig {
            upload_timeout: match self.upload_timeout_seconds {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            max_artifact_bytes: (self.max_video_size_mb as usize).saturating_mul(1024 * 1024),
        }
    }
}

/// Limits injected into each submission workflow
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// `None` disables the upload timeout
    pub upload_timeout: Option<Duration>,
    pub max_artifact_bytes: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            upload_timeout: Some(Duration::from_secs(120)),
            max_artifact_bytes: 200 * 1024 * 1024,
        }
    }
}
