use bytes::{Bytes, BytesMut};
use chrono::{DateTime, Utc};
use mime::Mime;
use std::fmt;
use uuid::Uuid;

use crate::models::FitnessTestType;

/// Container type of clips produced by live recording
pub const RECORDING_CONTENT_TYPE: &str = "video/webm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    Recording,
    SelectedFile { file_name: String },
}

/// The finalized video blob of a submission
#[derive(Debug, Clone)]
pub struct MediaArtifact {
    pub data: Bytes,
    pub content_type: Mime,
    pub source: ArtifactSource,
    pub created_at: DateTime<Utc>,
}

impl MediaArtifact {
    /// Concatenate recorded chunks into a single webm artifact
    pub fn from_chunks(chunks: &[Bytes]) -> Self {
        let total = chunks.iter().map(|c| c.len()).sum();
        let mut buf = BytesMut::with_capacity(total);
        for chunk in chunks {
            buf.extend_from_slice(chunk);
        }

        Self {
            data: buf.freeze(),
            content_type: RECORDING_CONTENT_TYPE
                .parse()
                .unwrap_or(mime::APPLICATION_OCTET_STREAM),
            source: ArtifactSource::Recording,
            created_at: Utc::now(),
        }
    }

    /// Wrap a file picked by the user
    pub fn from_file(file_name: impl Into<String>, content_type: Mime, data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            content_type,
            source: ArtifactSource::SelectedFile {
                file_name: file_name.into(),
            },
            created_at: Utc::now(),
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check the artifact is a non-empty video within the size limit
    pub fn validate(&self, max_size_bytes: usize) -> Result<(), String> {
        if self.data.is_empty() {
            return Err("Video is empty".to_string());
        }
        if self.content_type.type_() != mime::VIDEO {
            return Err(format!("Unsupported content type: {}", self.content_type));
        }
        if self.data.len() > max_size_bytes {
            return Err(format!(
                "Video too large ({} bytes, maximum {} bytes)",
                self.data.len(),
                max_size_bytes
            ));
        }
        Ok(())
    }

    /// File extension for the storage key
    pub fn extension(&self) -> &'static str {
        extension_for(&self.content_type)
    }
}

/// Extract file extension from content type
pub fn extension_for(content_type: &Mime) -> &'static str {
    match content_type.essence_str() {
        "video/webm" => "webm",
        "video/mp4" => "mp4",
        "video/quicktime" => "mov",
        "video/x-msvideo" => "avi",
        "video/x-matroska" => "mkv",
        _ => "mp4",
    }
}

/// Object key for an uploaded video: `{athlete_id}/{test_type}_{timestamp_ms}.{ext}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(athlete_id: Uuid, test_type: FitnessTestType, timestamp_ms: i64, extension: &str) -> Self {
        Self(format!(
            "{}/{}_{}.{}",
            athlete_id,
            test_type.as_str(),
            timestamp_ms,
            extension
        ))
    }

    pub fn for_artifact(
        athlete_id: Uuid,
        test_type: FitnessTestType,
        at: DateTime<Utc>,
        artifact: &MediaArtifact,
    ) -> Self {
        Self::new(athlete_id, test_type, at.timestamp_millis(), artifact.extension())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
