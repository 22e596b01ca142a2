use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingMode {
    /// Rear camera
    Environment,
    /// Front camera
    User,
}

/// Device request for a capture session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConstraints {
    pub facing_mode: FacingMode,
    pub audio: bool,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            facing_mode: FacingMode::Environment,
            audio: true,
        }
    }
}

/// Handle to a live audio+video stream held by the capture service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaStream {
    pub id: Uuid,
    pub constraints: CaptureConstraints,
}

impl MediaStream {
    pub fn new(constraints: CaptureConstraints) -> Self {
        Self {
            id: Uuid::new_v4(),
            constraints,
        }
    }
}

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Permission denied")]
    PermissionDenied,
    #[error("Capture device unavailable: {0}")]
    DeviceUnavailable(String),
}

/// Camera/microphone access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaCaptureService: Send + Sync {
    async fn acquire(&self, constraints: CaptureConstraints) -> Result<MediaStream, CaptureError>;

    /// Stop all tracks of `stream`; must not block
    fn release(&self, stream: &MediaStream);
}
