use thiserror::Error;

use crate::services::submission_workflow::WorkflowState;

/// Errors surfaced by the submission workflow
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Camera access denied: {0}")]
    CaptureDenied(String),
    #[error("Video upload failed: {0}")]
    Storage(#[source] anyhow::Error),
    #[error("Saving submission failed: {0}")]
    Persistence(#[source] anyhow::Error),
    #[error("Performance analysis failed: {0}")]
    Analysis(#[source] anyhow::Error),
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("No video captured or selected")]
    MissingArtifact,
    #[error("Invalid video: {0}")]
    InvalidArtifact(String),
    #[error("Cannot {action} while {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: WorkflowState,
    },
    #[error("Video upload timed out after {0} seconds")]
    Timeout(u64),
    #[error("Submission cancelled")]
    Cancelled,
}

impl SubmissionError {
    /// Whether the user can retry without re-authenticating
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SubmissionError::CaptureDenied(_)
                | SubmissionError::Storage(_)
                | SubmissionError::Persistence(_)
                | SubmissionError::Analysis(_)
                | SubmissionError::Timeout(_)
        )
    }
}
