// Submission workflow and the services it talks to

pub mod media_capture;
pub mod object_store;
pub mod submission_store;
pub mod analysis_service;
pub mod submission_workflow;
pub mod achievement_service;
pub mod athlete_stats_service;

pub use media_capture::{CaptureConstraints, CaptureError, FacingMode, MediaCaptureService, MediaStream};
pub use object_store::{ObjectStore, S3ObjectStore};
pub use submission_store::{PgSubmissionStore, SubmissionStore};
pub use analysis_service::{AnalysisProfile, AnalysisProvider, ProfileAnalysisProvider};
pub use submission_workflow::{
    CancelHandle, CaptureMode, Collaborators, NoticeKind, Notification, ProgressTracker,
    SubmissionWorkflow, UploadState, WorkflowEvent, WorkflowState,
};
pub use achievement_service::AchievementService;
pub use athlete_stats_service::AthleteStatsService;
