use bytes::Bytes;
use chrono::Utc;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::auth::AuthProvider;
use crate::config::WorkflowConfig;
use crate::errors::SubmissionError;
use crate::models::{
    AnalysisResult, FitnessTestType, MediaArtifact, StorageKey, StoredSubmission,
    SubmissionRecord,
};
use crate::services::analysis_service::AnalysisProvider;
use crate::services::media_capture::{CaptureConstraints, MediaCaptureService, MediaStream};
use crate::services::object_store::ObjectStore;
use crate::services::submission_store::SubmissionStore;

/// Lifecycle of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    ModeSelect,
    Recording,
    /// A recorded clip or selected file is waiting for confirmation
    ArtifactReady,
    Uploading,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    Unset,
    Recording,
    FileSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Uploading { progress: u8 },
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// User-visible toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// Estimated upload progress, 0-100
    Progress(u8),
    Notice(Notification),
    /// Fired exactly once per persisted submission
    Completed(StoredSubmission),
}

/// External services a workflow talks to
#[derive(Clone)]
pub struct Collaborators {
    pub capture: Arc<dyn MediaCaptureService>,
    pub objects: Arc<dyn ObjectStore>,
    pub submissions: Arc<dyn SubmissionStore>,
    pub analysis: Arc<dyn AnalysisProvider>,
    pub auth: Arc<dyn AuthProvider>,
}

/// Monotonic progress estimate; only `complete` reaches 100
#[derive(Debug, Default)]
pub struct ProgressTracker {
    current: u8,
}

impl ProgressTracker {
    pub fn current(&self) -> u8 {
        self.current
    }

    /// Move forward to `to` (capped at 99); returns the new value if it changed
    pub fn advance(&mut self, to: u8) -> Option<u8> {
        let to = to.min(99);
        if to > self.current {
            self.current = to;
            Some(to)
        } else {
            None
        }
    }

    pub fn complete(&mut self) -> u8 {
        self.current = 100;
        self.current
    }
}

/// Closes the session it was taken from, from any task
#[derive(Clone)]
pub struct CancelHandle {
    token: CancellationToken,
    capture: Arc<dyn MediaCaptureService>,
    stream: Arc<Mutex<Option<MediaStream>>>,
}

impl CancelHandle {
    /// Releases a held capture device immediately; an in-flight upload
    /// runs to the end without notifying the user
    pub fn cancel(&self) {
        self.token.cancel();
        release_stream(self.capture.as_ref(), &self.stream);
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

fn release_stream(capture: &dyn MediaCaptureService, slot: &Mutex<Option<MediaStream>>) {
    let stream = match slot.lock() {
        Ok(mut guard) => guard.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    };
    if let Some(stream) = stream {
        info!("Releasing capture device {}", stream.id);
        capture.release(&stream);
    }
}

/// Await `fut`, giving up after `limit`; the error carries the limit in seconds
async fn with_timeout<F, T>(limit: Option<Duration>, fut: F) -> Result<T, u64>
where
    F: Future<Output = T>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| limit.as_secs()),
        None => Ok(fut.await),
    }
}

struct SubmissionSession {
    test_type: FitnessTestType,
    mode: CaptureMode,
    artifact: Option<MediaArtifact>,
    upload_state: UploadState,
    analysis: Option<AnalysisResult>,
    chunks: Vec<Bytes>,
}

impl SubmissionSession {
    fn new(test_type: FitnessTestType) -> Self {
        Self {
            test_type,
            mode: CaptureMode::Unset,
            artifact: None,
            upload_state: UploadState::Idle,
            analysis: None,
            chunks: Vec::new(),
        }
    }
}

/// Drives one fitness-test video submission from capture to persisted record
pub struct SubmissionWorkflow {
    deps: Collaborators,
    config: WorkflowConfig,
    events: mpsc::UnboundedSender<WorkflowEvent>,
    state: WorkflowState,
    session: Option<SubmissionSession>,
    stream: Arc<Mutex<Option<MediaStream>>>,
    cancel: CancellationToken,
}

impl SubmissionWorkflow {
    pub fn new(
        deps: Collaborators,
        config: WorkflowConfig,
    ) -> (Self, mpsc::UnboundedReceiver<WorkflowEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let workflow = Self {
            deps,
            config,
            events,
            state: WorkflowState::Idle,
            session: None,
            stream: Arc::new(Mutex::new(None)),
            cancel: CancellationToken::new(),
        };
        (workflow, receiver)
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn test_type(&self) -> Option<FitnessTestType> {
        self.session.as_ref().map(|s| s.test_type)
    }

    pub fn capture_mode(&self) -> CaptureMode {
        self.session
            .as_ref()
            .map(|s| s.mode)
            .unwrap_or(CaptureMode::Unset)
    }

    pub fn upload_state(&self) -> UploadState {
        self.session
            .as_ref()
            .map(|s| s.upload_state)
            .unwrap_or(UploadState::Idle)
    }

    pub fn artifact(&self) -> Option<&MediaArtifact> {
        self.session.as_ref().and_then(|s| s.artifact.as_ref())
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.session.as_ref().and_then(|s| s.analysis.as_ref())
    }

    pub fn is_capture_active(&self) -> bool {
        self.stream.lock().map(|g| g.is_some()).unwrap_or(false)
    }

    /// Handle bound to the current session
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            token: self.cancel.clone(),
            capture: Arc::clone(&self.deps.capture),
            stream: Arc::clone(&self.stream),
        }
    }

    /// Idle → ModeSelect for `test_type`
    pub fn open(&mut self, test_type: FitnessTestType) -> Result<(), SubmissionError> {
        self.observe_cancellation();
        match self.state {
            WorkflowState::Idle => {}
            WorkflowState::Completed => self.reset(),
            state => {
                return Err(SubmissionError::InvalidTransition {
                    action: "open a submission",
                    state,
                })
            }
        }

        info!("Opening {} submission", test_type);
        self.session = Some(SubmissionSession::new(test_type));
        self.state = WorkflowState::ModeSelect;
        Ok(())
    }

    /// Acquire the rear camera and microphone and start a capture session.
    /// Any previously captured artifact is discarded.
    pub async fn start_recording(&mut self) -> Result<(), SubmissionError> {
        self.observe_cancellation();
        self.expect_state("start recording", &[WorkflowState::ModeSelect, WorkflowState::ArtifactReady])?;

        if let Some(session) = self.session.as_mut() {
            if session.artifact.take().is_some() {
                debug!("Discarding previous artifact before recording");
            }
            session.chunks.clear();
            session.mode = CaptureMode::Recording;
        }

        let token = self.cancel.clone();
        let acquired = self
            .deps
            .capture
            .acquire(CaptureConstraints::default())
            .await;

        if token.is_cancelled() {
            if let Ok(stream) = acquired {
                self.deps.capture.release(&stream);
            }
            debug!("Session closed while acquiring camera");
            self.reset();
            return Err(SubmissionError::Cancelled);
        }

        match acquired {
            Ok(stream) => {
                info!("Recording started on capture device {}", stream.id);
                self.set_stream(stream);
                self.state = WorkflowState::Recording;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to access camera: {}", e);
                if let Some(session) = self.session.as_mut() {
                    session.mode = CaptureMode::Unset;
                }
                self.state = WorkflowState::ModeSelect;
                let err = SubmissionError::CaptureDenied(e.to_string());
                self.notify(Notification::error("Failed to access camera"));
                Err(err)
            }
        }
    }

    /// Buffer a chunk from the live recorder; empty or late chunks are dropped
    pub fn push_chunk(&mut self, chunk: Bytes) {
        if chunk.is_empty() {
            return;
        }
        match (self.state, self.session.as_mut()) {
            (WorkflowState::Recording, Some(session)) => session.chunks.push(chunk),
            _ => debug!("Dropping {} byte chunk outside recording", chunk.len()),
        }
    }

    /// Finish recording: package buffered chunks and release the device
    pub fn stop_recording(&mut self) -> Result<(), SubmissionError> {
        self.observe_cancellation();
        match self.state {
            WorkflowState::Recording => {}
            WorkflowState::Idle => {
                debug!("Ignoring stop after the session was closed");
                return Ok(());
            }
            state => {
                return Err(SubmissionError::InvalidTransition {
                    action: "stop recording",
                    state,
                })
            }
        }

        release_stream(self.deps.capture.as_ref(), &self.stream);

        let max_bytes = self.config.max_artifact_bytes;
        let Some(session) = self.session.as_mut() else {
            self.reset();
            return Ok(());
        };

        let chunks = std::mem::take(&mut session.chunks);
        let artifact = MediaArtifact::from_chunks(&chunks);
        if let Err(reason) = artifact.validate(max_bytes) {
            warn!("Recorded clip rejected: {}", reason);
            session.mode = CaptureMode::Unset;
            self.state = WorkflowState::ModeSelect;
            self.notify(Notification::error(reason.clone()));
            return Err(SubmissionError::InvalidArtifact(reason));
        }

        info!("Recording finished: {} bytes", artifact.size_bytes());
        session.artifact = Some(artifact);
        self.state = WorkflowState::ArtifactReady;
        Ok(())
    }

    /// Use a file picked by the user instead of live capture
    pub fn select_file(&mut self, artifact: MediaArtifact) -> Result<(), SubmissionError> {
        self.observe_cancellation();
        self.expect_state("select a file", &[WorkflowState::ModeSelect, WorkflowState::ArtifactReady])?;

        if let Err(reason) = artifact.validate(self.config.max_artifact_bytes) {
            warn!("Selected file rejected: {}", reason);
            self.notify(Notification::error(reason.clone()));
            return Err(SubmissionError::InvalidArtifact(reason));
        }

        if let Some(session) = self.session.as_mut() {
            info!(
                "Selected {} file of {} bytes",
                artifact.content_type,
                artifact.size_bytes()
            );
            session.artifact = Some(artifact);
            session.mode = CaptureMode::FileSelected;
        }
        self.state = WorkflowState::ArtifactReady;
        Ok(())
    }

    /// Upload the artifact, analyze it and persist the submission record
    pub async fn confirm_upload(&mut self) -> Result<StoredSubmission, SubmissionError> {
        self.observe_cancellation();
        self.expect_state("upload", &[WorkflowState::ArtifactReady, WorkflowState::ModeSelect])?;

        let Some(athlete_id) = self.deps.auth.current_athlete_id() else {
            warn!("Upload attempted without an authenticated athlete");
            self.notify(Notification::error("Please sign in to upload videos"));
            return Err(SubmissionError::NotAuthenticated);
        };

        let (test_type, artifact) = match self.session.as_ref() {
            Some(SubmissionSession {
                test_type,
                artifact: Some(artifact),
                ..
            }) => (*test_type, artifact.clone()),
            _ => return Err(SubmissionError::MissingArtifact),
        };

        let token = self.cancel.clone();
        let mut progress = ProgressTracker::default();
        self.state = WorkflowState::Uploading;
        self.set_upload_state(UploadState::Uploading { progress: 0 });
        self.emit(WorkflowEvent::Progress(0));

        let key = StorageKey::for_artifact(athlete_id, test_type, Utc::now(), &artifact);
        self.report_progress(&token, &mut progress, 10);

        // A close from a handle only silences the remaining steps; they still run
        let put = self.deps.objects.put(
            key.as_str(),
            artifact.data.clone(),
            artifact.content_type.essence_str(),
        );
        match with_timeout(self.config.upload_timeout, put).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(self.fail(&token, SubmissionError::Storage(e))),
            Err(secs) => return Err(self.fail(&token, SubmissionError::Timeout(secs))),
        }
        self.report_progress(&token, &mut progress, 60);

        let analysis = match self.deps.analysis.analyze(test_type, &artifact).await {
            Ok(analysis) => analysis,
            Err(e) => return Err(self.fail(&token, SubmissionError::Analysis(e))),
        };
        self.report_progress(&token, &mut progress, 80);

        let record =
            SubmissionRecord::processing(athlete_id, test_type, key.to_string(), analysis.clone());
        let stored = match self.deps.submissions.insert(&record).await {
            Ok(stored) => stored,
            Err(e) => {
                error!("Submission record write failed, video left orphaned at {}: {:#}", key, e);
                return Err(self.fail(&token, SubmissionError::Persistence(e)));
            }
        };

        info!("Submission {} completed for athlete {}", stored.id, athlete_id);
        if token.is_cancelled() {
            debug!("Submission closed during upload, finishing without notice");
            self.emit(WorkflowEvent::Completed(stored.clone()));
            self.reset();
            return Ok(stored);
        }

        let done = progress.complete();
        if let Some(session) = self.session.as_mut() {
            session.upload_state = UploadState::Succeeded;
            session.analysis = Some(analysis);
            session.artifact = None;
        }
        self.state = WorkflowState::Completed;
        self.emit(WorkflowEvent::Progress(done));
        self.emit(WorkflowEvent::Completed(stored.clone()));
        self.notify(Notification::success("Video uploaded successfully"));
        Ok(stored)
    }

    /// Failed → ModeSelect, keeping the artifact for another attempt
    pub fn retry(&mut self) -> Result<(), SubmissionError> {
        self.observe_cancellation();
        self.expect_state("retry", &[WorkflowState::Failed])?;
        self.set_upload_state(UploadState::Idle);
        self.state = WorkflowState::ModeSelect;
        Ok(())
    }

    /// Failed → Idle
    pub fn abandon(&mut self) -> Result<(), SubmissionError> {
        self.observe_cancellation();
        self.expect_state("abandon", &[WorkflowState::Failed])?;
        self.reset();
        Ok(())
    }

    /// Close the submission from any state
    pub fn cancel(&mut self) {
        if self.state != WorkflowState::Idle {
            info!("Closing submission in state {:?}", self.state);
        }
        self.cancel.cancel();
        self.reset();
    }

    fn expect_state(
        &self,
        action: &'static str,
        allowed: &[WorkflowState],
    ) -> Result<(), SubmissionError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SubmissionError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }

    /// Apply a cancel requested through a handle while no call was in flight
    fn observe_cancellation(&mut self) {
        if self.cancel.is_cancelled() {
            debug!("Applying pending cancellation");
            self.reset();
        }
    }

    /// Drop the session; handles taken before this point stay bound to it
    fn reset(&mut self) {
        release_stream(self.deps.capture.as_ref(), &self.stream);
        self.session = None;
        self.state = WorkflowState::Idle;
        self.stream = Arc::new(Mutex::new(None));
        self.cancel = CancellationToken::new();
    }

    fn fail(&mut self, token: &CancellationToken, err: SubmissionError) -> SubmissionError {
        if token.is_cancelled() {
            warn!("Upload for closed submission failed: {}", err);
            self.reset();
            return err;
        }
        warn!("Submission failed: {}", err);
        self.set_upload_state(UploadState::Failed);
        self.state = WorkflowState::Failed;
        self.notify(Notification::error(err.to_string()));
        err
    }

    fn set_stream(&self, stream: MediaStream) {
        match self.stream.lock() {
            Ok(mut guard) => *guard = Some(stream),
            Err(poisoned) => *poisoned.into_inner() = Some(stream),
        }
    }

    fn set_upload_state(&mut self, upload_state: UploadState) {
        if let Some(session) = self.session.as_mut() {
            session.upload_state = upload_state;
        }
    }

    fn report_progress(&mut self, token: &CancellationToken, tracker: &mut ProgressTracker, to: u8) {
        if token.is_cancelled() {
            return;
        }
        if let Some(progress) = tracker.advance(to) {
            self.set_upload_state(UploadState::Uploading { progress });
            self.emit(WorkflowEvent::Progress(progress));
        }
    }

    fn notify(&self, notification: Notification) {
        self.emit(WorkflowEvent::Notice(notification));
    }

    fn emit(&self, event: WorkflowEvent) {
        if self.events.send(event).is_err() {
            debug!("Workflow event dropped: no listener");
        }
    }
}

impl Drop for SubmissionWorkflow {
    fn drop(&mut self) {
        release_stream(self.deps.capture.as_ref(), &self.stream);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{SessionState, UserSession};
    use crate::services::analysis_service::ProfileAnalysisProvider;
    use crate::services::media_capture::{CaptureError, MockMediaCaptureService};
    use crate::services::object_store::MockObjectStore;
    use crate::services::submission_store::MockSubmissionStore;
    use uuid::Uuid;

    fn deps(
        capture: MockMediaCaptureService,
        objects: MockObjectStore,
        submissions: MockSubmissionStore,
        athlete: Option<Uuid>,
    ) -> Collaborators {
        let auth = match athlete {
            Some(id) => SessionState::signed_in(UserSession::athlete(id)),
            None => SessionState::signed_out(),
        };
        Collaborators {
            capture: Arc::new(capture),
            objects: Arc::new(objects),
            submissions: Arc::new(submissions),
            analysis: Arc::new(ProfileAnalysisProvider::with_seed(11)),
            auth: Arc::new(auth),
        }
    }

    fn mp4() -> MediaArtifact {
        MediaArtifact::from_file("jump.mp4", "video/mp4".parse().unwrap(), vec![7u8; 64])
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<WorkflowEvent>) -> Vec<WorkflowEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_progress_tracker_is_monotonic_and_capped() {
        let mut tracker = ProgressTracker::default();
        assert_eq!(tracker.advance(40), Some(40));
        assert_eq!(tracker.advance(20), None);
        assert_eq!(tracker.advance(40), None);
        assert_eq!(tracker.advance(250), Some(99));
        assert_eq!(tracker.current(), 99);
        assert_eq!(tracker.complete(), 100);
    }

    #[tokio::test]
    async fn test_failed_storage_upload_never_inserts_record() {
        let mut objects = MockObjectStore::new();
        objects
            .expect_put()
            .times(1)
            .returning(|_, _, _| Err(anyhow::anyhow!("bucket unavailable")));
        let mut submissions = MockSubmissionStore::new();
        submissions.expect_insert().never();

        let (mut workflow, mut rx) = SubmissionWorkflow::new(
            deps(MockMediaCaptureService::new(), objects, submissions, Some(Uuid::new_v4())),
            WorkflowConfig::default(),
        );
        workflow.open(FitnessTestType::Pushups).unwrap();
        workflow.select_file(mp4()).unwrap();

        let err = workflow.confirm_upload().await.unwrap_err();
        assert!(matches!(err, SubmissionError::Storage(_)));
        assert_eq!(workflow.state(), WorkflowState::Failed);
        assert_eq!(workflow.upload_state(), UploadState::Failed);
        assert!(workflow.artifact().is_some());

        let events = drain(&mut rx);
        assert!(events.iter().all(|e| !matches!(e, WorkflowEvent::Completed(_))));
        assert!(!events.contains(&WorkflowEvent::Progress(100)));
    }

    #[tokio::test]
    async fn test_upload_requires_authenticated_athlete() {
        let mut objects = MockObjectStore::new();
        objects.expect_put().never();
        let mut submissions = MockSubmissionStore::new();
        submissions.expect_insert().never();

        let (mut workflow, _rx) = SubmissionWorkflow::new(
            deps(MockMediaCaptureService::new(), objects, submissions, None),
            WorkflowConfig::default(),
        );
        workflow.open(FitnessTestType::Squats).unwrap();
        workflow.select_file(mp4()).unwrap();

        let err = workflow.confirm_upload().await.unwrap_err();
        assert!(matches!(err, SubmissionError::NotAuthenticated));
        assert_eq!(workflow.state(), WorkflowState::ArtifactReady);
    }

    #[tokio::test]
    async fn test_capture_denied_returns_to_mode_select() {
        let mut capture = MockMediaCaptureService::new();
        capture
            .expect_acquire()
            .times(1)
            .returning(|_| Err(CaptureError::PermissionDenied));
        capture.expect_release().never();
        let mut objects = MockObjectStore::new();
        objects.expect_put().never();

        let (mut workflow, mut rx) = SubmissionWorkflow::new(
            deps(capture, objects, MockSubmissionStore::new(), Some(Uuid::new_v4())),
            WorkflowConfig::default(),
        );
        workflow.open(FitnessTestType::VerticalJump).unwrap();

        let err = workflow.start_recording().await.unwrap_err();
        assert!(matches!(err, SubmissionError::CaptureDenied(_)));
        assert_eq!(workflow.state(), WorkflowState::ModeSelect);
        assert_eq!(workflow.capture_mode(), CaptureMode::Unset);

        let events = drain(&mut rx);
        assert!(matches!(
            events.as_slice(),
            [WorkflowEvent::Notice(Notification { kind: NoticeKind::Error, .. })]
        ));
    }

    #[tokio::test]
    async fn test_cancel_during_recording_releases_device_once() {
        let mut capture = MockMediaCaptureService::new();
        capture
            .expect_acquire()
            .returning(|constraints| Ok(MediaStream::new(constraints)));
        capture.expect_release().times(1).return_const(());

        let (mut workflow, _rx) = SubmissionWorkflow::new(
            deps(capture, MockObjectStore::new(), MockSubmissionStore::new(), None),
            WorkflowConfig::default(),
        );
        workflow.open(FitnessTestType::Situps).unwrap();
        workflow.start_recording().await.unwrap();
        workflow.push_chunk(Bytes::from_static(b"frame"));
        assert!(workflow.is_capture_active());

        workflow.cancel();
        workflow.cancel();
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(!workflow.is_capture_active());
        assert!(workflow.artifact().is_none());

        // A stop arriving after close is a no-op
        assert!(workflow.stop_recording().is_ok());
        assert_eq!(workflow.state(), WorkflowState::Idle);
    }

    #[tokio::test]
    async fn test_cancel_handle_releases_device_synchronously() {
        let mut capture = MockMediaCaptureService::new();
        capture
            .expect_acquire()
            .returning(|constraints| Ok(MediaStream::new(constraints)));
        capture.expect_release().times(1).return_const(());

        let (mut workflow, _rx) = SubmissionWorkflow::new(
            deps(capture, MockObjectStore::new(), MockSubmissionStore::new(), None),
            WorkflowConfig::default(),
        );
        workflow.open(FitnessTestType::Squats).unwrap();
        workflow.start_recording().await.unwrap();

        let handle = workflow.cancel_handle();
        handle.cancel();
        assert!(handle.is_cancelled());
        assert!(!workflow.is_capture_active());

        // The next interaction observes the close
        assert!(workflow.stop_recording().is_ok());
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(workflow.test_type().is_none());
    }

    #[tokio::test]
    async fn test_invalid_transitions_are_rejected() {
        let (mut workflow, _rx) = SubmissionWorkflow::new(
            deps(
                MockMediaCaptureService::new(),
                MockObjectStore::new(),
                MockSubmissionStore::new(),
                Some(Uuid::new_v4()),
            ),
            WorkflowConfig::default(),
        );

        assert!(matches!(
            workflow.select_file(mp4()),
            Err(SubmissionError::InvalidTransition { state: WorkflowState::Idle, .. })
        ));
        assert!(workflow.retry().is_err());

        workflow.open(FitnessTestType::Pushups).unwrap();
        assert!(workflow.open(FitnessTestType::Squats).is_err());
        assert!(matches!(
            workflow.confirm_upload().await,
            Err(SubmissionError::MissingArtifact)
        ));
    }

    #[tokio::test]
    async fn test_rejected_file_keeps_previous_selection() {
        let (mut workflow, _rx) = SubmissionWorkflow::new(
            deps(
                MockMediaCaptureService::new(),
                MockObjectStore::new(),
                MockSubmissionStore::new(),
                None,
            ),
            WorkflowConfig::default(),
        );
        workflow.open(FitnessTestType::Pushups).unwrap();
        workflow.select_file(mp4()).unwrap();

        let photo = MediaArtifact::from_file("me.png", mime::IMAGE_PNG, vec![1u8; 4]);
        assert!(matches!(
            workflow.select_file(photo),
            Err(SubmissionError::InvalidArtifact(_))
        ));
        assert_eq!(workflow.artifact().unwrap().extension(), "mp4");
        assert_eq!(workflow.capture_mode(), CaptureMode::FileSelected);
    }
}
