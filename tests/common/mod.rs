#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use fitness_submission::auth::{SessionState, UserSession};
use fitness_submission::models::{MediaArtifact, StoredSubmission, SubmissionRecord};
use fitness_submission::services::{
    CaptureConstraints, CaptureError, Collaborators, MediaCaptureService, MediaStream,
    ObjectStore, ProfileAnalysisProvider, SubmissionStore,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use uuid::Uuid;

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .init();
    });
}

/// Camera fake that counts acquire/release calls
#[derive(Default)]
pub struct FakeCamera {
    pub deny: AtomicBool,
    pub acquired: AtomicUsize,
    pub released: Mutex<Vec<Uuid>>,
}

impl FakeCamera {
    pub fn denying() -> Self {
        let camera = Self::default();
        camera.deny.store(true, Ordering::SeqCst);
        camera
    }

    pub fn acquire_count(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn release_count(&self) -> usize {
        self.released.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaCaptureService for FakeCamera {
    async fn acquire(&self, constraints: CaptureConstraints) -> Result<MediaStream, CaptureError> {
        if self.deny.load(Ordering::SeqCst) {
            return Err(CaptureError::PermissionDenied);
        }
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(MediaStream::new(constraints))
    }

    fn release(&self, stream: &MediaStream) {
        self.released.lock().unwrap().push(stream.id);
    }
}

#[derive(Debug, Clone)]
pub struct PutCall {
    pub key: String,
    pub size: usize,
    pub content_type: String,
}

/// Object store fake recording every put
#[derive(Default)]
pub struct FakeObjectStore {
    pub fail: AtomicBool,
    pub delay: Mutex<Option<Duration>>,
    pub puts: Mutex<Vec<PutCall>>,
}

impl FakeObjectStore {
    pub fn failing() -> Self {
        let store = Self::default();
        store.fail.store(true, Ordering::SeqCst);
        store
    }

    pub fn slow(delay: Duration) -> Self {
        let store = Self::default();
        *store.delay.lock().unwrap() = Some(delay);
        store
    }

    pub fn put_calls(&self) -> Vec<PutCall> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.puts.lock().unwrap().push(PutCall {
            key: key.to_string(),
            size: data.len(),
            content_type: content_type.to_string(),
        });
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("storage unavailable");
        }
        Ok(())
    }
}

/// In-memory submission table
#[derive(Default)]
pub struct FakeSubmissionStore {
    pub fail: AtomicBool,
    pub inserts: Mutex<Vec<SubmissionRecord>>,
    pub rows: Mutex<Vec<StoredSubmission>>,
}

impl FakeSubmissionStore {
    pub fn failing() -> Self {
        let store = Self::default();
        store.fail.store(true, Ordering::SeqCst);
        store
    }

    pub fn insert_calls(&self) -> Vec<SubmissionRecord> {
        self.inserts.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionStore for FakeSubmissionStore {
    async fn insert(&self, record: &SubmissionRecord) -> Result<StoredSubmission> {
        self.inserts.lock().unwrap().push(record.clone());
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("connection reset");
        }
        let stored = StoredSubmission::from_record(Uuid::new_v4(), record, Utc::now());
        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list_for_athlete(&self, athlete_id: Uuid) -> Result<Vec<StoredSubmission>> {
        let mut rows: Vec<StoredSubmission> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.athlete_id == athlete_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(rows)
    }
}

/// All collaborators of one workflow, kept for assertions
pub struct Harness {
    pub athlete_id: Uuid,
    pub camera: Arc<FakeCamera>,
    pub objects: Arc<FakeObjectStore>,
    pub submissions: Arc<FakeSubmissionStore>,
    pub auth: Arc<SessionState>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(FakeCamera::default(), FakeObjectStore::default(), FakeSubmissionStore::default())
    }

    pub fn with(camera: FakeCamera, objects: FakeObjectStore, submissions: FakeSubmissionStore) -> Self {
        init_test_logging();
        let athlete_id = Uuid::new_v4();
        Self {
            athlete_id,
            camera: Arc::new(camera),
            objects: Arc::new(objects),
            submissions: Arc::new(submissions),
            auth: Arc::new(SessionState::signed_in(UserSession::athlete(athlete_id))),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            capture: self.camera.clone(),
            objects: self.objects.clone(),
            submissions: self.submissions.clone(),
            analysis: Arc::new(ProfileAnalysisProvider::with_seed(2024)),
            auth: self.auth.clone(),
        }
    }
}

pub fn mp4_file(size: usize) -> MediaArtifact {
    MediaArtifact::from_file("attempt.mp4", "video/mp4".parse().unwrap(), vec![1u8; size])
}
