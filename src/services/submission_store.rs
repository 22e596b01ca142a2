use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{StoredSubmission, SubmissionRecord};

/// Structured persistence of submission records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert(&self, record: &SubmissionRecord) -> Result<StoredSubmission>;

    /// All submissions of an athlete, newest first
    async fn list_for_athlete(&self, athlete_id: Uuid) -> Result<Vec<StoredSubmission>>;
}

const SUBMISSION_COLUMNS: &str = "id, athlete_id, test_type, video_url, ai_analysis, performance_metrics, status, submitted_at, reviewed_at, reviewed_by, review_notes";

/// Postgres-backed store over the `fitness_test_submissions` table
pub struct PgSubmissionStore {
    db: PgPool,
}

impl PgSubmissionStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, record: &SubmissionRecord) -> Result<StoredSubmission> {
        let ai_analysis =
            serde_json::to_value(&record.analysis).context("Failed to serialize analysis")?;

        let query = format!(
            r#"
            INSERT INTO fitness_test_submissions (athlete_id, test_type, video_url, ai_analysis, performance_metrics, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            SUBMISSION_COLUMNS
        );

        let submission = sqlx::query_as::<_, StoredSubmission>(&query)
            .bind(record.athlete_id)
            .bind(record.test_type)
            .bind(&record.video_url)
            .bind(ai_analysis)
            .bind(&record.performance_metrics)
            .bind(record.status)
            .fetch_one(&self.db)
            .await
            .context("Failed to insert fitness test submission")?;

        info!(
            "Created submission {} for athlete {} ({})",
            submission.id, submission.athlete_id, submission.test_type
        );
        Ok(submission)
    }

    async fn list_for_athlete(&self, athlete_id: Uuid) -> Result<Vec<StoredSubmission>> {
        let query = format!(
            "SELECT {} FROM fitness_test_submissions WHERE athlete_id = $1 ORDER BY submitted_at DESC",
            SUBMISSION_COLUMNS
        );

        let submissions = sqlx::query_as::<_, StoredSubmission>(&query)
            .bind(athlete_id)
            .fetch_all(&self.db)
            .await
            .context("Failed to fetch submissions")?;

        debug!("Fetched {} submissions for athlete {}", submissions.len(), athlete_id);
        Ok(submissions)
    }
}
