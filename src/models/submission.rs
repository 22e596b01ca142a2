use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{AnalysisResult, FitnessTestType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "submission_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Processing,
    Approved,
    Rejected,
}

/// Insert payload for `fitness_test_submissions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub athlete_id: Uuid,
    pub test_type: FitnessTestType,
    pub video_url: String,
    pub analysis: AnalysisResult,
    pub performance_metrics: Value,
    pub status: SubmissionStatus,
}

impl SubmissionRecord {
    /// New record for a freshly uploaded video, awaiting review
    pub fn processing(
        athlete_id: Uuid,
        test_type: FitnessTestType,
        video_url: String,
        analysis: AnalysisResult,
    ) -> Self {
        let performance_metrics = analysis.metrics_json();
        Self {
            athlete_id,
            test_type,
            video_url,
            analysis,
            performance_metrics,
            status: SubmissionStatus::Processing,
        }
    }
}

/// A submission row as persisted by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StoredSubmission {
    pub id: Uuid,
    pub athlete_id: Uuid,
    pub test_type: FitnessTestType,
    pub video_url: String,
    pub ai_analysis: Option<Value>,
    pub performance_metrics: Option<Value>,
    pub status: Option<SubmissionStatus>,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
    pub review_notes: Option<String>,
}

impl StoredSubmission {
    /// Build the row a store returns after inserting `record`
    pub fn from_record(id: Uuid, record: &SubmissionRecord, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            athlete_id: record.athlete_id,
            test_type: record.test_type,
            video_url: record.video_url.clone(),
            ai_analysis: serde_json::to_value(&record.analysis).ok(),
            performance_metrics: Some(record.performance_metrics.clone()),
            status: Some(record.status),
            submitted_at,
            reviewed_at: None,
            reviewed_by: None,
            review_notes: None,
        }
    }

    pub fn analysis(&self) -> Option<AnalysisResult> {
        self.ai_analysis
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Status with the store-level default applied
    pub fn effective_status(&self) -> SubmissionStatus {
        self.status.unwrap_or(SubmissionStatus::Pending)
    }

    /// Value of the test's primary metric, if the analysis carries it
    pub fn primary_metric(&self) -> Option<f64> {
        self.analysis()?.metric_f64(self.test_type.primary_metric())
    }
}
