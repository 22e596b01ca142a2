use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use crate::models::{Achievement, AchievementType, StoredSubmission};
use crate::services::submission_store::SubmissionStore;
use crate::services::submission_workflow::WorkflowEvent;

/// Turns completed submissions into gamification notices
pub struct AchievementService {
    submissions: Arc<dyn SubmissionStore>,
}

impl AchievementService {
    pub fn new(submissions: Arc<dyn SubmissionStore>) -> Self {
        Self { submissions }
    }

    /// React to a workflow event; only completions can earn an achievement
    pub async fn handle_event(&self, event: &WorkflowEvent) -> Result<Option<Achievement>> {
        match event {
            WorkflowEvent::Completed(submission) => self.on_completed(submission).await,
            _ => Ok(None),
        }
    }

    pub async fn on_completed(&self, submission: &StoredSubmission) -> Result<Option<Achievement>> {
        let history = self
            .submissions
            .list_for_athlete(submission.athlete_id)
            .await?;

        let achievement = evaluate(submission, &history);
        match &achievement {
            Some(a) => info!(
                "Athlete {} earned {:?}: {}",
                submission.athlete_id, a.achievement_type, a.title
            ),
            None => debug!("No achievement for submission {}", submission.id),
        }
        Ok(achievement)
    }
}

/// Decide the achievement for `submission` given the athlete's history
pub fn evaluate(submission: &StoredSubmission, history: &[StoredSubmission]) -> Option<Achievement> {
    let test_type = submission.test_type;
    let previous: Vec<&StoredSubmission> = history
        .iter()
        .filter(|s| s.id != submission.id && s.test_type == test_type)
        .collect();

    let exercise = test_type.display_name();
    let (achievement_type, title, description) = if previous.is_empty() {
        (
            AchievementType::FirstTime,
            format!("First {} submitted!", exercise),
            format!("Great job on your {}!", exercise),
        )
    } else {
        let current = submission.primary_metric()?;
        let values = previous.iter().filter_map(|s| s.primary_metric());
        let best = if test_type.lower_is_better() {
            values.fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))))
        } else {
            values.fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
        }?;

        let improved = if test_type.lower_is_better() {
            current < best
        } else {
            current > best
        };
        if !improved {
            return None;
        }
        (
            AchievementType::PersonalBest,
            "Better than previous!".to_string(),
            format!(
                "New {} best: {} {} (was {})",
                exercise,
                current,
                test_type.primary_metric(),
                best
            ),
        )
    };

    Some(Achievement {
        id: format!("upload_{}", submission.id),
        achievement_type,
        athlete_id: submission.athlete_id,
        test_submission_id: Some(submission.id),
        title,
        description,
        earned_at: Utc::now(),
    })
}
