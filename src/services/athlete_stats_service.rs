use anyhow::Result;
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{AthleteStats, FitnessTestType, StoredSubmission, SubmissionStatus};
use crate::services::submission_store::SubmissionStore;

const SUBMISSIONS_PER_LEVEL: usize = 5;

/// Dashboard numbers derived from an athlete's submission history
pub struct AthleteStatsService {
    submissions: Arc<dyn SubmissionStore>,
}

impl AthleteStatsService {
    pub fn new(submissions: Arc<dyn SubmissionStore>) -> Self {
        Self { submissions }
    }

    pub async fn stats_for(&self, athlete_id: Uuid, today: NaiveDate) -> Result<AthleteStats> {
        let submissions = self.submissions.list_for_athlete(athlete_id).await?;
        Ok(compute_stats(&submissions, today))
    }
}

pub fn compute_stats(submissions: &[StoredSubmission], today: NaiveDate) -> AthleteStats {
    let completed: HashSet<FitnessTestType> = submissions.iter().map(|s| s.test_type).collect();

    let scores: Vec<u32> = submissions
        .iter()
        .filter_map(|s| s.analysis())
        .map(|a| a.form_quality)
        .collect();
    let average_score = if scores.is_empty() {
        0
    } else {
        (scores.iter().sum::<u32>() as f64 / scores.len() as f64).round() as u32
    };

    let badges = submissions
        .iter()
        .filter(|s| s.effective_status() == SubmissionStatus::Approved)
        .count();

    AthleteStats {
        total_tests: FitnessTestType::ALL.len() as u32,
        completed_tests: completed.len() as u32,
        average_score,
        badges: badges as u32,
        level: (1 + submissions.len() / SUBMISSIONS_PER_LEVEL) as u32,
        streak: current_streak(submissions, today),
    }
}

/// Consecutive days with a submission, ending today or yesterday
fn current_streak(submissions: &[StoredSubmission], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = submissions
        .iter()
        .map(|s| s.submitted_at.date_naive())
        .collect();

    let mut day = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    while days.contains(&day) {
        streak += 1;
        day = day - Duration::days(1);
    }
    streak
}
