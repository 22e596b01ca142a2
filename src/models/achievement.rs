use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementType {
    Badge,
    LevelUp,
    PersonalBest,
    Streak,
    FirstTime,
}

/// Gamification notice shown after a successful submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub achievement_type: AchievementType,
    pub athlete_id: Uuid,
    pub test_submission_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub earned_at: DateTime<Utc>,
}

/// Dashboard summary for one athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteStats {
    pub total_tests: u32,
    pub completed_tests: u32,
    pub average_score: u32,
    pub badges: u32,
    pub level: u32,
    pub streak: u32,
}
