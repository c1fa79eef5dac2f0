// src/models/student.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::scoring::StudentStats;

/// Represents the 'students' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Student {
    pub id: i64,

    /// Unique username.
    pub username: String,

    /// Argon2 password hash.
    pub password: String,

    pub email: Option<String>,

    /// Display badge, 'Rookie' for new accounts.
    pub badge: String,

    #[sqlx(flatten)]
    pub stats: StudentStats,
}

/// Row used when ranking the whole population.
#[derive(Debug, FromRow)]
pub struct StudentStatsRow {
    pub username: String,
    #[sqlx(flatten)]
    pub stats: StudentStats,
}

/// DTO for signup and login.
#[derive(Debug, Deserialize, Validate)]
pub struct AuthRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub username: String,
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: String,
}

/// Solved and available questions of one difficulty.
#[derive(Debug, Serialize)]
pub struct ProblemStat {
    pub solved: i64,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct ProblemStats {
    pub easy: ProblemStat,
    pub medium: ProblemStat,
    pub hard: ProblemStat,
}

/// Profile of the current student.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub username: String,
    pub display_name: String,
    /// Position on the leaderboard, computed on request.
    pub rank: usize,
    pub badge_level: String,
    pub experience_points: i64,
    pub next_level_points: i64,
    pub level: u32,
    pub active_days: i64,
    pub total_submissions: i64,
    pub problem_stats: ProblemStats,
    /// Percentage of attempted questions answered correctly.
    pub acceptance: f64,
    pub score: f64,
}

/// Query parameters for the leaderboard.
#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    /// Number of entries to return (default: 50, max: 100).
    pub limit: Option<usize>,
}
