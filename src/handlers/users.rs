// src/handlers/users.rs

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    handlers::quiz::STATS_COLUMNS,
    models::student::{
        LeaderboardParams, ProblemStat, ProblemStats, ProfileResponse, Student, StudentStatsRow,
    },
    scoring::{self, StudentStats},
    utils::jwt::Claims,
};

const DEFAULT_LEADERBOARD_LIMIT: usize = 50;
const MAX_LEADERBOARD_LIMIT: usize = 100;

/// Loads every student's statistics in registration order, which is the
/// order ties are broken in.
async fn load_population(pool: &SqlitePool) -> Result<Vec<(String, StudentStats)>, AppError> {
    let rows = sqlx::query_as::<_, StudentStatsRow>(&format!(
        "SELECT username, {STATS_COLUMNS} FROM students ORDER BY id"
    ))
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to load student population: {:?}", e);
        AppError::from(e)
    })?;

    Ok(rows.into_iter().map(|r| (r.username, r.stats)).collect())
}

#[derive(sqlx::FromRow)]
struct ToughnessCount {
    toughness: Option<String>,
    total: i64,
}

/// Rank of `username`; the student may have been deleted since the token
/// was issued.
fn rank_in(population: &[(String, StudentStats)], username: &str) -> Result<usize, AppError> {
    scoring::rank_of(population, username).ok_or(AppError::NotFound("User not found".to_string()))
}

/// Profile of the current student, including the live leaderboard rank.
pub async fn get_profile(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = claims.student_id()?;

    let student = sqlx::query_as::<_, Student>(&format!(
        "SELECT id, username, password, email, badge, {STATS_COLUMNS} FROM students WHERE id = ?"
    ))
    .bind(student_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    let totals = sqlx::query_as::<_, ToughnessCount>(
        "SELECT LOWER(toughness) AS toughness, COUNT(*) AS total FROM questions GROUP BY LOWER(toughness)",
    )
    .fetch_all(&pool)
    .await?;

    let total_for = |label: &str| {
        totals
            .iter()
            .find(|t| t.toughness.as_deref() == Some(label))
            .map_or(0, |t| t.total)
    };

    let population = load_population(&pool).await?;
    let rank = rank_in(&population, &student.username)?;

    let stats = student.stats;
    let breakdown = scoring::breakdown(&stats);

    Ok(Json(ProfileResponse {
        display_name: student.username.clone(),
        username: student.username,
        rank,
        badge_level: student.badge,
        experience_points: stats.experience_points,
        next_level_points: stats.next_level_points,
        level: scoring::level_index(stats.next_level_points),
        active_days: stats.streak,
        total_submissions: stats.total_completed,
        problem_stats: ProblemStats {
            easy: ProblemStat {
                solved: stats.easy_solved,
                total: total_for("easy"),
            },
            medium: ProblemStat {
                solved: stats.medium_solved,
                total: total_for("medium"),
            },
            hard: ProblemStat {
                solved: stats.hard_solved,
                total: total_for("hard"),
            },
        },
        acceptance: scoring::round1(breakdown.acceptance_ratio * 100.0),
        score: breakdown.score,
    }))
}

/// Ranks every student and returns the top entries.
pub async fn get_leaderboard(
    State(pool): State<SqlitePool>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .min(MAX_LEADERBOARD_LIMIT);

    let population = load_population(&pool).await?;
    let mut ranked = scoring::rank_population(population);
    ranked.truncate(limit);

    Ok(Json(ranked))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(username: &str, easy_solved: i64) -> (String, StudentStats) {
        (
            username.to_string(),
            StudentStats {
                easy_solved,
                total_completed: easy_solved,
                ..StudentStats::default()
            },
        )
    }

    #[test]
    fn test_rank_in_population() {
        let population = vec![entry("a", 1), entry("b", 4)];
        assert!(matches!(rank_in(&population, "b"), Ok(1)));
        assert!(matches!(rank_in(&population, "a"), Ok(2)));
    }

    #[test]
    fn test_missing_student_is_not_found() {
        let population = vec![entry("a", 1)];
        assert!(matches!(rank_in(&population, "ghost"), Err(AppError::NotFound(_))));
        assert!(matches!(rank_in(&[], "a"), Err(AppError::NotFound(_))));
    }
}
