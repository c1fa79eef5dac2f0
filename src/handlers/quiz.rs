// src/handlers/quiz.rs

use std::collections::BTreeMap;

use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::quiz::{ReportErrorRequest, SubmitQuizRequest, WeakAreaSummary},
    scoring::{Difficulty, StudentStats, apply_accrual},
    utils::jwt::Claims,
};

pub(crate) const STATS_COLUMNS: &str = "easy_solved, medium_solved, hard_solved, total_completed, \
     experience_points, next_level_points, streak, duration_seconds";

/// Records a finished quiz.
///
/// * Applies the submission to the student's statistics (XP, level-ups, counters).
/// * Stores one attempt per correctly answered question.
/// * Stores one weak-area entry per mistake.
///
/// Everything happens in one `BEGIN IMMEDIATE` transaction: the write lock is
/// held from the first read, and concurrent submissions wait for it.
pub async fn submit_quiz(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if req.correct_count > req.questions_count {
        return Err(AppError::BadRequest(
            "correctCount cannot exceed questionsCount".to_string(),
        ));
    }

    let student_id = claims.student_id()?;
    let fact = req.fact();

    if fact.difficulty == Difficulty::Unknown {
        tracing::warn!(
            "Quiz {} submitted with unknown difficulty '{}'; solved counters untouched",
            req.quiz_id,
            req.difficulty
        );
    }

    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let stats = sqlx::query_as::<_, StudentStats>(&format!(
        "SELECT {STATS_COLUMNS} FROM students WHERE id = ?"
    ))
    .bind(student_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    let accrual = apply_accrual(stats, &fact);
    let updated = accrual.stats;

    sqlx::query(
        r#"
        UPDATE students SET
            easy_solved = ?, medium_solved = ?, hard_solved = ?,
            total_completed = ?, experience_points = ?, next_level_points = ?,
            duration_seconds = ?
        WHERE id = ?
        "#,
    )
    .bind(updated.easy_solved)
    .bind(updated.medium_solved)
    .bind(updated.hard_solved)
    .bind(updated.total_completed)
    .bind(updated.experience_points)
    .bind(updated.next_level_points)
    .bind(updated.duration_seconds)
    .bind(student_id)
    .execute(&mut *tx)
    .await?;

    let now = Utc::now();

    for result in req.results.iter().filter(|r| r.is_correct) {
        sqlx::query(
            r#"
            INSERT INTO attempts (user_id, quiz_id, question_id, subject, is_correct, submitted_at)
            VALUES (?, ?, ?, ?, TRUE, ?)
            "#,
        )
        .bind(student_id)
        .bind(&req.quiz_id)
        .bind(result.numeric_id())
        .bind(&result.subject)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    for mistake in req.mistakes.iter().flatten() {
        sqlx::query(
            "INSERT INTO weak_areas (user_id, subject, question_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(student_id)
        .bind(&mistake.subject)
        .bind(mistake.numeric_id())
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await.map_err(|e| {
        tracing::error!("Failed to commit quiz submission: {:?}", e);
        AppError::from(e)
    })?;

    if accrual.levels_gained > 0 {
        tracing::info!(
            "Student {} gained {} level(s)",
            claims.username,
            accrual.levels_gained
        );
    }

    Ok(Json(json!({
        "message": "Submission recorded",
        "xp_earned": accrual.xp_gained,
        "experiencePoints": updated.experience_points,
        "nextLevelPoints": updated.next_level_points,
        "levelsGained": accrual.levels_gained
    })))
}

/// Stores a student's report of a broken question.
pub async fn report_error(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ReportErrorRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;
    let student_id = claims.student_id()?;

    sqlx::query(
        r#"
        INSERT INTO reported_errors (user_id, question_id, subject, quiz_id, reported_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(student_id)
    .bind(&req.question_id)
    .bind(&req.subject)
    .bind(&req.quiz_id)
    .bind(Utc::now().timestamp())
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to store error report: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(json!({ "message": "Error reported successfully" })))
}

#[derive(sqlx::FromRow)]
struct WeakAreaRow {
    subject: String,
    question_id: i64,
}

/// Groups recorded mistakes by subject, most mistakes first.
/// Subjects with equal counts are ordered by name.
fn summarize_weak_areas(rows: Vec<WeakAreaRow>) -> Vec<WeakAreaSummary> {
    let mut by_subject: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    for row in rows {
        by_subject.entry(row.subject).or_default().push(row.question_id);
    }

    let mut summaries: Vec<WeakAreaSummary> = by_subject
        .into_iter()
        .map(|(subject, question_ids)| WeakAreaSummary {
            subject,
            mistakes: question_ids.len(),
            question_ids,
        })
        .collect();

    summaries.sort_by(|a, b| b.mistakes.cmp(&a.mistakes));
    summaries
}

/// Lists the current student's weak areas.
pub async fn weak_areas(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = claims.student_id()?;

    let rows = sqlx::query_as::<_, WeakAreaRow>(
        "SELECT subject, question_id FROM weak_areas WHERE user_id = ? ORDER BY id",
    )
    .bind(student_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(summarize_weak_areas(rows)))
}
