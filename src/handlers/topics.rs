// src/handlers/topics.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    config::{IMPORTANT_THRESHOLD, IMPORTANT_TOPICS_LIMIT},
    error::AppError,
    models::{
        question::{Question, QuestionResponse},
        topic::{ImportantTopic, SubjectStat, TopicResponse, TopicRow},
    },
    utils::jwt::Claims,
};

const TOPIC_COLUMNS: &str = r#"
    SELECT
        t.id, t.subject, t.topic, t.description, t.importance,
        (SELECT COUNT(*) FROM questions q WHERE q.topic = t.topic) AS question_count
    FROM topics t
"#;

/// Lists every topic in random order.
pub async fn list_topics(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let rows = sqlx::query_as::<_, TopicRow>(&format!("{TOPIC_COLUMNS} ORDER BY RANDOM()"))
        .fetch_all(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list topics: {:?}", e);
            AppError::from(e)
        })?;

    let topics: Vec<TopicResponse> = rows.into_iter().map(TopicResponse::from).collect();
    Ok(Json(topics))
}

/// A random sample of high-importance topics.
pub async fn important_topics(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let rows = sqlx::query_as::<_, TopicRow>(&format!(
        "{TOPIC_COLUMNS} WHERE t.importance > ? ORDER BY RANDOM() LIMIT ?"
    ))
    .bind(IMPORTANT_THRESHOLD)
    .bind(IMPORTANT_TOPICS_LIMIT)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch important topics: {:?}", e);
        AppError::from(e)
    })?;

    let topics: Vec<ImportantTopic> = rows
        .into_iter()
        .map(|row| ImportantTopic {
            id: row.id.to_string(),
            name: row.topic,
            subject: row.subject.unwrap_or_else(|| "Unknown".to_string()),
            priority: row.importance.unwrap_or(0),
        })
        .collect();

    Ok(Json(topics))
}

/// Practice questions of a topic the student has not answered correctly yet.
pub async fn topic_questions(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(topic): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = claims.student_id()?;

    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT
            id, subject, topic, question,
            option_1, option_2, option_3, option_4,
            toughness, correct_option
        FROM questions
        WHERE topic = ?
          AND id NOT IN (
              SELECT question_id FROM attempts WHERE user_id = ? AND is_correct = TRUE
          )
        ORDER BY id
        "#,
    )
    .bind(&topic)
    .bind(student_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch questions for topic {}: {:?}", topic, e);
        AppError::from(e)
    })?;

    if questions.is_empty() {
        return Err(AppError::NotFound("No new questions found".to_string()));
    }

    let questions: Vec<QuestionResponse> =
        questions.into_iter().map(QuestionResponse::from).collect();
    Ok(Json(questions))
}

/// Public counters for the landing page.
pub async fn get_stats(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let subjects = sqlx::query_as::<_, SubjectStat>(
        "SELECT subject, COUNT(*) AS questions FROM questions GROUP BY subject ORDER BY subject",
    )
    .fetch_all(&pool)
    .await?;

    let active_users: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE total_completed > 0")
            .fetch_one(&pool)
            .await?;

    let total_questions: i64 = subjects.iter().map(|s| s.questions).sum();

    Ok(Json(json!({
        "subjectStats": subjects,
        "totalQuestions": total_questions,
        "activeUsers": active_users
    })))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
