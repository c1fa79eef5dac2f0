// src/models/question.rs

use serde::Serialize;
use sqlx::FromRow;

/// Represents the 'questions' table in the database.
/// All subjects share the table; `subject` tells them apart.
#[derive(Debug, Clone, FromRow)]
pub struct Question {
    pub id: i64,
    pub subject: String,
    pub topic: String,
    pub question: String,
    pub option_1: String,
    pub option_2: String,
    pub option_3: String,
    pub option_4: String,

    /// Difficulty label assigned to the question ('easy', 'medium', 'hard').
    pub toughness: Option<String>,

    /// Index (0-3) of the correct option, if known.
    pub correct_option: Option<i64>,
}

/// Practice question as sent to the client.
#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct: i64,
    pub toughness: Option<String>,
    pub subject: String,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            options: vec![q.option_1, q.option_2, q.option_3, q.option_4],
            correct: q.correct_option.unwrap_or(0),
            toughness: q.toughness,
            subject: q.subject,
        }
    }
}
