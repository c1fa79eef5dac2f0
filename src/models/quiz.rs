// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::scoring::{Difficulty, SubmissionFact};

/// Per-question outcome reported by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: String,
    #[serde(default = "unknown")]
    pub subject: String,
    pub is_correct: bool,
}

impl QuestionResult {
    /// Numeric question id; non-numeric ids are recorded as 0.
    pub fn numeric_id(&self) -> i64 {
        self.question_id.trim().parse().unwrap_or(0)
    }
}

fn unknown() -> String {
    "Unknown".to_string()
}

/// DTO for submitting a finished quiz.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    #[validate(length(min = 1, max = 100))]
    pub quiz_id: String,

    /// 'easy', 'medium' or 'hard'. Other labels are accepted but not bucketed.
    pub difficulty: String,

    #[validate(range(min = 0, max = 1000))]
    pub questions_count: i64,

    #[validate(range(min = 0, max = 1000))]
    pub correct_count: i64,

    /// Seconds spent on the quiz, at most one day.
    #[validate(range(min = 0, max = 86_400))]
    pub time_spent: i64,

    #[validate(length(max = 1000))]
    #[serde(default)]
    pub results: Vec<QuestionResult>,

    /// Questions answered wrong on the first try.
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub mistakes: Option<Vec<QuestionResult>>,
}

impl SubmitQuizRequest {
    pub fn fact(&self) -> SubmissionFact {
        SubmissionFact {
            difficulty: Difficulty::from_label(&self.difficulty),
            correct_count: self.correct_count,
            questions_count: self.questions_count,
            time_spent_seconds: self.time_spent,
        }
    }
}

/// DTO for flagging a broken question.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportErrorRequest {
    #[validate(length(min = 1, max = 50))]
    pub question_id: String,
    #[serde(default = "unknown")]
    #[validate(length(max = 100))]
    pub subject: String,
    #[serde(default = "unknown")]
    #[validate(length(max = 100))]
    pub quiz_id: String,
}

/// Recorded mistakes of one subject.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakAreaSummary {
    pub subject: String,
    pub mistakes: usize,
    pub question_ids: Vec<i64>,
}
