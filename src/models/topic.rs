// src/models/topic.rs

use serde::Serialize;
use sqlx::FromRow;

/// Row of the 'topics' table joined with its question count.
#[derive(Debug, Clone, FromRow)]
pub struct TopicRow {
    pub id: i64,
    pub subject: Option<String>,
    pub topic: String,
    pub description: Option<String>,
    pub importance: Option<i64>,
    pub question_count: i64,
}

/// Topic card shown on the home page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicResponse {
    pub id: String,
    pub name: String,
    pub difficulty: &'static str,
    pub question_count: i64,
    pub subject: String,
    pub description: String,
}

/// High-importance topic entry.
#[derive(Debug, Serialize)]
pub struct ImportantTopic {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub priority: i64,
}

/// Maps a topic's importance to the difficulty label shown to students.
pub fn difficulty_label(importance: Option<i64>) -> &'static str {
    match importance {
        Some(1) => "Easy",
        Some(3) => "Hard",
        _ => "Medium",
    }
}

impl From<TopicRow> for TopicResponse {
    fn from(row: TopicRow) -> Self {
        Self {
            id: row.id.to_string(),
            difficulty: difficulty_label(row.importance),
            name: row.topic,
            question_count: row.question_count,
            subject: row.subject.unwrap_or_else(|| "Unknown".to_string()),
            description: row.description.unwrap_or_default(),
        }
    }
}

/// Question count of one subject, for the public stats.
#[derive(Debug, Serialize, FromRow)]
pub struct SubjectStat {
    pub subject: String,
    pub questions: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_label() {
        assert_eq!(difficulty_label(Some(1)), "Easy");
        assert_eq!(difficulty_label(Some(2)), "Medium");
        assert_eq!(difficulty_label(Some(3)), "Hard");
        assert_eq!(difficulty_label(Some(5)), "Medium");
        assert_eq!(difficulty_label(None), "Medium");
    }

    #[test]
    fn test_topic_response_defaults() {
        let row = TopicRow {
            id: 7,
            subject: None,
            topic: "Thermodynamics".to_string(),
            description: None,
            importance: Some(1),
            question_count: 12,
        };
        let resp = TopicResponse::from(row);
        assert_eq!(resp.id, "7");
        assert_eq!(resp.subject, "Unknown");
        assert_eq!(resp.description, "");
        assert_eq!(resp.difficulty, "Easy");
    }
}
