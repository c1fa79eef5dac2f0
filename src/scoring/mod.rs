// src/scoring/mod.rs

//! Experience, leveling and leaderboard arithmetic.
//!
//! Everything in this module is pure: functions take statistics records by
//! value or reference and return new values. Persisting the results (and
//! serializing concurrent updates of one student) is up to the caller.

pub mod accrual;
pub mod ranking;
pub mod score;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub use accrual::{Accrual, apply_accrual, level_index};
pub use ranking::{RankedEntry, rank_of, rank_population};
pub use score::{ScoreBreakdown, breakdown, compute_score, round1};

/// XP threshold of the first level.
pub const BASE_LEVEL_POINTS: i64 = 1000;

/// Base XP per correct answer, before the difficulty multiplier.
pub const XP_PER_CORRECT: i64 = 10;

/// Cumulative quiz statistics of one student.
///
/// Column names match the `students` table so the record can be loaded
/// with `#[sqlx(flatten)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct StudentStats {
    pub easy_solved: i64,
    pub medium_solved: i64,
    pub hard_solved: i64,

    /// Questions attempted, correct or not.
    pub total_completed: i64,

    /// XP toward the current level. Always below `next_level_points` after accrual.
    pub experience_points: i64,
    pub next_level_points: i64,

    /// Maintained outside the engine.
    pub streak: i64,

    pub duration_seconds: i64,
}

impl Default for StudentStats {
    fn default() -> Self {
        Self {
            easy_solved: 0,
            medium_solved: 0,
            hard_solved: 0,
            total_completed: 0,
            experience_points: 0,
            next_level_points: BASE_LEVEL_POINTS,
            streak: 0,
            duration_seconds: 0,
        }
    }
}

impl StudentStats {
    pub fn total_solved(&self) -> i64 {
        self.easy_solved + self.medium_solved + self.hard_solved
    }
}

/// Difficulty label of a submitted quiz.
///
/// Labels outside the known set map to `Unknown` instead of failing: such
/// submissions still earn base XP but are not counted in any bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Unknown,
}

impl Difficulty {
    /// Case-insensitive parse of a client-supplied label.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Unknown,
        }
    }

    pub fn multiplier(self) -> i64 {
        match self {
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Easy | Difficulty::Unknown => 1,
        }
    }
}

/// Outcome of one quiz attempt as fed into accrual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionFact {
    pub difficulty: Difficulty,
    pub correct_count: i64,
    pub questions_count: i64,
    pub time_spent_seconds: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_starts_at_base_threshold() {
        let stats = StudentStats::default();
        assert_eq!(stats.next_level_points, 1000);
        assert_eq!(stats.experience_points, 0);
        assert_eq!(stats.total_solved(), 0);
    }

    #[test]
    fn test_difficulty_labels() {
        assert_eq!(Difficulty::from_label("easy"), Difficulty::Easy);
        assert_eq!(Difficulty::from_label("Medium"), Difficulty::Medium);
        assert_eq!(Difficulty::from_label(" HARD "), Difficulty::Hard);
        assert_eq!(Difficulty::from_label("expert"), Difficulty::Unknown);
        assert_eq!(Difficulty::from_label(""), Difficulty::Unknown);
    }

    #[test]
    fn test_multipliers() {
        assert_eq!(Difficulty::Easy.multiplier(), 1);
        assert_eq!(Difficulty::Medium.multiplier(), 2);
        assert_eq!(Difficulty::Hard.multiplier(), 3);
        assert_eq!(Difficulty::Unknown.multiplier(), 1);
    }
}
