// src/scoring/score.rs

use super::StudentStats;

const POINTS_PER_SOLVED: f64 = 25.0;
const POINTS_PER_STREAK_DAY: f64 = 10.0;

/// Flat bonus for averaging under 30 seconds per question.
const FAST_BONUS: f64 = 50.0;
/// Flat bonus for averaging between 30 and 60 seconds per question.
const STEADY_BONUS: f64 = 20.0;

/// Intermediate values of the composite score, reused by the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub total_solved: i64,
    pub attempts: i64,
    /// Solved over attempts, in `0.0..=1.0`.
    pub acceptance_ratio: f64,
    /// Seconds per attempted question; 0 until anything was attempted.
    pub avg_time: f64,
    /// Final score, rounded to one decimal.
    pub score: f64,
}

/// Rounds half away from zero to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn time_bonus(avg_time: f64) -> f64 {
    if avg_time < 30.0 {
        FAST_BONUS
    } else if avg_time < 60.0 {
        STEADY_BONUS
    } else {
        0.0
    }
}

/// Computes every component of the ranking score.
pub fn breakdown(stats: &StudentStats) -> ScoreBreakdown {
    let total_solved = stats.total_solved();

    // Solved counts above recorded attempts are inconsistent data; clamp
    // instead of producing a ratio above 1.
    let attempts = stats.total_completed.max(total_solved).max(1);
    let acceptance_ratio = total_solved as f64 / attempts as f64;

    let mut score = total_solved as f64 * POINTS_PER_SOLVED * acceptance_ratio
        + stats.streak as f64 * POINTS_PER_STREAK_DAY;

    let measured = stats.total_completed > 0;
    let avg_time = if measured {
        stats.duration_seconds as f64 / attempts as f64
    } else {
        0.0
    };
    if measured {
        score += time_bonus(avg_time);
    }

    ScoreBreakdown {
        total_solved,
        attempts,
        acceptance_ratio,
        avg_time,
        score: round1(score),
    }
}

/// Composite ranking score of a student.
pub fn compute_score(stats: &StudentStats) -> f64 {
    breakdown(stats).score
}
