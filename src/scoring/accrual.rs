// src/scoring/accrual.rs

use super::{BASE_LEVEL_POINTS, Difficulty, StudentStats, SubmissionFact, XP_PER_CORRECT};

/// Result of applying one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accrual {
    pub stats: StudentStats,

    /// Raw XP earned by the submission, before any rollover.
    pub xp_gained: i64,

    pub levels_gained: u32,
}

/// Threshold of the level after one with threshold `points` (floor of ×1.5).
fn next_threshold(points: i64) -> i64 {
    points.saturating_add(points / 2)
}

/// Applies a quiz submission to a student's statistics.
///
/// Counters are incremented, the difficulty-weighted XP is added, and the
/// level threshold is rolled over as many times as the new XP allows.
/// Counters saturate at `i64::MAX` instead of overflowing.
pub fn apply_accrual(mut stats: StudentStats, fact: &SubmissionFact) -> Accrual {
    let xp_gained = fact
        .correct_count
        .saturating_mul(XP_PER_CORRECT)
        .saturating_mul(fact.difficulty.multiplier());

    stats.total_completed = stats.total_completed.saturating_add(fact.questions_count);
    stats.duration_seconds = stats.duration_seconds.saturating_add(fact.time_spent_seconds);

    let solved = match fact.difficulty {
        Difficulty::Easy => Some(&mut stats.easy_solved),
        Difficulty::Medium => Some(&mut stats.medium_solved),
        Difficulty::Hard => Some(&mut stats.hard_solved),
        Difficulty::Unknown => None,
    };
    if let Some(counter) = solved {
        *counter = counter.saturating_add(fact.correct_count);
    }

    // A corrupted threshold would make the loop below spin forever.
    if stats.next_level_points <= 0 {
        stats.next_level_points = BASE_LEVEL_POINTS;
    }

    stats.experience_points = stats.experience_points.saturating_add(xp_gained);

    let mut levels_gained = 0;
    while stats.experience_points >= stats.next_level_points {
        stats.experience_points -= stats.next_level_points;
        stats.next_level_points = next_threshold(stats.next_level_points);
        levels_gained += 1;
    }

    Accrual {
        stats,
        xp_gained,
        levels_gained,
    }
}

/// Level index k such that `next_level_points` is the k-th threshold
/// (0 for a fresh account).
pub fn level_index(next_level_points: i64) -> u32 {
    let mut threshold = BASE_LEVEL_POINTS;
    let mut level = 0;
    while threshold < next_level_points {
        threshold = next_threshold(threshold);
        level += 1;
    }
    level
}
