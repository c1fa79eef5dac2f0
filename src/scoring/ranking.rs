// src/scoring/ranking.rs

use serde::Serialize;

use super::{StudentStats, score};

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub rank: usize,
    pub username: String,
    pub display_name: String,
    pub score: f64,
    pub solved: i64,
    /// Acceptance ratio as a percentage, one decimal.
    pub accuracy: f64,
    /// Seconds per question, one decimal.
    pub avg_time: f64,
}

/// Ranks a population by composite score, highest first.
///
/// The sort is stable: students with equal scores keep their input order.
pub fn rank_population<I>(population: I) -> Vec<RankedEntry>
where
    I: IntoIterator<Item = (String, StudentStats)>,
{
    let mut entries: Vec<RankedEntry> = population
        .into_iter()
        .map(|(username, stats)| {
            let b = score::breakdown(&stats);
            RankedEntry {
                rank: 0,
                display_name: username.clone(),
                username,
                score: b.score,
                solved: b.total_solved,
                accuracy: score::round1(b.acceptance_ratio * 100.0),
                avg_time: score::round1(b.avg_time),
            }
        })
        .collect();

    entries.sort_by(|a, b| b.score.total_cmp(&a.score));

    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    entries
}

/// 1-based rank of `username` within the population, if present.
pub fn rank_of(population: &[(String, StudentStats)], username: &str) -> Option<usize> {
    rank_population(population.iter().cloned())
        .into_iter()
        .find(|entry| entry.username == username)
        .map(|entry| entry.rank)
}
