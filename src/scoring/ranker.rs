use std::cmp::Ordering;

use crate::players::PlayerRecord;
use crate::roles::Role;

pub const DEFAULT_TOP_N: usize = 10;
/// Hard cap on list length, whatever the caller asks for
pub const MAX_TOP_N: usize = 1000;

/// One ranked player for one role. Borrows from the dataset and the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult<'a> {
    pub player: &'a PlayerRecord,
    pub role: &'a Role,
    pub score: f64,
    pub rank: usize, // 1-based
    pub diff_to_first_pct: f64,
}

/// Sort by score descending, keep the first `top_n`, and annotate each entry with
/// its percentage gap to the leader.
///
/// Ties keep their input (dataset) order; no secondary key is applied.
/// `top_n` is capped at `MAX_TOP_N`; 0 keeps nothing.
pub fn rank<'a>(
    role: &'a Role,
    mut scored: Vec<(&'a PlayerRecord, f64)>,
    top_n: usize,
) -> Vec<ScoreResult<'a>> {
    // sort_by is stable
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(top_n.min(MAX_TOP_N));

    let Some(&(_, top_score)) = scored.first() else {
        return Vec::new();
    };

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (player, score))| ScoreResult {
            player,
            role,
            score,
            rank: i + 1,
            diff_to_first_pct: diff_to_first_pct(top_score, score),
        })
        .collect()
}

/// `100 * (top - score) / top`, or 0 when the top score is 0
pub fn diff_to_first_pct(top_score: f64, score: f64) -> f64 {
    if top_score == 0.0 {
        0.0
    } else {
        100.0 * (top_score - score) / top_score
    }
}
