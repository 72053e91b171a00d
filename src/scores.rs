//! Score aggregation over a completed coverage map.
//!
//! Each score is an independent view over the same coverage; none depends on
//! another.
use crate::coverage::Coverage;
use crate::units::{self, CORE_WEIGHTS, CRITICAL_UNITS, SUPPLY_WEIGHTS};
use serde::Serialize;

/// Mean status score over `keys`. Keys absent from `coverage` count as 0.0.
pub fn unweighted_average(coverage: &Coverage, keys: &[&str]) -> f64 {
    if keys.is_empty() {
        return 0.0;
    }
    let total: f64 = keys
        .iter()
        .map(|key| coverage.get(key).map_or(0.0, |entry| entry.score))
        .sum();
    total / keys.len() as f64
}

/// Σ(score × weight) / Σ(weight) over weight keys present in `coverage`.
pub fn weighted_average(coverage: &Coverage, weights: &[(&str, f64)]) -> f64 {
    let (weighted, weight_sum) = weights
        .iter()
        .filter_map(|(key, weight)| coverage.get(key).map(|entry| (entry.score, *weight)))
        .fold((0.0, 0.0), |(weighted, weight_sum), (score, weight)| {
            (weighted + score * weight, weight_sum + weight)
        });
    if weight_sum > 0.0 {
        weighted / weight_sum
    } else {
        0.0
    }
}

/// The four headline scores, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scores {
    /// Auditability: all nine units, unweighted.
    pub a_score: f64,
    /// Accountability-critical: planning, control, version, integrity.
    pub c_score: f64,
    /// On-scene responsibility determinability.
    pub core: f64,
    /// Supply-chain responsibility determinability.
    pub supply: f64,
}

impl Scores {
    pub fn from_coverage(coverage: &Coverage) -> Self {
        Self {
            a_score: unweighted_average(coverage, &units::all_unit_keys()),
            c_score: unweighted_average(coverage, &CRITICAL_UNITS),
            core: weighted_average(coverage, &CORE_WEIGHTS),
            supply: weighted_average(coverage, &SUPPLY_WEIGHTS),
        }
    }
}

/// Render a `[0, 1]` score as a percentage with one decimal.
pub fn pct(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}
