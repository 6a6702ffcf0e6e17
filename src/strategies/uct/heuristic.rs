//! Instability estimates computed from a node's rollout outcomes.
//!
//! A heuristic only sees [`NodeStats`] and must return a non-negative value.
//! Any `Fn(&NodeStats) -> f64` qualifies, so callers can plug in their own
//! without touching the search.

use super::stats::NodeStats;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub trait Heuristic {
    fn evaluate(&self, stats: &NodeStats) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(&NodeStats) -> f64,
{
    fn evaluate(&self, stats: &NodeStats) -> f64 {
        self(stats)
    }
}

pub fn zero(_: &NodeStats) -> f64 {
    0.0
}

/// Population standard deviation of the outcome distribution.
pub fn std_dev(stats: &NodeStats) -> f64 {
    let mean = match stats.mean() {
        Some(mean) => mean,
        None => return 0.0,
    };
    let sum_sq: f64 = stats
        .outcomes
        .iter()
        .map(|(value, count)| count as f64 * (value - mean).powi(2))
        .sum();
    (sum_sq / stats.visits as f64).sqrt()
}

/// Distance between the latest outcome and the running mean.
pub fn last_outcome_deviation(stats: &NodeStats) -> f64 {
    match (stats.mean(), stats.last_outcome) {
        (Some(mean), Some(last)) => (mean - last).abs(),
        _ => 0.0,
    }
}

/// The built-in heuristics, nameable from configuration and the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicKind {
    #[default]
    Zero,
    StdDev,
    LastOutcome,
}

impl Heuristic for HeuristicKind {
    fn evaluate(&self, stats: &NodeStats) -> f64 {
        match *self {
            HeuristicKind::Zero => zero(stats),
            HeuristicKind::StdDev => std_dev(stats),
            HeuristicKind::LastOutcome => last_outcome_deviation(stats),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            HeuristicKind::Zero => "zero",
            HeuristicKind::StdDev => "std-dev",
            HeuristicKind::LastOutcome => "last-outcome",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_of(results: &[f64]) -> NodeStats {
        let mut stats = NodeStats::default();
        for &r in results {
            stats.update(r);
        }
        stats
    }

    #[test]
    fn std_dev_of_known_distributions() {
        assert_eq!(std_dev(&stats_of(&[1.0, 0.0])), 0.5);
        assert_eq!(std_dev(&stats_of(&[1.0, 1.0, 1.0])), 0.0);
        // mean 0.5, squared deviations 0.25 + 0 + 0 + 0.25 over 4
        let s = std_dev(&stats_of(&[0.0, 0.5, 0.5, 1.0]));
        assert!((s - 0.125f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn last_outcome_deviation_follows_latest_result() {
        assert_eq!(last_outcome_deviation(&stats_of(&[1.0, 1.0, 1.0, 0.0])), 0.75);
        assert_eq!(last_outcome_deviation(&stats_of(&[0.0, 1.0])), 0.5);
    }

    #[test]
    fn unvisited_node_scores_zero() {
        let stats = NodeStats::default();
        assert_eq!(std_dev(&stats), 0.0);
        assert_eq!(last_outcome_deviation(&stats), 0.0);
    }

    #[test]
    fn kinds_and_closures_are_heuristics() {
        let stats = stats_of(&[1.0, 0.0, 0.0]);
        assert_eq!(HeuristicKind::Zero.evaluate(&stats), 0.0);
        assert_eq!(HeuristicKind::StdDev.evaluate(&stats), std_dev(&stats));
        assert_eq!(HeuristicKind::LastOutcome.evaluate(&stats), last_outcome_deviation(&stats));
        let visits = |s: &NodeStats| s.visits as f64;
        assert_eq!(visits.evaluate(&stats), 3.0);
    }

    #[test]
    fn kind_names_round_trip_through_serde() {
        let json = serde_json::to_string(&HeuristicKind::LastOutcome).unwrap();
        assert_eq!(json, "\"last-outcome\"");
        assert_eq!(HeuristicKind::StdDev.to_string(), "std-dev");
    }
}
