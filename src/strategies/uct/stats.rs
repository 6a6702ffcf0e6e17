//! Per-node rollout statistics.

use std::fmt;

/// Occurrence counts of backpropagated result values.
///
/// Games report a handful of distinct results (usually 0, 0.5 and 1), so a
/// small vector beats hashing floats. Values are compared exactly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outcomes {
    counts: Vec<(f64, u32)>,
}

impl Outcomes {
    pub fn record(&mut self, value: f64) {
        match self.counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((value, 1)),
        }
    }

    pub fn count(&self, value: f64) -> u32 {
        self.counts
            .iter()
            .find(|(v, _)| *v == value)
            .map(|&(_, c)| c)
            .unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&(_, c)| c).sum()
    }

    /// `(value, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, u32)> + '_ {
        self.counts.iter().copied()
    }
}

/// Visit and result bookkeeping for one tree node. Results are always seen
/// from the node's `player_just_moved`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStats {
    pub visits: u32,
    pub win_score: f64,
    pub outcomes: Outcomes,
    pub last_outcome: Option<f64>,
}

impl NodeStats {
    pub fn update(&mut self, result: f64) {
        self.visits += 1;
        self.win_score += result;
        self.outcomes.record(result);
        self.last_outcome = Some(result);
    }

    /// Mean of the outcome distribution, `None` before the first visit.
    pub fn mean(&self) -> Option<f64> {
        if self.visits == 0 {
            return None;
        }
        let sum: f64 = self.outcomes.iter().map(|(v, c)| v * c as f64).sum();
        Some(sum / self.visits as f64)
    }

    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.win_score / self.visits as f64
        }
    }
}

impl fmt::Display for NodeStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.win_score, self.visits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_tracks_everything() {
        let mut stats = NodeStats::default();
        assert_eq!(stats.mean(), None);
        for r in [1.0, 0.0, 1.0, 0.5] {
            stats.update(r);
        }
        assert_eq!(stats.visits, 4);
        assert_eq!(stats.win_score, 2.5);
        assert_eq!(stats.outcomes.count(1.0), 2);
        assert_eq!(stats.outcomes.count(0.5), 1);
        assert_eq!(stats.outcomes.count(0.25), 0);
        assert_eq!(stats.outcomes.total(), stats.visits);
        assert_eq!(stats.last_outcome, Some(0.5));
        assert_eq!(stats.mean(), Some(0.625));
        assert_eq!(stats.win_rate(), 0.625);
        assert_eq!(stats.to_string(), "2.5/4");
    }
}
