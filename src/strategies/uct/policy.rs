use super::heuristic::Heuristic;
use super::stats::NodeStats;

/// UCB1 value of a child visited at least once under a parent visited
/// `parent_visits` times.
pub fn ucb1(parent_visits: u32, child: &NodeStats) -> f64 {
    debug_assert!(child.visits > 0, "UCB1 of an unvisited child");
    let n = child.visits as f64;
    let exploit = child.win_score / n;
    let explore = (2.0 * (parent_visits as f64).ln() / n).sqrt();
    exploit + explore
}

/// Scores children as `(1 - w) * ucb1 + w * heuristic`.
pub struct SelectionPolicy<'h, H: ?Sized> {
    pub heuristic: &'h H,
    pub blend_weight: f64,
}

impl<'h, H: Heuristic + ?Sized> SelectionPolicy<'h, H> {
    pub fn new(heuristic: &'h H, blend_weight: f64) -> Self {
        SelectionPolicy { heuristic, blend_weight }
    }

    pub fn score(&self, parent_visits: u32, child: &NodeStats) -> f64 {
        let w = self.blend_weight;
        let ucb = ucb1(parent_visits, child);
        if w == 0.0 {
            return ucb;
        }
        (1.0 - w) * ucb + w * self.heuristic.evaluate(child)
    }
}
