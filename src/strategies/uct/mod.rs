//! UCT: Monte Carlo tree search guided by UCB1, optionally blended with an
//! instability heuristic computed from each node's rollout outcomes.
//!
//! Every call builds a private tree from the given position, runs a fixed
//! number of select, expand, rollout and backpropagate iterations, and answers
//! with the most visited root move. Nothing is kept between calls.

pub mod heuristic;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

pub use self::heuristic::{Heuristic, HeuristicKind};
pub use self::policy::SelectionPolicy;
pub use self::search::{search, search_plain, SearchParams, SearchResult, UctSearch};
pub use self::stats::{NodeStats, Outcomes};
pub use self::tree::{Node, NodeId, Tree};
