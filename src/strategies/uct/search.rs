use super::heuristic::{zero, Heuristic};
use super::policy::SelectionPolicy;
use super::tree::Tree;
use crate::error::SearchError;
use crate::game::GameState;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Budget and blending for one search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub iterations: u32,
    /// Weight of the heuristic term against UCB1, in `[0, 1]`.
    pub blend_weight: f64,
    /// Stop early once this many milliseconds have passed. At least one
    /// iteration always runs.
    pub time_limit_ms: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            iterations: 1000,
            blend_weight: 0.0,
            time_limit_ms: None,
        }
    }
}

impl SearchParams {
    pub fn with_iterations(iterations: u32) -> Self {
        SearchParams {
            iterations,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.iterations == 0 {
            return Err(SearchError::ZeroIterations);
        }
        if !(0.0..=1.0).contains(&self.blend_weight) {
            return Err(SearchError::InvalidBlendWeight(self.blend_weight));
        }
        Ok(())
    }

    fn deadline(&self, start: Instant) -> Option<Instant> {
        self.time_limit_ms.map(|ms| start + Duration::from_millis(ms))
    }
}

/// What a finished search leaves behind.
#[derive(Clone, Debug)]
pub struct SearchResult<M> {
    pub best_move: M,
    pub tree: Tree<M>,
    pub iterations: u32,
    pub elapsed: Duration,
}

pub struct UctSearch<'h, H: ?Sized> {
    params: SearchParams,
    heuristic: &'h H,
}

impl<'h, H: Heuristic + ?Sized> UctSearch<'h, H> {
    pub fn new(params: SearchParams, heuristic: &'h H) -> Self {
        UctSearch { params, heuristic }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Grows a fresh tree from `root_state` and picks the most visited move.
    pub fn run<G, R>(&self, root_state: &G, rng: &mut R) -> Result<SearchResult<G::Move>, SearchError>
    where
        G: GameState,
        R: Rng,
    {
        self.params.validate()?;
        let mut tree = Tree::new(root_state);
        if tree.get(tree.root()).is_terminal() {
            return Err(SearchError::NoLegalMoves);
        }

        let policy = SelectionPolicy::new(self.heuristic, self.params.blend_weight);
        let start = Instant::now();
        let deadline = self.params.deadline(start);
        let mut done = 0;
        while done < self.params.iterations {
            if done > 0 && deadline.map_or(false, |d| Instant::now() >= d) {
                break;
            }
            self.iterate(&mut tree, root_state, &policy, rng);
            done += 1;
        }
        let elapsed = start.elapsed();

        trace!("root children:\n{}", tree.children_to_string());
        let best_move = tree
            .most_visited_child()
            .and_then(|child| child.mv.clone())
            .ok_or(SearchError::NoLegalMoves)?;
        debug!(
            iterations = done,
            nodes = tree.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            best = ?best_move,
            "search finished"
        );

        Ok(SearchResult {
            best_move,
            tree,
            iterations: done,
            elapsed,
        })
    }

    fn iterate<G, R>(&self, tree: &mut Tree<G::Move>, root_state: &G, policy: &SelectionPolicy<H>, rng: &mut R)
    where
        G: GameState,
        R: Rng,
    {
        let mut node = tree.root();
        let mut state = root_state.clone();

        while tree.get(node).is_fully_expanded() && !tree.get(node).children.is_empty() {
            node = tree.select(node, policy);
            if let Some(ref mv) = tree.get(node).mv {
                state.do_move(mv);
            }
        }

        let untried = &tree.get(node).untried;
        if !untried.is_empty() {
            let mv = untried[rng.gen_range(0..untried.len())].clone();
            state.do_move(&mv);
            node = tree.expand(node, mv, &state);
        }

        state.rollout(rng);
        tree.backpropagate(node, &state);
    }
}

/// Runs one UCT search and returns the chosen move, dropping the tree.
pub fn search<G, H, R>(root_state: &G, params: &SearchParams, heuristic: &H, rng: &mut R) -> Result<G::Move, SearchError>
where
    G: GameState,
    H: Heuristic + ?Sized,
    R: Rng,
{
    UctSearch::new(params.clone(), heuristic)
        .run(root_state, rng)
        .map(|result| result.best_move)
}

/// Plain UCT without a heuristic term.
pub fn search_plain<G, R>(root_state: &G, iterations: u32, rng: &mut R) -> Result<G::Move, SearchError>
where
    G: GameState,
    R: Rng,
{
    search(root_state, &SearchParams::with_iterations(iterations), &zero, rng)
}
