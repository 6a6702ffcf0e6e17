use crate::error::SearchError;
use crate::game::GameState;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde::{Deserialize, Serialize};

pub mod uct;

use self::uct::{HeuristicKind, SearchParams, UctSearch};

pub trait Strategy<G: GameState> {
    type Params;
    fn decide(&mut self, game: &G) -> Result<G::Move, SearchError>;
    fn create(params: Self::Params) -> Self;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UctParams {
    #[serde(flatten)]
    pub search: SearchParams,
    pub heuristic: HeuristicKind,
    /// Fixed seed for reproducible play. Drawn at random when absent.
    pub seed: Option<u64>,
}

/// A UCT player that owns its random number generator.
pub struct Uct {
    pub params: UctParams,
    rng: XorShiftRng,
}

impl Uct {
    pub fn new(params: UctParams) -> Self {
        let seed = params.seed.unwrap_or_else(rand::random);
        Uct {
            params,
            rng: XorShiftRng::seed_from_u64(seed),
        }
    }
}

impl<G: GameState> Strategy<G> for Uct {
    type Params = UctParams;

    fn decide(&mut self, game: &G) -> Result<G::Move, SearchError> {
        let search = UctSearch::new(self.params.search.clone(), &self.params.heuristic);
        search.run(game, &mut self.rng).map(|result| result.best_move)
    }

    fn create(params: UctParams) -> Self {
        Uct::new(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::connectfour::ConnectFour;

    fn seeded(seed: u64) -> Uct {
        <Uct as Strategy<ConnectFour>>::create(UctParams {
            search: SearchParams::with_iterations(150),
            heuristic: HeuristicKind::LastOutcome,
            seed: Some(seed),
        })
    }

    #[test]
    fn seeded_strategies_agree() {
        let game = ConnectFour::new();
        let mut a = seeded(21);
        let mut b = seeded(21);
        for _ in 0..3 {
            assert_eq!(a.decide(&game).unwrap(), b.decide(&game).unwrap());
        }
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: UctParams =
            serde_json::from_str(r#"{"iterations": 50, "blend_weight": 0.2, "heuristic": "std-dev"}"#).unwrap();
        assert_eq!(params.search.iterations, 50);
        assert_eq!(params.search.blend_weight, 0.2);
        assert_eq!(params.search.time_limit_ms, None);
        assert_eq!(params.heuristic, HeuristicKind::StdDev);
        assert_eq!(params.seed, None);
    }
}
