//! Monte Carlo tree search (UCT) for two-player, deterministic, zero-sum games
//! with complete information.
//!
//! Games implement [`game::GameState`]; [`strategies::uct::search`] picks a
//! move for any of them. The selection step can blend UCB1 with an
//! instability heuristic such as the standard deviation of a node's rollout
//! outcomes.
//!
//! ```
//! use rand::SeedableRng;
//! use rand_xorshift::XorShiftRng;
//! use uctai::game::tictactoe::TicTacToe;
//! use uctai::strategies::uct::{search, heuristic, SearchParams};
//!
//! let mut rng = XorShiftRng::seed_from_u64(7);
//! let params = SearchParams { blend_weight: 0.1, ..SearchParams::with_iterations(200) };
//! let mv = search(&TicTacToe::new(), &params, &heuristic::std_dev, &mut rng).unwrap();
//! assert!(mv < 9);
//! ```

pub mod error;
pub mod experiment;
pub mod game;
pub mod runner;
pub mod strategies;

pub use error::{ExperimentError, SearchError};
