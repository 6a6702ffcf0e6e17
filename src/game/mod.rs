use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod connectfour;
pub mod nim;
pub mod othello;
pub mod tictactoe;

/// One of the two seats at the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn opponent(&self) -> PlayerId {
        match *self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn number(&self) -> u8 {
        match *self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Result value for a win, seen from the winner.
pub const WIN: f64 = 1.0;
/// Result value for a draw.
pub const DRAW: f64 = 0.5;
/// Result value for a loss, seen from the loser.
pub const LOSS: f64 = 0.0;

/// A position of a two-player, deterministic, zero-sum game with complete
/// information.
///
/// This is everything the search needs to know about a game. Player one moves
/// first, so a fresh position reports `PlayerId::Two` as the player who just
/// moved.
pub trait GameState: Clone {
    type Move: Clone + PartialEq + fmt::Debug;

    /// Applies `mv`, flipping `player_just_moved`.
    fn do_move(&mut self, mv: &Self::Move);

    /// Legal moves for the player to act. Empty iff the position is terminal.
    fn moves(&self) -> Vec<Self::Move>;

    /// Score in `[0, 1]` from `player`'s point of view. Only meaningful once
    /// `moves()` is empty.
    fn result(&self, player: PlayerId) -> f64;

    fn player_just_moved(&self) -> PlayerId;

    fn player_to_move(&self) -> PlayerId {
        self.player_just_moved().opponent()
    }

    fn is_terminal(&self) -> bool {
        self.moves().is_empty()
    }

    fn random_move<R: Rng>(&self, rng: &mut R) -> Option<Self::Move> {
        self.moves().choose(rng).cloned()
    }

    /// Plays uniformly random moves until the game is over.
    fn rollout<R: Rng>(&mut self, rng: &mut R) {
        while let Some(mv) = self.random_move(rng) {
            self.do_move(&mv);
        }
    }

    /// The winner of a finished game, `None` for a draw.
    fn winner(&self) -> Option<PlayerId> {
        let just_moved = self.player_just_moved();
        let score = self.result(just_moved);
        if score > DRAW {
            Some(just_moved)
        } else if score < DRAW {
            Some(just_moved.opponent())
        } else {
            None
        }
    }
}
