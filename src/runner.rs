use crate::error::SearchError;
use crate::game::{GameState, PlayerId};
use crate::strategies::{Strategy, Uct, UctParams};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, trace};

pub trait Player<G: GameState> {
    fn choose_move(&mut self, game: &G) -> Result<G::Move, SearchError>;
    fn display_name(&self) -> &str;
    fn player_type(&self) -> &str;
    fn full_name(&self) -> String {
        format!("{} ({})", self.display_name(), self.player_type())
    }
}

pub struct AIPlayer {
    name: String,
    strategy: Uct,
}

impl AIPlayer {
    pub fn new(name: &str, params: UctParams) -> Self {
        AIPlayer {
            name: String::from(name),
            strategy: Uct::new(params),
        }
    }

    pub fn params(&self) -> &UctParams {
        &self.strategy.params
    }
}

impl<G: GameState> Player<G> for AIPlayer {
    fn choose_move(&mut self, game: &G) -> Result<G::Move, SearchError> {
        let m = self.strategy.decide(game)?;
        debug!(player = %self.name, mv = ?m, "chose move");
        Ok(m)
    }

    fn display_name(&self) -> &str {
        self.name.as_str()
    }

    fn player_type(&self) -> &str {
        "UCT"
    }
}

/// How a finished match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner(PlayerId),
    Draw,
}

impl MatchOutcome {
    /// Numeric code used when aggregating matches: the winner's number, or
    /// 1.5 for a draw.
    pub fn code(&self) -> f64 {
        match *self {
            MatchOutcome::Winner(p) => p.number() as f64,
            MatchOutcome::Draw => 1.5,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MatchOutcome::Winner(p) => write!(f, "{} wins!", p),
            MatchOutcome::Draw => write!(f, "Nobody wins!"),
        }
    }
}

pub type Plr<'a, G> = &'a mut dyn Player<G>;

/// Alternates two players on one authoritative game until it is over.
pub struct Runner<'a, G: GameState + 'a> {
    board: G,
    players: (Plr<'a, G>, Plr<'a, G>),
    moves_played: u32,
}

impl<'a, G> Runner<'a, G>
where
    G: GameState + fmt::Display,
{
    /// `p1` plays as `PlayerId::One`, who moves first from a fresh position.
    pub fn new(board: G, p1: Plr<'a, G>, p2: Plr<'a, G>) -> Self {
        Runner {
            board,
            players: (p1, p2),
            moves_played: 0,
        }
    }

    pub fn board(&self) -> &G {
        &self.board
    }

    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    pub fn is_finished(&self) -> bool {
        self.board.is_terminal()
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        if !self.is_finished() {
            return None;
        }
        Some(match self.board.winner() {
            Some(p) => MatchOutcome::Winner(p),
            None => MatchOutcome::Draw,
        })
    }

    /// Asks the player to move for a move and applies it.
    pub fn step(&mut self) -> Result<G::Move, SearchError> {
        let m = match self.board.player_to_move() {
            PlayerId::One => self.players.0.choose_move(&self.board)?,
            PlayerId::Two => self.players.1.choose_move(&self.board)?,
        };
        self.board.do_move(&m);
        self.moves_played += 1;
        trace!("after move {}:\n{}", self.moves_played, self.board);
        Ok(m)
    }

    pub fn run(&mut self) -> Result<MatchOutcome, SearchError> {
        info!(
            "{} vs {}",
            self.players.0.full_name(),
            self.players.1.full_name()
        );
        loop {
            if let Some(outcome) = self.outcome() {
                info!(moves = self.moves_played, "{}", outcome);
                return Ok(outcome);
            }
            self.step()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::nim::Nim;
    use crate::game::tictactoe::TicTacToe;
    use crate::strategies::uct::SearchParams;

    fn player(name: &str, iterations: u32, seed: u64) -> AIPlayer {
        AIPlayer::new(
            name,
            UctParams {
                search: SearchParams::with_iterations(iterations),
                seed: Some(seed),
                ..Default::default()
            },
        )
    }

    /// Plays fixed squares and records the position it was asked about.
    struct Scripted {
        moves: Vec<usize>,
        seen: Vec<TicTacToe>,
    }

    impl Player<TicTacToe> for Scripted {
        fn choose_move(&mut self, game: &TicTacToe) -> Result<usize, SearchError> {
            self.seen.push(game.clone());
            Ok(self.moves.remove(0))
        }

        fn display_name(&self) -> &str {
            "scripted"
        }

        fn player_type(&self) -> &str {
            "Scripted"
        }
    }

    #[test]
    fn step_shows_each_player_the_live_board() {
        let mut p1 = Scripted { moves: vec![0, 1, 2], seen: Vec::new() };
        let mut p2 = Scripted { moves: vec![3, 4], seen: Vec::new() };
        let mut runner = Runner::new(TicTacToe::new(), &mut p1, &mut p2);
        let mut boards = vec![runner.board().clone()];
        while !runner.is_finished() {
            runner.step().unwrap();
            boards.push(runner.board().clone());
        }
        assert_eq!(runner.outcome(), Some(MatchOutcome::Winner(PlayerId::One)));
        assert_eq!(runner.moves_played(), 5);
        drop(runner);

        assert_eq!(p1.seen, vec![boards[0].clone(), boards[2].clone(), boards[4].clone()]);
        assert_eq!(p2.seen, vec![boards[1].clone(), boards[3].clone()]);
    }

    #[test]
    fn match_runs_to_completion() {
        let mut p1 = player("one", 100, 1);
        let mut p2 = player("two", 100, 2);
        let mut runner = Runner::new(TicTacToe::new(), &mut p1, &mut p2);
        let outcome = runner.run().unwrap();
        assert!(runner.is_finished());
        assert!(runner.moves_played() >= 5 && runner.moves_played() <= 9);
        assert_eq!(runner.outcome(), Some(outcome));
    }

    #[test]
    fn strong_first_player_wins_subtraction_nim() {
        // 7 chips, take up to 3: the first player wins by leaving a multiple
        // of four every turn.
        let mut p1 = player("strong", 3000, 3);
        let mut p2 = player("weak", 1, 4);
        let mut runner = Runner::new(Nim::subtraction(7, 3), &mut p1, &mut p2);
        assert_eq!(runner.run().unwrap(), MatchOutcome::Winner(PlayerId::One));
    }

    #[test]
    fn outcome_codes() {
        assert_eq!(MatchOutcome::Winner(PlayerId::One).code(), 1.0);
        assert_eq!(MatchOutcome::Winner(PlayerId::Two).code(), 2.0);
        assert_eq!(MatchOutcome::Draw.code(), 1.5);
        assert_eq!(MatchOutcome::Draw.to_string(), "Nobody wins!");
    }
}
