use super::*;
use std::fmt;

const DIRECTIONS: [(isize, isize); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];

/// Place a disc at `(row, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OthelloMove {
    pub row: usize,
    pub col: usize,
}

/// Othello on an even-sized square board. Player one plays the dark discs.
///
/// There is no passing: the game ends as soon as the player to move has no
/// capturing placement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Othello {
    size: usize,
    board: Vec<Option<PlayerId>>,
    just_moved: PlayerId,
}

impl Othello {
    pub fn new(size: usize) -> Self {
        assert!(size >= 4 && size % 2 == 0, "Othello needs an even board of at least 4, got {}", size);
        let mut game = Othello {
            size,
            board: vec![None; size * size],
            just_moved: PlayerId::Two,
        };
        let m = size / 2;
        game.set(m - 1, m - 1, PlayerId::Two);
        game.set(m, m, PlayerId::Two);
        game.set(m - 1, m, PlayerId::One);
        game.set(m, m - 1, PlayerId::One);
        game
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn get(&self, r: usize, c: usize) -> Option<PlayerId> {
        self.board[r * self.size + c]
    }

    fn set(&mut self, r: usize, c: usize, p: PlayerId) {
        self.board[r * self.size + c] = Some(p);
    }

    pub fn count(&self, p: PlayerId) -> usize {
        self.board.iter().filter(|&&s| s == Some(p)).count()
    }

    fn on_board(&self, r: isize, c: isize) -> bool {
        r >= 0 && c >= 0 && (r as usize) < self.size && (c as usize) < self.size
    }

    /// Discs of the opponent captured by `p` playing at `(r, c)`.
    fn captures(&self, r: usize, c: usize, p: PlayerId) -> Vec<(usize, usize)> {
        let mut flipped = Vec::new();
        if self.get(r, c).is_some() {
            return flipped;
        }
        for &(dr, dc) in DIRECTIONS.iter() {
            let mut line = Vec::new();
            let (mut x, mut y) = (r as isize + dr, c as isize + dc);
            while self.on_board(x, y) && self.get(x as usize, y as usize) == Some(p.opponent()) {
                line.push((x as usize, y as usize));
                x += dr;
                y += dc;
            }
            if !line.is_empty() && self.on_board(x, y) && self.get(x as usize, y as usize) == Some(p) {
                flipped.extend(line);
            }
        }
        flipped
    }

    fn placements(&self, p: PlayerId) -> Vec<OthelloMove> {
        let mut moves = Vec::new();
        for r in 0..self.size {
            for c in 0..self.size {
                if !self.captures(r, c, p).is_empty() {
                    moves.push(OthelloMove { row: r, col: c });
                }
            }
        }
        moves
    }
}

impl fmt::Display for Othello {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Just moved: {}", self.just_moved)?;
        for r in 0..self.size {
            for c in 0..self.size {
                let ch = match self.get(r, c) {
                    None => '.',
                    Some(PlayerId::One) => 'X',
                    Some(PlayerId::Two) => 'O',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl GameState for Othello {
    type Move = OthelloMove;

    fn do_move(&mut self, mv: &OthelloMove) {
        let mover = self.just_moved.opponent();
        let flipped = self.captures(mv.row, mv.col, mover);
        assert!(!flipped.is_empty(), "Illegal placement at ({}, {}).", mv.row, mv.col);
        self.set(mv.row, mv.col, mover);
        for (x, y) in flipped {
            self.set(x, y, mover);
        }
        self.just_moved = mover;
    }

    fn moves(&self) -> Vec<OthelloMove> {
        self.placements(self.just_moved.opponent())
    }

    fn result(&self, player: PlayerId) -> f64 {
        let mine = self.count(player);
        let theirs = self.count(player.opponent());
        if mine > theirs {
            WIN
        } else if mine < theirs {
            LOSS
        } else {
            DRAW
        }
    }

    fn player_just_moved(&self) -> PlayerId {
        self.just_moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_has_four_moves() {
        let game = Othello::new(8);
        assert_eq!(game.moves().len(), 4);
        assert_eq!(game.count(PlayerId::One), 2);
        assert_eq!(game.count(PlayerId::Two), 2);
    }

    #[test]
    fn placement_flips() {
        let mut game = Othello::new(4);
        // Dark plays above the light disc at (1, 1), sandwiching it against (2, 1).
        game.do_move(&OthelloMove { row: 0, col: 1 });
        assert_eq!(game.count(PlayerId::One), 4);
        assert_eq!(game.count(PlayerId::Two), 1);
        assert_eq!(game.player_just_moved(), PlayerId::One);
    }

    #[test]
    fn no_placement_ends_the_game() {
        let mut game = Othello {
            size: 4,
            board: vec![None; 16],
            just_moved: PlayerId::Two,
        };
        // Dark cannot flank light discs sitting in corners, though light
        // could still capture at (0, 2).
        game.set(0, 0, PlayerId::Two);
        game.set(0, 1, PlayerId::One);
        game.set(3, 3, PlayerId::Two);
        assert!(!game.placements(PlayerId::Two).is_empty());
        assert!(game.moves().is_empty());
        assert!(game.is_terminal());
        assert_eq!(game.winner(), Some(PlayerId::Two));
        assert_eq!(game.result(PlayerId::One), LOSS);
    }

    #[test]
    fn full_game_terminates() {
        use rand::SeedableRng;
        let mut rng = rand_xorshift::XorShiftRng::seed_from_u64(11);
        let mut game = Othello::new(4);
        game.rollout(&mut rng);
        assert!(game.is_terminal());
        let total = game.result(PlayerId::One) + game.result(PlayerId::Two);
        assert!((total - 1.0).abs() < 1e-9);
    }
}
