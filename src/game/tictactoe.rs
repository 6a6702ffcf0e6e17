use super::*;
use std::default::Default;
use std::fmt;

pub const SIZE: usize = 3;
pub const REQ: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Square(Option<PlayerId>);

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            None => write!(f, "."),
            Some(PlayerId::One) => write!(f, "X"),
            Some(PlayerId::Two) => write!(f, "O"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    board: [Square; SIZE * SIZE],
}

impl Board {
    pub fn get(&self, i: usize, j: usize) -> Square {
        self.board[i * SIZE + j]
    }

    pub fn set(&mut self, i: usize, j: usize, p: PlayerId) {
        self.board[i * SIZE + j] = Square(Some(p));
    }

    fn is_full(&self) -> bool {
        self.board.iter().all(|s| s.0.is_some())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board { board: [Square(None); SIZE * SIZE] }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for i in 0..SIZE {
            for j in 0..SIZE {
                write!(f, "{}", self.get(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Noughts and crosses. Squares are numbered row-major from 0 to 8.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct TicTacToe {
    state: Board,
    just_moved: PlayerId,
    winner: Option<PlayerId>,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToe {
    pub fn new() -> Self {
        TicTacToe {
            state: Board::default(),
            just_moved: PlayerId::Two,
            winner: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.state
    }

    fn has_won(&self, p: PlayerId) -> bool {
        let value = |i: usize, j: isize| {
            if i < SIZE && j >= 0 && (j as usize) < SIZE && self.state.get(i, j as usize) == Square(Some(p)) {
                1
            } else {
                0
            }
        };
        for i in 0..SIZE {
            for j in 0..SIZE as isize {
                let n = REQ as isize;
                if (0..n).map(|k| value(i, j + k)).sum::<usize>() == REQ {
                    return true;
                }
                if (0..n).map(|k| value(i + k as usize, j)).sum::<usize>() == REQ {
                    return true;
                }
                if (0..n).map(|k| value(i + k as usize, j + k)).sum::<usize>() == REQ {
                    return true;
                }
                if (0..n).map(|k| value(i + k as usize, j - k)).sum::<usize>() == REQ {
                    return true;
                }
            }
        }
        false
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Just moved: {}", self.just_moved)?;
        write!(f, "{}", self.state)
    }
}

impl GameState for TicTacToe {
    type Move = usize;

    fn do_move(&mut self, &mv: &usize) {
        let (i, j) = (mv / SIZE, mv % SIZE);
        if self.state.get(i, j).0.is_some() {
            panic!("Square {} is already taken.", mv);
        }
        self.just_moved = self.just_moved.opponent();
        self.state.set(i, j, self.just_moved);
        if self.has_won(self.just_moved) {
            self.winner = Some(self.just_moved);
        }
    }

    fn moves(&self) -> Vec<usize> {
        if self.winner.is_some() {
            return Vec::new();
        }
        (0..SIZE * SIZE)
            .filter(|&sq| self.state.get(sq / SIZE, sq % SIZE).0.is_none())
            .collect()
    }

    fn result(&self, player: PlayerId) -> f64 {
        match self.winner {
            Some(w) if w == player => WIN,
            Some(_) => LOSS,
            None => {
                debug_assert!(self.state.is_full(), "result of an unfinished game");
                DRAW
            }
        }
    }

    fn player_just_moved(&self) -> PlayerId {
        self.just_moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(moves: &[usize]) -> TicTacToe {
        let mut game = TicTacToe::new();
        for m in moves {
            game.do_move(m);
        }
        game
    }

    #[test]
    fn row_column_and_diagonals_win() {
        for line in [[0, 1, 2], [0, 3, 6], [0, 4, 8], [2, 4, 6]] {
            let filler: Vec<usize> = (0..9).filter(|s| !line.contains(s)).take(2).collect();
            let game = play(&[line[0], filler[0], line[1], filler[1], line[2]]);
            assert!(game.is_terminal(), "{:?}", line);
            assert_eq!(game.result(PlayerId::One), WIN);
            assert_eq!(game.result(PlayerId::Two), LOSS);
            assert_eq!(game.winner(), Some(PlayerId::One));
        }
    }

    #[test]
    fn full_board_is_a_draw() {
        // X O X / X O O / O X X
        let game = play(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert!(game.is_terminal());
        assert_eq!(game.result(PlayerId::One), DRAW);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn players_alternate() {
        let mut game = TicTacToe::new();
        assert_eq!(game.player_just_moved(), PlayerId::Two);
        game.do_move(&4);
        assert_eq!(game.player_just_moved(), PlayerId::One);
        assert_eq!(game.moves().len(), 8);
    }
}
