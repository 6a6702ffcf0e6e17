use super::*;
use std::fmt;

const HEIGHT: usize = 6;
const WIDTH: usize = 7;
const NEEDED: usize = 4;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Slot {
    Empty,
    Full(PlayerId),
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Slot::Empty => write!(f, " "),
            Slot::Full(PlayerId::One) => write!(f, "X"),
            Slot::Full(PlayerId::Two) => write!(f, "@"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct C4Board {
    // board[0] is the bottom row.
    board: [[Slot; WIDTH]; HEIGHT],
}

impl C4Board {
    fn get(&self, row: usize, col: usize) -> Slot {
        self.board[row][col]
    }

    fn set(&mut self, row: usize, col: usize, p: PlayerId) {
        self.board[row][col] = Slot::Full(p);
    }

    fn drop_row(&self, col: usize) -> Option<usize> {
        (0..HEIGHT).find(|&row| self.get(row, col) == Slot::Empty)
    }
}

impl fmt::Display for C4Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let dashes: String = (0..WIDTH * 3).map(|_| "-").collect();
        for row in self.board.iter().rev() {
            write!(f, "|")?;
            for slot in row.iter() {
                write!(f, " {} ", slot)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "|{}|", dashes.as_str())?;
        write!(f, " ")?;
        for i in 0..WIDTH {
            write!(f, " {} ", i)?;
        }
        writeln!(f, " ")
    }
}

/// Connect Four on the standard 7 by 6 board. A move is a column index.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ConnectFour {
    state: C4Board,
    just_moved: PlayerId,
    winner: Option<PlayerId>,
    filled: usize,
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectFour {
    pub fn new() -> Self {
        ConnectFour {
            state: C4Board { board: [[Slot::Empty; WIDTH]; HEIGHT] },
            just_moved: PlayerId::Two,
            winner: None,
            filled: 0,
        }
    }

    /// Whether the disc just placed at `(row, col)` completes a line.
    fn completes_line(&self, row: usize, col: usize) -> bool {
        let color = self.state.get(row, col);
        let run = |dr: isize, dc: isize| {
            let mut count = 0;
            let (mut r, mut c) = (row as isize + dr, col as isize + dc);
            while r >= 0
                && c >= 0
                && (r as usize) < HEIGHT
                && (c as usize) < WIDTH
                && self.state.get(r as usize, c as usize) == color
            {
                count += 1;
                r += dr;
                c += dc;
            }
            count
        };
        [(0, 1), (1, 0), (1, 1), (1, -1)]
            .iter()
            .any(|&(dr, dc)| 1 + run(dr, dc) + run(-dr, -dc) >= NEEDED)
    }
}

impl fmt::Display for ConnectFour {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Just moved: {}", self.just_moved)?;
        write!(f, "{}", self.state)
    }
}

impl GameState for ConnectFour {
    type Move = usize;

    fn do_move(&mut self, &col: &usize) {
        let row = match self.state.drop_row(col) {
            Some(row) => row,
            None => panic!("Column {} is full.", col),
        };
        self.just_moved = self.just_moved.opponent();
        self.state.set(row, col, self.just_moved);
        self.filled += 1;
        if self.completes_line(row, col) {
            self.winner = Some(self.just_moved);
        }
    }

    fn moves(&self) -> Vec<usize> {
        if self.winner.is_some() {
            return Vec::new();
        }
        (0..WIDTH)
            .filter(|&col| self.state.get(HEIGHT - 1, col) == Slot::Empty)
            .collect()
    }

    fn result(&self, player: PlayerId) -> f64 {
        match self.winner {
            Some(w) if w == player => WIN,
            Some(_) => LOSS,
            None => {
                debug_assert_eq!(self.filled, WIDTH * HEIGHT, "result of an unfinished game");
                DRAW
            }
        }
    }

    fn player_just_moved(&self) -> PlayerId {
        self.just_moved
    }
}
