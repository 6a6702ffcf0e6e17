use super::*;
use std::fmt;

/// Take `count` objects from heap `heap`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Take {
    pub heap: usize,
    pub count: u32,
}

/// Normal-play Nim: whoever takes the last object wins.
///
/// `max_take` caps how many objects one move may remove, which turns a single
/// heap into the classic subtraction game.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Nim {
    heaps: Vec<u32>,
    max_take: Option<u32>,
    just_moved: PlayerId,
}

impl Nim {
    pub fn new(heaps: Vec<u32>) -> Self {
        Nim {
            heaps,
            max_take: None,
            just_moved: PlayerId::Two,
        }
    }

    /// One heap of `chips`, taking between 1 and `max_take` per move.
    pub fn subtraction(chips: u32, max_take: u32) -> Self {
        assert!(max_take >= 1, "max_take must allow at least one chip");
        Nim {
            heaps: vec![chips],
            max_take: Some(max_take),
            just_moved: PlayerId::Two,
        }
    }

    pub fn heaps(&self) -> &[u32] {
        &self.heaps
    }

    /// XOR of the heap sizes. Zero means the player to move loses under
    /// perfect play (without a take limit).
    pub fn nim_sum(&self) -> u32 {
        self.heaps.iter().fold(0, |acc, h| acc ^ h)
    }
}

impl fmt::Display for Nim {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Heaps: {:?} Just moved: {}", self.heaps, self.just_moved)
    }
}

impl GameState for Nim {
    type Move = Take;

    fn do_move(&mut self, mv: &Take) {
        let heap = &mut self.heaps[mv.heap];
        assert!(
            mv.count >= 1 && mv.count <= *heap,
            "Cannot take {} from a heap of {}.",
            mv.count,
            heap
        );
        *heap -= mv.count;
        self.just_moved = self.just_moved.opponent();
    }

    fn moves(&self) -> Vec<Take> {
        let limit = self.max_take.unwrap_or(u32::MAX);
        self.heaps
            .iter()
            .enumerate()
            .flat_map(|(heap, &size)| (1..=size.min(limit)).map(move |count| Take { heap, count }))
            .collect()
    }

    fn result(&self, player: PlayerId) -> f64 {
        debug_assert!(self.heaps.iter().all(|&h| h == 0), "result of an unfinished game");
        if player == self.just_moved {
            WIN
        } else {
            LOSS
        }
    }

    fn player_just_moved(&self) -> PlayerId {
        self.just_moved
    }
}
