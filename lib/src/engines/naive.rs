//! The reference engine: recomputes every cell from scratch.

use crate::{
    config::EngineKind,
    rules::Rule,
    snapshot::Snapshot,
    traits::{Coord, Life},
};

/// A plain matrix of booleans, fully rescanned every generation.
///
/// Slow, but simple enough to be obviously correct. The other engines are
/// tested against it.
#[derive(Clone, Debug)]
pub struct Naive {
    rule: Rule,
    board: Snapshot,
}

impl Naive {
    /// Creates an empty world with Conway's rule.
    pub fn new(width: i32, height: i32) -> Self {
        Naive::with_rule(width, height, Rule::conway())
    }

    /// Creates an empty world with the given rule.
    pub fn with_rule(width: i32, height: i32, rule: Rule) -> Self {
        Naive {
            rule,
            board: Snapshot::new(width, height),
        }
    }

    fn living_neighbors(&self, (x, y): Coord) -> u8 {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if (dx, dy) != (0, 0) && self.board.get((x + dx, y + dy)) {
                    count += 1;
                }
            }
        }
        count
    }
}

impl Life for Naive {
    fn kind(&self) -> EngineKind {
        EngineKind::Naive
    }

    fn width(&self) -> i32 {
        self.board.width()
    }

    fn height(&self) -> i32 {
        self.board.height()
    }

    fn clear(&mut self) {
        self.board.clear();
    }

    fn get(&self, coord: Coord) -> bool {
        self.board.get(coord)
    }

    fn set(&mut self, coord: Coord, alive: bool) {
        self.board.set(coord, alive);
    }

    fn step(&mut self) {
        let mut board = Snapshot::new(self.width(), self.height());
        for y in 0..self.height() {
            for x in 0..self.width() {
                let count = self.living_neighbors((x, y));
                board.set((x, y), self.rule.next(self.board.get((x, y)), count));
            }
        }
        self.board = board;
    }

    fn render(&self, snapshot: &mut Snapshot) {
        snapshot.clear();
        for coord in self.board.live_cells() {
            snapshot.set(coord, true);
        }
    }
}
