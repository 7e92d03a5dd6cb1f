//! The packed-cell incremental engine, after Michael Abrash.
//!
//! Every cell stores its own neighbor count, kept up to date whenever a cell
//! is born or dies. A step only re-examines the neighborhoods of the cells
//! that changed in the previous step, so its cost is proportional to the
//! boundary of the living region rather than to the area of the grid.

mod cell;

use crate::{
    config::EngineKind,
    rules::Rule,
    snapshot::Snapshot,
    traits::{Coord, Life},
};
use cell::Cell;
use log::trace;
use std::mem;

/// Offsets of the Moore neighborhood.
const NBHD: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The packed-cell engine.
#[derive(Clone, Debug)]
pub struct Abrash {
    width: i32,
    height: i32,

    rule: Rule,

    /// `(width + 2) * (height + 2)` cells, row-major.
    ///
    /// The outermost rows and columns are a border of cells that are always
    /// dead, so that updating the neighbors of a cell needs no bounds check.
    cells: Vec<Cell>,

    /// Padded coordinates of the cells that changed in the last step
    /// or were set since then. Might have duplicates.
    changes: Vec<(usize, usize)>,

    /// Scratch buffer for the cells changing in the step in progress.
    pending: Vec<(usize, usize)>,
}

impl Abrash {
    /// Creates an empty world with Conway's rule.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is not positive.
    pub fn new(width: i32, height: i32) -> Self {
        Abrash::with_rule(width, height, Rule::conway())
    }

    /// Creates an empty world with the given rule.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is not positive, or if the rule
    /// contains `B0`.
    pub fn with_rule(width: i32, height: i32, rule: Rule) -> Self {
        assert!(width > 0 && height > 0, "width and height must be positive");
        assert!(!rule.has_b0(), "B0 rules are not supported");
        Abrash {
            width,
            height,
            rule,
            cells: vec![Cell::default(); (width as usize + 2) * (height as usize + 2)],
            changes: Vec::new(),
            pending: Vec::new(),
        }
    }

    #[inline]
    fn stride(&self) -> usize {
        self.width as usize + 2
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.stride() + x
    }

    /// Converts a coordinate to padded coordinates, if it is inside the grid.
    fn padded(&self, (x, y): Coord) -> Option<(usize, usize)> {
        if 0 <= x && x < self.width && 0 <= y && y < self.height {
            Some((x as usize + 1, y as usize + 1))
        } else {
            None
        }
    }

    /// Makes a dead cell come alive. Does nothing if it is already alive.
    fn become_alive(&mut self, x: usize, y: usize) {
        let i = self.index(x, y);
        if self.cells[i].state() {
            return;
        }
        self.cells[i] = self.cells[i].make_alive();
        self.update_nbhd(x, y, Cell::increment);
        self.changes.push((x, y));
    }

    /// Makes a living cell die. Does nothing if it is already dead.
    fn become_dead(&mut self, x: usize, y: usize) {
        let i = self.index(x, y);
        if !self.cells[i].state() {
            return;
        }
        self.cells[i] = self.cells[i].make_dead();
        self.update_nbhd(x, y, Cell::decrement);
        self.changes.push((x, y));
    }

    /// Applies `f` to the eight neighbors of a cell.
    #[inline]
    fn update_nbhd(&mut self, x: usize, y: usize, f: fn(Cell) -> Cell) {
        let stride = self.stride() as isize;
        let center = self.index(x, y) as isize;
        for (dx, dy) in NBHD {
            let j = (center + dy * stride + dx) as usize;
            self.cells[j] = f(self.cells[j]);
        }
    }
}

impl Life for Abrash {
    fn kind(&self) -> EngineKind {
        EngineKind::Abrash
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = Cell::default());
        self.changes.clear();
        self.pending.clear();
    }

    fn get(&self, coord: Coord) -> bool {
        self.padded(coord)
            .map_or(false, |(x, y)| self.cells[self.index(x, y)].state())
    }

    fn set(&mut self, coord: Coord, alive: bool) {
        if let Some((x, y)) = self.padded(coord) {
            if alive {
                self.become_alive(x, y);
            } else {
                self.become_dead(x, y);
            }
        }
    }

    fn step(&mut self) {
        let stride = self.stride();
        let (max_x, max_y) = (self.width as usize + 1, self.height as usize + 1);
        let mut pending = mem::take(&mut self.pending);
        pending.clear();

        // First pass: stamp the next state of every cell around a change.
        // Counts are only read here.
        for &(cx, cy) in &self.changes {
            for y in (cy - 1).max(1)..(cy + 2).min(max_y) {
                for x in (cx - 1).max(1)..(cx + 2).min(max_x) {
                    let i = y * stride + x;
                    let cell = self.cells[i];
                    let next = self.rule.next(cell.state(), cell.count());
                    if next != cell.state() {
                        self.cells[i] = cell.with_next(next);
                        pending.push((x, y));
                    }
                }
            }
        }

        trace!(
            "abrash: {} changes examined, {} pending",
            self.changes.len(),
            pending.len()
        );
        self.changes.clear();

        // Second pass: apply the changes, which updates the counts and
        // records the new change set.
        for &(x, y) in &pending {
            if self.cells[self.index(x, y)].next() {
                self.become_alive(x, y);
            } else {
                self.become_dead(x, y);
            }
        }

        self.pending = pending;
    }

    fn render(&self, snapshot: &mut Snapshot) {
        debug_assert_eq!(
            (snapshot.width(), snapshot.height()),
            (self.width, self.height)
        );
        snapshot.clear();
        let stride = self.stride();
        for (y, row) in self
            .cells
            .chunks_exact(stride)
            .enumerate()
            .skip(1)
            .take(self.height as usize)
        {
            for (x, cell) in row[1..stride - 1].iter().enumerate() {
                if cell.state() {
                    snapshot.set((x as i32, y as i32 - 1), true);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{ACORN, BLINKER, R_PENTOMINO};

    impl Abrash {
        /// Recounts the neighbors of every cell and compares them with the
        /// stored counts, including the border.
        fn assert_counts(&self) {
            let stride = self.stride() as isize;
            let rows = self.height as isize + 2;
            for y in 0..rows {
                for x in 0..stride {
                    let count = NBHD
                        .iter()
                        .map(|(dx, dy)| (x + dx, y + dy))
                        .filter(|&(nx, ny)| 0 <= nx && nx < stride && 0 <= ny && ny < rows)
                        .filter(|&(nx, ny)| self.cells[(ny * stride + nx) as usize].state())
                        .count();
                    let cell = self.cells[(y * stride + x) as usize];
                    assert_eq!(cell.count() as usize, count, "count at ({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn counts_stay_exact() {
        let mut life = Abrash::new(36, 36);
        BLINKER.place(&mut life, (0, 2));
        ACORN.place(&mut life, (15, 15));
        R_PENTOMINO.place(&mut life, (33, 35));
        life.assert_counts();
        for _ in 0..300 {
            life.step();
            life.assert_counts();
        }
    }

    #[test]
    fn redundant_set_records_nothing() {
        let mut life = Abrash::new(8, 8);
        life.set((3, 3), true);
        assert_eq!(life.changes.len(), 1);
        let cells = life.cells.clone();
        life.set((3, 3), true);
        life.set((4, 4), false);
        life.set((-1, 3), true);
        assert_eq!(life.changes.len(), 1);
        assert_eq!(life.cells, cells);
    }

    #[test]
    fn lone_cell_dies_and_settles() {
        let mut life = Abrash::new(5, 5);
        life.set((2, 2), true);
        life.step();
        assert_eq!(life.population(), 0);
        assert_eq!(life.changes, vec![(3, 3)]);
        life.step();
        assert!(life.changes.is_empty());
        life.assert_counts();
    }
}
