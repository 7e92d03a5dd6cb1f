//! A trait for all the engines.

use crate::{config::EngineKind, snapshot::Snapshot};

/// The coordinates of a cell.
///
/// `(x-coordinate, y-coordinate)`, both 0-indexed; `y` grows downwards.
/// Coordinates outside the grid are allowed everywhere and are clipped.
pub type Coord = (i32, i32);

/// A Game of Life engine.
///
/// So that we can switch between different engines using trait objects.
/// Seeding, rendering and driving code only ever talks to this trait.
///
/// None of these methods fail. Reading a cell outside the grid gives a dead
/// cell; writing a cell outside the grid does nothing.
pub trait Life {
    /// Which engine this is.
    fn kind(&self) -> EngineKind;

    /// Width of the grid.
    fn width(&self) -> i32;

    /// Height of the grid.
    fn height(&self) -> i32;

    /// Kills every cell and forgets all pending changes.
    fn clear(&mut self);

    /// Whether the cell is alive.
    fn get(&self, coord: Coord) -> bool;

    /// Sets the state of a cell.
    ///
    /// Setting a cell to its current state is a no-op.
    fn set(&mut self, coord: Coord, alive: bool);

    /// Advances the world by exactly one generation.
    fn step(&mut self);

    /// Overwrites `snapshot` with the current generation.
    ///
    /// The snapshot should have the same dimensions as the engine;
    /// cells that do not fit are clipped.
    fn render(&self, snapshot: &mut Snapshot);

    /// Advances the world by `generations` generations.
    fn step_by(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }

    /// Renders the current generation into a new snapshot.
    fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::new(self.width(), self.height());
        self.render(&mut snapshot);
        snapshot
    }

    /// Number of living cells.
    fn population(&self) -> usize {
        self.snapshot().population()
    }

    /// Coordinates of the living cells, row by row.
    fn live_cells(&self) -> Vec<Coord> {
        self.snapshot().live_cells().collect()
    }

    /// Displays the current generation in
    /// [Plaintext](https://conwaylife.com/wiki/Plaintext) format.
    ///
    /// * **Dead** cells are represented by `.`;
    /// * **Living** cells are represented by `o`.
    fn plaintext(&self) -> String {
        self.snapshot().plaintext()
    }
}
