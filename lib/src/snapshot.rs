//! A full-grid boolean snapshot, used as a draw target.

use crate::traits::Coord;
use std::fmt::{self, Display, Formatter};

/// A `width × height` matrix of booleans.
///
/// Engines paint their current generation into a snapshot with
/// [`Life::render`](crate::Life::render); renderers then read it cell by cell.
/// The dimensions are fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Snapshot {
    width: i32,
    height: i32,
    /// Row-major.
    cells: Vec<bool>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    ///
    /// Non-positive dimensions give an empty snapshot with no cells.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Snapshot {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// Width.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height.
    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, (x, y): Coord) -> Option<usize> {
        if 0 <= x && x < self.width && 0 <= y && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Whether the cell is alive. Returns `false` outside the grid.
    pub fn get(&self, coord: Coord) -> bool {
        self.index(coord).map_or(false, |i| self.cells[i])
    }

    /// Sets a cell. Does nothing outside the grid.
    pub fn set(&mut self, coord: Coord, alive: bool) {
        if let Some(i) = self.index(coord) {
            self.cells[i] = alive;
        }
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = false);
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Coordinates of the living cells, row by row.
    pub fn live_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(move |(i, _)| ((i % width) as i32, (i / width) as i32))
    }

    /// Coordinates whose state differs between two snapshots of the same size.
    pub fn diff(&self, other: &Snapshot) -> Vec<Coord> {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        let width = self.width as usize;
        self.cells
            .iter()
            .zip(&other.cells)
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| ((i % width) as i32, (i / width) as i32))
            .collect()
    }

    /// Displays the snapshot in
    /// [Plaintext](https://conwaylife.com/wiki/Plaintext) format.
    ///
    /// * **Dead** cells are represented by `.`;
    /// * **Living** cells are represented by `o`.
    pub fn plaintext(&self) -> String {
        let mut str = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for row in self.cells.chunks(self.width.max(1) as usize) {
            str.extend(row.iter().map(|&c| if c { 'o' } else { '.' }));
            str.push('\n');
        }
        str
    }
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plaintext())
    }
}
