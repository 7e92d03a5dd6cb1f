//! The shift-and-sum engine, after John Scholes' APL one-liner.
//!
//! The whole grid is shifted in the eight directions, the shifted copies are
//! added up into a grid of neighbor counts, and the rule is applied to every
//! cell at once. No bookkeeping, but every step touches every cell nine times.

use crate::{
    config::EngineKind,
    rules::Rule,
    snapshot::Snapshot,
    traits::{Coord, Life},
};

/// A `width × height` block of bytes, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ByteBlock {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
}

impl ByteBlock {
    fn new(width: usize, height: usize) -> Self {
        ByteBlock {
            width,
            height,
            bytes: vec![0; width * height],
        }
    }

    /// The block moved by `(dx, dy)`. Cells moved in from outside are 0;
    /// cells moved out are lost.
    ///
    /// ```text
    /// 1 2 3                 0 1 2
    /// 4 5 6  --(1, 0)-->    0 4 5
    /// 7 8 9                 0 7 8
    /// ```
    fn shifted(&self, dx: isize, dy: isize) -> Self {
        let mut block = ByteBlock::new(self.width, self.height);
        let (w, h) = (self.width as isize, self.height as isize);
        let cols = (w - dx.abs()).max(0) as usize;
        if cols == 0 {
            return block;
        }
        for y in (0..h).filter(|y| (0..h).contains(&(y - dy))) {
            let src = ((y - dy) * w + (-dx).max(0)) as usize;
            let dst = (y * w + dx.max(0)) as usize;
            block.bytes[dst..dst + cols].copy_from_slice(&self.bytes[src..src + cols]);
        }
        block
    }

    /// Elementwise sum of blocks of the same size.
    fn sum<'a>(
        blocks: impl IntoIterator<Item = &'a ByteBlock>,
        width: usize,
        height: usize,
    ) -> Self {
        let mut total = ByteBlock::new(width, height);
        for block in blocks {
            debug_assert_eq!((block.width, block.height), (width, height));
            total
                .bytes
                .iter_mut()
                .zip(&block.bytes)
                .for_each(|(t, b)| *t += b);
        }
        total
    }

    /// Combines two blocks of the same size elementwise.
    fn zip_with(&self, other: &ByteBlock, f: impl Fn(u8, u8) -> u8) -> Self {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        ByteBlock {
            width: self.width,
            height: self.height,
            bytes: self
                .bytes
                .iter()
                .zip(&other.bytes)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }
}

/// The shift-and-sum engine.
#[derive(Clone, Debug)]
pub struct Scholes {
    width: i32,
    height: i32,
    rule: Rule,
    /// 1 for living cells, 0 for dead cells.
    cells: ByteBlock,
}

impl Scholes {
    /// Creates an empty world with Conway's rule.
    pub fn new(width: i32, height: i32) -> Self {
        Scholes::with_rule(width, height, Rule::conway())
    }

    /// Creates an empty world with the given rule.
    pub fn with_rule(width: i32, height: i32, rule: Rule) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        Scholes {
            width,
            height,
            rule,
            cells: ByteBlock::new(width as usize, height as usize),
        }
    }

    fn index(&self, (x, y): Coord) -> Option<usize> {
        if 0 <= x && x < self.width && 0 <= y && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

impl Life for Scholes {
    fn kind(&self) -> EngineKind {
        EngineKind::Scholes
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn clear(&mut self) {
        self.cells = ByteBlock::new(self.width as usize, self.height as usize);
    }

    fn get(&self, coord: Coord) -> bool {
        self.index(coord).map_or(false, |i| self.cells.bytes[i] != 0)
    }

    fn set(&mut self, coord: Coord, alive: bool) {
        if let Some(i) = self.index(coord) {
            self.cells.bytes[i] = alive as u8;
        }
    }

    fn step(&mut self) {
        let w = self.cells.shifted(-1, 0);
        let e = self.cells.shifted(1, 0);
        let n = self.cells.shifted(0, -1);
        let s = self.cells.shifted(0, 1);
        let nw = w.shifted(0, -1);
        let ne = e.shifted(0, -1);
        let sw = w.shifted(0, 1);
        let se = e.shifted(0, 1);
        let counts = ByteBlock::sum(
            [&w, &e, &n, &s, &nw, &ne, &sw, &se],
            self.cells.width,
            self.cells.height,
        );
        let rule = self.rule;
        self.cells = counts.zip_with(&self.cells, |count, cell| rule.next(cell != 0, count) as u8);
    }

    fn render(&self, snapshot: &mut Snapshot) {
        snapshot.clear();
        let width = self.cells.width;
        for (i, &cell) in self.cells.bytes.iter().enumerate() {
            if cell != 0 {
                snapshot.set(((i % width) as i32, (i / width) as i32), true);
            }
        }
    }
}
