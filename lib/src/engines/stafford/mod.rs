//! The triplet incremental engine, after David Stafford.
//!
//! Three horizontally adjacent cells share one 16-bit [`Triplet`], which
//! stores their current states, their next states and their neighbor counts.
//! The counts are incomplete on purpose: each slot leaves out the neighbors
//! that are slots of the same triplet, and gets them back from the current
//! state bits. So the low 12 bits of a triplet are enough to decide its next
//! generation, with a single lookup in a [`TransitionTable`].
//!
//! Like the packed-cell engine, each step only looks at the neighborhoods of
//! the triplets that changed in the previous step.

mod table;
mod triplet;

pub use table::TransitionTable;

use crate::{
    config::EngineKind,
    rules::Rule,
    snapshot::Snapshot,
    traits::{Coord, Life},
};
use log::trace;
use std::{mem, sync::Arc};
use triplet::{Slot, Slots, Triplet};

/// The triplet engine.
#[derive(Clone, Debug)]
pub struct Stafford {
    width: i32,
    height: i32,

    table: Arc<TransitionTable>,

    /// Number of triplets in a row, including a column of dead triplets
    /// on both sides.
    row_len: usize,

    /// Number of rows, including a row of dead triplets above and below.
    rows: usize,

    /// The slots of the last column of triplets that are inside the grid.
    ///
    /// When the width is not a multiple of 3, the remaining slots lie
    /// beyond the right edge and must never come alive.
    edge_slots: Slots,

    /// `row_len * rows` triplets, row-major.
    triplets: Vec<Triplet>,

    /// Coordinates of the triplets that changed in the last step
    /// or were set since then. Might have duplicates.
    changes: Vec<(usize, usize)>,

    /// Scratch buffer for the triplets changing in the step in progress.
    pending: Vec<(usize, usize)>,
}

impl Stafford {
    /// Creates an empty world with Conway's rule.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is not positive.
    pub fn new(width: i32, height: i32) -> Self {
        Stafford::with_table(width, height, TransitionTable::shared(Rule::conway()))
    }

    /// Creates an empty world with the given rule.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is not positive, or if the rule
    /// contains `B0`.
    pub fn with_rule(width: i32, height: i32, rule: Rule) -> Self {
        Stafford::with_table(width, height, TransitionTable::shared(rule))
    }

    /// Creates an empty world using an existing transition table.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is not positive, or if the table was
    /// built for a rule containing `B0`.
    pub fn with_table(width: i32, height: i32, table: Arc<TransitionTable>) -> Self {
        assert!(width > 0 && height > 0, "width and height must be positive");
        assert!(!table.rule().has_b0(), "B0 rules are not supported");
        let columns = (width as usize + 2) / 3;
        let row_len = columns + 2;
        let rows = height as usize + 2;
        let in_last = width as usize - 3 * (columns - 1);
        let edge_slots = Slots::from_bits_truncate(0b111 << (3 - in_last));
        Stafford {
            width,
            height,
            table,
            row_len,
            rows,
            edge_slots,
            triplets: vec![Triplet::default(); row_len * rows],
            changes: Vec::new(),
            pending: Vec::new(),
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.row_len + x
    }

    /// Converts a cell coordinate to the coordinates of its triplet and its
    /// slot, if it is inside the grid.
    fn locate(&self, (x, y): Coord) -> Option<(usize, usize, Slot)> {
        if 0 <= x && x < self.width && 0 <= y && y < self.height {
            let (x, y) = (x as usize, y as usize);
            Some((x / 3 + 1, y + 1, Slot::from_offset(x % 3)))
        } else {
            None
        }
    }

    /// Adjusts the raw counts of the given slots of a triplet.
    #[inline]
    fn bump(&mut self, x: usize, y: usize, slots: Slots, alive: bool) {
        let i = self.index(x, y);
        self.triplets[i] = if alive {
            self.triplets[i].increment(slots)
        } else {
            self.triplets[i].decrement(slots)
        };
    }

    /// Makes a slot come alive or die, updating the counts of its neighbors.
    ///
    /// Returns `false` if the slot already had that state.
    fn set_slot(&mut self, x: usize, y: usize, slot: Slot, alive: bool) -> bool {
        let i = self.index(x, y);
        let current = self.triplets[i].current();
        if current.contains(slot.mask()) == alive {
            return false;
        }

        match slot {
            Slot::Left => {
                for ny in y - 1..=y + 1 {
                    self.bump(x - 1, ny, Slots::RIGHT, alive);
                }
                self.bump(x, y - 1, Slots::LEFT | Slots::MIDDLE, alive);
                self.bump(x, y + 1, Slots::LEFT | Slots::MIDDLE, alive);
            }
            Slot::Middle => {
                self.bump(x, y - 1, Slots::all(), alive);
                self.bump(x, y + 1, Slots::all(), alive);
            }
            Slot::Right => {
                self.bump(x, y - 1, Slots::MIDDLE | Slots::RIGHT, alive);
                self.bump(x, y + 1, Slots::MIDDLE | Slots::RIGHT, alive);
                for ny in y - 1..=y + 1 {
                    self.bump(x + 1, ny, Slots::LEFT, alive);
                }
            }
        }

        let mut current = current;
        current.set(slot.mask(), alive);
        self.triplets[i] = self.triplets[i].with_current(current);
        true
    }
}

impl Life for Stafford {
    fn kind(&self) -> EngineKind {
        EngineKind::Stafford
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn clear(&mut self) {
        self.triplets.iter_mut().for_each(|t| *t = Triplet::default());
        self.changes.clear();
        self.pending.clear();
    }

    fn get(&self, coord: Coord) -> bool {
        self.locate(coord).map_or(false, |(x, y, slot)| {
            self.triplets[self.index(x, y)]
                .current()
                .contains(slot.mask())
        })
    }

    fn set(&mut self, coord: Coord, alive: bool) {
        if let Some((x, y, slot)) = self.locate(coord) {
            if self.set_slot(x, y, slot, alive) {
                self.changes.push((x, y));
            }
        }
    }

    fn step(&mut self) {
        let (row_len, rows) = (self.row_len, self.rows);
        let last = row_len - 2;
        let mut pending = mem::take(&mut self.pending);
        pending.clear();

        // First pass: look up the next states of the triplets around the
        // previous changes, and remember the ones that change.
        for &(cx, cy) in &self.changes {
            for y in (cy - 1).max(1)..(cy + 2).min(rows - 1) {
                for x in (cx - 1).max(1)..(cx + 2).min(row_len - 1) {
                    let i = y * row_len + x;
                    let triplet = self.triplets[i];
                    let transition = self.table.get(triplet.key());
                    if !transition.changed() {
                        continue;
                    }
                    let next = if x == last {
                        transition.next() & self.edge_slots
                    } else {
                        transition.next()
                    };
                    if next != triplet.current() {
                        self.triplets[i] = triplet.with_next(next);
                        pending.push((x, y));
                    }
                }
            }
        }

        trace!(
            "stafford: {} changes examined, {} pending",
            self.changes.len(),
            pending.len()
        );
        self.changes.clear();

        // Second pass: apply the changes slot by slot. A triplet might be
        // listed more than once; after the first time its current state
        // already equals its next state.
        for &(x, y) in &pending {
            let triplet = self.triplets[self.index(x, y)];
            if !triplet.changed() {
                continue;
            }
            let next = triplet.next();
            let mut changed = false;
            for slot in Slot::ALL {
                changed |= self.set_slot(x, y, slot, next.contains(slot.mask()));
            }
            debug_assert!(changed);
            self.changes.push((x, y));
        }

        self.pending = pending;
    }

    fn render(&self, snapshot: &mut Snapshot) {
        debug_assert_eq!(
            (snapshot.width(), snapshot.height()),
            (self.width, self.height)
        );
        snapshot.clear();
        for (y, row) in self
            .triplets
            .chunks_exact(self.row_len)
            .enumerate()
            .skip(1)
            .take(self.height as usize)
        {
            for (x, triplet) in row[1..self.row_len - 1].iter().enumerate() {
                let current = triplet.current();
                if current.is_empty() {
                    continue;
                }
                for slot in Slot::ALL {
                    if current.contains(slot.mask()) {
                        let cx = (3 * x + slot.offset()) as i32;
                        snapshot.set((cx, y as i32 - 1), true);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{ACORN, BLINKER, GLIDER, R_PENTOMINO};

    impl Stafford {
        /// Recomputes every raw count from the cell states and compares it
        /// with the stored one, including the border triplets.
        fn assert_counts(&self) {
            let cols = (self.row_len * 3) as isize;
            let rows = self.rows as isize;
            let alive = |cx: isize, cy: isize| {
                0 <= cx
                    && cx < cols
                    && 0 <= cy
                    && cy < rows
                    && self.triplets[self.index(cx as usize / 3, cy as usize)]
                        .current()
                        .contains(Slot::from_offset(cx as usize % 3).mask())
            };
            for y in 0..rows {
                for x in 0..self.row_len as isize {
                    let mut expected = [0u8; 3];
                    for (s, count) in expected.iter_mut().enumerate() {
                        let cx = 3 * x + s as isize;
                        for dy in -1..=1 {
                            for dx in -1..=1 {
                                let nx = cx + dx;
                                // Neighbors inside the same triplet come
                                // from the state bits.
                                let sibling = dy == 0 && nx / 3 == x && nx >= 0;
                                if (dx, dy) != (0, 0) && !sibling && alive(nx, y + dy) {
                                    *count += 1;
                                }
                            }
                        }
                    }
                    let (l, m, r) = self.triplets[self.index(x as usize, y as usize)].raw_counts();
                    assert_eq!([l, m, r], expected, "raw counts at ({}, {})", x, y);
                }
            }
        }
    }

    fn seeded(width: i32, height: i32) -> Stafford {
        let mut life = Stafford::new(width, height);
        BLINKER.place(&mut life, (0, 2));
        ACORN.place(&mut life, (width / 2 - 3, height / 2));
        R_PENTOMINO.place(&mut life, (width - 3, height - 1));
        GLIDER.place(&mut life, (width - 8, 4));
        life
    }

    #[test]
    fn counts_stay_exact() {
        for width in [34, 35, 36] {
            let mut life = seeded(width, 30);
            life.assert_counts();
            for _ in 0..200 {
                life.step();
                life.assert_counts();
            }
        }
    }

    #[test]
    fn phantom_slots_stay_dead() {
        for width in [34, 35] {
            let mut life = seeded(width, 30);
            for _ in 0..300 {
                life.step();
                let last = life.row_len - 2;
                for y in 1..life.rows - 1 {
                    let current = life.triplets[life.index(last, y)].current();
                    assert!(
                        (current - life.edge_slots).is_empty(),
                        "phantom slot alive at row {}",
                        y
                    );
                }
            }
        }
    }

    #[test]
    fn edge_slots() {
        assert_eq!(Stafford::new(36, 1).edge_slots, Slots::all());
        assert_eq!(Stafford::new(35, 1).edge_slots, Slots::LEFT | Slots::MIDDLE);
        assert_eq!(Stafford::new(34, 1).edge_slots, Slots::LEFT);
        assert_eq!(Stafford::new(1, 1).edge_slots, Slots::LEFT);
        assert_eq!(Stafford::new(36, 1).row_len, 14);
        assert_eq!(Stafford::new(34, 1).row_len, 14);
    }

    #[test]
    #[should_panic(expected = "B0 rules are not supported")]
    fn b0_table_is_rejected() {
        let table = TransitionTable::new(Rule::new(&[0, 3], &[2, 3]));
        Stafford::with_table(6, 6, Arc::new(table));
    }

    #[test]
    fn shared_table_is_accepted() {
        let table = TransitionTable::shared(Rule::new(&[3, 6], &[2, 3]));
        let mut life = Stafford::with_table(6, 6, Arc::clone(&table));
        BLINKER.place(&mut life, (2, 3));
        life.step();
        assert_eq!(life.live_cells(), vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn redundant_set_records_nothing() {
        let mut life = Stafford::new(9, 9);
        life.set((4, 4), true);
        assert_eq!(life.changes, vec![(2, 5)]);
        let triplets = life.triplets.clone();
        life.set((4, 4), true);
        life.set((5, 4), false);
        life.set((9, 4), true);
        assert_eq!(life.changes.len(), 1);
        assert_eq!(life.triplets, triplets);
    }
}
