//! A packed cell: current state, pending state and neighbor count in one byte.

use bitflags::bitflags;

bitflags! {
    /// The layout of a packed cell.
    struct CellFlags: u8 {
        /// The number of living neighbors, `0..=8`.
        const COUNT = 0b_0000_1111;

        /// The state of the cell in the current generation.
        const STATE = 0b_0001_0000;

        /// The state of the cell after the step in progress.
        const NEXT = 0b_0010_0000;
    }
}

/// A cell of the packed-cell engine.
///
/// The count lives in the low bits, so incrementing and decrementing it
/// needs no masking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct Cell(u8);

impl Cell {
    /// Whether the cell is alive in the current generation.
    #[inline]
    pub(crate) fn state(self) -> bool {
        self.0 & CellFlags::STATE.bits != 0
    }

    /// The pending state stamped by the last step.
    #[inline]
    pub(crate) fn next(self) -> bool {
        self.0 & CellFlags::NEXT.bits != 0
    }

    /// The number of living neighbors.
    #[inline]
    pub(crate) fn count(self) -> u8 {
        self.0 & CellFlags::COUNT.bits
    }

    #[inline]
    pub(crate) fn with_next(self, next: bool) -> Self {
        if next {
            Cell(self.0 | CellFlags::NEXT.bits)
        } else {
            Cell(self.0 & !CellFlags::NEXT.bits)
        }
    }

    #[inline]
    pub(crate) fn make_alive(self) -> Self {
        Cell(self.0 | CellFlags::STATE.bits)
    }

    #[inline]
    pub(crate) fn make_dead(self) -> Self {
        Cell(self.0 & !CellFlags::STATE.bits)
    }

    #[inline]
    pub(crate) fn increment(self) -> Self {
        debug_assert!(self.count() < 8, "neighbor count overflow: {:?}", self);
        Cell(self.0 + 1)
    }

    #[inline]
    pub(crate) fn decrement(self) -> Self {
        debug_assert!(self.count() > 0, "neighbor count underflow: {:?}", self);
        Cell(self.0 - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_independent() {
        let cell = Cell::default().make_alive().with_next(true);
        let cell = (0..8).fold(cell, |c, _| c.increment());
        assert!(cell.state());
        assert!(cell.next());
        assert_eq!(cell.count(), 8);

        let cell = cell.decrement().make_dead().with_next(false);
        assert!(!cell.state());
        assert!(!cell.next());
        assert_eq!(cell.count(), 7);
    }
}
