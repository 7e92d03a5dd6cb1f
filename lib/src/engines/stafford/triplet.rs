//! Three horizontally adjacent cells packed into 15 bits.

use bitflags::bitflags;

bitflags! {
    /// A set of slots in a triplet.
    ///
    /// The bits line up with the 3-bit current and next state fields of a
    /// [`Triplet`], so a set of living slots can be read and written directly.
    pub(crate) struct Slots: u8 {
        const LEFT = 0b100;
        const MIDDLE = 0b010;
        const RIGHT = 0b001;
    }
}

/// One of the three cells of a triplet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Slot {
    Left,
    Middle,
    Right,
}

impl Slot {
    /// All slots, from left to right.
    pub(crate) const ALL: [Slot; 3] = [Slot::Left, Slot::Middle, Slot::Right];

    /// The slot of the `i`-th cell of a triplet, `i` in `0..3`.
    #[inline]
    pub(crate) fn from_offset(i: usize) -> Self {
        match i {
            0 => Slot::Left,
            1 => Slot::Middle,
            _ => Slot::Right,
        }
    }

    #[inline]
    pub(crate) fn offset(self) -> usize {
        self as usize
    }

    #[inline]
    pub(crate) fn mask(self) -> Slots {
        match self {
            Slot::Left => Slots::LEFT,
            Slot::Middle => Slots::MIDDLE,
            Slot::Right => Slots::RIGHT,
        }
    }
}

// Bits 12, 13 and 14 are the states of the cells after the step in progress.
const NEXT: u16 = 12;

// Bits 9, 10 and 11 are the states of the cells in the current generation.
const CURRENT: u16 = 9;

// Bits 6, 7 and 8 count the living neighbors of the left cell. Three bits
// cannot count to eight, but one neighbor is the middle cell, whose state we
// already know; so the middle cell is left out of the count.
const LEFT_COUNT: u16 = 6;

// Bits 3, 4 and 5 for the middle cell, leaving out the left and right cells.
const MIDDLE_COUNT: u16 = 3;

// Bits 0, 1 and 2 for the right cell, leaving out the middle cell.
const RIGHT_COUNT: u16 = 0;

/// The lookup key is the current states and the raw counts.
pub(crate) const KEY_MASK: u16 = 0x0fff;

/// A triplet of cells.
///
/// Bit 15 is unused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct Triplet(u16);

impl Triplet {
    /// The triplet whose low 12 bits are `key`, with no pending state.
    #[inline]
    pub(crate) fn from_key(key: u16) -> Self {
        Triplet(key & KEY_MASK)
    }

    /// The key into the transition table.
    #[inline]
    pub(crate) fn key(self) -> u16 {
        self.0 & KEY_MASK
    }

    /// The living slots in the current generation.
    #[inline]
    pub(crate) fn current(self) -> Slots {
        Slots::from_bits_truncate((self.0 >> CURRENT) as u8)
    }

    /// The living slots after the step in progress.
    #[inline]
    pub(crate) fn next(self) -> Slots {
        Slots::from_bits_truncate((self.0 >> NEXT) as u8)
    }

    /// Whether any slot is about to change its state.
    #[inline]
    pub(crate) fn changed(self) -> bool {
        self.current() != self.next()
    }

    #[inline]
    pub(crate) fn with_current(self, slots: Slots) -> Self {
        Triplet(self.0 & !(0b111 << CURRENT) | (slots.bits() as u16) << CURRENT)
    }

    #[inline]
    pub(crate) fn with_next(self, slots: Slots) -> Self {
        Triplet(self.0 & !(0b111 << NEXT) | (slots.bits() as u16) << NEXT)
    }

    /// The raw counts of the left, middle and right cells.
    #[inline]
    pub(crate) fn raw_counts(self) -> (u8, u8, u8) {
        (
            (self.0 >> LEFT_COUNT & 0b111) as u8,
            (self.0 >> MIDDLE_COUNT & 0b111) as u8,
            (self.0 >> RIGHT_COUNT & 0b111) as u8,
        )
    }

    /// The actual numbers of living neighbors of the left, middle and right
    /// cells, completing the raw counts with the states of the sibling slots.
    #[inline]
    pub(crate) fn counts(self) -> (u8, u8, u8) {
        let (l, m, r) = self.raw_counts();
        let cur = self.current();
        let alive = |slot| cur.contains(slot) as u8;
        (
            l + alive(Slots::MIDDLE),
            m + alive(Slots::LEFT) + alive(Slots::RIGHT),
            r + alive(Slots::MIDDLE),
        )
    }

    /// Adds one to the raw counts of the given slots.
    #[inline]
    pub(crate) fn increment(self, slots: Slots) -> Self {
        debug_assert!(
            {
                let (l, m, r) = self.raw_counts();
                !(slots.contains(Slots::LEFT) && l == 7
                    || slots.contains(Slots::MIDDLE) && m == 6
                    || slots.contains(Slots::RIGHT) && r == 7)
            },
            "raw count overflow: {:?} + {:?}",
            self,
            slots
        );
        Triplet(self.0 + unit(slots))
    }

    /// Subtracts one from the raw counts of the given slots.
    #[inline]
    pub(crate) fn decrement(self, slots: Slots) -> Self {
        debug_assert!(
            {
                let (l, m, r) = self.raw_counts();
                !(slots.contains(Slots::LEFT) && l == 0
                    || slots.contains(Slots::MIDDLE) && m == 0
                    || slots.contains(Slots::RIGHT) && r == 0)
            },
            "raw count underflow: {:?} - {:?}",
            self,
            slots
        );
        Triplet(self.0 - unit(slots))
    }
}

/// One in each of the count fields of the given slots.
#[inline]
fn unit(slots: Slots) -> u16 {
    let bits = slots.bits() as u16;
    (bits >> 2 & 1) << LEFT_COUNT | (bits >> 1 & 1) << MIDDLE_COUNT | (bits & 1) << RIGHT_COUNT
}
