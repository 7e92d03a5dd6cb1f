//! The transition table of the triplet engine.

use super::triplet::{Slots, Triplet, KEY_MASK};
use crate::rules::Rule;
use log::debug;
use once_cell::sync::Lazy;
use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

/// The table for Conway's Game of Life, built on first use and shared by
/// every triplet engine with that rule.
static CONWAY: Lazy<Arc<TransitionTable>> =
    Lazy::new(|| Arc::new(TransitionTable::new(Rule::conway())));

/// The outcome of one step for a triplet.
///
/// Bits 0, 1 and 2 are the next states (the same layout as [`Slots`]),
/// bit 3 is set if they differ from the current states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Transition(u8);

impl Transition {
    const CHANGED: u8 = 0b1000;

    fn new(next: Slots, changed: bool) -> Self {
        Transition(next.bits() | if changed { Self::CHANGED } else { 0 })
    }

    /// The living slots in the next generation.
    #[inline]
    pub(crate) fn next(self) -> Slots {
        Slots::from_bits_truncate(self.0)
    }

    /// Whether any slot changes its state.
    #[inline]
    pub(crate) fn changed(self) -> bool {
        self.0 & Self::CHANGED != 0
    }
}

/// An array of transitions for all 4096 lookup keys.
///
/// Some keys are impossible (e.g. a middle raw count of 7), but enumerating
/// them is cheaper than excluding them; they are never looked up.
pub struct TransitionTable {
    rule: Rule,
    table: Box<[Transition]>,
}

impl TransitionTable {
    /// Builds the table for a rule.
    pub fn new(rule: Rule) -> Self {
        debug!("building triplet transition table for {}", rule);
        let table = (0..=KEY_MASK)
            .map(|key| {
                let triplet = Triplet::from_key(key);
                let current = triplet.current();
                let (l, m, r) = triplet.counts();
                let mut next = Slots::empty();
                next.set(Slots::LEFT, rule.next(current.contains(Slots::LEFT), l));
                next.set(Slots::MIDDLE, rule.next(current.contains(Slots::MIDDLE), m));
                next.set(Slots::RIGHT, rule.next(current.contains(Slots::RIGHT), r));
                Transition::new(next, next != current)
            })
            .collect();
        TransitionTable { rule, table }
    }

    /// The table for a rule, shared with other engines if the rule is
    /// Conway's.
    pub fn shared(rule: Rule) -> Arc<Self> {
        if rule.is_conway() {
            Arc::clone(&CONWAY)
        } else {
            Arc::new(TransitionTable::new(rule))
        }
    }

    /// The rule this table was built for.
    pub fn rule(&self) -> Rule {
        self.rule
    }

    #[inline]
    pub(crate) fn get(&self, key: u16) -> Transition {
        self.table[(key & KEY_MASK) as usize]
    }
}

impl Debug for TransitionTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionTable")
            .field("rule", &self.rule)
            .finish_non_exhaustive()
    }
}
