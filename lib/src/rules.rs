//! Totalistic Life-like rules.
//!
//! For the notations of rule strings, please see
//! [this article on LifeWiki](https://conwaylife.com/wiki/Rulestring).

use crate::error::Error;
use ca_rules::ParseLife;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// A totalistic Life-like rule without `B0`.
///
/// A dead cell is born if its number of living neighbors is in the birth set;
/// a living cell survives if its number of living neighbors is in the
/// survival set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    /// Bit `n` is set if a dead cell with `n` living neighbors is born.
    birth: u16,
    /// Bit `n` is set if a living cell with `n` living neighbors survives.
    survival: u16,
}

impl Rule {
    /// Conway's Game of Life, `B3/S23`.
    pub const fn conway() -> Self {
        Rule {
            birth: 1 << 3,
            survival: 1 << 2 | 1 << 3,
        }
    }

    /// Constructs a new rule from the `b` and `s` data.
    ///
    /// Neighbor counts greater than 8 are ignored.
    pub fn new(b: &[u8], s: &[u8]) -> Self {
        let mask = |counts: &[u8]| {
            counts
                .iter()
                .filter(|&&n| n <= 8)
                .fold(0u16, |mask, &n| mask | 1 << n)
        };
        Rule {
            birth: mask(b),
            survival: mask(s),
        }
    }

    /// Whether the rule contains `B0`.
    pub fn has_b0(&self) -> bool {
        self.birth & 1 != 0
    }

    /// Whether the rule is Conway's Game of Life.
    pub fn is_conway(&self) -> bool {
        *self == Rule::conway()
    }

    /// The state of a cell in the next generation, given its current state
    /// and its number of living neighbors.
    ///
    /// Counts above 8 can only come from impossible triplet lookup keys;
    /// they never produce a living cell.
    #[inline]
    pub fn next(&self, alive: bool, count: u8) -> bool {
        let mask = if alive { self.survival } else { self.birth };
        count <= 8 && mask >> count & 1 != 0
    }
}

impl Default for Rule {
    fn default() -> Self {
        Rule::conway()
    }
}

/// A parser for the rule.
impl ParseLife for Rule {
    fn from_bs(b: Vec<u8>, s: Vec<u8>) -> Self {
        Self::new(&b, &s)
    }
}

impl FromStr for Rule {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rule: Rule = ParseLife::parse_rule(input).map_err(Error::ParseRuleError)?;
        if rule.has_b0() {
            Err(Error::B0Error)
        } else {
            Ok(rule)
        }
    }
}

/// Displays the rule in `B/S` notation, e.g. `B36/S23`.
impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for n in (0..=8).filter(|n| self.birth >> n & 1 != 0) {
            write!(f, "{}", n)?;
        }
        f.write_str("/S")?;
        for n in (0..=8).filter(|n| self.survival >> n & 1 != 0) {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}
