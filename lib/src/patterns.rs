//! A few well-known patterns, and random soups.

use crate::{
    error::Error,
    traits::{Coord, Life},
};
use rand::Rng;
use std::str::FromStr;

/// A pattern, given as the offsets of its living cells from an anchor.
///
/// The anchor is the bottom-left corner of the bounding box;
/// the pattern extends to the right and upwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
    /// Name of the pattern.
    pub name: &'static str,
    /// Offsets of the living cells.
    pub cells: &'static [Coord],
}

/// Period 2 oscillator.
pub const BLINKER: Pattern = Pattern {
    name: "blinker",
    cells: &[(0, 0), (0, -1), (0, -2)],
};

/// Methuselah; stabilizes after 5206 generations on an infinite grid.
pub const ACORN: Pattern = Pattern {
    name: "acorn",
    cells: &[(1, 0), (3, -1), (0, -2), (1, -2), (4, -2), (5, -2), (6, -2)],
};

/// The R-pentomino.
pub const R_PENTOMINO: Pattern = Pattern {
    name: "r",
    cells: &[(1, 0), (2, 0), (0, -1), (1, -1), (1, -2)],
};

/// Still life.
pub const BLOCK: Pattern = Pattern {
    name: "block",
    cells: &[(0, 0), (1, 0), (0, -1), (1, -1)],
};

/// Moves one cell diagonally every 4 generations, down and to the right.
pub const GLIDER: Pattern = Pattern {
    name: "glider",
    cells: &[(1, -2), (2, -1), (0, 0), (1, 0), (2, 0)],
};

/// All the built-in patterns.
pub const PATTERNS: [Pattern; 5] = [BLINKER, ACORN, R_PENTOMINO, BLOCK, GLIDER];

impl Pattern {
    /// Finds a built-in pattern by name, case-insensitively.
    ///
    /// `r-pentomino` is accepted as an alias of `r`.
    pub fn by_name(name: &str) -> Option<Pattern> {
        if name.eq_ignore_ascii_case("r-pentomino") {
            return Some(R_PENTOMINO);
        }
        PATTERNS
            .into_iter()
            .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
    }

    /// Makes the cells of the pattern alive, with the anchor at `(x, y)`.
    ///
    /// Cells that fall outside the grid are clipped.
    pub fn place<L: Life + ?Sized>(&self, life: &mut L, (x, y): Coord) {
        for &(dx, dy) in self.cells {
            life.set((x + dx, y + dy), true);
        }
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::by_name(s).ok_or_else(|| Error::UnknownPattern(s.to_string()))
    }
}

/// Makes every cell alive with probability `density`, independently.
///
/// Cells not chosen are left as they are. `density` is clamped to `[0, 1]`.
pub fn random_soup<L: Life + ?Sized, R: Rng + ?Sized>(life: &mut L, rng: &mut R, density: f64) {
    let density = density.clamp(0.0, 1.0);
    for y in 0..life.height() {
        for x in 0..life.width() {
            if rng.gen_bool(density) {
                life.set((x, y), true);
            }
        }
    }
}
