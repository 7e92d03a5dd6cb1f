//! World configuration.

use crate::{
    engines::{Abrash, Naive, Scholes, Stafford},
    error::Error,
    rules::Rule,
    snapshot::Snapshot,
    traits::Life,
};
use educe::Educe;
use log::debug;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which engine to simulate with.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EngineKind {
    /// Rescans every cell every generation.
    Naive,

    /// Shifts and sums whole grids.
    Scholes,

    /// Packed cells with neighbor counts, updated incrementally.
    Abrash,

    /// Packed triplets with a transition table, updated incrementally.
    #[educe(Default)]
    Stafford,
}

impl EngineKind {
    /// All engines, from the slowest to the fastest.
    pub const ALL: [EngineKind; 4] = [
        EngineKind::Naive,
        EngineKind::Scholes,
        EngineKind::Abrash,
        EngineKind::Stafford,
    ];

    /// The name of the engine, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            EngineKind::Naive => "naive",
            EngineKind::Scholes => "scholes",
            EngineKind::Abrash => "abrash",
            EngineKind::Stafford => "stafford",
        }
    }

    /// Whether the engine only revisits the regions that changed.
    pub fn is_incremental(self) -> bool {
        matches!(self, EngineKind::Abrash | EngineKind::Stafford)
    }
}

impl FromStr for EngineKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EngineKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownEngine(s.to_string()))
    }
}

impl Display for EngineKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Largest number of cells in a grid, counting a one-cell border on every side.
pub const MAX_CELLS: u64 = i32::MAX as u64;

/// World configuration.
///
/// The engine will be generated from this configuration.
/// The engine and every snapshot drawn from it share these dimensions.
#[derive(Clone, Debug, Educe, PartialEq, Eq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Width.
    #[educe(Default = 36)]
    pub width: i32,

    /// Height.
    #[educe(Default = 36)]
    pub height: i32,

    /// The engine.
    pub engine: EngineKind,

    /// The rule string of the cellular automaton.
    #[educe(Default = "B3/S23")]
    pub rule_string: String,
}

impl Config {
    /// Sets up a new configuration with given size.
    pub fn new(width: i32, height: i32) -> Self {
        Config {
            width,
            height,
            ..Config::default()
        }
    }

    /// Sets the engine.
    pub fn set_engine(mut self, engine: EngineKind) -> Self {
        self.engine = engine;
        self
    }

    /// Sets the rule string.
    pub fn set_rule_string<S: ToString>(mut self, rule_string: S) -> Self {
        self.rule_string = rule_string.to_string();
        self
    }

    /// Parses the rule string.
    pub fn rule(&self) -> Result<Rule, Error> {
        self.rule_string.parse()
    }

    /// An empty snapshot of the right size for the engine.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.width, self.height)
    }

    /// Creates a new empty world from the configuration.
    ///
    /// Returns an error if the size is not positive or too large, or if the
    /// rule string is invalid.
    pub fn world(&self) -> Result<Box<dyn Life + Send>, Error> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::NonPositiveError);
        }
        if (self.width as u64 + 2) * (self.height as u64 + 2) > MAX_CELLS {
            return Err(Error::TooLargeError(self.width, self.height));
        }
        let rule = self.rule()?;
        debug!(
            "creating {} engine, {}x{}, rule {}",
            self.engine, self.width, self.height, rule
        );
        let (width, height) = (self.width, self.height);
        Ok(match self.engine {
            EngineKind::Naive => Box::new(Naive::with_rule(width, height, rule)),
            EngineKind::Scholes => Box::new(Scholes::with_rule(width, height, rule)),
            EngineKind::Abrash => Box::new(Abrash::with_rule(width, height, rule)),
            EngineKind::Stafford => Box::new(Stafford::with_rule(width, height, rule)),
        })
    }
}
