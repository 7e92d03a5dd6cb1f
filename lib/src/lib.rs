//! __Rlifegame__ runs Conway's [Game of Life](https://conwaylife.com/wiki/Conway%27s_Game_of_Life)
//! on a bounded grid, with several interchangeable engines.
//!
//! The interesting ones are incremental: they only revisit the neighborhoods
//! of the cells that changed in the previous generation.
//!
//! ```rust
//! use rlifegame_lib::{patterns::BLINKER, Config, EngineKind};
//!
//! let config = Config::new(5, 5).set_engine(EngineKind::Abrash);
//! let mut life = config.world().unwrap();
//! BLINKER.place(life.as_mut(), (2, 3));
//! life.step();
//!
//! assert_eq!(life.live_cells(), vec![(1, 2), (2, 2), (3, 2)]);
//! ```

mod config;
mod engines;
mod error;
pub mod patterns;
mod rules;
mod snapshot;
mod traits;

pub use config::{Config, EngineKind, MAX_CELLS};
pub use engines::{Abrash, Naive, Scholes, Stafford, TransitionTable};
pub use error::Error;
pub use rules::Rule;
pub use snapshot::Snapshot;
pub use traits::{Coord, Life};
