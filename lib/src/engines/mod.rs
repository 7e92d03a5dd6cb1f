//! The simulation engines.
//!
//! All of them implement [`Life`](crate::Life) and produce identical
//! generations; they differ in memory layout and in how much of the grid a
//! step has to look at.
//!
//! - [`Naive`]: rescans every cell; the reference.
//! - [`Scholes`]: shifts and sums whole grids.
//! - [`Abrash`]: one packed byte per cell, only revisits changed regions.
//! - [`Stafford`]: one packed triplet per three cells and a lookup table,
//!   only revisits changed regions.

mod abrash;
mod naive;
mod scholes;
mod stafford;

pub use abrash::Abrash;
pub use naive::Naive;
pub use scholes::Scholes;
pub use stafford::{Stafford, TransitionTable};
