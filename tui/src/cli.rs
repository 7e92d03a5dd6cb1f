//! Running without the TUI.

use crate::args::Args;
use log::info;
use rlifegame_lib::Life;
use std::{io, time::Instant};

/// Runs the generations and prints the last one, with the time it took.
pub(crate) fn run_headless(mut life: Box<dyn Life + Send>, generations: u64) {
    let start = Instant::now();
    life.step_by(generations);
    let elapsed = start.elapsed();
    info!(
        "{} engine: {} generations, population {}",
        life.kind(),
        generations,
        life.population()
    );
    print!("{}", life.plaintext());
    println!("Time taken: {:?}", elapsed);
}

pub(crate) fn run(args: Args) -> io::Result<()> {
    #[cfg(feature = "tui")]
    if !args.no_tui {
        return crate::tui::run_with_tui(args.life, args.generations, args.delay);
    }
    run_headless(args.life, args.generations);
    Ok(())
}
