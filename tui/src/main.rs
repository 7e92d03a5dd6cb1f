mod args;
mod cli;
mod scenario;
#[cfg(feature = "tui")]
mod tui;

use args::Args;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr, filtered by `RUST_LOG`.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let args = Args::parse().unwrap_or_else(|e| e.exit());
    cli::run(args).unwrap_or_else(|e| {
        clap::Error::raw(clap::error::ErrorKind::Io, format!("{}\n", e)).exit()
    });
}
