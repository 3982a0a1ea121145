#![warn(clippy::all)]

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let program = Cli::parse();
    if let Err(e) = program.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
