//! Command-line frontend: reads protocol commands from stdin and answers on
//! stdout. Logs go to stderr.

use std::io;

use caissa::{Engine, EngineConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Plays a game of chess through a line-oriented protocol on stdin/stdout.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Print the game state as a JSON line after every game command.
    #[arg(long)]
    json: bool,
    /// Draw the board with Unicode figurines.
    #[arg(long)]
    figurines: bool,
    /// Logging filter directive, e.g. "debug" or "caissa=trace". Defaults to
    /// RUST_LOG, then "warn".
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match &cli.log_level {
        Some(directive) => EnvFilter::try_new(directive)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    caissa::print_engine_info();

    let mut engine = Engine::new(EngineConfig {
        json: cli.json,
        figurines: cli.figurines,
    });
    engine.command_loop(&mut io::stdin().lock(), &mut io::stdout().lock())
}
