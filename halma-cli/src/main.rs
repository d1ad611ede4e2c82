//! HALMA CLI - Command-line interface
//!
//! Commands:
//! - play: Play a game in the terminal
//! - match: Play computer-only games and report results

mod args;
mod match_cmd;
mod play_cmd;
mod text;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "halma")]
#[command(about = "Halma on polygonal boards with computer opponents")]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game in the terminal
    Play(play_cmd::PlayArgs),
    /// Play computer-only games and report results
    Match(match_cmd::MatchArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Play(args) => play_cmd::run(args),
        Commands::Match(args) => match_cmd::run(args),
    }
}

/// Logs go to stderr so the board on stdout stays readable
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
