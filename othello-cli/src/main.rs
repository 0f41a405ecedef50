//! Othello CLI - Command-line interface
//!
//! Commands:
//! - play: Play in the terminal against the computer or a friend
//! - simulate: Run random-vs-random games and report statistics
//! - scores: Show the high-score table

mod menu;
mod play_cmd;
mod scores;
mod session;
mod simulate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use play_cmd::PlayArgs;
use scores::ScoresArgs;
use simulate::SimulateArgs;

#[derive(Parser)]
#[command(name = "othello")]
#[command(about = "Othello on any even-sized board")]
struct Cli {
    /// Seed for the computer player (random when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game
    Play(PlayArgs),
    /// Play random games against each other
    Simulate(SimulateArgs),
    /// Show high scores
    Scores(ScoresArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the board
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Simulate(args) => simulate::run(args, cli.seed),
        Commands::Scores(args) => scores::run(args),
    }
}
