//! Simulate command - random-vs-random games
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use othello_core::{GameEngine, GameResult, RandomPlayer, DEFAULT_BOARD_SIZE};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Board edge length (even, at least 2)
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    pub size: usize,

    /// Play games on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, PartialEq)]
struct GameRecord {
    game_number: usize,
    seed: u64,
    result: GameResult,
    black: usize,
    white: usize,
    moves: usize,
}

/// Aggregated simulation results
#[derive(Clone, Debug)]
struct SimulationResults {
    games: Vec<GameRecord>,
    black_wins: usize,
    white_wins: usize,
    ties: usize,
    avg_moves: f32,
    avg_black: f32,
    avg_white: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// 1. Check the board size
/// 2. Play all games
/// 3. Report results
pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    GameEngine::new(args.size).with_context(|| format!("Invalid board size {}", args.size))?;

    let base_seed = seed.unwrap_or_else(|| create_rng(None).gen());
    tracing::info!(
        "Starting simulation: {} games on {}x{} (seed={}, parallel={})",
        args.games,
        args.size,
        args.size,
        base_seed,
        args.parallel
    );

    let progress = if args.json {
        ProgressBar::hidden()
    } else {
        create_progress_bar(args.games)
    };

    let games = play_games(args.size, args.games, base_seed, args.parallel, &progress)?;
    progress.finish_and_clear();

    let results = compute_statistics(games);
    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play every game; game `i` is seeded with `base_seed + i`
fn play_games(
    size: usize,
    games: usize,
    base_seed: u64,
    parallel: bool,
    progress: &ProgressBar,
) -> Result<Vec<GameRecord>> {
    let play = |index: usize| {
        let record = play_single_game(size, index + 1, base_seed.wrapping_add(index as u64));
        progress.inc(1);
        record
    };

    if parallel {
        (0..games).into_par_iter().map(play).collect()
    } else {
        (0..games).map(play).collect()
    }
}

fn report_results(results: &SimulationResults, args: &SimulateArgs) -> Result<()> {
    if args.json {
        print_json_results(results, args.size)?;
    } else {
        print_text_results(results, args.size);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_game(size: usize, game_number: usize, seed: u64) -> Result<GameRecord> {
    let engine = GameEngine::new(size)?;
    let (final_state, history) = RandomPlayer::with_seed(seed).play_game(engine);
    let counts = final_state.counts();

    tracing::debug!(
        "Game {}: {} ({}-{}, {} moves)",
        game_number,
        final_state.result(),
        counts.black,
        counts.white,
        history.len()
    );

    Ok(GameRecord {
        game_number,
        seed,
        result: final_state.result(),
        black: counts.black,
        white: counts.white,
        moves: history.len(),
    })
}

fn compute_statistics(games: Vec<GameRecord>) -> SimulationResults {
    let count = |r: GameResult| games.iter().filter(|g| g.result == r).count();
    let black_wins = count(GameResult::BlackWins);
    let white_wins = count(GameResult::WhiteWins);
    let ties = count(GameResult::Tie);

    let average = |f: fn(&GameRecord) -> usize| {
        if games.is_empty() {
            0.0
        } else {
            games.iter().map(f).sum::<usize>() as f32 / games.len() as f32
        }
    };
    let avg_moves = average(|g| g.moves);
    let avg_black = average(|g| g.black);
    let avg_white = average(|g| g.white);

    SimulationResults {
        games,
        black_wins,
        white_wins,
        ties,
        avg_moves,
        avg_black,
        avg_white,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn create_progress_bar(games: usize) -> ProgressBar {
    let bar = ProgressBar::new(games as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} games") {
        bar.set_style(style);
    }
    bar
}

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &SimulationResults, size: usize) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        seed: u64,
        result: GameResult,
        black: usize,
        white: usize,
        moves: usize,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        board_size: usize,
        total_games: usize,
        black_wins: usize,
        white_wins: usize,
        ties: usize,
        avg_moves: f32,
        avg_black: f32,
        avg_white: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        board_size: size,
        total_games: results.games.len(),
        black_wins: results.black_wins,
        white_wins: results.white_wins,
        ties: results.ties,
        avg_moves: results.avg_moves,
        avg_black: results.avg_black,
        avg_white: results.avg_white,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                seed: g.seed,
                result: g.result,
                black: g.black,
                white: g.white,
                moves: g.moves,
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize results")?;
    println!("{}", json);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &SimulationResults, size: usize) {
    let total = results.games.len();

    println!("\n=== Simulation Results ({}x{}) ===", size, size);
    println!("Total games: {}", total);
    println!(
        "Black wins:  {} ({:.1}%)",
        results.black_wins,
        percent(results.black_wins, total)
    );
    println!(
        "White wins:  {} ({:.1}%)",
        results.white_wins,
        percent(results.white_wins, total)
    );
    println!(
        "Ties:        {} ({:.1}%)",
        results.ties,
        percent(results.ties, total)
    );
    println!("Avg moves:   {:.1}", results.avg_moves);
    println!(
        "Avg tiles:   Black {:.1} / White {:.1}",
        results.avg_black, results.avg_white
    );
}

// ============================================================================
// TESTS
// ============================================================================
