//! Play command - interactive games in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: resolve_config(), run_screens()
//! - Level 3: play_game(), record_score()
//! - Level 4: argument conversion

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use othello_core::{GameConfig, GameMode, Player};

use crate::menu::{self, Screen};
use crate::scores::{score_for, HighScores};
use crate::session::{read_line, Session, SessionEnd};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Board edge length (even, at least 2)
    #[arg(long)]
    pub size: Option<usize>,

    /// Game mode; the menu asks when omitted
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Side the human plays against the computer
    #[arg(long, value_enum)]
    pub color: Option<ColorArg>,

    /// High-score file
    #[arg(long, value_name = "FILE")]
    pub scores: Option<PathBuf>,

    /// JSON config file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Against the computer
    Pve,
    /// Two players at one terminal
    Pvp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    Black,
    White,
}

impl From<ColorArg> for Player {
    fn from(color: ColorArg) -> Self {
        match color {
            ColorArg::Black => Player::Black,
            ColorArg::White => Player::White,
        }
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Merge config file, flags and seed
/// 2. Walk the menus (or jump straight into a game)
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = resolve_config(&args, seed)?;
    let first = preset_screen(&args, &config);

    tracing::info!(
        "Starting play: {}x{} board, first screen {:?}",
        config.board_size,
        config.board_size,
        first
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_screens(&mut input, &mut output, config, first)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn resolve_config(args: &PlayArgs, seed: Option<u64>) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GameConfig::default(),
    };

    if let Some(size) = args.size {
        config.board_size = size;
    }
    if let Some(path) = &args.scores {
        config.scores_path = path.clone();
    }
    if seed.is_some() {
        config.seed = seed;
    }
    if let Some(color) = args.color {
        config.mode = GameMode::PvE {
            human: color.into(),
        };
    }
    if args.mode == Some(ModeArg::Pvp) {
        config.mode = GameMode::PvP;
    }

    Ok(config)
}

/// Drive the screen state machine until the player quits
fn run_screens<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    mut config: GameConfig,
    first: Screen,
) -> Result<()> {
    let mut screen = first;

    loop {
        screen = match screen {
            Screen::Quit => break,
            Screen::Playing(mode) => {
                config.mode = mode;
                play_game(input, output, &config)?;
                Screen::GameOver
            }
            other => menu::prompt(input, output, other, &config)?,
        };
    }

    writeln!(output, "Thanks for playing Othello!")?;
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_game<R: BufRead, W: Write>(input: &mut R, output: &mut W, config: &GameConfig) -> Result<()> {
    let mut session = Session::new(config)
        .with_context(|| format!("Cannot start a {}x{} game", config.board_size, config.board_size))?;

    match session.run(input, output)? {
        SessionEnd::Finished(summary) => {
            tracing::info!(
                "Game finished: {} ({}-{})",
                summary.result,
                summary.black,
                summary.white
            );
            record_score(input, output, config, score_for(config.mode, &summary))
        }
        SessionEnd::Abandoned => Ok(()),
    }
}

/// Ask for a name and keep the score if it beats the player's best
fn record_score<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    config: &GameConfig,
    score: usize,
) -> Result<()> {
    write!(output, "Enter your name for posterity (blank to skip): ")?;
    output.flush()?;

    let name = match read_line(input)? {
        Some(name) if !name.is_empty() => name,
        _ => return Ok(()),
    };

    // An unreadable table is left on disk as is
    let mut table = match HighScores::load(&config.scores_path) {
        Ok(table) => table,
        Err(e) => {
            tracing::warn!("Not recording score: {:#}", e);
            writeln!(output, "High scores could not be read ({:#}).", e)?;
            writeln!(output, "Your score has not been saved.")?;
            return Ok(());
        }
    };

    if table.update(&name, score, config.board_size) {
        table.save(&config.scores_path)?;
        writeln!(output, "Score saved: {} with {} tiles.", name, score)?;
    } else {
        writeln!(output, "Your score has not been saved.")?;
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Skip the menus when the command line already chose a mode
fn preset_screen(args: &PlayArgs, config: &GameConfig) -> Screen {
    if args.mode.is_some() || args.color.is_some() {
        Screen::Playing(config.mode)
    } else {
        Screen::MainMenu
    }
}
