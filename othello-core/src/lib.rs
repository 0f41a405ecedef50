//! Othello Core - Rules engine and computer player
//!
//! This crate provides the game logic for Othello on any even n x n board:
//! - Board geometry (row/column coordinates, algebraic notation)
//! - Move legality, directional flipping and tile counts
//! - Turn alternation with automatic forfeits and game-over detection
//! - A seedable random-move computer player
//! - Session configuration

pub mod board;
pub mod game;
pub mod ai;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{Board, Cell, Coord, DIRECTIONS};
pub use game::{
    GameEngine, GameResult, GameSummary, Player, TileCounts, TurnOutcome, DEFAULT_BOARD_SIZE,
};
pub use ai::RandomPlayer;
pub use config::{GameConfig, GameMode};
pub use error::EngineError;
