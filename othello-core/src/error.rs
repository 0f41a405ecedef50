//! Engine error types

use thiserror::Error;

use crate::board::Coord;
use crate::game::Player;

/// Recoverable rules-engine failures. The engine state is untouched whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("illegal move {coord} for {player}")]
    IllegalMove { coord: Coord, player: Player },

    #[error("coordinate ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("board size {0} is too small (minimum 2)")]
    DegenerateBoard(usize),

    #[error("board size {0} is odd; the starting position needs an even size")]
    OddBoardSize(usize),

    #[error("board size {0} is too large to allocate")]
    BoardTooLarge(usize),

    #[error("{0} has no legal move available")]
    NoLegalMoveAvailable(Player),

    #[error("cannot parse coordinate: {0:?}")]
    ParseCoord(String),

    #[error("invalid position: {0}")]
    ParsePosition(String),
}
