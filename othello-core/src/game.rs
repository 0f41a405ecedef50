//! Game state, move legality, tile flipping and turn alternation

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Coord, DIRECTIONS};
use crate::error::EngineError;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Standard Othello board edge length
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Smallest board that can hold the four starting tiles
pub const MIN_BOARD_SIZE: usize = 2;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[default]
    Black = 0,
    White = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// The cell state this player's tiles occupy
    pub fn cell(self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("Black"),
            Player::White => f.write_str("White"),
        }
    }
}

/// Tiles on the board per player
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileCounts {
    pub black: usize,
    pub white: usize,
}

impl TileCounts {
    pub fn get(&self, player: Player) -> usize {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    fn get_mut(&mut self, player: Player) -> &mut usize {
        match player {
            Player::Black => &mut self.black,
            Player::White => &mut self.white,
        }
    }

    pub fn total(&self) -> usize {
        self.black + self.white
    }
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    BlackWins,
    WhiteWins,
    Tie,
}

impl GameResult {
    /// Decide a finished game by direct comparison of tile counts
    pub fn from_counts(counts: TileCounts) -> Self {
        use std::cmp::Ordering;
        match counts.black.cmp(&counts.white) {
            Ordering::Greater => GameResult::BlackWins,
            Ordering::Less => GameResult::WhiteWins,
            Ordering::Equal => GameResult::Tie,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::BlackWins => Some(Player::Black),
            GameResult::WhiteWins => Some(Player::White),
            GameResult::Ongoing | GameResult::Tie => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Ongoing => f.write_str("Ongoing"),
            GameResult::BlackWins => f.write_str("Black wins"),
            GameResult::WhiteWins => f.write_str("White wins"),
            GameResult::Tie => f.write_str("Tie"),
        }
    }
}

/// What happened when the turn was handed on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The opponent moves next
    Next(Player),
    /// The opponent had no legal move and forfeited; `next` moves again
    Passed { passed: Player, next: Player },
    /// Neither side can move
    GameOver(GameResult),
}

/// Final figures handed to score keeping
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub board_size: usize,
    pub black: usize,
    pub white: usize,
    pub result: GameResult,
}

// ============================================================================
// GAME ENGINE
// ============================================================================

/// Othello rules engine: the board, the player to move and per-player tile counts.
///
/// Every mutator validates before it touches anything, so an `Err` leaves the
/// engine exactly as it was.
#[derive(Clone, Debug)]
pub struct GameEngine {
    board: Board,
    current_player: Player,
    counts: TileCounts,
    just_passed: bool,
}

impl GameEngine {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a new game on a `size` x `size` board with the four centre tiles placed.
    /// Black moves first.
    pub fn new(size: usize) -> Result<Self, EngineError> {
        if size < MIN_BOARD_SIZE {
            return Err(EngineError::DegenerateBoard(size));
        }
        if size % 2 != 0 {
            return Err(EngineError::OddBoardSize(size));
        }
        if size.checked_mul(size).is_none() {
            return Err(EngineError::BoardTooLarge(size));
        }
        Ok(Self::seeded(size))
    }

    /// Starting position; `size` must already be even and at least 2
    fn seeded(size: usize) -> Self {
        let mut board = Board::new(size);
        let c1 = size / 2 - 1;
        let c2 = size / 2;

        // Diagonal neighbours always differ
        board.set(Coord::new(c1, c2), Cell::Black);
        board.set(Coord::new(c1, c1), Cell::White);
        board.set(Coord::new(c2, c1), Cell::Black);
        board.set(Coord::new(c2, c2), Cell::White);

        Self {
            board,
            current_player: Player::Black,
            counts: TileCounts { black: 2, white: 2 },
            just_passed: false,
        }
    }

    /// Build a position from text rows: `B`/`X` black, `W`/`O` white, `.`/`-` empty.
    /// Whitespace inside a row is ignored.
    pub fn from_rows(rows: &[&str], to_move: Player) -> Result<Self, EngineError> {
        let size = rows.len();
        if size < MIN_BOARD_SIZE {
            return Err(EngineError::ParsePosition(format!(
                "need at least {} rows, got {}",
                MIN_BOARD_SIZE, size
            )));
        }

        let mut board = Board::new(size);
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != size {
                return Err(EngineError::ParsePosition(format!(
                    "row {} has {} squares, expected {}",
                    row + 1,
                    symbols.len(),
                    size
                )));
            }

            for (col, symbol) in symbols.into_iter().enumerate() {
                let cell = match symbol.to_ascii_uppercase() {
                    'B' | 'X' => Cell::Black,
                    'W' | 'O' => Cell::White,
                    '.' | '-' => Cell::Empty,
                    other => {
                        return Err(EngineError::ParsePosition(format!(
                            "unknown square {:?} in row {}",
                            other,
                            row + 1
                        )))
                    }
                };
                board.set(Coord::new(row, col), cell);
            }
        }

        let counts = TileCounts {
            black: board.count(Cell::Black),
            white: board.count(Cell::White),
        };

        Ok(Self {
            board,
            current_player: to_move,
            counts,
            just_passed: false,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Player to move
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn counts(&self) -> TileCounts {
        self.counts
    }

    /// Whether the last turn hand-over skipped a player
    pub fn just_passed(&self) -> bool {
        self.just_passed
    }

    /// Check if (row, col) lies on the board
    pub fn is_valid_coord(&self, row: isize, col: isize) -> bool {
        self.board.is_valid_coord(row, col)
    }

    // ========================================================================
    // MOVE LEGALITY
    // ========================================================================

    /// For each entry of [`DIRECTIONS`], whether placing at `at` as `player`
    /// would bracket at least one opposing tile in that direction.
    pub fn directions_to_flip(&self, at: Coord, player: Player) -> [bool; 8] {
        let mut flippable = [false; 8];
        if !self.board.contains(at) {
            return flippable;
        }
        for (slot, &dir) in flippable.iter_mut().zip(DIRECTIONS.iter()) {
            *slot = self.has_tile_to_flip(at, dir, player);
        }
        flippable
    }

    /// Scan outward from `at`: a run of one or more opposing tiles closed by our own
    fn has_tile_to_flip(&self, at: Coord, dir: (isize, isize), player: Player) -> bool {
        let own = player.cell();
        let opp = player.opponent().cell();
        let mut distance = 1;

        loop {
            match at.offset(dir, distance).and_then(|c| self.board.get(c)) {
                Some(cell) if cell == opp => distance += 1,
                Some(cell) if cell == own => return distance > 1,
                _ => return false,
            }
        }
    }

    /// A move is legal when it is on the board, the square is empty and at
    /// least one direction flips. `None` (no move) is never legal.
    pub fn is_legal_move(&self, mv: impl Into<Option<Coord>>, player: Player) -> bool {
        let at = match mv.into() {
            Some(at) => at,
            None => return false,
        };
        self.board.get(at) == Some(Cell::Empty)
            && DIRECTIONS
                .iter()
                .any(|&dir| self.has_tile_to_flip(at, dir, player))
    }

    /// Every legal move for `player`, row-major
    pub fn legal_moves(&self, player: Player) -> Vec<Coord> {
        self.board
            .coords()
            .filter(|&at| self.is_legal_move(at, player))
            .collect()
    }

    /// Whether `player` can move at all; stops at the first legal square
    pub fn has_legal_move(&self, player: Player) -> bool {
        self.board
            .coords()
            .any(|at| self.is_legal_move(at, player))
    }

    /// Classify why `at` cannot be played, if it cannot
    pub fn check_move(&self, at: Coord, player: Player) -> Result<(), EngineError> {
        if !self.board.contains(at) {
            return Err(EngineError::OutOfBounds {
                row: at.row,
                col: at.col,
                size: self.size(),
            });
        }
        if !self.is_legal_move(at, player) {
            return Err(EngineError::IllegalMove { coord: at, player });
        }
        Ok(())
    }

    /// The opposing tiles a legal move at `at` would convert
    fn flips_for(&self, at: Coord, player: Player) -> Vec<Coord> {
        let opp = player.opponent().cell();
        let mut flips = Vec::new();

        for &dir in &DIRECTIONS {
            if !self.has_tile_to_flip(at, dir, player) {
                continue;
            }
            flips.extend(
                (1..)
                    .map_while(|distance| at.offset(dir, distance))
                    .take_while(|&c| self.board.get(c) == Some(opp)),
            );
        }

        flips
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Place a tile for `player` at `at` and flip every bracketed run.
    /// Returns the flipped squares. Does not change whose turn it is.
    pub fn apply_move(&mut self, at: Coord, player: Player) -> Result<Vec<Coord>, EngineError> {
        self.check_move(at, player)?;

        let flips = self.flips_for(at, player);
        let opponent = player.opponent();

        self.board.set(at, player.cell());
        *self.counts.get_mut(player) += 1;

        for &square in &flips {
            self.board.set(square, player.cell());
            *self.counts.get_mut(player) += 1;
            *self.counts.get_mut(opponent) -= 1;
        }

        Ok(flips)
    }

    /// Pick a legal move for `player` uniformly at random and apply it
    pub fn random_move<R: Rng + ?Sized>(
        &mut self,
        player: Player,
        rng: &mut R,
    ) -> Result<Coord, EngineError> {
        let moves = self.legal_moves(player);
        if moves.is_empty() {
            return Err(EngineError::NoLegalMoveAvailable(player));
        }

        let mv = moves[rng.gen_range(0..moves.len())];
        self.apply_move(mv, player)?;
        Ok(mv)
    }

    /// Apply `at` for the player to move, then hand the turn on
    pub fn play(&mut self, at: Coord) -> Result<TurnOutcome, EngineError> {
        self.apply_move(at, self.current_player)?;
        Ok(self.advance_turn())
    }

    // ========================================================================
    // TURN ALTERNATION
    // ========================================================================

    /// Hand the turn to the next player able to move.
    ///
    /// The opponent moves next if it can; otherwise it forfeits and the
    /// current player goes again; if neither can move the game is over.
    pub fn advance_turn(&mut self) -> TurnOutcome {
        let candidate = self.current_player.opponent();

        if self.has_legal_move(candidate) {
            self.current_player = candidate;
            self.just_passed = false;
            return TurnOutcome::Next(candidate);
        }

        if self.has_legal_move(self.current_player) {
            tracing::debug!("{} has no legal move and passes", candidate);
            self.just_passed = true;
            return TurnOutcome::Passed {
                passed: candidate,
                next: self.current_player,
            };
        }

        let result = self.result();
        tracing::debug!(
            "game over: {} ({}-{})",
            result,
            self.counts.black,
            self.counts.white
        );
        TurnOutcome::GameOver(result)
    }

    /// True when neither player has a legal move
    pub fn is_game_over(&self) -> bool {
        !self.has_legal_move(self.current_player)
            && !self.has_legal_move(self.current_player.opponent())
    }

    // ========================================================================
    // RESULTS
    // ========================================================================

    pub fn result(&self) -> GameResult {
        if self.is_game_over() {
            GameResult::from_counts(self.counts)
        } else {
            GameResult::Ongoing
        }
    }

    pub fn winner(&self) -> Option<Player> {
        self.result().winner()
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            board_size: self.size(),
            black: self.counts.black,
            white: self.counts.white,
            result: self.result(),
        }
    }

    /// Board with `highlight` squares marked, then the player to move and the score
    pub fn render(&self, highlight: &[Coord]) -> String {
        format!(
            "{}\n{} to move\nBlack: {}  |  White: {}",
            self.board.render(highlight),
            self.current_player,
            self.counts.black,
            self.counts.white
        )
    }
}

impl Default for GameEngine {
    /// Standard 8x8 starting position
    fn default() -> Self {
        Self::seeded(DEFAULT_BOARD_SIZE)
    }
}

/// Counts follow from the board, so equality is board plus player to move
impl PartialEq for GameEngine {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board && self.current_player == other.current_player
    }
}

impl Eq for GameEngine {}

impl fmt::Display for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[]))
    }
}

// ============================================================================
// TESTS
// ============================================================================
