//! Square board geometry with row/column coordinates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Largest board the algebraic notation can address (columns `a`..`z`)
pub const MAX_NOTATION_SIZE: usize = 26;

/// Direction vectors as (drow, dcol)
/// Index: 0=NW, 1=N, 2=NE, 3=W, 4=E, 5=SW, 6=S, 7=SE
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1), // NW
    (-1, 0),  // N
    (-1, 1),  // NE
    (0, -1),  // W
    (0, 1),   // E
    (1, -1),  // SW
    (1, 0),   // S
    (1, 1),   // SE
];

/// State of a single square
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Black => 'B',
            Cell::White => 'W',
        }
    }
}

/// 0-indexed board coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step `distance` squares along `direction`.
    /// Returns None when the result would be negative; the upper bound is the board's concern.
    pub fn offset(self, (dr, dc): (isize, isize), distance: isize) -> Option<Coord> {
        let row = self.row.checked_add_signed(dr * distance)?;
        let col = self.col.checked_add_signed(dc * distance)?;
        Some(Coord::new(row, col))
    }
}

/// Algebraic notation: column letter then 1-based row ("d3" is row 2, col 3).
/// Columns past `z` fall back to the 0-indexed "(row, col)" form, which `FromStr` also reads.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.col < MAX_NOTATION_SIZE {
            let col = (b'a' + self.col as u8) as char;
            write!(f, "{}{}", col, self.row + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

impl FromStr for Coord {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || EngineError::ParseCoord(s.to_string());
        let s = s.trim();
        if let Some(coord) = parse_row_col(s) {
            return Ok(coord);
        }
        let mut chars = s.chars();

        let col_char = chars.next().ok_or_else(err)?.to_ascii_lowercase();
        if !col_char.is_ascii_lowercase() {
            return Err(err());
        }
        let col = (col_char as u8 - b'a') as usize;

        let row: usize = chars.as_str().parse().map_err(|_| err())?;
        if row == 0 {
            return Err(err());
        }

        Ok(Coord::new(row - 1, col))
    }
}

/// "(row, col)" or "row,col", both 0-indexed
fn parse_row_col(s: &str) -> Option<Coord> {
    let inner = s
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(s);
    let (row, col) = inner.split_once(',')?;
    Some(Coord::new(row.trim().parse().ok()?, col.trim().parse().ok()?))
}

/// Header label for a column: its letter, or the last digit of the index past `z`
fn column_label(col: usize) -> char {
    if col < MAX_NOTATION_SIZE {
        (b'a' + col as u8) as char
    } else {
        char::from_digit((col % 10) as u32, 10).unwrap_or('?')
    }
}

/// n x n grid of cells, stored row-major
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// All-empty board
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if (row, col) is on the board
    pub fn is_valid_coord(&self, row: isize, col: isize) -> bool {
        let n = self.size as isize;
        (0..n).contains(&row) && (0..n).contains(&col)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Cell at `coord`, None if off the board
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if self.contains(coord) {
            Some(self.cells[coord.row * self.size + coord.col])
        } else {
            None
        }
    }

    /// Overwrite the cell at `coord`. Off-board writes are ignored.
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        if self.contains(coord) {
            self.cells[coord.row * self.size + coord.col] = cell;
        }
    }

    /// Number of cells in the given state
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Every coordinate in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let n = self.size;
        (0..n).flat_map(move |row| (0..n).map(move |col| Coord::new(row, col)))
    }

    /// Every (coord, cell) pair in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.coords().zip(self.cells.iter().copied())
    }

    /// Render the grid, marking `highlight` squares with `*` when they are empty
    pub fn render(&self, highlight: &[Coord]) -> String {
        let mut out = String::from("  ");
        for col in 0..self.size {
            out.push(' ');
            out.push(column_label(col));
        }

        for row in 0..self.size {
            out.push_str(&format!("\n{:>2}", row + 1));
            for col in 0..self.size {
                let coord = Coord::new(row, col);
                let cell = self.get(coord).unwrap_or_default();
                let symbol = if cell.is_empty() && highlight.contains(&coord) {
                    '*'
                } else {
                    cell.symbol()
                };
                out.push(' ');
                out.push(symbol);
            }
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[]))
    }
}
