//! The board capabilities consumed by the evaluator and the search engines

use thiserror::Error;

/// One of the two players of the game
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Returns the other player
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The mark this player leaves in a cell
    pub fn cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

/// The contents of a single board cell
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    /// Whether this cell holds a mark of `player`
    pub fn is(&self, player: Player) -> bool {
        *self == player.cell()
    }
}

/// Errors raised when building or playing on a board
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid move, column {column} out of range. Columns must be between 1 and {cols}")]
    ColumnOutOfRange { column: usize, cols: usize },
    #[error("Invalid move, column {0} full")]
    ColumnFull(usize),
    #[error("Invalid position, game is over")]
    GameOver,
    #[error("could not parse '{0}' as a valid move")]
    Unparsable(char),
    #[error("invalid board dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
}

/// A fixed-size grid with per-column drop semantics
///
/// # Notes
/// Searches clone the board once per explored move, so `clone` must return a
/// deep copy: placing a mark on a clone never affects the original.
/// `place` is only called on columns for which `placeable` returned true.
pub trait Board: Clone {
    /// The number of rows, fixed at creation
    fn rows(&self) -> usize;

    /// The number of columns, fixed at creation
    fn cols(&self) -> usize;

    /// Whether `column` still has an empty cell
    fn placeable(&self, column: usize) -> bool;

    /// Drops a mark of `player` into `column`
    fn place(&mut self, player: Player, column: usize);

    /// Whether the game has ended, by a win or a full board
    fn terminal(&self) -> bool;

    /// The cells of row `index`, `cols()` long
    fn row(&self, index: usize) -> Vec<Cell>;

    /// The cells of column `index`, `rows()` long
    fn col(&self, index: usize) -> Vec<Cell>;
}
