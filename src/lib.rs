//! Depth-limited game tree search for the board game 'Connect 4'
//!
//! Three interchangeable strategies choose a move by looking a fixed number of
//! plies ahead and scoring the positions at the search horizon with a static
//! heuristic: exact minimax, minimax with alpha-beta pruning, and expectimax,
//! which treats the opponent as playing uniformly at random.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_search::{board::Player, ArrayBoard, Strategy};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = ArrayBoard::from_moves("4455")?;
//! let column = Strategy::AlphaBeta.choose_move(Player::One, &board, 3);
//!
//! // completing three in a row with an open end on both sides
//! assert!(column == Some(2) || column == Some(5));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod arrayboard;

pub mod evaluator;

pub mod successors;

pub mod search;

pub mod minimax;

pub mod alphabeta;

pub mod expectimax;

pub mod match_runner;

mod test;

pub use alphabeta::alphabeta;
pub use arrayboard::{ArrayBoard, GameState};
pub use board::{Board, Cell, Player};
pub use evaluator::evaluate;
pub use expectimax::expectimax;
pub use minimax::minimax;
pub use search::{SearchOutcome, Strategy};
pub use successors::successors;

/// The width of the standard game board in tiles
pub const WIDTH: usize = 7;

/// The height of the standard game board in tiles
pub const HEIGHT: usize = 6;

// a line of four must fit on the standard board in every orientation
const_assert!(WIDTH >= arrayboard::LINE_LENGTH && HEIGHT >= arrayboard::LINE_LENGTH);
