use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use crate::board::{Board, BoardError, Cell, Player};
use crate::{HEIGHT, WIDTH};

/// The number of aligned marks that wins the game
pub const LINE_LENGTH: usize = 4;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

impl GameState {
    fn win_for(player: Player) -> Self {
        match player {
            Player::One => GameState::PlayerOneWin,
            Player::Two => GameState::PlayerTwoWin,
        }
    }
}

/// A `rows` x `cols` connect 4 board backed by a flat array of cells
#[derive(Clone, Debug)]
pub struct ArrayBoard {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>, // cells are stored left-to-right, bottom-to-top
    heights: Vec<usize>,
    to_move: Player,
    /// The 1-indexed columns played so far
    pub game: String,
    num_moves: usize,
    pub state: GameState,
}

impl ArrayBoard {
    /// Creates an empty board of the given size, with player one to move
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
            heights: vec![0; cols],
            to_move: Player::One,
            game: String::new(),
            num_moves: 0,
            state: GameState::Playing,
        })
    }

    /// Creates a standard size board from a string of 1-indexed column moves,
    /// players alternating from player one
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self, BoardError> {
        Self::from_moves_with_size(HEIGHT, WIDTH, moves)
    }

    /// Creates a board of the given size from a string of 1-indexed column moves
    pub fn from_moves_with_size<S: AsRef<str>>(
        rows: usize,
        cols: usize,
        moves: S,
    ) -> Result<Self, BoardError> {
        let mut board = Self::new(rows, cols)?;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10) {
                Some(column) => {
                    board.play_checked(column as usize)?;
                }
                _ => return Err(BoardError::Unparsable(column_char)),
            }
        }
        Ok(board)
    }

    /// Plays a 1-indexed column for the player to move, validating the move first
    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<GameState, BoardError> {
        if self.state != GameState::Playing {
            return Err(BoardError::GameOver);
        }
        if column_one_indexed < 1 || column_one_indexed > self.cols {
            return Err(BoardError::ColumnOutOfRange {
                column: column_one_indexed,
                cols: self.cols,
            });
        }
        let column = column_one_indexed - 1;
        if !self.placeable(column) {
            return Err(BoardError::ColumnFull(column_one_indexed));
        }

        let player = self.to_move;
        self.place(player, column);
        self.game.push_str(&column_one_indexed.to_string());

        Ok(self.state)
    }

    /// The player whose turn it is
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[column + self.cols * row]
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        let cols: String = (1..=self.cols).map(|x| (x % 10).to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;
        for _ in 0..self.rows {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        let (origin_x, origin_y) = crossterm::cursor::position()?;

        for (idx, cell) in self.cells.iter().enumerate() {
            let (pos_x, pos_y) = (
                origin_x + (idx % self.cols) as u16,
                origin_y.saturating_sub((idx / self.cols) as u16 + 1),
            );

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match cell {
                            Cell::PlayerOne => Color::Red,
                            Cell::PlayerTwo => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
        }
        stdout
            .queue(MoveTo(origin_x, origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }

    // whether the mark just placed at (column, row) completes a line
    fn completes_line(&self, column: usize, row: usize, player: Player) -> bool {
        let mark = player.cell();
        // horizontal, both diagonals and vertical directions
        for &(dx, dy) in [(1i64, 0i64), (1, 1), (1, -1), (0, 1)].iter() {
            let mut run = 1;
            for &sign in [-1i64, 1].iter() {
                let mut x = column as i64 + sign * dx;
                let mut y = row as i64 + sign * dy;
                while x >= 0
                    && x < self.cols as i64
                    && y >= 0
                    && y < self.rows as i64
                    && self.cells[x as usize + self.cols * y as usize] == mark
                {
                    x += sign * dx;
                    y += sign * dy;
                    run += 1;
                }
            }
            if run >= LINE_LENGTH {
                return true;
            }
        }
        false
    }
}

impl Default for ArrayBoard {
    fn default() -> Self {
        Self {
            rows: HEIGHT,
            cols: WIDTH,
            cells: vec![Cell::Empty; WIDTH * HEIGHT],
            heights: vec![0; WIDTH],
            to_move: Player::One,
            game: String::new(),
            num_moves: 0,
            state: GameState::Playing,
        }
    }
}

impl Board for ArrayBoard {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn placeable(&self, column: usize) -> bool {
        column < self.cols && self.heights[column] < self.rows
    }

    fn place(&mut self, player: Player, column: usize) {
        let row = self.heights[column];
        self.cells[column + self.cols * row] = player.cell();
        self.heights[column] += 1;
        self.num_moves += 1;
        self.to_move = player.opponent();

        if self.state == GameState::Playing {
            if self.completes_line(column, row, player) {
                self.state = GameState::win_for(player);
            } else if self.num_moves == self.rows * self.cols {
                self.state = GameState::Draw;
            }
        }
    }

    fn terminal(&self) -> bool {
        self.state != GameState::Playing
    }

    fn row(&self, index: usize) -> Vec<Cell> {
        self.cells[index * self.cols..(index + 1) * self.cols].to_vec()
    }

    fn col(&self, index: usize) -> Vec<Cell> {
        (0..self.rows).map(|row| self.cell(row, index)).collect()
    }
}
