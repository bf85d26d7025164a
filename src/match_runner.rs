//! Self-play matches between two search strategies
//!
//! Every strategy is deterministic, so each game starts from a different
//! fixed opening to keep the games of a match distinct. Openings are
//! enumerated in column order, and with alternating colours every opening is
//! played once with each strategy moving first.

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;

use crate::arrayboard::{ArrayBoard, GameState};
use crate::board::{Board, Player};
use crate::search::Strategy;
use crate::{HEIGHT, WIDTH};

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: usize,
    /// Search depth for both strategies
    pub depth: usize,
    pub rows: usize,
    pub cols: usize,
    /// Number of plies played from the opening book before the strategies take over
    pub opening_plies: usize,
    /// Whether to alternate which strategy moves first each game
    pub alternate_colors: bool,
    /// Play games on the rayon thread pool
    pub parallel: bool,
    /// Draw a progress bar on the terminal
    pub progress: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            depth: 4,
            rows: HEIGHT,
            cols: WIDTH,
            opening_plies: 2,
            alternate_colors: true,
            parallel: true,
            progress: true,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 {
            bail!("search depth must be at least 1");
        }
        if self.rows == 0 || self.cols == 0 {
            bail!("invalid board dimensions {}x{}", self.rows, self.cols);
        }
        if self.opening_plies >= self.rows * self.cols {
            bail!("{} opening plies would fill the board", self.opening_plies);
        }
        Ok(())
    }
}

/// The result of one game from the first strategy's point of view
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameResult {
    Win,
    Draw,
    Loss,
}

impl GameResult {
    fn flip(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }
}

/// A finished game
#[derive(Clone, Debug)]
pub struct GameRecord {
    /// The 1-indexed columns played, openings included
    pub moves: String,
    /// The final state of the board
    pub state: GameState,
    /// Set when a player had no move to offer and gave up the game
    pub resigned: Option<Player>,
}

impl GameRecord {
    /// The winner of the game, if any
    pub fn winner(&self) -> Option<Player> {
        match (self.state, self.resigned) {
            (_, Some(player)) => Some(player.opponent()),
            (GameState::PlayerOneWin, None) => Some(Player::One),
            (GameState::PlayerTwoWin, None) => Some(Player::Two),
            _ => None,
        }
    }
}

/// Win/draw/loss tallies of a match
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct MatchResult {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl MatchResult {
    pub fn add(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::Loss => self.losses += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    /// The first strategy's score, counting a draw as half a win
    pub fn score(&self) -> f64 {
        self.wins as f64 + 0.5 * self.draws as f64
    }
}

/// Runs matches between two strategies
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Plays a full match, returning the tallies from `first`'s perspective
    pub fn run_match(&self, first: Strategy, second: Strategy) -> Result<MatchResult> {
        info!(
            "{} vs {}: {} games at depth {}",
            first, second, self.config.num_games, self.config.depth
        );

        let progress = if self.config.progress {
            ProgressBar::new(self.config.num_games as u64)
        } else {
            ProgressBar::hidden()
        };
        progress.set_style(
            ProgressStyle::default_bar()
                .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
                .progress_chars("█▓▒░  "),
        );

        let play = |game_number: usize| -> Result<GameResult> {
            let result = self.play_numbered(first, second, game_number);
            progress.inc(1);
            result
        };
        let results: Vec<GameResult> = if self.config.parallel {
            (0..self.config.num_games)
                .into_par_iter()
                .map(play)
                .collect::<Result<_>>()?
        } else {
            (0..self.config.num_games)
                .map(play)
                .collect::<Result<_>>()?
        };
        progress.finish();

        let mut tally = MatchResult::default();
        for result in results {
            tally.add(result);
        }
        info!(
            "{} vs {}: +{} ={} -{}",
            first, second, tally.wins, tally.draws, tally.losses
        );
        Ok(tally)
    }

    // plays game `game_number` of a match, flipping colours on odd games when configured
    fn play_numbered(
        &self,
        first: Strategy,
        second: Strategy,
        game_number: usize,
    ) -> Result<GameResult> {
        let (opening, first_moves_first) = if self.config.alternate_colors {
            (game_number / 2, game_number % 2 == 0)
        } else {
            (game_number, true)
        };

        let result = if first_moves_first {
            Self::result_for(&self.play_game(first, second, opening)?, Player::One)
        } else {
            Self::result_for(&self.play_game(second, first, opening)?, Player::One).flip()
        };
        Ok(result)
    }

    fn result_for(record: &GameRecord, player: Player) -> GameResult {
        match record.winner() {
            Some(winner) if winner == player => GameResult::Win,
            Some(_) => GameResult::Loss,
            None => GameResult::Draw,
        }
    }

    /// Plays one game from opening number `opening`, `one` moving first
    pub fn play_game(&self, one: Strategy, two: Strategy, opening: usize) -> Result<GameRecord> {
        let mut board = self.opening(opening)?;

        let mut resigned = None;
        while !board.terminal() {
            let player = board.to_move();
            let strategy = match player {
                Player::One => one,
                Player::Two => two,
            };
            match strategy.choose_move(player, &board, self.config.depth) {
                Some(column) => {
                    board.play_checked(column + 1)?;
                }
                None => {
                    resigned = Some(player);
                    break;
                }
            }
        }

        debug!("game {} finished: {:?}", board.game, board.state);
        Ok(GameRecord {
            moves: board.game,
            state: board.state,
            resigned,
        })
    }

    /// Builds the board after opening number `index`
    ///
    /// The index is read as a number in base `cols`, one digit per ply with the
    /// first ply most significant, and wraps around once every opening has
    /// been used.
    pub fn opening(&self, index: usize) -> Result<ArrayBoard> {
        let (rows, cols, plies) = (self.config.rows, self.config.cols, self.config.opening_plies);
        let mut board = ArrayBoard::new(rows, cols)?;

        let mut columns = Vec::with_capacity(plies);
        let mut rest = index;
        for _ in 0..plies {
            columns.push(rest % cols);
            rest /= cols;
        }
        for &column in columns.iter().rev() {
            if board.terminal() {
                break;
            }
            // fall back to the next open column when the opening's column is full
            let column = (0..cols)
                .map(|offset| (column + offset) % cols)
                .find(|&c| board.placeable(c))
                .unwrap_or(column);
            board.play_checked(column + 1)?;
        }
        Ok(board)
    }
}
