//! Strategy selection and the bookkeeping shared by every search engine

use log::{debug, trace};
use thiserror::Error;

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Player};
use crate::evaluator::evaluate;
use crate::successors::successors;
use crate::{alphabeta, expectimax, minimax};

/// The result of a single top-level search
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SearchOutcome {
    /// The chosen column, `None` when no move could be recorded
    pub column: Option<usize>,
    /// The value of the root position for the searching player
    pub value: f64,
    /// The number of game tree nodes visited, including the root
    pub node_count: usize,
    /// The number of positions scored by the evaluator
    pub evaluations: usize,
}

/// State scoped to one top-level search call
///
/// Holds the searching player, whose perspective every leaf is scored from,
/// and the diagnostic counters. A fresh context is built for every call, so
/// concurrent searches never share one.
pub(crate) struct SearchContext {
    pub root: Player,
    pub node_count: usize,
    pub evaluations: usize,
}

impl SearchContext {
    pub fn new(root: Player) -> Self {
        Self {
            root,
            node_count: 0,
            evaluations: 0,
        }
    }

    /// Scores a frontier position from the searching player's perspective
    pub fn leaf<B: Board>(&mut self, board: &B) -> f64 {
        self.evaluations += 1;
        evaluate(self.root, board) as f64
    }

    /// Searches the root position, a maximizing node for the searching player
    ///
    /// `child_value` computes the value of a root child given the best value
    /// found so far. The column of a child is recorded only when its value is
    /// strictly greater than every earlier child's, so among equal values the
    /// leftmost column wins. A depth limit of zero never expands the root and
    /// therefore never records a move.
    pub fn search_root<B, F>(mut self, board: &B, depth_limit: usize, mut child_value: F) -> SearchOutcome
    where
        B: Board,
        F: FnMut(&mut Self, &B, f64) -> f64,
    {
        self.node_count += 1;

        let children = if depth_limit == 0 || board.terminal() {
            Vec::new()
        } else {
            successors(self.root, board)
        };
        if children.is_empty() {
            let value = self.leaf(board);
            return self.finish(None, value);
        }

        let mut best = f64::NEG_INFINITY;
        let mut best_move = None;
        for (column, child) in children.iter() {
            let value = child_value(&mut self, child, best);
            trace!("root column {} has value {}", column, value);
            if value > best {
                best = value;
                best_move = Some(*column);
            }
        }
        self.finish(best_move, best)
    }

    fn finish(self, column: Option<usize>, value: f64) -> SearchOutcome {
        SearchOutcome {
            column,
            value,
            node_count: self.node_count,
            evaluations: self.evaluations,
        }
    }
}

/// The available game tree search strategies
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Strategy {
    /// Exact depth-limited minimax
    Minimax,
    /// Minimax with alpha-beta pruning
    AlphaBeta,
    /// Expectimax, modelling the opponent as playing uniformly at random
    Expectimax,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Minimax, Strategy::AlphaBeta, Strategy::Expectimax];

    /// Searches `depth_limit` plies ahead and returns the outcome with its diagnostics
    pub fn search<B: Board>(self, player: Player, board: &B, depth_limit: usize) -> SearchOutcome {
        let outcome = match self {
            Strategy::Minimax => minimax::search(player, board, depth_limit),
            Strategy::AlphaBeta => alphabeta::search(player, board, depth_limit),
            Strategy::Expectimax => expectimax::search(player, board, depth_limit),
        };
        debug!(
            "{} at depth {} chose {:?} (value {}, {} nodes, {} evaluations)",
            self, depth_limit, outcome.column, outcome.value, outcome.node_count, outcome.evaluations
        );
        outcome
    }

    /// Chooses a column for `player`, or `None` when the position has no move
    /// or `depth_limit` is zero
    pub fn choose_move<B: Board>(self, player: Player, board: &B, depth_limit: usize) -> Option<usize> {
        self.search(player, board, depth_limit).column
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alphabeta",
            Strategy::Expectimax => "expectimax",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown strategy '{0}' (expected 'minimax', 'alphabeta' or 'expectimax')")]
pub struct StrategyParseError(pub String);

impl FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimax" => Ok(Strategy::Minimax),
            "alphabeta" | "alpha-beta" => Ok(Strategy::AlphaBeta),
            "expectimax" => Ok(Strategy::Expectimax),
            _ => Err(StrategyParseError(s.to_string())),
        }
    }
}
