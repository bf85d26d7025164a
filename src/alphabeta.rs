//! Minimax with alpha-beta pruning
//!
//! Alpha is the value the maximizing player can already guarantee on the path
//! to the root and beta is the value the minimizing player can guarantee.
//! Once a node's value falls outside that window the rest of its children
//! cannot change the result, so they are skipped. The chosen column and root
//! value are always the same as plain minimax.

use crate::board::{Board, Player};
use crate::search::{SearchContext, SearchOutcome};
use crate::successors::successors;

/// Chooses a column for `player` by searching `depth_limit` plies ahead
///
/// Returns `None` if the position is already over or `depth_limit` is zero.
pub fn alphabeta<B: Board>(player: Player, board: &B, depth_limit: usize) -> Option<usize> {
    search(player, board, depth_limit).column
}

/// Performs an alpha-beta search, returning the chosen column and root value
pub fn search<B: Board>(player: Player, board: &B, depth_limit: usize) -> SearchOutcome {
    // the root never cuts off, its alpha is simply the best value so far
    SearchContext::new(player).search_root(board, depth_limit, |context, child, alpha| {
        value(
            context,
            player.opponent(),
            child,
            depth_limit - 1,
            alpha,
            f64::INFINITY,
        )
    })
}

fn value<B: Board>(
    context: &mut SearchContext,
    mover: Player,
    board: &B,
    depth: usize,
    mut alpha: f64,
    mut beta: f64,
) -> f64 {
    context.node_count += 1;

    if depth == 0 || board.terminal() {
        return context.leaf(board);
    }
    let children = successors(mover, board);
    if children.is_empty() {
        return context.leaf(board);
    }

    if mover == context.root {
        let mut v = f64::NEG_INFINITY;
        for (_, child) in children.iter() {
            v = v.max(value(context, mover.opponent(), child, depth - 1, alpha, beta));
            // the minimizer above already has an option no better than this
            if v >= beta {
                return v;
            }
            alpha = alpha.max(v);
        }
        v
    } else {
        let mut v = f64::INFINITY;
        for (_, child) in children.iter() {
            v = v.min(value(context, mover.opponent(), child, depth - 1, alpha, beta));
            if v <= alpha {
                return v;
            }
            beta = beta.min(v);
        }
        v
    }
}
