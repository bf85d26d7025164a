//! Expectimax, for opponents that play uniformly at random

use crate::board::{Board, Player};
use crate::search::{SearchContext, SearchOutcome};
use crate::successors::successors;

/// Chooses a column for `player` by searching `depth_limit` plies ahead
///
/// Returns `None` if the position is already over or `depth_limit` is zero.
pub fn expectimax<B: Board>(player: Player, board: &B, depth_limit: usize) -> Option<usize> {
    search(player, board, depth_limit).column
}

/// Performs an expectimax search, returning the chosen column and root value
pub fn search<B: Board>(player: Player, board: &B, depth_limit: usize) -> SearchOutcome {
    SearchContext::new(player).search_root(board, depth_limit, |context, child, _| {
        value(context, player.opponent(), child, depth_limit - 1)
    })
}

fn value<B: Board>(context: &mut SearchContext, mover: Player, board: &B, depth: usize) -> f64 {
    context.node_count += 1;

    if depth == 0 || board.terminal() {
        return context.leaf(board);
    }
    // a chance node without moves is scored directly rather than averaged
    let children = successors(mover, board);
    if children.is_empty() {
        return context.leaf(board);
    }

    if mover == context.root {
        let mut v = f64::NEG_INFINITY;
        for (_, child) in children.iter() {
            v = v.max(value(context, mover.opponent(), child, depth - 1));
        }
        v
    } else {
        // summed in column order so rounding is reproducible
        let mut total = 0.0;
        for (_, child) in children.iter() {
            total += value(context, mover.opponent(), child, depth - 1);
        }
        total / children.len() as f64
    }
}
