use crate::board::{Board, Player};

/// Lists every position reachable by one move of `player`
///
/// Columns are visited left to right and full columns are skipped. Each child
/// is a clone of `board` with the move applied, paired with its column index.
/// The search engines break ties in favour of the first child, so this order
/// decides which of several equally good moves gets played.
pub fn successors<B: Board>(player: Player, board: &B) -> Vec<(usize, B)> {
    (0..board.cols())
        .filter(|&column| board.placeable(column))
        .map(|column| {
            let mut child = board.clone();
            child.place(player, column);
            (column, child)
        })
        .collect()
}
