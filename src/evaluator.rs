//! Static scoring of frontier positions
//!
//! A position is scored by counting every length-4 line segment on the board
//! that can still become a win for exactly one player, bucketed by how many
//! marks that player already has in it.

use static_assertions::*;

use crate::arrayboard::LINE_LENGTH;
use crate::board::{Board, Cell, Player};

/// The reward for a segment holding 0, 1, 2, 3 or 4 marks of a single player
pub const WEIGHTS: [i64; LINE_LENGTH + 1] = [0, 1, 4, 16, 1000];

// a completed line must outweigh everything else a segment can contribute
const_assert!(WEIGHTS[4] > 16 * WEIGHTS[3]);
const_assert_eq!(WEIGHTS[0], 0);

/// A count of open segments indexed by how many marks one player has in them
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct Histogram(pub [u32; LINE_LENGTH + 1]);

impl Histogram {
    /// The weighted sum of the buckets
    pub fn score(&self) -> i64 {
        self.0
            .iter()
            .zip(WEIGHTS.iter())
            .map(|(&count, &weight)| i64::from(count) * weight)
            .sum()
    }
}

/// Collects every length-4 window over the board, in all four orientations
///
/// Diagonals are read column-wise from copies of the rows shifted by their
/// index, padded with `None` so each padded row has the same length. Windows
/// containing padding are not real board segments and are left for the caller
/// to discard.
fn segments<B: Board>(board: &B) -> Vec<Vec<Option<Cell>>> {
    let (rows, cols) = (board.rows(), board.cols());
    let mut lines: Vec<Vec<Option<Cell>>> = Vec::new();

    for r in 0..rows {
        lines.push(board.row(r).into_iter().map(Some).collect());
    }
    for c in 0..cols {
        lines.push(board.col(c).into_iter().map(Some).collect());
    }

    let shifted = |left: bool| -> Vec<Vec<Option<Cell>>> {
        (0..rows)
            .map(|r| {
                let (before, after) = if left { (r, rows - 1 - r) } else { (rows - 1 - r, r) };
                std::iter::repeat(None)
                    .take(before)
                    .chain(board.row(r).into_iter().map(Some))
                    .chain(std::iter::repeat(None).take(after))
                    .collect()
            })
            .collect()
    };
    for padded in [shifted(true), shifted(false)].iter() {
        for c in 0..cols + rows - 1 {
            lines.push(padded.iter().map(|row| row[c]).collect());
        }
    }

    lines
        .iter()
        .flat_map(|line| line.windows(LINE_LENGTH).map(|w| w.to_vec()))
        .collect()
}

/// Builds the open-segment histograms of `player` and of their opponent
pub fn histograms<B: Board>(player: Player, board: &B) -> (Histogram, Histogram) {
    let adversary = player.opponent();
    let mut score = Histogram::default();
    let mut adv_score = Histogram::default();

    for segment in segments(board) {
        if segment.iter().any(Option::is_none) {
            continue;
        }
        let count = |p: Player| segment.iter().flatten().filter(|c| c.is(p)).count();
        let (mine, theirs) = (count(player), count(adversary));
        if theirs == 0 {
            score.0[mine] += 1;
        }
        if mine == 0 {
            adv_score.0[theirs] += 1;
        }
    }
    (score, adv_score)
}

/// Scores `board` from the perspective of `player`
///
/// Positive scores favour `player`, and swapping the perspective negates the
/// score.
pub fn evaluate<B: Board>(player: Player, board: &B) -> i64 {
    let (reward, penalty) = histograms(player, board);
    reward.score() - penalty.score()
}
