//! The minimax opponent.
//!
//! The 3x3 space is small enough to search exhaustively, so there is no
//! pruning and no depth weighting. Terminal states score +1 for an AI win,
//! -1 for a human win and 0 for a draw. Ties break to the first maximal
//! move in row-major scan order, which makes the opponent reproducible.

use super::state::{Board, Mark};

/// Picks the optimal move for `ai`, or `None` on a full/terminal board.
pub fn best_move(board: &Board, ai: Mark) -> Option<(usize, usize)> {
    if board.winner().is_some() {
        return None;
    }
    let mut scratch = board.clone();
    let mut best: Option<((usize, usize), i32)> = None;
    for (row, col) in board.empty_cells() {
        scratch.place(row, col, ai);
        let score = minimax(&mut scratch, ai, ai.opponent());
        scratch.clear(row, col);
        // Strict comparison keeps the first maximal move found.
        if best.map_or(true, |(_, s)| score > s) {
            best = Some(((row, col), score));
        }
    }
    best.map(|(cell, _)| cell)
}

fn minimax(board: &mut Board, ai: Mark, to_move: Mark) -> i32 {
    if let Some(winner) = board.winner() {
        return if winner == ai { 1 } else { -1 };
    }
    if board.is_full() {
        return 0;
    }

    let maximizing = to_move == ai;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for (row, col) in board.empty_cells() {
        board.place(row, col, to_move);
        let score = minimax(board, ai, to_move.opponent());
        board.clear(row, col);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}
