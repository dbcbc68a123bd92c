//! Board state and win/draw detection for Tic-Tac-Toe.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mark::X => "X",
            Mark::O => "O",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    InProgress,
    Won(Mark),
    Draw,
}

/// The 3x3 grid. Row-major everywhere, including the AI's scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Mark>; 3]; 3],
}

const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells[row][col]
    }

    pub fn is_empty_cell(&self, row: usize, col: usize) -> bool {
        self.cells[row][col].is_none()
    }

    pub(crate) fn place(&mut self, row: usize, col: usize, mark: Mark) {
        self.cells[row][col] = Some(mark);
    }

    pub(crate) fn clear(&mut self, row: usize, col: usize) {
        self.cells[row][col] = None;
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Tests all 8 lines. The board never holds two winners because play
    /// stops the instant a winning line appears.
    pub fn winner(&self) -> Option<Mark> {
        for line in &LINES {
            let [a, b, c] = line;
            if let Some(mark) = self.cells[a.0][a.1] {
                if self.cells[b.0][b.1] == Some(mark) && self.cells[c.0][c.1] == Some(mark) {
                    return Some(mark);
                }
            }
        }
        None
    }

    pub fn status(&self) -> Status {
        if let Some(mark) = self.winner() {
            Status::Won(mark)
        } else if self.is_full() {
            Status::Draw
        } else {
            Status::InProgress
        }
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                if self.cells[row][col].is_none() {
                    cells.push((row, col));
                }
            }
        }
        cells
    }
}
