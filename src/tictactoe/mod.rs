pub mod ai;
pub mod game;
pub mod state;

pub use game::{TicTacToeSession, TicTacToeView};
pub use state::{Board, Mark, Status};
