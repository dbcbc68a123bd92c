pub mod game;
pub mod state;

pub use game::{HoldemSession, HoldemView};
pub use state::{Seat, Street};
