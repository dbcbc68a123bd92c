pub mod game;
pub mod state;

pub use game::{BlackjackSession, BlackjackView};
pub use state::{dealer_should_hit, outcome, Hand, Outcome, Phase};
