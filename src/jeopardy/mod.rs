//! The Jeopardy engine: board state, answer judging, wagering, and the
//! phase machine driving a full game.

pub mod game;
pub mod judge;
pub mod source;
pub mod state;
pub mod wager;

pub use game::{ClueResult, JeopardySession, Verdict};
pub use source::{
    prefix_or_default, HttpPrefixGenerator, HttpTriviaSource, PrefixGenerator, StaticPrefix,
    TriviaSource,
};
pub use state::{Category, CategoryView, FinalQuestion, JeopardyView, Phase, Question, TriviaSet};
pub use wager::{daily_double_wager, final_wager, max_wager};
