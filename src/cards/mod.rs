//! The shared card model used by every dealt-card game.

pub mod card;
pub mod deck;
pub mod source;

pub use card::{Card, Rank, Suit};
pub use deck::Deck;
pub use source::{shuffled_deck_or_local, DeckSource, HttpDeckSource, LocalDeckSource};
