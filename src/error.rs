//! The shared error taxonomy for all game engines.
//!
//! Collaborator failures never crash a session: callers either fall back
//! (deck source), surface a "could not start" failure (trivia source), or
//! log-and-continue (balance ledger).

use crate::engine::GameKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Rejected locally with no state mutation; reported to the actor only.
    #[error("invalid move: {0}")]
    InvalidMove(String),

    /// A session of this kind already exists for the channel.
    #[error("a {0} game is already active in this channel")]
    AlreadyActive(GameKind),

    /// Stale or nonexistent selection reference; no state mutation.
    #[error("not found: {0}")]
    NotFound(String),

    /// Fatal to the current hand; the caller must end or reset the round.
    #[error("the deck has no cards left")]
    EmptyDeck,

    /// A remote collaborator (deck, trivia, text-gen) failed.
    #[error("external fetch from {what} failed: {why}")]
    ExternalFetch { what: &'static str, why: String },

    /// Bounded user-input wait expired. Not a failure: every wait has a
    /// documented default path.
    #[error("timed out waiting for user input")]
    Timeout,
}

impl GameError {
    pub(crate) fn fetch(what: &'static str, why: impl Into<String>) -> Self {
        Self::ExternalFetch {
            what,
            why: why.into(),
        }
    }
}
