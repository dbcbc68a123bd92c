//! Data structures for the two-seat Texas Hold'em table.

use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// Betting streets. There is no pot logic beyond the fixed ante: the
/// showdown reveals cards without ranking hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    pub fn next(self) -> Street {
        match self {
            Street::PreFlop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }

    /// How many community cards are dealt entering this street.
    pub fn cards_dealt(self) -> usize {
        match self {
            Street::PreFlop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Showdown => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Seat {
    pub player: crate::engine::PlayerId,
    pub hole: Vec<Card>,
    pub folded: bool,
}
