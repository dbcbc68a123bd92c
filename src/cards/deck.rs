//! A standard 52-card playing deck with remove-one dealing semantics.

use super::card::{Card, Rank, Suit};
use crate::error::GameError;
use rand::seq::SliceRandom;
use std::collections::HashSet;

pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}

impl Deck {
    /// Creates a new, ordered standard 52-card deck.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for &suit in &Suit::ALL {
            for &rank in &Rank::ALL {
                cards.push(Card { rank, suit });
            }
        }
        Deck { cards }
    }

    /// The usual starting point: a fresh deck, uniformly shuffled.
    pub fn standard_shuffled() -> Self {
        let mut deck = Self::standard();
        deck.shuffle();
        deck
    }

    /// Builds a deck from external card codes. Malformed codes and
    /// duplicates are skipped with a reported warning rather than raising —
    /// the caller decides whether the surviving count is acceptable.
    pub fn from_codes<'a, I>(codes: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut cards = Vec::with_capacity(52);
        for code in codes {
            match Card::from_code(code) {
                Some(card) => {
                    if seen.insert(card) {
                        cards.push(card);
                    } else {
                        tracing::warn!(target: "cards.deck", code, "duplicate card code skipped");
                    }
                }
                None => {
                    tracing::warn!(target: "cards.deck", code, "malformed card code skipped");
                }
            }
        }
        Deck { cards }
    }

    /// Shuffles the deck uniformly.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rand::rng());
    }

    /// Deals one card from the top of the deck. An empty deck is fatal for
    /// the current round, not retryable.
    pub fn deal(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    /// Deals `count` cards, failing before any are removed if the deck is
    /// too short.
    pub fn deal_many(&mut self, count: usize) -> Result<Vec<Card>, GameError> {
        if self.remaining() < count {
            return Err(GameError::EmptyDeck);
        }
        let mut hand = Vec::with_capacity(count);
        for _ in 0..count {
            hand.push(self.deal()?);
        }
        Ok(hand)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// True when the deck holds exactly the 52 distinct standard cards.
    pub fn is_complete(&self) -> bool {
        if self.cards.len() != 52 {
            return false;
        }
        let unique: HashSet<_> = self.cards.iter().collect();
        unique.len() == 52
    }
}
