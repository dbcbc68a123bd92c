//! Hand valuation and outcome rules for Blackjack.

use crate::cards::Card;
use crate::constants::DEALER_STANDS_AT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    PlayerTurn,
    DealerTurn,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Push,
}

/// An ordered sequence of dealt cards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Soft/hard total: aces start low and are promoted to 11 one at a
    /// time while the total stays at or under 21. Equivalent to counting
    /// each ace as 11 and demoting while busted.
    pub fn value(&self) -> u8 {
        let (mut total, mut aces): (u8, u8) = (0, 0);
        for card in &self.cards {
            let (value, is_ace) = card.rank.base_value();
            total = total.saturating_add(value);
            if is_ace {
                aces += 1;
            }
        }
        while aces > 0 && total.saturating_add(10) <= 21 {
            total += 10;
            aces -= 1;
        }
        total
    }

    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    /// A natural: 21 from the first two cards.
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21
    }

    pub fn display(&self) -> String {
        format!(
            "[ {} ]  `{}`",
            self.cards
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            self.value()
        )
    }
}

/// The fixed dealer policy: hit below 17, stand at or above.
pub fn dealer_should_hit(hand: &Hand) -> bool {
    hand.value() < DEALER_STANDS_AT
}

/// Adjudicates a finished round. A player bust is decided before the
/// dealer ever plays, so `player > 21` is an unconditional loss here too.
pub fn outcome(player: u8, dealer: u8) -> Outcome {
    if player > 21 {
        Outcome::Loss
    } else if dealer > 21 || player > dealer {
        Outcome::Win
    } else if dealer > player {
        Outcome::Loss
    } else {
        Outcome::Push
    }
}
