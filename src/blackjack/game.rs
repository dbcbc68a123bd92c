//! The Blackjack session: one player against the house dealer.

use super::state::{dealer_should_hit, outcome, Hand, Outcome, Phase};
use crate::cards::{shuffled_deck_or_local, Deck, DeckSource};
use crate::engine::{
    Action, ActionPayload, Button, ChannelId, GameKind, GameUpdate, Interactive, Payout, PlayerId,
    RenderPayload, Renderable, Session,
};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlackjackView {
    pub phase: Phase,
    pub player_cards: Vec<String>,
    pub player_value: u8,
    /// Only the dealer's up-card until the player stands.
    pub dealer_cards: Vec<String>,
    pub outcome: Option<Outcome>,
    pub bet: i64,
}

pub struct BlackjackSession {
    channel: ChannelId,
    player: PlayerId,
    deck: Deck,
    player_hand: Hand,
    dealer_hand: Hand,
    bet: i64,
    phase: Phase,
    outcome: Option<Outcome>,
    last_action: Instant,
}

impl BlackjackSession {
    /// Deals the opening hands from the remote deck source (falling back
    /// to a local shuffle on any fetch failure). A natural 21 resolves the
    /// round immediately.
    pub async fn start(
        channel: ChannelId,
        player: PlayerId,
        bet: i64,
        source: &dyn DeckSource,
    ) -> Result<Self, GameError> {
        let deck = shuffled_deck_or_local(source).await;
        Self::with_deck(channel, player, bet, deck)
    }

    /// Starts from a caller-supplied deck. Used by tests and by adapters
    /// that pre-fetch decks.
    pub fn with_deck(
        channel: ChannelId,
        player: PlayerId,
        bet: i64,
        mut deck: Deck,
    ) -> Result<Self, GameError> {
        let mut player_hand = Hand::new();
        let mut dealer_hand = Hand::new();
        for _ in 0..2 {
            player_hand.add(deck.deal()?);
            dealer_hand.add(deck.deal()?);
        }
        let mut session = Self {
            channel,
            player,
            deck,
            player_hand,
            dealer_hand,
            bet,
            phase: Phase::PlayerTurn,
            outcome: None,
            last_action: Instant::now(),
        };
        if session.player_hand.is_blackjack() {
            session.resolve_dealer()?;
        }
        Ok(session)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    /// Player takes a card. Busting ends the round on the spot — the
    /// dealer never plays.
    pub fn hit(&mut self) -> Result<Phase, GameError> {
        if self.phase != Phase::PlayerTurn {
            return Err(GameError::InvalidMove("it is not your turn to act".into()));
        }
        self.last_action = Instant::now();
        self.player_hand.add(self.deck.deal()?);
        if self.player_hand.is_bust() {
            self.outcome = Some(Outcome::Loss);
            self.phase = Phase::Finished;
        } else if self.player_hand.value() == 21 {
            self.resolve_dealer()?;
        }
        Ok(self.phase)
    }

    /// Player stands; the dealer draws to 17 and the round is adjudicated.
    pub fn stand(&mut self) -> Result<Phase, GameError> {
        if self.phase != Phase::PlayerTurn {
            return Err(GameError::InvalidMove("it is not your turn to act".into()));
        }
        self.last_action = Instant::now();
        self.resolve_dealer()?;
        Ok(self.phase)
    }

    fn resolve_dealer(&mut self) -> Result<(), GameError> {
        self.phase = Phase::DealerTurn;
        while dealer_should_hit(&self.dealer_hand) {
            self.dealer_hand.add(self.deck.deal()?);
        }
        self.outcome = Some(outcome(self.player_hand.value(), self.dealer_hand.value()));
        self.phase = Phase::Finished;
        Ok(())
    }

    fn final_update(&self) -> GameUpdate {
        let (message, amount) = match self.outcome {
            Some(Outcome::Win) => ("You beat the dealer!".to_string(), self.bet),
            Some(Outcome::Loss) if self.player_hand.is_bust() => {
                ("Bust! The house takes it.".to_string(), -self.bet)
            }
            Some(Outcome::Loss) => ("The dealer wins.".to_string(), -self.bet),
            Some(Outcome::Push) => ("Push — bets returned.".to_string(), 0),
            None => return GameUpdate::ReRender,
        };
        GameUpdate::GameOver {
            message,
            payouts: vec![Payout {
                player: self.player,
                amount,
            }],
        }
    }

    pub fn view(&self) -> BlackjackView {
        let dealer_cards = if self.phase == Phase::PlayerTurn {
            // Hole card stays hidden while the player acts.
            let mut shown: Vec<String> = self
                .dealer_hand
                .cards
                .first()
                .map(|c| c.to_string())
                .into_iter()
                .collect();
            shown.push("??".to_string());
            shown
        } else {
            self.dealer_hand
                .cards
                .iter()
                .map(|c| c.to_string())
                .collect()
        };
        BlackjackView {
            phase: self.phase,
            player_cards: self
                .player_hand
                .cards
                .iter()
                .map(|c| c.to_string())
                .collect(),
            player_value: self.player_hand.value(),
            dealer_cards,
            outcome: self.outcome,
            bet: self.bet,
        }
    }
}

impl Interactive for BlackjackSession {
    fn handle(&mut self, action: &Action) -> GameUpdate {
        if action.actor != self.player {
            return GameUpdate::Reject("This is not your table.".into());
        }
        let pressed = match &action.payload {
            ActionPayload::Button(id) => id.as_str(),
            ActionPayload::Text(_) => return GameUpdate::NoOp,
        };
        let result = match pressed {
            "bj_hit" => self.hit(),
            "bj_stand" => self.stand(),
            _ => return GameUpdate::NoOp,
        };
        match result {
            Ok(Phase::Finished) => self.final_update(),
            Ok(_) => GameUpdate::ReRender,
            // An exhausted deck is fatal for the round: settle as a push.
            Err(GameError::EmptyDeck) => GameUpdate::GameOver {
                message: "The deck ran out; the round is void.".to_string(),
                payouts: vec![Payout {
                    player: self.player,
                    amount: 0,
                }],
            },
            Err(e) => GameUpdate::Reject(e.to_string()),
        }
    }
}

impl Renderable for BlackjackSession {
    fn render(&self) -> RenderPayload {
        let view = self.view();
        let dealer_line = view.dealer_cards.join(" ");
        let mut payload = RenderPayload::text("**Blackjack Table**")
            .field("Your hand", self.player_hand.display())
            .field("Dealer", format!("[ {dealer_line} ]"))
            .with_board(&view);
        if self.bet > 0 {
            payload = payload.field("Bet", format!("{}", self.bet));
        }
        if self.phase == Phase::PlayerTurn {
            payload = payload
                .button(Button::new("bj_hit", "Hit"))
                .button(Button::new("bj_stand", "Stand"));
        }
        payload
    }
}

impl Session for BlackjackSession {
    fn kind(&self) -> GameKind {
        GameKind::Blackjack
    }

    fn channel(&self) -> ChannelId {
        self.channel
    }

    fn idle_for(&self) -> Duration {
        self.last_action.elapsed()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
