//! The heads-up Hold'em session.
//!
//! Streets advance on request and the showdown reveals both hole hands
//! without ranking them; the only money movement is the fixed ante, which
//! a fold forfeits. A genuine five-card evaluator is deliberately absent.

use super::state::{Seat, Street};
use crate::cards::{shuffled_deck_or_local, Card, Deck, DeckSource};
use crate::engine::{
    Action, ActionPayload, Button, ChannelId, GameKind, GameUpdate, Interactive, Payout, PlayerId,
    RenderPayload, Renderable, Session,
};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldemView {
    pub street: Street,
    pub community: Vec<String>,
    /// Hole cards, revealed only at showdown.
    pub revealed: Option<Vec<(u64, Vec<String>)>>,
    pub ante: i64,
    pub finished: bool,
}

pub struct HoldemSession {
    channel: ChannelId,
    seats: [Seat; 2],
    community: Vec<Card>,
    deck: Deck,
    street: Street,
    ante: i64,
    finished: bool,
    last_action: Instant,
}

impl HoldemSession {
    pub async fn start(
        channel: ChannelId,
        players: (PlayerId, PlayerId),
        ante: i64,
        source: &dyn DeckSource,
    ) -> Result<Self, GameError> {
        let deck = shuffled_deck_or_local(source).await;
        Self::with_deck(channel, players, ante, deck)
    }

    pub fn with_deck(
        channel: ChannelId,
        players: (PlayerId, PlayerId),
        ante: i64,
        mut deck: Deck,
    ) -> Result<Self, GameError> {
        let mut seats = [
            Seat {
                player: players.0,
                hole: Vec::new(),
                folded: false,
            },
            Seat {
                player: players.1,
                hole: Vec::new(),
                folded: false,
            },
        ];
        for _ in 0..2 {
            for seat in seats.iter_mut() {
                seat.hole.push(deck.deal()?);
            }
        }
        Ok(Self {
            channel,
            seats,
            community: Vec::new(),
            deck,
            street: Street::PreFlop,
            ante,
            finished: false,
            last_action: Instant::now(),
        })
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn community(&self) -> &[Card] {
        &self.community
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn seat_of(&self, player: PlayerId) -> Option<usize> {
        self.seats.iter().position(|s| s.player == player)
    }

    /// Deals the next street. At the river this moves to the cosmetic
    /// showdown and ends the hand.
    pub fn advance(&mut self) -> Result<Street, GameError> {
        if self.finished {
            return Err(GameError::InvalidMove("the hand is over".into()));
        }
        self.last_action = Instant::now();
        let next = self.street.next();
        let dealt = self.deck.deal_many(next.cards_dealt())?;
        self.community.extend(dealt);
        self.street = next;
        if self.street == Street::Showdown {
            self.finished = true;
        }
        Ok(self.street)
    }

    /// Folding forfeits the ante to the other seat.
    pub fn fold(&mut self, player: PlayerId) -> Result<(), GameError> {
        if self.finished {
            return Err(GameError::InvalidMove("the hand is over".into()));
        }
        let idx = self
            .seat_of(player)
            .ok_or_else(|| GameError::InvalidMove("you are not seated at this table".into()))?;
        self.last_action = Instant::now();
        self.seats[idx].folded = true;
        self.finished = true;
        Ok(())
    }

    fn showdown_update(&self) -> GameUpdate {
        if let Some(folded) = self.seats.iter().position(|s| s.folded) {
            let winner = &self.seats[1 - folded];
            let loser = &self.seats[folded];
            return GameUpdate::GameOver {
                message: format!("{} folds; {} takes the pot.", loser.player, winner.player),
                payouts: vec![
                    Payout {
                        player: winner.player,
                        amount: self.ante,
                    },
                    Payout {
                        player: loser.player,
                        amount: -self.ante,
                    },
                ],
            };
        }
        // No hand ranking: the reveal is the whole show and antes return.
        let reveal = self
            .seats
            .iter()
            .map(|s| {
                let cards = s
                    .hole
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("{}: [ {} ]", s.player, cards)
            })
            .collect::<Vec<_>>()
            .join("\n");
        GameUpdate::GameOver {
            message: format!("Showdown!\n{reveal}"),
            payouts: self
                .seats
                .iter()
                .map(|s| Payout {
                    player: s.player,
                    amount: 0,
                })
                .collect(),
        }
    }

    pub fn view(&self) -> HoldemView {
        let revealed = if self.finished {
            Some(
                self.seats
                    .iter()
                    .map(|s| {
                        (
                            s.player.0,
                            s.hole.iter().map(|c| c.to_string()).collect(),
                        )
                    })
                    .collect(),
            )
        } else {
            None
        };
        HoldemView {
            street: self.street,
            community: self.community.iter().map(|c| c.to_string()).collect(),
            revealed,
            ante: self.ante,
            finished: self.finished,
        }
    }
}

impl Interactive for HoldemSession {
    fn handle(&mut self, action: &Action) -> GameUpdate {
        if self.seat_of(action.actor).is_none() {
            return GameUpdate::Reject("You are not seated at this table.".into());
        }
        let pressed = match &action.payload {
            ActionPayload::Button(id) => id.as_str(),
            ActionPayload::Text(_) => return GameUpdate::NoOp,
        };
        match pressed {
            "hd_deal" => match self.advance() {
                Ok(Street::Showdown) => self.showdown_update(),
                Ok(_) => GameUpdate::ReRender,
                Err(GameError::EmptyDeck) => GameUpdate::GameOver {
                    message: "The deck ran out; the hand is void.".to_string(),
                    payouts: self
                        .seats
                        .iter()
                        .map(|s| Payout {
                            player: s.player,
                            amount: 0,
                        })
                        .collect(),
                },
                Err(e) => GameUpdate::Reject(e.to_string()),
            },
            "hd_fold" => match self.fold(action.actor) {
                Ok(()) => self.showdown_update(),
                Err(e) => GameUpdate::Reject(e.to_string()),
            },
            _ => GameUpdate::NoOp,
        }
    }
}

impl Renderable for HoldemSession {
    fn render(&self) -> RenderPayload {
        let community = if self.community.is_empty() {
            "—".to_string()
        } else {
            self.community
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        let mut payload = RenderPayload::text("**Texas Hold'em**")
            .field("Board", format!("[ {community} ]"))
            .with_board(&self.view());
        if self.ante > 0 {
            payload = payload.field("Ante", format!("{}", self.ante));
        }
        if !self.finished {
            payload = payload
                .button(Button::new("hd_deal", "Deal"))
                .button(Button::new("hd_fold", "Fold"));
        }
        payload
    }
}

impl Session for HoldemSession {
    fn kind(&self) -> GameKind {
        GameKind::Holdem
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
