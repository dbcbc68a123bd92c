//! Remote deck service integration.
//!
//! Games ask for "a shuffled 52-card deck" and get back a list of card
//! codes. Any failure — network error, non-success status, malformed
//! payload, wrong card count after filtering — degrades to a locally
//! generated shuffled deck rather than aborting the game.

use super::deck::Deck;
use crate::constants::FETCH_TIMEOUT;
use crate::error::GameError;
use async_trait::async_trait;
use serde::Deserialize;

#[async_trait]
pub trait DeckSource: Send + Sync {
    async fn shuffled_deck(&self) -> Result<Deck, GameError>;
}

/// Fetches `source.shuffled_deck()` with the documented local fallback.
pub async fn shuffled_deck_or_local(source: &dyn DeckSource) -> Deck {
    match source.shuffled_deck().await {
        Ok(deck) => deck,
        Err(e) => {
            tracing::warn!(target: "cards.source", error = %e, "deck source failed; using local deck");
            Deck::standard_shuffled()
        }
    }
}

/// Always shuffles locally. Used offline and in tests.
pub struct LocalDeckSource;

#[async_trait]
impl DeckSource for LocalDeckSource {
    async fn shuffled_deck(&self) -> Result<Deck, GameError> {
        Ok(Deck::standard_shuffled())
    }
}

#[derive(Deserialize)]
struct DeckPayload {
    cards: Vec<CardEntry>,
}

#[derive(Deserialize)]
struct CardEntry {
    code: String,
}

/// A remote deck service speaking JSON: `{"cards": [{"code": "AS"}, ...]}`.
pub struct HttpDeckSource {
    client: reqwest::Client,
    url: String,
}

impl HttpDeckSource {
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl DeckSource for HttpDeckSource {
    async fn shuffled_deck(&self) -> Result<Deck, GameError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GameError::fetch("deck", e.to_string()))?;
        if !response.status().is_success() {
            return Err(GameError::fetch(
                "deck",
                format!("status {}", response.status()),
            ));
        }
        let payload: DeckPayload = response
            .json()
            .await
            .map_err(|e| GameError::fetch("deck", e.to_string()))?;

        let deck = Deck::from_codes(payload.cards.iter().map(|c| c.code.as_str()));
        if !deck.is_complete() {
            return Err(GameError::fetch(
                "deck",
                format!("payload yielded {} usable cards, expected 52", deck.remaining()),
            ));
        }
        Ok(deck)
    }
}
