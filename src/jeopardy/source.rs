//! External trivia data and the optional clue-prefix collaborator.
//!
//! There is no local trivia fallback: if the source fails, game start
//! fails and the user sees "could not start game". The text-generation
//! collaborator only picks the interrogative prefix used when revealing
//! an answer; anything it returns outside the fixed set becomes "What is".

use super::judge::ANSWER_PREFIXES;
use super::state::TriviaSet;
use crate::constants::FETCH_TIMEOUT;
use crate::error::GameError;
use async_trait::async_trait;

#[async_trait]
pub trait TriviaSource: Send + Sync {
    /// Fetches the full board: categories for both rounds plus the final
    /// question. Every question arrives with `guessed = false`.
    async fn fetch_board(&self) -> Result<TriviaSet, GameError>;
}

/// A remote trivia service returning the [`TriviaSet`] JSON shape.
pub struct HttpTriviaSource {
    client: reqwest::Client,
    url: String,
}

impl HttpTriviaSource {
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
impl TriviaSource for HttpTriviaSource {
    async fn fetch_board(&self) -> Result<TriviaSet, GameError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GameError::fetch("trivia", e.to_string()))?;
        if !response.status().is_success() {
            return Err(GameError::fetch(
                "trivia",
                format!("status {}", response.status()),
            ));
        }
        let set: TriviaSet = response
            .json()
            .await
            .map_err(|e| GameError::fetch("trivia", e.to_string()))?;
        if set.normal.is_empty() || set.double.is_empty() {
            return Err(GameError::fetch("trivia", "payload has empty boards"));
        }
        Ok(set)
    }
}

#[async_trait]
pub trait PrefixGenerator: Send + Sync {
    /// Given a correct answer, suggest an interrogative prefix from the
    /// fixed set ("What is", "Who are", ...).
    async fn prefix_for(&self, answer: &str) -> Result<String, GameError>;
}

/// Always answers "What is". The fallback when no generator is wired up.
pub struct StaticPrefix;

#[async_trait]
impl PrefixGenerator for StaticPrefix {
    async fn prefix_for(&self, _answer: &str) -> Result<String, GameError> {
        Ok("What is".to_string())
    }
}

/// A remote text-generation endpoint returning a bare prefix string.
pub struct HttpPrefixGenerator {
    client: reqwest::Client,
    url: String,
}

impl HttpPrefixGenerator {
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
impl PrefixGenerator for HttpPrefixGenerator {
    async fn prefix_for(&self, answer: &str) -> Result<String, GameError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("answer", answer)])
            .send()
            .await
            .map_err(|e| GameError::fetch("text-gen", e.to_string()))?;
        if !response.status().is_success() {
            return Err(GameError::fetch(
                "text-gen",
                format!("status {}", response.status()),
            ));
        }
        response
            .text()
            .await
            .map_err(|e| GameError::fetch("text-gen", e.to_string()))
    }
}

/// Resolves a prefix through the generator, degrading to "What is" on any
/// failure or out-of-set response.
pub async fn prefix_or_default(generator: &dyn PrefixGenerator, answer: &str) -> String {
    match generator.prefix_for(answer).await {
        Ok(prefix) => {
            let trimmed = prefix.trim();
            if ANSWER_PREFIXES
                .iter()
                .any(|p| p.eq_ignore_ascii_case(trimmed))
            {
                // Title-case the first word for display.
                let mut chars = trimmed.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => "What is".to_string(),
                }
            } else {
                tracing::warn!(target: "jeopardy.source", prefix = trimmed, "out-of-set prefix; using default");
                "What is".to_string()
            }
        }
        Err(e) => {
            tracing::warn!(target: "jeopardy.source", error = %e, "prefix generator failed; using default");
            "What is".to_string()
        }
    }
}
