//! Bounded free-text input, the async replacement for the old blocking
//! "wait for a chat message matching a predicate" pattern.
//!
//! The engine awaits a read with an explicit timeout; the adapter resolves
//! it by pushing the user's message. On expiry the engine resumes with the
//! documented default path instead of hanging.

use crate::engine::RenderPayload;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

/// The engine-facing side of the presentation adapter for flows that mix
/// display with free-text input (wagers, trivia answers).
#[async_trait]
pub trait GameIo: Send + Sync {
    /// Display a payload in the session's channel.
    async fn show(&self, payload: RenderPayload);

    /// Wait up to `timeout` for the next free-text message from the
    /// session's contestant. `None` means the window expired.
    async fn read_text(&self, timeout: Duration) -> Option<String>;
}

/// Reads messages until one satisfies `accept` or the window closes.
/// Non-matching messages are consumed and dropped: a trivia answer without
/// the required interrogative prefix is never captured as a candidate.
pub async fn read_matching<F>(io: &dyn GameIo, window: Duration, mut accept: F) -> Option<String>
where
    F: FnMut(&str) -> bool + Send,
{
    let deadline = tokio::time::Instant::now() + window;
    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        if remaining.is_zero() {
            return None;
        }
        match io.read_text(remaining).await {
            Some(message) if accept(&message) => return Some(message),
            Some(_) => continue,
            None => return None,
        }
    }
}

/// A queue-backed [`GameIo`]: the adapter (or a test) pushes messages in,
/// pending reads resolve in arrival order, and everything shown is kept
/// for inspection.
pub struct QueuedIo {
    tx: mpsc::UnboundedSender<String>,
    rx: Mutex<mpsc::UnboundedReceiver<String>>,
    shown: Mutex<Vec<RenderPayload>>,
}

impl QueuedIo {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(rx),
            shown: Mutex::new(Vec::new()),
        }
    }

    /// Resolve a pending (or future) read with a user message.
    pub fn push(&self, text: impl Into<String>) {
        // Send only fails if the receiver half is gone, which cannot
        // happen while `self` is alive.
        let _ = self.tx.send(text.into());
    }

    /// Everything the engine has displayed so far.
    pub async fn displayed(&self) -> Vec<RenderPayload> {
        self.shown.lock().await.clone()
    }
}

impl Default for QueuedIo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameIo for QueuedIo {
    async fn show(&self, payload: RenderPayload) {
        self.shown.lock().await.push(payload);
    }

    async fn read_text(&self, timeout: Duration) -> Option<String> {
        let mut rx = self.rx.lock().await;
        tokio::time::timeout(timeout, rx.recv()).await.ok().flatten()
    }
}
