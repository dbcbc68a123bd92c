//! This module contains the core, generic game engine components.
//!
//! It defines the capability traits every game implements — `Renderable`
//! (produce a display payload) and `Interactive` (accept an action and
//! report what changed) — plus the `Session` trait object the registry
//! stores. No chat-platform types appear here: the presentation adapter
//! translates `RenderPayload` into whatever its platform displays and
//! feeds user events back as `Action`s.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::time::Duration;

/// The four game types a channel can host, one active session of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    TicTacToe,
    Blackjack,
    Holdem,
    Jeopardy,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameKind::TicTacToe => "tic-tac-toe",
            GameKind::Blackjack => "blackjack",
            GameKind::Holdem => "hold'em",
            GameKind::Jeopardy => "jeopardy",
        };
        f.write_str(name)
    }
}

/// Opaque platform user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque platform channel id. Sessions are keyed by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the user actually did: pressed a component or typed free text.
#[derive(Debug, Clone)]
pub enum ActionPayload {
    Button(String),
    Text(String),
}

/// A single user event delivered by the adapter.
#[derive(Debug, Clone)]
pub struct Action {
    pub actor: PlayerId,
    pub payload: ActionPayload,
}

impl Action {
    pub fn button(actor: PlayerId, id: impl Into<String>) -> Self {
        Self {
            actor,
            payload: ActionPayload::Button(id.into()),
        }
    }

    pub fn text(actor: PlayerId, content: impl Into<String>) -> Self {
        Self {
            actor,
            payload: ActionPayload::Text(content.into()),
        }
    }

    /// Splits a button custom id on `_` for games whose ids carry
    /// coordinates, e.g. `ttt_<row>_<col>`.
    pub fn button_parts(&self) -> Option<Vec<&str>> {
        match &self.payload {
            ActionPayload::Button(id) => Some(id.split('_').collect()),
            ActionPayload::Text(_) => None,
        }
    }
}

/// One interactive component the adapter should attach to the board message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub id: String,
    pub label: String,
    pub disabled: bool,
}

impl Button {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// A platform-neutral render instruction: headline content, titled text
/// fields, buttons, and a structured snapshot of the board for adapters
/// that want to draw it themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderPayload {
    pub content: String,
    pub fields: Vec<(String, String)>,
    pub buttons: Vec<Button>,
    pub board: Option<serde_json::Value>,
}

impl RenderPayload {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    /// Attaches a serializable board snapshot. Serialization of plain data
    /// structs cannot fail, so an error here is reported and the board is
    /// simply omitted.
    pub fn with_board<T: Serialize>(mut self, view: &T) -> Self {
        match serde_json::to_value(view) {
            Ok(value) => self.board = Some(value),
            Err(e) => {
                tracing::warn!(target: "engine.render", error = %e, "failed to serialize board view");
            }
        }
        self
    }
}

/// Represents a single player's win or loss, settled best-effort through
/// the balance ledger once the game is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payout {
    pub player: PlayerId,
    /// Positive for win, negative for loss, zero for push/tie.
    pub amount: i64,
}

/// What the adapter should do after delivering an action to a game.
#[derive(Debug)]
pub enum GameUpdate {
    /// State changed; redraw the board.
    ReRender,
    /// The action was refused. Shown to the actor only, never to the board.
    Reject(String),
    /// Terminal state reached; the session should be evicted after display.
    GameOver {
        message: String,
        payouts: Vec<Payout>,
    },
    /// Nothing to do.
    NoOp,
}

/// Capability: produce a display payload for the current state.
pub trait Renderable {
    fn render(&self) -> RenderPayload;
}

/// Capability: accept a user action and mutate state accordingly.
/// Invalid actions must leave state untouched and return `Reject`.
pub trait Interactive {
    fn handle(&mut self, action: &Action) -> GameUpdate;
}

/// A live game stored in the [`SessionRegistry`](crate::registry::SessionRegistry).
///
/// `as_any_mut` lets adapters downcast to drive game-specific async flows
/// (Jeopardy's wager/answer rounds) that the plain `Interactive` surface
/// cannot express.
pub trait Session: Renderable + Send + Sync {
    fn kind(&self) -> GameKind;
    fn channel(&self) -> ChannelId;
    /// Time since the last accepted action, for idle eviction.
    fn idle_for(&self) -> Duration;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl std::fmt::Debug for dyn Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("kind", &self.kind())
            .field("channel", &self.channel())
            .finish_non_exhaustive()
    }
}
