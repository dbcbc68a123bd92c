//! Platform-independent turn-based parlor games.
//!
//! Each game lives in its own module and plugs into a host chat platform
//! through the `engine` traits: the adapter delivers user events and
//! displays the render payloads; the engines own all game state and rules.

pub mod blackjack;
pub mod cards;
pub mod constants;
pub mod engine;
pub mod error;
pub mod holdem;
pub mod input;
pub mod jeopardy;
pub mod ledger;
pub mod registry;
pub mod tictactoe;

// Convenient re-exports for the types nearly every adapter touches.
pub use engine::{
    Action, ActionPayload, Button, ChannelId, GameKind, GameUpdate, Interactive, Payout, PlayerId,
    RenderPayload, Renderable, Session,
};
pub use error::GameError;
pub use registry::{SessionHandle, SessionRegistry};
