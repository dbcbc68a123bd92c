// Central constants for timings and game limits.

use std::time::Duration;

/// How long a contestant has to buzz in with an answer during the normal
/// and double rounds (including daily doubles).
pub const ANSWER_TIMEOUT: Duration = Duration::from_secs(30);

/// Final-round answers get a longer window.
pub const FINAL_ANSWER_TIMEOUT: Duration = Duration::from_secs(60);

/// Wager collection (daily double and final round).
pub const WAGER_TIMEOUT: Duration = Duration::from_secs(30);

/// Button-driven sessions (Tic-Tac-Toe, Blackjack, Hold'em) count as
/// abandoned after this much inactivity.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// Jeopardy games run long; give them a more generous idle window.
pub const JEOPARDY_IDLE_TIMEOUT: Duration = Duration::from_secs(900);

/// Outbound HTTP calls to the deck/trivia/text-gen collaborators.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The wager ceiling is max(this, current score).
pub const WAGER_FLOOR_MAX: i64 = 2000;

/// Fallback wager when a daily-double wager is invalid or times out.
pub const DEFAULT_DAILY_DOUBLE_WAGER: i64 = 500;

/// The dealer hits below this total and stands at or above it.
pub const DEALER_STANDS_AT: u8 = 17;

/// Minimum Levenshtein-based similarity (percent) for a fuzzy answer match.
pub const SIMILARITY_THRESHOLD: u32 = 70;
