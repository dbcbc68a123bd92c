//! Wager validation and the defaulting rules.
//!
//! Daily doubles and the final round cap at max(2000, score). The
//! fallback differs on purpose: a bad or missing daily-double wager
//! becomes 500 (or the cap when merely oversized), while a bad or
//! missing final wager becomes 0. The asymmetry is inherited behavior
//! and deliberately preserved.

use crate::constants::{DEFAULT_DAILY_DOUBLE_WAGER, WAGER_FLOOR_MAX};

/// Maximum allowed wager for the given score. Contestants in the red
/// still get the 2000 floor.
pub fn max_wager(score: i64) -> i64 {
    if score >= 0 {
        score.max(WAGER_FLOOR_MAX)
    } else {
        WAGER_FLOOR_MAX
    }
}

/// `input` is the raw wager text, or `None` on timeout.
pub fn daily_double_wager(input: Option<&str>, score: i64) -> i64 {
    let max = max_wager(score);
    match input.map(|s| s.trim().parse::<i64>()) {
        Some(Ok(n)) if n > max => max,
        Some(Ok(n)) if n >= 1 => n,
        // Non-positive, non-numeric, or no input in time.
        _ => DEFAULT_DAILY_DOUBLE_WAGER,
    }
}

/// Final-round variant: same cap, but invalid/timeout input wagers nothing.
pub fn final_wager(input: Option<&str>, score: i64) -> i64 {
    let max = max_wager(score);
    match input.map(|s| s.trim().parse::<i64>()) {
        Some(Ok(n)) if n > max => max,
        Some(Ok(n)) if n >= 1 => n,
        _ => 0,
    }
}
