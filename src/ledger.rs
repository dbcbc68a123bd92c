//! Best-effort balance persistence.
//!
//! The real ledger lives behind an external key-value endpoint; games only
//! need `ensure_user_exists` + `adjust_balance`. Failures are logged with
//! enough context to diagnose and then swallowed — a broken ledger must
//! never block game flow.

use crate::engine::{ChannelId, Payout, PlayerId};
use crate::error::GameError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[async_trait]
pub trait BalanceLedger: Send + Sync {
    /// Creates the user's row in `scope` if it does not exist yet.
    async fn ensure_user_exists(
        &self,
        scope: &str,
        user: PlayerId,
        name: &str,
    ) -> Result<(), GameError>;

    /// Adds (or subtracts, when negative) from the user's balance.
    async fn adjust_balance(&self, scope: &str, user: PlayerId, delta: i64)
        -> Result<(), GameError>;
}

/// Applies a game's final payouts, logging and swallowing any failure.
pub async fn settle(
    ledger: &dyn BalanceLedger,
    scope: &str,
    channel: ChannelId,
    payouts: &[Payout],
) {
    for payout in payouts {
        // Zero deltas are skipped to avoid pointless ledger traffic.
        if payout.amount == 0 {
            continue;
        }
        if let Err(e) = ledger
            .adjust_balance(scope, payout.player, payout.amount)
            .await
        {
            tracing::warn!(
                target: "ledger",
                channel = %channel,
                user = %payout.player,
                delta = payout.amount,
                error = %e,
                "payout failed; continuing"
            );
        }
    }
}

/// Discards every write. Used when no ledger is configured.
pub struct NullLedger;

#[async_trait]
impl BalanceLedger for NullLedger {
    async fn ensure_user_exists(
        &self,
        _scope: &str,
        _user: PlayerId,
        _name: &str,
    ) -> Result<(), GameError> {
        Ok(())
    }

    async fn adjust_balance(
        &self,
        _scope: &str,
        _user: PlayerId,
        _delta: i64,
    ) -> Result<(), GameError> {
        Ok(())
    }
}

/// In-memory ledger for tests and offline play.
pub struct MemoryLedger {
    balances: Mutex<HashMap<(String, PlayerId), i64>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
        }
    }

    pub async fn balance_of(&self, scope: &str, user: PlayerId) -> i64 {
        self.balances
            .lock()
            .await
            .get(&(scope.to_string(), user))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BalanceLedger for MemoryLedger {
    async fn ensure_user_exists(
        &self,
        scope: &str,
        user: PlayerId,
        _name: &str,
    ) -> Result<(), GameError> {
        self.balances
            .lock()
            .await
            .entry((scope.to_string(), user))
            .or_insert(0);
        Ok(())
    }

    async fn adjust_balance(
        &self,
        scope: &str,
        user: PlayerId,
        delta: i64,
    ) -> Result<(), GameError> {
        let mut balances = self.balances.lock().await;
        *balances.entry((scope.to_string(), user)).or_insert(0) += delta;
        Ok(())
    }
}
