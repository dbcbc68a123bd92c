use gametable::engine::{ChannelId, GameKind, Payout, PlayerId, Session};
use gametable::error::GameError;
use gametable::ledger::{settle, BalanceLedger, MemoryLedger};
use gametable::registry::SessionRegistry;
use gametable::tictactoe::TicTacToeSession;
use std::time::Duration;

const CHANNEL: ChannelId = ChannelId(11);
const OTHER_CHANNEL: ChannelId = ChannelId(12);
const PLAYER: PlayerId = PlayerId(1);

fn ttt(channel: ChannelId) -> Box<dyn Session> {
    Box::new(TicTacToeSession::new(channel, PLAYER, false))
}

#[tokio::test]
async fn one_session_per_channel_and_kind() {
    let registry = SessionRegistry::new();
    registry.start(ttt(CHANNEL)).await.unwrap();

    let err = registry.start(ttt(CHANNEL)).await.unwrap_err();
    assert!(matches!(err, GameError::AlreadyActive(GameKind::TicTacToe)));

    // A different channel is fine.
    registry.start(ttt(OTHER_CHANNEL)).await.unwrap();
    assert_eq!(registry.active_count().await, 2);
}

#[tokio::test]
async fn ending_frees_the_slot() {
    let registry = SessionRegistry::new();
    registry.start(ttt(CHANNEL)).await.unwrap();
    registry.end(GameKind::TicTacToe, CHANNEL).await;
    assert_eq!(registry.active_count().await, 0);

    registry.start(ttt(CHANNEL)).await.unwrap();
    assert!(registry.get(GameKind::TicTacToe, CHANNEL).await.is_some());
}

#[tokio::test]
async fn double_end_is_a_no_op() {
    let registry = SessionRegistry::new();
    registry.start(ttt(CHANNEL)).await.unwrap();
    registry.end(GameKind::TicTacToe, CHANNEL).await;
    registry.end(GameKind::TicTacToe, CHANNEL).await;
    assert_eq!(registry.active_count().await, 0);
}

#[tokio::test]
async fn lookup_misses_return_none() {
    let registry = SessionRegistry::new();
    registry.start(ttt(CHANNEL)).await.unwrap();
    assert!(registry.get(GameKind::Blackjack, CHANNEL).await.is_none());
    assert!(registry
        .get(GameKind::TicTacToe, OTHER_CHANNEL)
        .await
        .is_none());
}

#[tokio::test]
async fn idle_sweep_evicts_only_stale_sessions() {
    let registry = SessionRegistry::new();
    registry.start(ttt(CHANNEL)).await.unwrap();

    // A fresh session survives a generous ttl.
    assert_eq!(registry.evict_idle(Duration::from_secs(3600)).await, 0);
    assert_eq!(registry.active_count().await, 1);

    // With a zero ttl any elapsed time counts as stale.
    assert_eq!(registry.evict_idle(Duration::ZERO).await, 1);
    assert_eq!(registry.active_count().await, 0);
}

#[tokio::test]
async fn idle_sweep_skips_sessions_mid_event() {
    let registry = SessionRegistry::new();
    let handle = registry.start(ttt(CHANNEL)).await.unwrap();

    let guard = handle.lock().await;
    assert_eq!(registry.evict_idle(Duration::ZERO).await, 0);
    drop(guard);

    assert_eq!(registry.evict_idle(Duration::ZERO).await, 1);
}

#[tokio::test]
async fn settle_applies_nonzero_payouts() {
    let ledger = MemoryLedger::new();
    ledger
        .ensure_user_exists("casino", PLAYER, "alice")
        .await
        .unwrap();

    let payouts = vec![
        Payout { player: PLAYER, amount: 150 },
        Payout { player: PlayerId(2), amount: -150 },
        Payout { player: PlayerId(3), amount: 0 },
    ];
    settle(&ledger, "casino", CHANNEL, &payouts).await;

    assert_eq!(ledger.balance_of("casino", PLAYER).await, 150);
    assert_eq!(ledger.balance_of("casino", PlayerId(2)).await, -150);
    // The zero delta never touched the ledger.
    assert_eq!(ledger.balance_of("casino", PlayerId(3)).await, 0);
}

struct FlakyLedger;

#[async_trait::async_trait]
impl BalanceLedger for FlakyLedger {
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
        Err(GameError::ExternalFetch {
            what: "balance",
            why: "write refused".to_string(),
        })
    }
}

#[tokio::test]
async fn settle_swallows_ledger_failures() {
    let payouts = vec![Payout { player: PLAYER, amount: 500 }];
    // Must return normally; a broken ledger never blocks game flow.
    settle(&FlakyLedger, "casino", CHANNEL, &payouts).await;
}
