//! Integration tests for the term lifecycle
//!
//! These tests drive a store through whole terms:
//! - Idle -> Running -> Over by expiry, explicit end, or a terminal result
//! - Reset back to a pristine idle term with only the legacy best kept
//! - Pending resolutions invalidated by a reset or an expiry

use persona_politics::core::config::SimulationConfig;
use persona_politics::core::random::SequenceRandom;
use persona_politics::core::types::{Difficulty, MiniGameOutcome, StatDelta};
use persona_politics::persistence::MemoryLegacyStore;
use persona_politics::state::{GameResult, GameStore, Stats, TermPhase, TermTicker, TickOutcome};
use std::time::{Duration, Instant};

fn short_term(seconds: u32) -> GameStore {
    let mut config = SimulationConfig::default();
    config.term_seconds = seconds;
    GameStore::new(
        config,
        Box::new(SequenceRandom::constant(0.5)),
        Box::new(MemoryLegacyStore::new()),
    )
    .unwrap()
}

fn passed() -> MiniGameOutcome {
    MiniGameOutcome::new(true, 0, 3)
}

// ============================================================================
// Clock
// ============================================================================

#[test]
fn test_idle_term_ignores_ticks() {
    let mut store = short_term(10);
    assert_eq!(store.tick(), TickOutcome::Ignored);
    assert_eq!(store.term().seconds_left(), 10);
}

#[test]
fn test_term_runs_to_expiry() {
    let mut store = short_term(5);
    assert!(store.start_term());
    let outcomes: Vec<TickOutcome> = (0..6).map(|_| store.tick()).collect();
    assert_eq!(outcomes[..4], [TickOutcome::Counted; 4]);
    assert_eq!(outcomes[4], TickOutcome::Expired);
    assert_eq!(outcomes[5], TickOutcome::Ignored);
    assert_eq!(store.term().phase(), TermPhase::Over);
    assert_eq!(store.term().seconds_left(), 0);
    assert!(store.term_summary().is_some());
}

#[test]
fn test_ticker_pacing_matches_wall_clock() {
    let mut store = short_term(120);
    let mut ticker = TermTicker::new();
    let start = Instant::now();
    store.start_term();
    ticker.arm(start);

    // Irregular polling still yields one tick per whole second
    for ms in [0u64, 350, 999, 1_000, 1_001, 2_700, 2_701, 6_050] {
        for _ in 0..ticker.due_ticks(start + Duration::from_millis(ms)) {
            store.tick();
        }
    }
    assert_eq!(store.elapsed(), 6);
    assert_eq!(store.term().seconds_left(), 114);
}

// ============================================================================
// Frozen terms
// ============================================================================

/// Everything a stray resolution could touch besides the stats
fn satellite_fingerprint(store: &GameStore) -> (usize, usize, f64, f64, Vec<i32>, usize) {
    let poll = store.exit_poll();
    (
        store.economy().history().len(),
        poll.trends.overall.len(),
        poll.own_party,
        poll.undecided,
        store.cabinet().iter().map(|(_, m)| m.loyalty).collect(),
        store.deck().hand_ids().len() + store.world_events().len(),
    )
}

#[test]
fn test_over_term_is_frozen() {
    let mut store = short_term(60);
    store.start_term();
    store.resolve_policy("infrastructure", Difficulty::Easy, passed()).unwrap();
    assert!(store.end_term());
    let stats = store.stats();
    let log_len = store.policy_log().len();
    let before = satellite_fingerprint(&store);

    assert!(!store.update_stats(&StatDelta::new(20, 20, 20)));
    assert!(store
        .resolve_policy("military", Difficulty::Hard, passed())
        .unwrap()
        .is_none());
    assert_eq!(store.stats(), stats);
    assert_eq!(store.policy_log().len(), log_len);
    assert_eq!(satellite_fingerprint(&store), before);
    assert!(!store.start_term());
}

#[test]
fn test_terminal_result_is_idempotent() {
    let mut store = short_term(60);
    store.start_term();
    assert!(store.update_stats(&StatDelta::new(-50, 0, 0)));
    assert_eq!(store.result(), Some(GameResult::Loss));
    assert_eq!(store.term().phase(), TermPhase::Over);

    assert!(!store.update_stats(&StatDelta::new(80, 80, 80)));
    assert_eq!(store.result(), Some(GameResult::Loss));
    assert_eq!(store.stats(), Stats::new(0, 50, 50));
}

#[test]
fn test_terminal_update_ends_term_and_rejects_resolutions() {
    let mut store = short_term(60);
    store.start_term();
    let before = satellite_fingerprint(&store);

    assert!(store.update_stats(&StatDelta::new(-50, 0, 0)));
    assert!(store.term().is_over());
    assert_eq!(store.legacy().history().len(), 1);
    assert!(store.term_summary().is_some());

    assert!(store
        .resolve_policy("military", Difficulty::Hard, passed())
        .unwrap()
        .is_none());
    assert_eq!(store.economy().history().len(), 1);
    assert!(store.policy_log().is_empty());
    assert_eq!(satellite_fingerprint(&store), before);
    assert_eq!(store.tick(), TickOutcome::Ignored);
}

#[test]
fn test_loss_beats_win_on_same_update() {
    let mut store = short_term(60);
    store.start_term();
    store.update_stats(&StatDelta::new(-50, 30, 30));
    assert_eq!(store.result(), Some(GameResult::Loss));
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn test_reset_then_play_again() {
    let mut store = short_term(30);
    store.start_term();
    for _ in 0..4 {
        store.resolve_policy("military", Difficulty::Hard, passed()).unwrap();
    }
    store.shuffle_cabinet();
    store.end_term();
    let best = store.legacy().best().clone();

    store.reset_term();
    assert_eq!(store.term().phase(), TermPhase::Idle);
    assert_eq!(store.term().seconds_left(), 30);
    assert_eq!(store.stats(), Stats::uniform(50));
    assert_eq!(store.result(), None);
    assert!(store.policy_log().is_empty());
    assert!(store.world_events().is_empty());
    assert!(store.remarks().is_empty());
    assert_eq!(store.economy().history().len(), 1);
    assert_eq!(store.deck().hand_ids(), &["infrastructure", "military", "justice"]);
    assert!(store.term_summary().is_none());
    assert_eq!(store.legacy().best(), &best);

    assert!(store.start_term());
    assert!(store
        .resolve_policy("justice", Difficulty::Easy, passed())
        .unwrap()
        .is_some());
}

#[test]
fn test_pending_resolution_dropped_after_expiry() {
    let mut store = short_term(2);
    store.start_term();
    let pending = store
        .begin_resolution("justice", Difficulty::Medium, passed())
        .unwrap()
        .unwrap();
    store.tick();
    store.tick();
    assert!(store.term().is_over());
    assert!(store.commit_resolution(pending, None).is_none());
    assert_eq!(store.stats(), Stats::uniform(50));
}

#[test]
fn test_pending_resolution_dropped_across_new_term() {
    let mut store = short_term(60);
    let stale = store
        .begin_resolution("justice", Difficulty::Medium, passed())
        .unwrap()
        .unwrap();
    store.reset_term();
    store.start_term();
    assert!(store.term().is_running());
    assert_ne!(stale.epoch(), store.term().epoch());
    assert!(store.commit_resolution(stale, None).is_none());
    assert!(store.policy_log().is_empty());
}

#[test]
fn test_legacy_evaluated_once_per_term() {
    let mut store = short_term(3);
    for _ in 0..3 {
        store.start_term();
        while store.tick() != TickOutcome::Expired {}
        store.end_term();
        store.reset_term();
    }
    assert_eq!(store.legacy().history().len(), 3);
}
