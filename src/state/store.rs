//! The single owned game state
//!
//! One writer at a time: the resolution pipeline, the clock and the explicit
//! reset/shuffle actions. Readers only take snapshots through the accessors.

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::random::{RandomSource, SeededRandom};
use crate::core::types::{BlocKey, MinisterKey, Seconds, StatDelta, Urgency};
use crate::heuristics::poll::poll_time_drift;
use crate::persistence::{LegacyStore, MemoryLegacyStore};
use crate::policy::catalog::{PolicyCard, PolicyCatalog};
use crate::policy::deck::PolicyDeck;
use crate::rules::effects::PolicyEffectTable;
use crate::scoring::{TermSummary, TermTier};

use super::cabinet::{Cabinet, Resignation};
use super::economy::{EconomyDelta, EconomyModel};
use super::events::{WorldEvent, WorldEventFeed};
use super::foreign::{BlocDelta, ForeignRelations, Stance};
use super::legacy::{legacy_index, LegacyEvaluation, LegacyRecord, LegacyTracker};
use super::log::{PolicyLog, PolicyLogEntry};
use super::poll::{ExitPoll, PollDelta};
use super::secretary::{RemarkQueue, RemarkTone, SecretaryRemark};
use super::stats::{GameResult, StatLedger, Stats};
use super::term::{TermClock, TickOutcome};

pub struct GameStore {
    config: SimulationConfig,
    pub(crate) ledger: StatLedger,
    pub(crate) term: TermClock,
    pub(crate) economy: EconomyModel,
    pub(crate) foreign: ForeignRelations,
    pub(crate) poll: ExitPoll,
    pub(crate) cabinet: Cabinet,
    pub(crate) legacy: LegacyTracker,
    pub(crate) log: PolicyLog,
    pub(crate) events: WorldEventFeed,
    pub(crate) remarks: RemarkQueue,
    pub(crate) effects: PolicyEffectTable,
    pub(crate) catalog: PolicyCatalog,
    pub(crate) deck: PolicyDeck,
    pub(crate) rng: Box<dyn RandomSource + Send>,
    legacy_store: Box<dyn LegacyStore>,
    last_evaluation: Option<LegacyEvaluation>,
}

impl GameStore {
    /// Build a store, loading data files and the persisted legacy record
    ///
    /// A legacy record that cannot be read is logged and treated as absent.
    pub fn new(
        config: SimulationConfig,
        rng: Box<dyn RandomSource + Send>,
        legacy_store: Box<dyn LegacyStore>,
    ) -> Result<Self> {
        config.validate()?;

        let effects = match &config.policy_effects_path {
            Some(path) => PolicyEffectTable::load(path)?,
            None => PolicyEffectTable::bundled()?,
        };
        let catalog = match &config.policy_pool_path {
            Some(path) => PolicyCatalog::load(path)?,
            None => PolicyCatalog::bundled()?,
        };

        let best = match legacy_store.load() {
            Ok(record) => record.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to load legacy record: {}", e);
                LegacyRecord::default()
            }
        };

        tracing::debug!(
            effects = effects.len(),
            cards = catalog.len(),
            best_index = best.best_index,
            "Game store ready"
        );

        let deck = PolicyDeck::new(&catalog);
        Ok(Self {
            ledger: StatLedger::new(config.starting_stat, config.win_threshold),
            term: TermClock::new(config.term_seconds),
            economy: EconomyModel::new(config.economy_history_cap),
            foreign: ForeignRelations::new(config.trend_cap),
            poll: ExitPoll::new(config.trend_cap),
            cabinet: Cabinet::new(config.resignation_threshold, config.trend_cap),
            legacy: LegacyTracker::new(best, config.trend_cap),
            log: PolicyLog::new(),
            events: WorldEventFeed::new(config.headline_window),
            remarks: RemarkQueue::new(),
            effects,
            catalog,
            deck,
            rng,
            legacy_store,
            last_evaluation: None,
            config,
        })
    }

    /// Seeded store with an in-memory legacy record
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Result<Self> {
        Self::new(
            config,
            Box::new(SeededRandom::new(seed)),
            Box::new(MemoryLegacyStore::new()),
        )
    }

    // === READ ===

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn stats(&self) -> Stats {
        self.ledger.stats()
    }

    pub fn result(&self) -> Option<GameResult> {
        self.ledger.result()
    }

    pub fn term(&self) -> &TermClock {
        &self.term
    }

    /// Seconds since the term started
    pub fn elapsed(&self) -> Seconds {
        self.term.elapsed()
    }

    pub fn economy(&self) -> &EconomyModel {
        &self.economy
    }

    pub fn foreign(&self) -> &ForeignRelations {
        &self.foreign
    }

    pub fn exit_poll(&self) -> &ExitPoll {
        &self.poll
    }

    pub fn cabinet(&self) -> &Cabinet {
        &self.cabinet
    }

    pub fn legacy(&self) -> &LegacyTracker {
        &self.legacy
    }

    pub fn policy_log(&self) -> &PolicyLog {
        &self.log
    }

    pub fn world_events(&self) -> &[WorldEvent] {
        self.events.events()
    }

    pub fn event_feed(&self) -> &WorldEventFeed {
        &self.events
    }

    pub fn remarks(&self) -> &RemarkQueue {
        &self.remarks
    }

    pub fn effects(&self) -> &PolicyEffectTable {
        &self.effects
    }

    pub fn catalog(&self) -> &PolicyCatalog {
        &self.catalog
    }

    pub fn hand(&self) -> Vec<&PolicyCard> {
        self.deck.hand(&self.catalog)
    }

    pub fn deck(&self) -> &PolicyDeck {
        &self.deck
    }

    /// Legacy index for the current stats and economy
    pub fn current_legacy_index(&self) -> f64 {
        legacy_index(&self.stats(), self.economy.gdp(), self.economy.unemp())
    }

    pub fn last_evaluation(&self) -> Option<&LegacyEvaluation> {
        self.last_evaluation.as_ref()
    }

    // === STAT LEDGER ===

    /// Apply a stat delta; a no-op once the term is over or a result is set
    ///
    /// A delta that reaches a terminal result ends the running term.
    pub fn update_stats(&mut self, delta: &StatDelta) -> bool {
        let changed = self.apply_stats(delta);
        if changed {
            self.end_on_result();
        }
        changed
    }

    /// Ledger write without the term-ending check
    pub(crate) fn apply_stats(&mut self, delta: &StatDelta) -> bool {
        if self.term.is_over() {
            return false;
        }
        let changed = self.ledger.apply(delta);
        if let Some(result) = self.ledger.result() {
            if changed {
                tracing::info!(?result, stats = ?self.ledger.stats(), "Terminal result reached");
            }
        }
        changed
    }

    /// Starting stats, no result
    pub fn reset_game(&mut self) {
        self.ledger.reset();
    }

    // === SATELLITE MODELS ===

    pub fn init_economy(&mut self) {
        self.economy.init();
    }

    pub fn init_foreign_opinions(&mut self) {
        self.foreign.init();
    }

    pub fn init_exit_poll(&mut self) {
        self.poll.init();
    }

    pub fn init_cabinet(&mut self) {
        self.cabinet.init();
    }

    fn init_satellites(&mut self) {
        self.init_economy();
        self.init_foreign_opinions();
        self.init_exit_poll();
        self.init_cabinet();
    }

    pub fn apply_economy_delta(&mut self, delta: &EconomyDelta) {
        let t = self.elapsed();
        self.economy.apply(delta, t);
    }

    /// First half of the stance protocol; call `recompute_bloc_stance` next
    pub fn apply_foreign_delta(&mut self, delta: &BlocDelta) {
        let t = self.elapsed();
        self.foreign.apply(delta, t);
    }

    pub fn recompute_bloc_stance(&mut self, bloc: BlocKey) -> Stance {
        self.foreign.recompute_stance(bloc)
    }

    pub fn apply_poll_delta(&mut self, delta: &PollDelta) {
        let t = self.elapsed();
        self.poll.apply(delta, t, self.rng.as_mut());
    }

    pub fn bump_loyalty(&mut self, minister: MinisterKey, delta: i32, reason: Option<&str>) -> bool {
        self.cabinet.bump_loyalty(minister, delta, reason)
    }

    pub fn maybe_resign(&mut self, minister: MinisterKey) -> Option<Resignation> {
        let resignation = self.cabinet.maybe_resign(minister);
        if let Some(r) = &resignation {
            tracing::info!(minister = r.minister.label(), name = %r.name, "Minister resigned");
        }
        resignation
    }

    /// Acknowledge the oldest pending resignation with a new appointee
    pub fn shuffle_cabinet(&mut self) -> Option<MinisterKey> {
        let replaced = self.cabinet.shuffle(self.rng.as_mut());
        if let Some(key) = replaced {
            tracing::info!(
                minister = key.label(),
                loyalty = self.cabinet.get(key).loyalty,
                "Cabinet shuffled"
            );
        }
        replaced
    }

    // === LOGS AND FEEDS ===

    pub fn add_policy_log(&mut self, entry: PolicyLogEntry) {
        self.log.push(entry);
    }

    pub fn add_world_event(&mut self, headline: &str, detail: &str, urgency: Urgency) -> WorldEvent {
        let t = self.elapsed();
        self.events.add(headline, detail, urgency, t).clone()
    }

    pub fn remove_world_event(&mut self, id: u64) -> bool {
        self.events.remove(id)
    }

    pub fn push_remark(&mut self, text: &str, tone: RemarkTone) -> uuid::Uuid {
        let t = self.elapsed();
        self.remarks.push(text, tone, t)
    }

    pub fn shift_remark(&mut self) -> Option<SecretaryRemark> {
        self.remarks.shift()
    }

    // === TERM ===

    /// Idle -> Running; re-seeds every satellite model
    pub fn start_term(&mut self) -> bool {
        if !self.term.start() {
            return false;
        }
        self.init_satellites();
        self.last_evaluation = None;
        tracing::info!(epoch = self.term.epoch(), seconds = self.term.seconds_total(), "Term started");
        true
    }

    /// Advance the clock one second
    ///
    /// Poll drift runs every `poll_drift_interval` running seconds; expiry
    /// triggers the term-end evaluation.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.term.tick();
        match outcome {
            TickOutcome::Counted => {
                let interval = self.config.poll_drift_interval;
                if interval > 0 && self.term.elapsed() % interval == 0 {
                    let drift = poll_time_drift(self.stats().approval, self.rng.as_mut());
                    self.apply_poll_delta(&drift);
                }
            }
            TickOutcome::Expired => {
                tracing::info!("Term expired");
                self.finish_term();
            }
            TickOutcome::Ignored => {}
        }
        outcome
    }

    /// Running -> Over ahead of time
    pub fn end_term(&mut self) -> bool {
        if !self.term.end() {
            return false;
        }
        tracing::info!(elapsed = self.term.elapsed(), "Term ended");
        self.finish_term();
        true
    }

    /// Back to a fresh idle term; only the legacy best survives
    pub fn reset_term(&mut self) {
        self.reset_game();
        self.term.reset();
        self.log.clear();
        self.events.clear();
        self.remarks.clear();
        self.deck.reset(&self.catalog);
        self.init_satellites();
        self.last_evaluation = None;
        tracing::info!(epoch = self.term.epoch(), "Term reset");
    }

    /// End a running term because the ledger reached a result
    pub(crate) fn end_on_result(&mut self) {
        if self.ledger.is_game_over() && self.term.is_running() {
            self.term.end();
            tracing::info!(result = ?self.ledger.result(), "Term ended by result");
            self.finish_term();
        }
    }

    /// Evaluate the legacy index once per term and persist a new best
    fn finish_term(&mut self) {
        if self.last_evaluation.is_some() {
            return;
        }
        let index = self.current_legacy_index();
        let evaluation = self.legacy.record(index, self.term.elapsed());
        tracing::info!(
            index = evaluation.index,
            title = evaluation.title.label(),
            new_best = evaluation.new_best,
            "Legacy evaluated"
        );
        if evaluation.new_best {
            let record = self.legacy.best().clone();
            if let Err(e) = self.legacy_store.save(&record) {
                tracing::warn!("Failed to save legacy record: {}", e);
            }
        }
        self.last_evaluation = Some(evaluation);
    }

    /// Snapshot of the finished term; `None` while it is still in play
    pub fn term_summary(&self) -> Option<TermSummary> {
        let evaluation = self.last_evaluation.as_ref()?;
        let stats = self.stats();
        Some(TermSummary {
            stats,
            total: stats.total(),
            tier: TermTier::for_total(stats.total()),
            policies_resolved: self.log.len(),
            world_events_seen: self.events.surfaced(),
            legacy_index: evaluation.index,
            legacy_title: evaluation.title,
            new_best: evaluation.new_best,
            result: self.ledger.result(),
        })
    }
}

impl std::fmt::Debug for GameStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameStore")
            .field("stats", &self.ledger.stats())
            .field("result", &self.ledger.result())
            .field("term", &self.term)
            .field("policies", &self.log.len())
            .finish_non_exhaustive()
    }
}
