//! Combat Tracker - owns the history store
//!
//! The tracker is the single owner of the store. Ingestion runs
//! normalize → team filter → append (victim and attacker under one lock) →
//! save; queries read a consistent snapshot under the same lock.

mod ingest;
mod query;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::TrackerConfig;
use crate::history::HistoryStore;
use crate::normalizer::{DropReason, NormalizedDeath, NormalizerOptions};
use crate::persistence::{Persistence, PersistenceError};
use crate::stats;
use crate::team::{TeamDirectory, TeamFilter};
use crate::types::{ActorId, CombatEvent, DeathNotice, HistoryStats, HistoryView, QueryRequest};

pub use query::QueryError;

/// Result of feeding one death notice to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngestOutcome {
    /// Death and kill entries were appended
    Recorded,
    /// Not a player-versus-player death
    NotPvp { reason: DropReason },
    /// Attacker and victim share a team
    SameTeam,
}

impl IngestOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, IngestOutcome::Recorded)
    }
}

/// Mutable state guarded by one lock
pub(crate) struct TrackerState {
    pub(crate) store: HistoryStore,
    /// Last known display name per actor
    pub(crate) roster: HashMap<ActorId, String>,
}

/// Kill/death history tracker
pub struct CombatTracker {
    pub(crate) state: Mutex<TrackerState>,
    persistence: Box<dyn Persistence>,
    pub(crate) team_filter: TeamFilter,
    pub(crate) options: NormalizerOptions,
}

impl CombatTracker {
    /// Build a tracker, loading the store from `persistence`.
    ///
    /// Missing or unreadable data yields an empty store; histories longer
    /// than `config.max_entries` are cut down to the cap.
    ///
    /// # Arguments
    ///
    /// * `config` - History cap and normalizer options
    /// * `persistence` - Where the store is loaded from and saved to
    /// * `directory` - Team lookups used to drop friendly kills
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use kd_history::{CombatTracker, JsonFilePersistence, NoTeams, TrackerConfig};
    ///
    /// let config = TrackerConfig::default();
    /// let tracker = CombatTracker::new(
    ///     &config,
    ///     Box::new(JsonFilePersistence::new(&config.data_file)),
    ///     Arc::new(NoTeams),
    /// );
    /// println!("{} players tracked", tracker.actor_count());
    /// ```
    pub fn new(
        config: &TrackerConfig,
        persistence: Box<dyn Persistence>,
        directory: Arc<dyn TeamDirectory>,
    ) -> Self {
        let mut store = HistoryStore::new(config.max_entries);

        match persistence.load() {
            Ok(snapshot) => {
                let dropped = store.load_all(snapshot);
                if dropped > 0 {
                    warn!(dropped, max_entries = store.max_entries(), "trimmed stored histories to the configured cap");
                }
            }
            Err(e) => {
                warn!(location = %persistence.location(), error = %e, "could not load history data, starting empty");
            }
        }

        info!(
            actors = store.actor_count(),
            max_entries = store.max_entries(),
            location = %persistence.location(),
            "combat history loaded"
        );

        Self {
            state: Mutex::new(TrackerState {
                store,
                roster: HashMap::new(),
            }),
            persistence,
            team_filter: TeamFilter::new(directory),
            options: config.normalizer_options(),
        }
    }

    /// Save the whole store now
    pub fn save(&self) -> Result<(), PersistenceError> {
        let state = self.state.lock();
        self.persist(&state)
    }

    /// Final flush at process shutdown; failures are logged
    pub fn shutdown(&self) {
        match self.save() {
            Ok(()) => info!(location = %self.persistence.location(), "combat history saved on shutdown"),
            Err(e) => warn!(error = %e, "failed to save combat history on shutdown"),
        }
    }

    /// Write the store; expects the caller to hold the state lock
    pub(crate) fn persist(&self, state: &TrackerState) -> Result<(), PersistenceError> {
        self.persistence.save(&state.store.snapshot_all())
    }

    /// Ordered history for an actor (empty if none)
    pub fn history(&self, actor: ActorId) -> Vec<CombatEvent> {
        self.state.lock().store.read(actor)
    }

    /// Stats derived from an actor's current history
    pub fn stats(&self, actor: ActorId) -> HistoryStats {
        let state = self.state.lock();
        stats::aggregate(state.store.iter(actor))
    }

    pub fn actor_count(&self) -> usize {
        self.state.lock().store.actor_count()
    }

    pub fn max_entries(&self) -> usize {
        self.state.lock().store.max_entries()
    }

    /// Last known display name for an actor
    pub fn display_name(&self, actor: ActorId) -> Option<String> {
        self.state.lock().roster.get(&actor).cloned()
    }
}

// Operations implemented in submodules
impl CombatTracker {
    // Ingestion (from ingest.rs)
    pub fn record_death(&self, notice: &DeathNotice) -> IngestOutcome {
        ingest::record_death(self, notice)
    }

    pub fn record_normalized(&self, death: NormalizedDeath) -> IngestOutcome {
        ingest::record_normalized(self, death)
    }

    pub fn register_player(&self, actor: ActorId, display_name: &str) {
        ingest::register_player(self, actor, display_name)
    }

    // Query surface (from query.rs)
    pub fn query(&self, request: &QueryRequest) -> Result<HistoryView, QueryError> {
        query::query(self, request)
    }

    pub fn resolve_actor(&self, needle: &str) -> Option<ActorId> {
        query::resolve_actor(self, needle)
    }
}
