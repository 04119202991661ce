//! Kill/Death History
//!
//! Tracks player-versus-player combat for a multiplayer game server. Each
//! player keeps a bounded, most-recent-first list of kills and deaths that
//! survives restarts and can be shown on request with derived stats.
//!
//! # Modules
//!
//! - `types`: Core data structures (CombatEvent, DeathNotice, HistoryView)
//! - `normalizer`: Raw death notice to player-vs-player event pair
//! - `team`: Teammate lookups used to drop friendly kills
//! - `history`: Bounded per-actor history store
//! - `stats`: K/D and headshot aggregation
//! - `persistence`: Whole-store JSON file persistence
//! - `tracker`: Ingestion and query surface over the store
//! - `config`: JSON config file with env overrides
//! - `protocol`: Host hook and JSON-RPC types
//! - `server`: stdio host bridge
//! - `hooks`: The host callbacks and the `kdh` command
//! - `utils`: Timestamps and atomic file writes
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use kd_history::{CombatTracker, HostBridge, JsonFilePersistence, ServerInfo, SharedTeamDirectory, TrackerConfig};
//! use kd_history::hooks::register_all_hooks;
//!
//! fn main() -> kd_history::HostResult<()> {
//!     let config = TrackerConfig::default();
//!     let directory = Arc::new(SharedTeamDirectory::new());
//!     let persistence = Box::new(JsonFilePersistence::new(&config.data_file));
//!     let tracker = Arc::new(CombatTracker::new(&config, persistence, directory.clone()));
//!
//!     let mut bridge = HostBridge::stdio(ServerInfo::default());
//!     register_all_hooks(&mut bridge, tracker.clone(), directory);
//!     bridge.run()?;
//!     tracker.shutdown();
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod history;
pub mod hooks;
pub mod normalizer;
pub mod persistence;
pub mod protocol;
pub mod server;
pub mod stats;
pub mod team;
pub mod tracker;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{ConfigError, TrackerConfig};
pub use history::{HistoryStore, StoreSnapshot};
pub use normalizer::{normalize, DropReason, NormalizedDeath, NormalizerOptions};
pub use persistence::{JsonFilePersistence, Persistence, PersistenceError};
pub use protocol::{Hook, HookDefinition, ServerInfo};
pub use server::HostBridge;
pub use team::{NoTeams, SharedTeamDirectory, TeamDirectory, TeamFilter, TeamId};
pub use tracker::{CombatTracker, IngestOutcome, QueryError};
pub use types::{
    ActorId, ActorRef, AuthLevel, CombatEvent, DeathNotice, EventKind, EventView, HistoryStats,
    HistoryView, HostResult, Position, QueryRequest, WeaponIcon, WeaponRef,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
