//! Data types for the combat history tracker
//!
//! This module contains the core data structures shared by ingestion,
//! storage, statistics and the query surface.

mod actor;
mod event;
mod notice;
mod query;
mod stats;
mod view;

pub use actor::{ActorId, ParseActorIdError, Position};
pub use event::{CombatEvent, EventKind, EventKindError, WeaponIcon};
pub use notice::{ActorRef, DeathNotice, WeaponRef};
pub use query::{AuthLevel, QueryRequest};
pub use stats::HistoryStats;
pub use view::{EventView, HistoryView};

/// Result type for host-facing operations
pub type HostResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Display name used when an actor reference carries no usable name
pub const UNKNOWN_NAME: &str = "Unknown";
