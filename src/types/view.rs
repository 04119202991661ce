//! Read-only view handed to the renderer

use serde::{Deserialize, Serialize};

use super::{ActorId, CombatEvent, HistoryStats};

/// A history entry plus its display text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventView {
    #[serde(flatten)]
    pub event: CombatEvent,
    pub summary: String,
}

impl From<CombatEvent> for EventView {
    fn from(event: CombatEvent) -> Self {
        let summary = event.summary_line();
        Self { event, summary }
    }
}

/// Snapshot of one actor's history and stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    pub target_id: ActorId,
    pub target_name: String,
    pub entries: Vec<EventView>,
    pub stats: HistoryStats,
}

impl HistoryView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
