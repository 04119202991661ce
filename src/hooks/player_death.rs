//! OnPlayerDeath hook

use std::sync::Arc;

use serde_json::{json, Value};

use crate::protocol::{Hook, HookDefinition};
use crate::server::data_response;
use crate::tracker::{CombatTracker, IngestOutcome};
use crate::types::{DeathNotice, HostResult};

/// Feeds combat deaths into the tracker
pub struct PlayerDeathHook {
    tracker: Arc<CombatTracker>,
}

impl PlayerDeathHook {
    pub fn new(tracker: Arc<CombatTracker>) -> Self {
        Self { tracker }
    }
}

fn actor_schema(description: &str) -> Value {
    json!({
        "type": ["object", "null"],
        "description": description,
        "properties": {
            "id": { "type": ["integer", "string"] },
            "displayName": { "type": "string" },
            "position": {
                "type": "object",
                "properties": {
                    "x": { "type": "number" },
                    "y": { "type": "number" },
                    "z": { "type": "number" }
                }
            },
            "npc": { "type": "boolean", "default": false }
        },
        "required": ["id"]
    })
}

impl Hook for PlayerDeathHook {
    fn definition(&self) -> HookDefinition {
        HookDefinition::new(
            "OnPlayerDeath",
            "Record a player death; only player-versus-player deaths between non-teammates are kept",
            json!({
                "type": "object",
                "properties": {
                    "victim": actor_schema("The player who died"),
                    "attacker": actor_schema("The killer, if any"),
                    "weapon": {
                        "type": ["object", "null"],
                        "properties": { "displayName": { "type": ["string", "null"] } }
                    },
                    "hitLocation": {
                        "type": ["string", "null"],
                        "description": "Bone or hit area tag, e.g. \"head\""
                    }
                }
            }),
        )
    }

    fn execute(&self, params: Value) -> HostResult<Value> {
        let notice: DeathNotice = serde_json::from_value(params)?;
        let outcome = self.tracker.record_death(&notice);

        let (status, text) = match &outcome {
            IngestOutcome::Recorded => ("recorded", "Death recorded".to_string()),
            IngestOutcome::NotPvp { reason } => ("not_pvp", format!("Not recorded: {}", reason)),
            IngestOutcome::SameTeam => ("same_team", "Not recorded: teammates".to_string()),
        };
        data_response(status, text, &outcome)
    }
}
