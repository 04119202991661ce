//! OnPlayerConnected hook

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::protocol::{Hook, HookDefinition};
use crate::server::text_response;
use crate::tracker::CombatTracker;
use crate::types::{ActorId, HostResult};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerConnected {
    actor_id: ActorId,
    display_name: String,
}

/// Keeps the name roster current so `kdh <name>` can find players
pub struct PlayerConnectedHook {
    tracker: Arc<CombatTracker>,
}

impl PlayerConnectedHook {
    pub fn new(tracker: Arc<CombatTracker>) -> Self {
        Self { tracker }
    }
}

impl Hook for PlayerConnectedHook {
    fn definition(&self) -> HookDefinition {
        HookDefinition::new(
            "OnPlayerConnected",
            "Register a player's current display name",
            json!({
                "type": "object",
                "properties": {
                    "actorId": { "type": ["integer", "string"] },
                    "displayName": { "type": "string" }
                },
                "required": ["actorId", "displayName"]
            }),
        )
    }

    fn execute(&self, params: Value) -> HostResult<Value> {
        let player: PlayerConnected = serde_json::from_value(params)?;
        self.tracker.register_player(player.actor_id, &player.display_name);
        Ok(text_response(format!(
            "Registered {} as {}",
            player.actor_id, player.display_name
        )))
    }
}
