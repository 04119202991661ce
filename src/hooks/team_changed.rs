//! OnTeamChanged hook

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::protocol::{Hook, HookDefinition};
use crate::server::text_response;
use crate::team::{SharedTeamDirectory, TeamId};
use crate::types::{ActorId, HostResult};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamChanged {
    actor_id: ActorId,
    #[serde(default)]
    team_id: Option<TeamId>,
}

/// Mirrors host team membership into the shared directory
pub struct TeamChangedHook {
    directory: Arc<SharedTeamDirectory>,
}

impl TeamChangedHook {
    pub fn new(directory: Arc<SharedTeamDirectory>) -> Self {
        Self { directory }
    }
}

impl Hook for TeamChangedHook {
    fn definition(&self) -> HookDefinition {
        HookDefinition::new(
            "OnTeamChanged",
            "Set or clear a player's team; null or 0 means no team",
            json!({
                "type": "object",
                "properties": {
                    "actorId": { "type": ["integer", "string"] },
                    "teamId": { "type": ["integer", "null"] }
                },
                "required": ["actorId"]
            }),
        )
    }

    fn execute(&self, params: Value) -> HostResult<Value> {
        let change: TeamChanged = serde_json::from_value(params)?;
        self.directory.assign(change.actor_id, change.team_id);

        let text = match change.team_id.filter(|id| *id != 0) {
            Some(team) => format!("{} joined team {}", change.actor_id, team),
            None => format!("{} has no team", change.actor_id),
        };
        Ok(text_response(text))
    }
}
