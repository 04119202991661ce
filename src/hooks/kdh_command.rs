//! `kdh` chat command hook

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::protocol::{Hook, HookDefinition};
use crate::server::{data_response, error_response};
use crate::tracker::{CombatTracker, QueryError};
use crate::types::{ActorId, AuthLevel, HistoryView, HostResult, QueryRequest};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct KdhCommand {
    requester: ActorId,
    #[serde(default)]
    auth_level: AuthLevel,
    #[serde(default)]
    args: Vec<String>,
}

/// Serves history views for `/kdh [player]`
pub struct KdhCommandHook {
    tracker: Arc<CombatTracker>,
}

impl KdhCommandHook {
    pub fn new(tracker: Arc<CombatTracker>) -> Self {
        Self { tracker }
    }
}

fn header(view: &HistoryView) -> String {
    let stats = &view.stats;
    let mut text = format!(
        "Kill / Death History: {} | Kills {} | Deaths {} | K/D {:.2} | HS {:.1}%",
        view.target_name, stats.kills, stats.deaths, stats.kd_ratio, stats.headshot_percent
    );
    if view.is_empty() {
        text.push_str("\nNo history available.");
    }
    text
}

impl Hook for KdhCommandHook {
    fn definition(&self) -> HookDefinition {
        HookDefinition::new(
            "kdh",
            "Show kill/death history and stats for yourself, or for another player (moderators only)",
            json!({
                "type": "object",
                "properties": {
                    "requester": { "type": ["integer", "string"] },
                    "authLevel": {
                        "type": "string",
                        "enum": ["player", "moderator", "admin"],
                        "default": "player"
                    },
                    "args": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Optional target player name or id"
                    }
                },
                "required": ["requester"]
            }),
        )
    }

    fn execute(&self, params: Value) -> HostResult<Value> {
        let command: KdhCommand = serde_json::from_value(params)?;
        let request = QueryRequest {
            requester: command.requester,
            target: command.args.into_iter().next(),
            auth: command.auth_level,
        };

        match self.tracker.query(&request) {
            Ok(view) => data_response("ok", header(&view), &view),
            Err(e @ QueryError::Denied { .. }) => Ok(error_response(
                "denied",
                format!("You do not have permission to view other players' history ({})", e),
            )),
            Err(e @ QueryError::NotFound(_)) => Ok(error_response("not_found", e.to_string())),
        }
    }
}
