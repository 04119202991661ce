//! Inbound death notification from the host
//!
//! Every field the host may leave out is optional here; defaulting happens
//! once, in the normalizer.

use serde::{Deserialize, Serialize};

use super::{ActorId, Position};

/// An actor as seen by the host at the moment of death
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRef {
    pub id: ActorId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub position: Position,
    /// Host-controlled actor (scientist, bot, turret operator)
    #[serde(default)]
    pub npc: bool,
}

impl ActorRef {
    pub fn player(id: impl Into<ActorId>, display_name: &str, position: Position) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.to_string(),
            position,
            npc: false,
        }
    }

    pub fn is_player(&self) -> bool {
        !self.npc
    }
}

/// Weapon reference; display metadata may be missing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponRef {
    #[serde(default)]
    pub display_name: Option<String>,
}

impl WeaponRef {
    pub fn named(name: &str) -> Self {
        Self {
            display_name: Some(name.to_string()),
        }
    }
}

/// Raw combat-death notification
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeathNotice {
    #[serde(default)]
    pub victim: Option<ActorRef>,
    #[serde(default)]
    pub attacker: Option<ActorRef>,
    #[serde(default)]
    pub weapon: Option<WeaponRef>,
    #[serde(default)]
    pub hit_location: Option<String>,
}
