//! Combat event types
//!
//! A `CombatEvent` is one immutable entry in an actor's history. The same
//! shape is used in memory, on disk and (flattened) in the query view.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::time::timestamp_format;

/// Which side of the fight the history owner was on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum EventKind {
    Kill,
    Death,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Kill => "Kill",
            EventKind::Death => "Death",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected event kind tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event kind {0:?}, expected Kill or Death")]
pub struct EventKindError(pub String);

impl TryFrom<String> for EventKind {
    type Error = EventKindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "kill" => Ok(EventKind::Kill),
            "death" => Ok(EventKind::Death),
            _ => Err(EventKindError(value)),
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = EventKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::try_from(s.to_string())
    }
}

/// Icon class derived from the weapon name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeaponIcon {
    Firearm,
    Archery,
    MeleeBlunt,
    MeleeLight,
    #[default]
    Unknown,
}

impl WeaponIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponIcon::Firearm => "firearm",
            WeaponIcon::Archery => "archery",
            WeaponIcon::MeleeBlunt => "melee_blunt",
            WeaponIcon::MeleeLight => "melee_light",
            WeaponIcon::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WeaponIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded kill or death
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub kind: EventKind,
    /// Display name of the other actor
    pub counterpart: String,
    pub weapon: String,
    #[serde(rename = "weaponIcon", default)]
    pub weapon_icon: WeaponIcon,
    /// Meters between attacker and victim
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub headshot: bool,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
}

impl CombatEvent {
    pub fn is_kill(&self) -> bool {
        self.kind == EventKind::Kill
    }

    pub fn is_death(&self) -> bool {
        self.kind == EventKind::Death
    }

    /// One-line text form: `[2024-05-01 18:22:09] Kill → Bob (Assault Rifle, 50.0m, headshot)`
    pub fn summary_line(&self) -> String {
        let mut details = self.weapon.clone();
        if self.distance > 0.0 {
            details.push_str(&format!(", {:.1}m", self.distance));
        }
        if self.headshot {
            details.push_str(", headshot");
        }
        format!(
            "[{}] {} → {} ({})",
            self.timestamp.format(crate::utils::time::TIMESTAMP_FORMAT),
            self.kind,
            self.counterpart,
            details
        )
    }
}
