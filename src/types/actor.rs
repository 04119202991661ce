//! Actor identity and position types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Stable player identifier (a platform user id)
///
/// Serialized as a bare integer. Deserialization accepts either an integer
/// or a decimal string, since hosts commonly ship 64-bit ids as strings and
/// JSON object keys are always strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ActorId(pub u64);

impl ActorId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a string is not a valid actor id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid actor id: {0:?}")]
pub struct ParseActorIdError(pub String);

impl FromStr for ActorId {
    type Err = ParseActorIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ActorId)
            .map_err(|_| ParseActorIdError(s.to_string()))
    }
}

impl From<u64> for ActorId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawActorId {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for ActorId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawActorId::deserialize(deserializer)? {
            RawActorId::Number(raw) => Ok(ActorId(raw)),
            RawActorId::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// World-space position in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}
