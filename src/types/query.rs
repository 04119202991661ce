//! Query request types

use serde::{Deserialize, Serialize};

use super::ActorId;

/// Caller's authorization level as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthLevel {
    #[default]
    Player,
    Moderator,
    Admin,
}

impl AuthLevel {
    /// Whether the caller may view other actors' histories
    pub fn is_elevated(&self) -> bool {
        matches!(self, AuthLevel::Moderator | AuthLevel::Admin)
    }
}

/// A history lookup issued by a player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub requester: ActorId,
    /// Name or id of another actor; `None` means the requester
    pub target: Option<String>,
    pub auth: AuthLevel,
}

impl QueryRequest {
    /// Lookup of the requester's own history
    pub fn own(requester: ActorId) -> Self {
        Self {
            requester,
            target: None,
            auth: AuthLevel::Player,
        }
    }

    pub fn for_target(requester: ActorId, target: &str, auth: AuthLevel) -> Self {
        Self {
            requester,
            target: Some(target.to_string()),
            auth,
        }
    }
}
