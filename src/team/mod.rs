//! Team Filter
//!
//! Same-team kills are not recorded. Team membership lives outside the
//! tracker and is reached through the [`TeamDirectory`] trait; the server
//! binary feeds a [`SharedTeamDirectory`] from host notifications.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::ActorId;

/// Host team identifier
pub type TeamId = u64;

/// Directory lookup: an actor's current team, if any
pub trait TeamDirectory: Send + Sync {
    fn team_of(&self, actor: ActorId) -> Option<TeamId>;
}

/// Predicate over two actors backed by a team directory
#[derive(Clone)]
pub struct TeamFilter {
    directory: Arc<dyn TeamDirectory>,
}

impl TeamFilter {
    pub fn new(directory: Arc<dyn TeamDirectory>) -> Self {
        Self { directory }
    }

    /// True iff both actors have a team and it is the same one
    pub fn are_teammates(&self, a: ActorId, b: ActorId) -> bool {
        match (self.directory.team_of(a), self.directory.team_of(b)) {
            (Some(team_a), Some(team_b)) => team_a == team_b,
            _ => false,
        }
    }
}

/// In-memory team directory updated by the host
#[derive(Debug, Default)]
pub struct SharedTeamDirectory {
    teams: RwLock<HashMap<ActorId, TeamId>>,
}

impl SharedTeamDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear an actor's team. Team id 0 means "no team".
    pub fn assign(&self, actor: ActorId, team: Option<TeamId>) {
        let mut teams = self.teams.write();
        match team.filter(|id| *id != 0) {
            Some(team) => {
                teams.insert(actor, team);
            }
            None => {
                teams.remove(&actor);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.teams.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.read().is_empty()
    }
}

impl TeamDirectory for SharedTeamDirectory {
    fn team_of(&self, actor: ActorId) -> Option<TeamId> {
        self.teams.read().get(&actor).copied()
    }
}

/// Directory in which nobody is on a team
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTeams;

impl TeamDirectory for NoTeams {
    fn team_of(&self, _actor: ActorId) -> Option<TeamId> {
        None
    }
}
