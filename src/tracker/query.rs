//! Query surface: permission-gated history views

use tracing::warn;

use crate::stats;
use crate::types::{ActorId, EventView, HistoryView, QueryRequest};

use super::{CombatTracker, TrackerState};

/// Why a query returned no view
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("{requester} is not allowed to view the history of {target:?}")]
    Denied { requester: ActorId, target: String },
    #[error("no player found matching {0:?}")]
    NotFound(String),
}

/// Build the history view for the requester or a named target.
///
/// Naming anyone other than yourself requires elevated authorization. The
/// check runs before existence is reported, so a non-elevated caller cannot
/// probe which names are known.
pub fn query(tracker: &CombatTracker, request: &QueryRequest) -> Result<HistoryView, QueryError> {
    let state = tracker.state.lock();

    let needle = request
        .target
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let target = match needle {
        None => request.requester,
        Some(needle) => {
            let resolved = resolve_in(&state, needle);
            if request.auth.is_elevated() {
                resolved.ok_or_else(|| QueryError::NotFound(needle.to_string()))?
            } else {
                match resolved {
                    Some(id) if id == request.requester => id,
                    None if needle.parse::<ActorId>().ok() == Some(request.requester) => {
                        request.requester
                    }
                    _ => {
                        warn!(
                            requester = %request.requester,
                            target = %needle,
                            "denied history query for another player"
                        );
                        return Err(QueryError::Denied {
                            requester: request.requester,
                            target: needle.to_string(),
                        });
                    }
                }
            }
        }
    };

    let stats = stats::aggregate(state.store.iter(target));
    let entries = state
        .store
        .iter(target)
        .cloned()
        .map(EventView::from)
        .collect();

    Ok(HistoryView {
        target_id: target,
        target_name: name_of(&state, target),
        entries,
        stats,
    })
}

/// Resolve an id or display name to a known actor
pub fn resolve_actor(tracker: &CombatTracker, needle: &str) -> Option<ActorId> {
    let state = tracker.state.lock();
    resolve_in(&state, needle)
}

/// Resolution order: exact id, case-insensitive exact name, unique
/// case-insensitive name fragment. Ambiguous matches resolve to nothing.
fn resolve_in(state: &TrackerState, needle: &str) -> Option<ActorId> {
    let needle = needle.trim();
    if needle.is_empty() {
        return None;
    }

    if let Ok(id) = needle.parse::<ActorId>() {
        if state.roster.contains_key(&id) || state.store.contains(id) {
            return Some(id);
        }
    }

    let lowered = needle.to_lowercase();

    let exact: Vec<ActorId> = state
        .roster
        .iter()
        .filter(|(_, name)| name.to_lowercase() == lowered)
        .map(|(id, _)| *id)
        .collect();
    if !exact.is_empty() {
        return unique(exact);
    }

    let partial: Vec<ActorId> = state
        .roster
        .iter()
        .filter(|(_, name)| name.to_lowercase().contains(&lowered))
        .map(|(id, _)| *id)
        .collect();
    unique(partial)
}

fn unique(matches: Vec<ActorId>) -> Option<ActorId> {
    match matches.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

fn name_of(state: &TrackerState, actor: ActorId) -> String {
    state
        .roster
        .get(&actor)
        .cloned()
        .unwrap_or_else(|| actor.to_string())
}
