//! Ingestion path: normalize, filter, append both sides, save

use tracing::{debug, warn};

use crate::normalizer::{self, NormalizedDeath};
use crate::types::{ActorId, DeathNotice, UNKNOWN_NAME};

use super::{CombatTracker, IngestOutcome};

/// Record a raw death notice
pub fn record_death(tracker: &CombatTracker, notice: &DeathNotice) -> IngestOutcome {
    match normalizer::normalize(notice, tracker.options) {
        Ok(death) => record_normalized(tracker, death),
        Err(reason) => {
            debug!(%reason, "death not recorded");
            IngestOutcome::NotPvp { reason }
        }
    }
}

/// Record an already-normalized PvP death.
///
/// The victim's Death entry and the attacker's Kill entry are appended under
/// one lock, followed by a save. A failed save is logged; the in-memory store
/// stays authoritative.
pub fn record_normalized(tracker: &CombatTracker, death: NormalizedDeath) -> IngestOutcome {
    if tracker.team_filter.are_teammates(death.attacker, death.victim) {
        debug!(attacker = %death.attacker, victim = %death.victim, "teammate kill not recorded");
        return IngestOutcome::SameTeam;
    }

    let mut state = tracker.state.lock();

    remember_name(&mut state.roster, death.victim, &death.victim_name);
    remember_name(&mut state.roster, death.attacker, &death.attacker_name);

    state.store.append(death.victim, death.death_event());
    state.store.append(death.attacker, death.kill_event());

    debug!(
        attacker = %death.attacker,
        victim = %death.victim,
        weapon = %death.weapon,
        distance = death.distance,
        headshot = death.headshot,
        "recorded kill"
    );

    if let Err(e) = tracker.persist(&state) {
        warn!(error = %e, "failed to save combat history");
    }

    IngestOutcome::Recorded
}

/// Record a player's current display name for target lookups
pub fn register_player(tracker: &CombatTracker, actor: ActorId, display_name: &str) {
    let mut state = tracker.state.lock();
    remember_name(&mut state.roster, actor, display_name);
}

fn remember_name(roster: &mut std::collections::HashMap<ActorId, String>, actor: ActorId, name: &str) {
    let name = name.trim();
    if name.is_empty() || name == UNKNOWN_NAME {
        return;
    }
    roster.insert(actor, name.to_string());
}
