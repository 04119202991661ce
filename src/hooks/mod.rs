//! Host hooks
//!
//! - `OnPlayerDeath`: ingest a combat death
//! - `OnPlayerConnected`: learn a player's display name
//! - `OnTeamChanged`: update team membership used by the team filter
//! - `kdh`: the history chat command

mod kdh_command;
mod player_connected;
mod player_death;
mod team_changed;

use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::server::HostBridge;
use crate::team::SharedTeamDirectory;
use crate::tracker::CombatTracker;

pub use kdh_command::KdhCommandHook;
pub use player_connected::PlayerConnectedHook;
pub use player_death::PlayerDeathHook;
pub use team_changed::TeamChangedHook;

/// Register all hooks with the host bridge
pub fn register_all_hooks<R: BufRead, W: Write>(
    bridge: &mut HostBridge<R, W>,
    tracker: Arc<CombatTracker>,
    directory: Arc<SharedTeamDirectory>,
) {
    bridge.register_hook(Box::new(PlayerDeathHook::new(tracker.clone())));
    bridge.register_hook(Box::new(PlayerConnectedHook::new(tracker.clone())));
    bridge.register_hook(Box::new(TeamChangedHook::new(directory)));
    bridge.register_hook(Box::new(KdhCommandHook::new(tracker)));
}
