//! Kill/Death History - Binary Entry Point
//!
//! Speaks line-delimited JSON-RPC with the game host on stdin/stdout.
//! Logs go to stderr; set `RUST_LOG` to adjust verbosity.

use std::process;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kd_history::hooks::register_all_hooks;
use kd_history::{
    CombatTracker, HostBridge, HostResult, JsonFilePersistence, ServerInfo, SharedTeamDirectory,
    TrackerConfig,
};

fn main() -> HostResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = TrackerConfig::from_env();
    info!(
        data_file = %config.data_file.display(),
        max_entries = config.max_entries,
        "starting kill/death history"
    );

    let directory = Arc::new(SharedTeamDirectory::new());
    let persistence = Box::new(JsonFilePersistence::new(&config.data_file));
    let tracker = Arc::new(CombatTracker::new(&config, persistence, directory.clone()));

    let signal_tracker = tracker.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        signal_tracker.shutdown();
        process::exit(0);
    }) {
        error!(error = %e, "failed to install interrupt handler");
    }

    let mut bridge = HostBridge::stdio(ServerInfo::default());
    register_all_hooks(&mut bridge, tracker.clone(), directory);
    info!(hooks = bridge.hook_count(), "host bridge ready");

    let result = bridge.run();
    tracker.shutdown();
    result
}
