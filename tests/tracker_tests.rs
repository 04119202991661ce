//! Integration tests for the combat tracker

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use tempfile::TempDir;

use kd_history::{
    ActorId, ActorRef, AuthLevel, CombatTracker, DeathNotice, DropReason, EventKind,
    IngestOutcome, JsonFilePersistence, NoTeams, Persistence, PersistenceError, Position,
    QueryError, QueryRequest, SharedTeamDirectory, StoreSnapshot, TeamDirectory, TrackerConfig,
    WeaponIcon, WeaponRef,
};

/// In-memory persistence that counts saves and can be told to fail.
/// Clones share state, so a test keeps a handle after boxing one.
#[derive(Clone, Default)]
struct MemoryPersistence {
    stored: Arc<Mutex<StoreSnapshot>>,
    saves: Arc<AtomicUsize>,
    fail_saves: bool,
}

impl MemoryPersistence {
    fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Default::default()
        }
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self) -> Result<StoreSnapshot, PersistenceError> {
        Ok(self.stored.lock().clone())
    }

    fn save(&self, snapshot: &StoreSnapshot) -> Result<(), PersistenceError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves {
            return Err(PersistenceError::Io {
                path: "memory".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            });
        }
        *self.stored.lock() = snapshot.clone();
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

const X: u64 = 76561198000000001;
const Y: u64 = 76561198000000002;
const Z: u64 = 76561198000000003;

fn config(max_entries: usize) -> TrackerConfig {
    TrackerConfig {
        max_entries,
        ..TrackerConfig::default()
    }
}

fn setup(max_entries: usize) -> (CombatTracker, MemoryPersistence, Arc<SharedTeamDirectory>) {
    let persistence = MemoryPersistence::default();
    let directory = Arc::new(SharedTeamDirectory::new());
    let tracker = CombatTracker::new(
        &config(max_entries),
        Box::new(persistence.clone()),
        directory.clone(),
    );
    (tracker, persistence, directory)
}

fn pvp(attacker: u64, attacker_name: &str, victim: u64, victim_name: &str) -> DeathNotice {
    DeathNotice {
        victim: Some(ActorRef::player(victim, victim_name, Position::new(0.0, 0.0, 0.0))),
        attacker: Some(ActorRef::player(attacker, attacker_name, Position::new(30.0, 0.0, 40.0))),
        weapon: Some(WeaponRef::named("Rifle")),
        hit_location: Some("head".to_string()),
    }
}

#[test]
fn test_pvp_kill_records_both_sides() {
    let (tracker, _, _) = setup(20);

    let outcome = tracker.record_death(&pvp(X, "Xavier", Y, "Yuri"));
    assert_eq!(outcome, IngestOutcome::Recorded);

    let victim = tracker.history(ActorId::new(Y));
    assert_eq!(victim.len(), 1);
    assert_eq!(victim[0].kind, EventKind::Death);
    assert_eq!(victim[0].counterpart, "Xavier");

    let attacker = tracker.history(ActorId::new(X));
    assert_eq!(attacker.len(), 1);
    assert_eq!(attacker[0].kind, EventKind::Kill);
    assert_eq!(attacker[0].counterpart, "Yuri");
    assert_eq!(attacker[0].weapon, "Rifle");
    assert_eq!(attacker[0].weapon_icon, WeaponIcon::Firearm);
    assert!((attacker[0].distance - 50.0).abs() < 1e-9);
    assert!(attacker[0].headshot);

    // Both entries share one timestamp
    assert_eq!(victim[0].timestamp, attacker[0].timestamp);

    let stats = tracker.stats(ActorId::new(X));
    assert_eq!(stats.kills, 1);
    assert_eq!(stats.headshot_kills, 1);
}

#[test]
fn test_history_is_capped_newest_first() {
    let (tracker, _, _) = setup(2);

    tracker.record_death(&pvp(X, "Xavier", Y, "Yuri"));
    tracker.record_death(&pvp(X, "Xavier", Z, "Zed"));
    tracker.record_death(&pvp(X, "Xavier", Y, "Yuri"));

    let history = tracker.history(ActorId::new(X));
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].counterpart, "Yuri");
    assert_eq!(history[1].counterpart, "Zed");
}

#[test]
fn test_non_pvp_deaths_are_dropped() {
    let (tracker, persistence, _) = setup(20);

    let mut no_attacker = pvp(X, "Xavier", Y, "Yuri");
    no_attacker.attacker = None;
    assert_eq!(
        tracker.record_death(&no_attacker),
        IngestOutcome::NotPvp { reason: DropReason::MissingAttacker }
    );

    let mut npc = pvp(X, "Scientist", Y, "Yuri");
    if let Some(attacker) = npc.attacker.as_mut() {
        attacker.npc = true;
    }
    assert_eq!(
        tracker.record_death(&npc),
        IngestOutcome::NotPvp { reason: DropReason::NonPlayerAttacker }
    );

    let suicide = pvp(Y, "Yuri", Y, "Yuri");
    assert_eq!(
        tracker.record_death(&suicide),
        IngestOutcome::NotPvp { reason: DropReason::SelfInflicted }
    );

    assert_eq!(tracker.actor_count(), 0);
    assert_eq!(persistence.saves.load(Ordering::SeqCst), 0);
}

#[test]
fn test_teammate_kills_are_dropped() {
    let (tracker, persistence, directory) = setup(20);
    directory.assign(ActorId::new(X), Some(7));
    directory.assign(ActorId::new(Y), Some(7));

    assert_eq!(tracker.record_death(&pvp(X, "Xavier", Y, "Yuri")), IngestOutcome::SameTeam);
    assert!(tracker.history(ActorId::new(X)).is_empty());
    assert!(tracker.history(ActorId::new(Y)).is_empty());
    assert_eq!(persistence.saves.load(Ordering::SeqCst), 0);

    // Leaving the team makes them fair game again
    directory.assign(ActorId::new(Y), None);
    assert!(tracker.record_death(&pvp(X, "Xavier", Y, "Yuri")).is_recorded());
}

#[test]
fn test_each_recorded_death_saves_once() {
    let (tracker, persistence, _) = setup(20);

    tracker.record_death(&pvp(X, "Xavier", Y, "Yuri"));
    tracker.record_death(&pvp(Y, "Yuri", X, "Xavier"));

    assert_eq!(persistence.saves.load(Ordering::SeqCst), 2);
    let stored = persistence.stored.lock();
    assert_eq!(stored.get(&ActorId::new(X)).map(Vec::len), Some(2));
    assert_eq!(stored.get(&ActorId::new(Y)).map(Vec::len), Some(2));
}

#[test]
fn test_failed_save_keeps_memory_state() {
    let persistence = MemoryPersistence::failing();
    let tracker = CombatTracker::new(&config(20), Box::new(persistence.clone()), Arc::new(NoTeams));

    assert!(tracker.record_death(&pvp(X, "Xavier", Y, "Yuri")).is_recorded());
    assert!(tracker.save().is_err());
    assert_eq!(tracker.history(ActorId::new(X)).len(), 1);
    assert_eq!(tracker.history(ActorId::new(Y)).len(), 1);
}

#[test]
fn test_non_elevated_query_for_other_player_is_denied() {
    let (tracker, _, _) = setup(20);
    tracker.record_death(&pvp(X, "Xavier", Y, "Yuri"));
    let before = tracker.history(ActorId::new(Y));

    let request = QueryRequest::for_target(ActorId::new(X), "Yuri", AuthLevel::Player);
    assert!(matches!(tracker.query(&request), Err(QueryError::Denied { .. })));

    // Unknown names are denied too, not reported missing
    let request = QueryRequest::for_target(ActorId::new(X), "Nobody", AuthLevel::Player);
    assert!(matches!(tracker.query(&request), Err(QueryError::Denied { .. })));

    assert_eq!(tracker.history(ActorId::new(Y)), before);
}

#[test]
fn test_elevated_query_by_name_and_id() {
    let (tracker, _, _) = setup(20);
    tracker.record_death(&pvp(X, "Xavier", Y, "Yuri"));

    let by_name = QueryRequest::for_target(ActorId::new(Z), "yuri", AuthLevel::Moderator);
    let view = tracker.query(&by_name).unwrap();
    assert_eq!(view.target_id, ActorId::new(Y));
    assert_eq!(view.target_name, "Yuri");
    assert_eq!(view.stats.deaths, 1);
    assert_eq!(view.entries.len(), 1);
    assert!(view.entries[0].summary.contains("Xavier"));

    let by_id = QueryRequest::for_target(ActorId::new(Z), &X.to_string(), AuthLevel::Admin);
    let view = tracker.query(&by_id).unwrap();
    assert_eq!(view.target_id, ActorId::new(X));
    assert_eq!(view.stats.kills, 1);

    let missing = QueryRequest::for_target(ActorId::new(Z), "Nobody", AuthLevel::Admin);
    assert_eq!(
        tracker.query(&missing),
        Err(QueryError::NotFound("Nobody".to_string()))
    );
}

#[test]
fn test_kd_ratio_with_no_deaths() {
    let (tracker, _, _) = setup(20);
    tracker.record_death(&pvp(X, "Xavier", Y, "Yuri"));
    tracker.record_death(&pvp(X, "Xavier", Z, "Zed"));
    tracker.record_death(&pvp(X, "Xavier", Y, "Yuri"));

    let view = tracker.query(&QueryRequest::own(ActorId::new(X))).unwrap();
    assert_eq!(view.stats.kills, 3);
    assert_eq!(view.stats.deaths, 0);
    assert!((view.stats.kd_ratio - 3.0).abs() < 1e-9);
}

#[test]
fn test_own_query_without_history_is_empty() {
    let (tracker, _, _) = setup(20);
    let view = tracker.query(&QueryRequest::own(ActorId::new(Z))).unwrap();
    assert!(view.is_empty());
    assert_eq!(view.stats.kills, 0);
    assert_eq!(view.stats.kd_ratio, 0.0);
}

#[test]
fn test_history_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("KillDeathHistory.json");
    let directory: Arc<dyn TeamDirectory> = Arc::new(NoTeams);

    {
        let tracker = CombatTracker::new(
            &config(20),
            Box::new(JsonFilePersistence::new(&path)),
            directory.clone(),
        );
        tracker.record_death(&pvp(X, "Xavier", Y, "Yuri"));
        tracker.shutdown();
    }
    assert!(path.exists());

    let tracker = CombatTracker::new(&config(20), Box::new(JsonFilePersistence::new(&path)), directory);
    let history = tracker.history(ActorId::new(Y));
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].counterpart, "Xavier");

    // Names are not persisted but ids still resolve from the store
    assert_eq!(tracker.resolve_actor(&X.to_string()), Some(ActorId::new(X)));
    assert_eq!(tracker.resolve_actor("Xavier"), None);
}

#[test]
fn test_restart_with_smaller_cap_truncates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    let directory: Arc<dyn TeamDirectory> = Arc::new(NoTeams);

    let tracker = CombatTracker::new(&config(20), Box::new(JsonFilePersistence::new(&path)), directory.clone());
    for _ in 0..5 {
        tracker.record_death(&pvp(X, "Xavier", Y, "Yuri"));
    }
    drop(tracker);

    let tracker = CombatTracker::new(&config(3), Box::new(JsonFilePersistence::new(&path)), directory);
    assert_eq!(tracker.history(ActorId::new(X)).len(), 3);
}

#[test]
fn test_corrupt_data_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "{ not json").unwrap();

    let tracker = CombatTracker::new(&config(20), Box::new(JsonFilePersistence::new(&path)), Arc::new(NoTeams));
    assert_eq!(tracker.actor_count(), 0);
}

#[test]
fn test_concurrent_ingestion() {
    let (tracker, _, _) = setup(1000);
    let tracker = Arc::new(tracker);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let tracker = tracker.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    tracker.record_death(&pvp(X, "Xavier", 100 + i, "Victim"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stats = tracker.stats(ActorId::new(X));
    assert_eq!(stats.kills, 100);
    assert_eq!(tracker.actor_count(), 5);
}

#[test]
fn test_restart_preserves_fractional_distances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    let directory: Arc<dyn TeamDirectory> = Arc::new(NoTeams);

    let tracker = CombatTracker::new(&config(1), Box::new(JsonFilePersistence::new(&path)), directory.clone());
    for i in 0..200u64 {
        let step = i as f64;
        let notice = DeathNotice {
            victim: Some(ActorRef::player(1000 + i, "Victim", Position::new(step * 0.731, 1.3, -step * 0.117))),
            attacker: Some(ActorRef::player(5000 + i, "Shooter", Position::new(3.7, step * 0.291, 9.1))),
            weapon: Some(WeaponRef::named("Revolver")),
            hit_location: None,
        };
        assert!(tracker.record_death(&notice).is_recorded());
    }
    let expected: Vec<_> = (0..200u64)
        .map(|i| tracker.history(ActorId::new(5000 + i)))
        .collect();
    drop(tracker);

    let reloaded = CombatTracker::new(&config(1), Box::new(JsonFilePersistence::new(&path)), directory);
    for (i, before) in expected.iter().enumerate() {
        let after = reloaded.history(ActorId::new(5000 + i as u64));
        assert_eq!(&after, before, "kill entry {} changed across a restart", i);
        assert_eq!(after[0].distance.to_bits(), before[0].distance.to_bits());
    }
}
