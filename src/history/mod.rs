//! History Store
//!
//! Per-actor bounded event logs, newest first. A history exists only once an
//! actor has at least one event; reading a missing history yields an empty
//! list.

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::types::{ActorId, CombatEvent};

/// Whole-store export used for persistence
pub type StoreSnapshot = BTreeMap<ActorId, Vec<CombatEvent>>;

/// Bounded per-actor event logs
#[derive(Debug, Clone)]
pub struct HistoryStore {
    max_entries: usize,
    histories: HashMap<ActorId, VecDeque<CombatEvent>>,
}

impl HistoryStore {
    /// Create an empty store. A cap of zero is raised to one.
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries: max_entries.max(1),
            histories: HashMap::new(),
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Insert at the head of an actor's history, creating it if needed.
    ///
    /// When the history grows past the cap exactly one entry is removed from
    /// the tail and returned.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut store = HistoryStore::new(2);
    /// store.append(actor, e1);
    /// store.append(actor, e2);
    /// assert_eq!(store.append(actor, e3), Some(e1)); // history is now [e3, e2]
    /// ```
    pub fn append(&mut self, actor: ActorId, event: CombatEvent) -> Option<CombatEvent> {
        let history = self.histories.entry(actor).or_default();
        history.push_front(event);
        if history.len() > self.max_entries {
            history.pop_back()
        } else {
            None
        }
    }

    /// Ordered copy of an actor's history (empty if none)
    pub fn read(&self, actor: ActorId) -> Vec<CombatEvent> {
        self.histories
            .get(&actor)
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Borrowing iterator over an actor's history, newest first
    pub fn iter(&self, actor: ActorId) -> impl Iterator<Item = &CombatEvent> {
        self.histories.get(&actor).into_iter().flatten()
    }

    pub fn contains(&self, actor: ActorId) -> bool {
        self.histories.contains_key(&actor)
    }

    pub fn len(&self, actor: ActorId) -> usize {
        self.histories.get(&actor).map_or(0, VecDeque::len)
    }

    pub fn actor_count(&self) -> usize {
        self.histories.len()
    }

    /// Replace the whole store.
    ///
    /// Histories longer than the cap lose their oldest entries; empty
    /// histories are skipped. Returns how many entries were dropped.
    pub fn load_all(&mut self, snapshot: StoreSnapshot) -> usize {
        let mut dropped = 0;
        self.histories.clear();

        for (actor, events) in snapshot {
            if events.is_empty() {
                continue;
            }
            let mut history: VecDeque<CombatEvent> = events.into();
            if history.len() > self.max_entries {
                dropped += history.len() - self.max_entries;
                history.truncate(self.max_entries);
            }
            self.histories.insert(actor, history);
        }

        dropped
    }

    /// Export the whole store
    pub fn snapshot_all(&self) -> StoreSnapshot {
        self.histories
            .iter()
            .map(|(actor, history)| (*actor, history.iter().cloned().collect()))
            .collect()
    }
}
