//! Stats Aggregator
//!
//! Single pass over a history snapshot; nothing is cached.

use crate::types::{CombatEvent, EventKind, HistoryStats};

/// Count kills, deaths and headshot kills and derive the ratios
pub fn aggregate<'a, I>(history: I) -> HistoryStats
where
    I: IntoIterator<Item = &'a CombatEvent>,
{
    let (mut kills, mut deaths, mut headshot_kills) = (0u32, 0u32, 0u32);

    for event in history {
        match event.kind {
            EventKind::Kill => {
                kills += 1;
                if event.headshot {
                    headshot_kills += 1;
                }
            }
            EventKind::Death => deaths += 1,
        }
    }

    HistoryStats::from_counts(kills, deaths, headshot_kills)
}
