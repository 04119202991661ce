//! Derived history statistics

use serde::{Deserialize, Serialize};

/// Counts and ratios over one actor's history. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub kills: u32,
    pub deaths: u32,
    pub headshot_kills: u32,
    pub kd_ratio: f64,
    pub headshot_percent: f64,
}

impl HistoryStats {
    /// Build stats from raw counts.
    ///
    /// With zero deaths the K/D ratio equals the kill count; with zero kills
    /// the headshot percentage is zero.
    pub fn from_counts(kills: u32, deaths: u32, headshot_kills: u32) -> Self {
        let kd_ratio = if deaths == 0 {
            kills as f64
        } else {
            kills as f64 / deaths as f64
        };
        let headshot_percent = if kills == 0 {
            0.0
        } else {
            headshot_kills as f64 / kills as f64 * 100.0
        };

        Self {
            kills,
            deaths,
            headshot_kills,
            kd_ratio,
            headshot_percent,
        }
    }
}
