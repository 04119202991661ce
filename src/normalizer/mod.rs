//! Event Normalizer
//!
//! Turns a raw `DeathNotice` into a canonical `NormalizedDeath`, or explains
//! why the notice is not recorded. Pure: the only input besides the notice is
//! the timestamp, which callers may pin for tests.

mod weapon;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::types::{ActorId, ActorRef, CombatEvent, DeathNotice, EventKind, WeaponIcon, UNKNOWN_NAME};
use crate::utils::time::{now_seconds, truncate_to_seconds};

pub use weapon::{classify_weapon, resolve_weapon_name, UNKNOWN_WEAPON};

/// Hit-location substring that marks a headshot
pub const HEAD_REGION: &str = "head";

/// Tunables for normalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizerOptions {
    /// Match the head region regardless of case
    pub case_insensitive_headshot: bool,
}

/// Why a notice produced no event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    #[error("no victim")]
    MissingVictim,
    #[error("no attacking player")]
    MissingAttacker,
    #[error("attacker is not a player")]
    NonPlayerAttacker,
    #[error("self-inflicted")]
    SelfInflicted,
}

/// A PvP death, ready to be written into both histories
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDeath {
    pub victim: ActorId,
    pub victim_name: String,
    pub attacker: ActorId,
    pub attacker_name: String,
    pub weapon: String,
    pub weapon_icon: WeaponIcon,
    pub distance: f64,
    pub headshot: bool,
    pub timestamp: NaiveDateTime,
}

impl NormalizedDeath {
    /// Entry for the victim's history
    pub fn death_event(&self) -> CombatEvent {
        self.event(EventKind::Death, &self.attacker_name)
    }

    /// Entry for the attacker's history
    pub fn kill_event(&self) -> CombatEvent {
        self.event(EventKind::Kill, &self.victim_name)
    }

    fn event(&self, kind: EventKind, counterpart: &str) -> CombatEvent {
        CombatEvent {
            kind,
            counterpart: counterpart.to_string(),
            weapon: self.weapon.clone(),
            weapon_icon: self.weapon_icon,
            distance: self.distance,
            headshot: self.headshot,
            timestamp: self.timestamp,
        }
    }
}

/// Normalize a notice using the current wall-clock time
pub fn normalize(
    notice: &DeathNotice,
    options: NormalizerOptions,
) -> Result<NormalizedDeath, DropReason> {
    normalize_at(notice, options, now_seconds())
}

/// Normalize a notice with an explicit timestamp
pub fn normalize_at(
    notice: &DeathNotice,
    options: NormalizerOptions,
    timestamp: NaiveDateTime,
) -> Result<NormalizedDeath, DropReason> {
    let victim = notice.victim.as_ref().ok_or(DropReason::MissingVictim)?;
    let attacker = notice.attacker.as_ref().ok_or(DropReason::MissingAttacker)?;

    if !attacker.is_player() {
        return Err(DropReason::NonPlayerAttacker);
    }
    if attacker.id == victim.id {
        return Err(DropReason::SelfInflicted);
    }

    let weapon = resolve_weapon_name(notice.weapon.as_ref());
    let weapon_icon = classify_weapon(&weapon);

    Ok(NormalizedDeath {
        victim: victim.id,
        victim_name: display_name(victim),
        attacker: attacker.id,
        attacker_name: display_name(attacker),
        weapon,
        weapon_icon,
        distance: attacker.position.distance_to(&victim.position),
        headshot: is_headshot(notice.hit_location.as_deref(), options),
        timestamp: truncate_to_seconds(timestamp),
    })
}

/// Whether the hit-location tag names the head region
pub fn is_headshot(hit_location: Option<&str>, options: NormalizerOptions) -> bool {
    match hit_location {
        Some(tag) if options.case_insensitive_headshot => {
            tag.to_lowercase().contains(HEAD_REGION)
        }
        Some(tag) => tag.contains(HEAD_REGION),
        None => false,
    }
}

fn display_name(actor: &ActorRef) -> String {
    let name = actor.display_name.trim();
    if name.is_empty() {
        UNKNOWN_NAME.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Position, WeaponRef};
    use chrono::{NaiveDate, Timelike};

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_milli_opt(21, 15, 0, 450)
            .unwrap()
    }

    fn pvp_notice() -> DeathNotice {
        DeathNotice {
            victim: Some(ActorRef::player(2u64, "Victim", Position::new(50.0, 0.0, 0.0))),
            attacker: Some(ActorRef::player(1u64, "Shooter", Position::new(0.0, 0.0, 0.0))),
            weapon: Some(WeaponRef::named("Rifle")),
            hit_location: Some("head".to_string()),
        }
    }

    #[test]
    fn test_normalize_pvp_death() {
        let death = normalize_at(&pvp_notice(), NormalizerOptions::default(), at()).unwrap();

        assert_eq!(death.victim, ActorId(2));
        assert_eq!(death.attacker, ActorId(1));
        assert_eq!(death.weapon, "Rifle");
        assert_eq!(death.weapon_icon, WeaponIcon::Firearm);
        assert_eq!(death.distance, 50.0);
        assert!(death.headshot);
        assert_eq!(death.timestamp.nanosecond(), 0);

        let kill = death.kill_event();
        assert_eq!(kill.kind, EventKind::Kill);
        assert_eq!(kill.counterpart, "Victim");

        let died = death.death_event();
        assert_eq!(died.kind, EventKind::Death);
        assert_eq!(died.counterpart, "Shooter");
        assert_eq!(died.timestamp, kill.timestamp);
    }

    #[test]
    fn test_missing_parties_are_dropped() {
        let mut notice = pvp_notice();
        notice.attacker = None;
        assert_eq!(
            normalize_at(&notice, NormalizerOptions::default(), at()),
            Err(DropReason::MissingAttacker)
        );

        let mut notice = pvp_notice();
        notice.victim = None;
        assert_eq!(
            normalize_at(&notice, NormalizerOptions::default(), at()),
            Err(DropReason::MissingVictim)
        );
    }

    #[test]
    fn test_npc_attacker_is_dropped() {
        let mut notice = pvp_notice();
        if let Some(attacker) = notice.attacker.as_mut() {
            attacker.npc = true;
        }
        assert_eq!(
            normalize_at(&notice, NormalizerOptions::default(), at()),
            Err(DropReason::NonPlayerAttacker)
        );
    }

    #[test]
    fn test_self_inflicted_is_dropped() {
        let mut notice = pvp_notice();
        notice.attacker = notice.victim.clone();
        assert_eq!(
            normalize_at(&notice, NormalizerOptions::default(), at()),
            Err(DropReason::SelfInflicted)
        );
    }

    #[test]
    fn test_missing_weapon_and_names_default() {
        let mut notice = pvp_notice();
        notice.weapon = None;
        if let Some(victim) = notice.victim.as_mut() {
            victim.display_name = String::new();
        }

        let death = normalize_at(&notice, NormalizerOptions::default(), at()).unwrap();
        assert_eq!(death.weapon, UNKNOWN_WEAPON);
        assert_eq!(death.weapon_icon, WeaponIcon::Unknown);
        assert_eq!(death.victim_name, UNKNOWN_NAME);
    }

    #[test]
    fn test_headshot_case_sensitivity() {
        let strict = NormalizerOptions::default();
        let relaxed = NormalizerOptions {
            case_insensitive_headshot: true,
        };

        assert!(is_headshot(Some("head"), strict));
        assert!(is_headshot(Some("bone_head_01"), strict));
        assert!(!is_headshot(Some("Head"), strict));
        assert!(is_headshot(Some("Head"), relaxed));
        assert!(!is_headshot(Some("chest"), relaxed));
        assert!(!is_headshot(None, relaxed));
    }
}
