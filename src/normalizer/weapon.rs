//! Weapon name resolution and icon classification

use crate::types::{WeaponRef, WeaponIcon};

/// Display name used when the weapon or its metadata is unavailable
pub const UNKNOWN_WEAPON: &str = "Unknown";

/// Ordered keyword rules; the first rule with a matching keyword wins.
const ICON_RULES: &[(&[&str], WeaponIcon)] = &[
    (&["rifle", "ak", "m4", "smg", "shotgun"], WeaponIcon::Firearm),
    (&["pistol", "revolver"], WeaponIcon::Firearm),
    (&["bow", "crossbow"], WeaponIcon::Archery),
    (&["sword", "hatchet", "pickaxe"], WeaponIcon::MeleeBlunt),
    (&["fists", "knife"], WeaponIcon::MeleeLight),
];

/// Resolve the weapon display name, defaulting to `"Unknown"`
pub fn resolve_weapon_name(weapon: Option<&WeaponRef>) -> String {
    weapon
        .and_then(|w| w.display_name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_WEAPON)
        .to_string()
}

/// Classify a weapon name into an icon class (case-insensitive keyword match)
pub fn classify_weapon(name: &str) -> WeaponIcon {
    let lowered = name.to_lowercase();
    ICON_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(_, icon)| *icon)
        .unwrap_or(WeaponIcon::Unknown)
}
