//! Weapon definitions and the ordered weapon registry.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::StatBlock;

/// One gun: identity, display metadata, and progression caps.
#[derive(Debug, Clone, Deserialize)]
pub struct WeaponDef {
    /// Stable identifier ("ak47"). Loadouts and level maps key on this.
    pub id: String,

    /// Name shown to players.
    pub display_name: String,

    /// The host engine's item shortname used when the loadout is
    /// actually granted ("rifle.ak").
    pub item_shortname: String,

    /// Store/loadout tile image. Empty means no image configured.
    #[serde(default)]
    pub image_url: String,

    /// Upgrade level cap for this weapon.
    #[serde(default = "default_weapon_max_level")]
    pub max_level: u32,

    /// Base stat block attachments multiply into.
    #[serde(default)]
    pub base_stats: StatBlock,
}

fn default_weapon_max_level() -> u32 {
    10
}

/// The ordered catalog of guns.
///
/// Declaration order matters: weapon cycling in the loadout editor walks
/// this order and wraps at both ends, so the registry keeps a `Vec`
/// rather than a map. Lookups are a linear scan — the catalog is a
/// couple dozen entries at most.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct WeaponRegistry {
    weapons: Vec<WeaponDef>,
}

impl WeaponRegistry {
    /// Builds a registry from definitions, preserving order.
    pub fn new(weapons: Vec<WeaponDef>) -> Self {
        Self { weapons }
    }

    /// Looks up a weapon by id.
    pub fn get(&self, weapon_id: &str) -> Option<&WeaponDef> {
        self.weapons.iter().find(|w| w.id == weapon_id)
    }

    /// All weapon ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.weapons.iter().map(|w| w.id.as_str())
    }

    /// Iterates all definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &WeaponDef> {
        self.weapons.iter()
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    /// Steps from `current` by `direction` places, wrapping at both ends.
    ///
    /// `(index + direction).rem_euclid(len)` keeps the result in range
    /// for any direction, so stepping back from index 0 lands on the
    /// last weapon. A `current` that is not in the catalog (stale record
    /// after a catalog change) is treated as index 0. Returns `None`
    /// only for an empty registry.
    pub fn cycle(&self, current: &str, direction: i64) -> Option<&str> {
        if self.weapons.is_empty() {
            return None;
        }
        let len = self.weapons.len() as i64;
        let index = self
            .weapons
            .iter()
            .position(|w| w.id == current)
            .unwrap_or(0) as i64;
        let next = (index + direction).rem_euclid(len) as usize;
        Some(self.weapons[next].id.as_str())
    }
}

impl Default for WeaponRegistry {
    fn default() -> Self {
        Self::new(builtin_weapons())
    }
}

/// Builds a base stat block from `(name, value)` pairs.
fn stats(pairs: &[(&str, f32)]) -> StatBlock {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect::<BTreeMap<_, _>>()
}

fn weapon(id: &str, display_name: &str, shortname: &str, base: &[(&str, f32)]) -> WeaponDef {
    WeaponDef {
        id: id.to_string(),
        display_name: display_name.to_string(),
        item_shortname: shortname.to_string(),
        image_url: String::new(),
        max_level: 10,
        base_stats: stats(base),
    }
}

/// The shipped gun catalog. Adding an entry here is all it takes for a
/// gun to appear in weapon cycling and the store.
fn builtin_weapons() -> Vec<WeaponDef> {
    vec![
        weapon(
            "ak47",
            "AK-47",
            "rifle.ak",
            &[("damage", 35.0), ("fire_rate", 0.13), ("accuracy", 0.75)],
        ),
        weapon(
            "lr300",
            "LR-300",
            "rifle.lr300",
            &[("damage", 32.0), ("fire_rate", 0.12), ("accuracy", 0.85)],
        ),
        weapon(
            "m249",
            "M249",
            "lmg.m249",
            &[("damage", 30.0), ("fire_rate", 0.10), ("accuracy", 0.70)],
        ),
        weapon(
            "mp5",
            "MP5A4",
            "smg.mp5",
            &[("damage", 22.0), ("fire_rate", 0.09), ("accuracy", 0.80)],
        ),
        weapon(
            "thompson",
            "Thompson",
            "smg.thompson",
            &[("damage", 25.0), ("fire_rate", 0.10), ("accuracy", 0.77)],
        ),
        weapon(
            "python",
            "Python Revolver",
            "pistol.python",
            &[("damage", 45.0), ("fire_rate", 0.35), ("accuracy", 0.82)],
        ),
        weapon(
            "bolt",
            "Bolt Action Rifle",
            "rifle.bolt",
            &[("damage", 80.0), ("fire_rate", 1.50), ("accuracy", 0.95)],
        ),
        weapon(
            "sarpistol",
            "Semi-Auto Pistol",
            "pistol.semiauto",
            &[("damage", 28.0), ("fire_rate", 0.20), ("accuracy", 0.78)],
        ),
        weapon(
            "custom",
            "Custom SMG",
            "smg.2",
            &[("damage", 20.0), ("fire_rate", 0.08), ("accuracy", 0.75)],
        ),
        weapon(
            "m39",
            "M39 Rifle",
            "rifle.m39",
            &[("damage", 50.0), ("fire_rate", 0.30), ("accuracy", 0.90)],
        ),
    ]
}
