//! The durable per-player record: tokens, ownership, levels, loadouts.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{ArmorSlot, PlayerId, WeaponSlot};

/// Weapon id a fresh loadout starts with in the primary slot.
pub(crate) const DEFAULT_PRIMARY: &str = "ak47";
/// Weapon id a fresh loadout starts with in the secondary slot.
pub(crate) const DEFAULT_SECONDARY: &str = "python";

// ---------------------------------------------------------------------------
// Loadout
// ---------------------------------------------------------------------------

/// One player's selected weapons, attachments, skins, and outfit.
///
/// Owned by exactly one [`PlayerProfile`]; the active loadout is always
/// index 0 of the profile's loadout list. Maps use `BTreeMap` so the
/// persisted JSON is stable across saves (no spurious diffs in data files).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    /// Display name ("Default" for the starter loadout).
    pub name: String,

    /// Weapon id equipped in the primary slot.
    pub primary: String,

    /// Weapon id equipped in the secondary slot.
    pub secondary: String,

    /// Attachment-slot → attachment id, for the primary weapon.
    #[serde(default)]
    pub primary_attachments: BTreeMap<String, String>,

    /// Attachment-slot → attachment id, for the secondary weapon.
    #[serde(default)]
    pub secondary_attachments: BTreeMap<String, String>,

    /// Weapon id → applied skin id.
    #[serde(default)]
    pub skins: BTreeMap<String, String>,

    /// Armor item id per outfit slot. `None` means the slot is empty.
    #[serde(default)]
    pub armor_head: Option<String>,
    #[serde(default)]
    pub armor_chest: Option<String>,
    #[serde(default)]
    pub armor_legs: Option<String>,
    #[serde(default)]
    pub armor_hands: Option<String>,
    #[serde(default)]
    pub armor_feet: Option<String>,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            primary: DEFAULT_PRIMARY.to_string(),
            secondary: DEFAULT_SECONDARY.to_string(),
            primary_attachments: BTreeMap::new(),
            secondary_attachments: BTreeMap::new(),
            skins: BTreeMap::new(),
            armor_head: None,
            armor_chest: None,
            armor_legs: None,
            armor_hands: None,
            armor_feet: None,
        }
    }
}

impl Loadout {
    /// Returns the weapon id equipped in `slot`.
    pub fn weapon(&self, slot: WeaponSlot) -> &str {
        match slot {
            WeaponSlot::Primary => &self.primary,
            WeaponSlot::Secondary => &self.secondary,
        }
    }

    /// Replaces the weapon equipped in `slot`.
    pub fn set_weapon(&mut self, slot: WeaponSlot, weapon_id: impl Into<String>) {
        match slot {
            WeaponSlot::Primary => self.primary = weapon_id.into(),
            WeaponSlot::Secondary => self.secondary = weapon_id.into(),
        }
    }

    /// The attachment map for the weapon in `slot`.
    pub fn attachments(&self, slot: WeaponSlot) -> &BTreeMap<String, String> {
        match slot {
            WeaponSlot::Primary => &self.primary_attachments,
            WeaponSlot::Secondary => &self.secondary_attachments,
        }
    }

    /// Mutable attachment map for the weapon in `slot`.
    pub fn attachments_mut(&mut self, slot: WeaponSlot) -> &mut BTreeMap<String, String> {
        match slot {
            WeaponSlot::Primary => &mut self.primary_attachments,
            WeaponSlot::Secondary => &mut self.secondary_attachments,
        }
    }

    /// Returns the armor item equipped in `slot`, if any.
    pub fn armor(&self, slot: ArmorSlot) -> Option<&str> {
        let field = match slot {
            ArmorSlot::Head => &self.armor_head,
            ArmorSlot::Chest => &self.armor_chest,
            ArmorSlot::Legs => &self.armor_legs,
            ArmorSlot::Hands => &self.armor_hands,
            ArmorSlot::Feet => &self.armor_feet,
        };
        field.as_deref()
    }

    /// Sets (or clears, with `None`) the armor item in `slot`.
    pub fn set_armor(&mut self, slot: ArmorSlot, armor_id: Option<String>) {
        let field = match slot {
            ArmorSlot::Head => &mut self.armor_head,
            ArmorSlot::Chest => &mut self.armor_chest,
            ArmorSlot::Legs => &mut self.armor_legs,
            ArmorSlot::Hands => &mut self.armor_hands,
            ArmorSlot::Feet => &mut self.armor_feet,
        };
        *field = armor_id;
    }

    /// Resets weapons, attachments, and skins to the starter defaults.
    /// Armor slots are untouched; see [`Loadout::reset_outfit`].
    pub fn reset_weapons(&mut self) {
        self.primary = DEFAULT_PRIMARY.to_string();
        self.secondary = DEFAULT_SECONDARY.to_string();
        self.primary_attachments.clear();
        self.secondary_attachments.clear();
        self.skins.clear();
    }

    /// Empties all five armor slots.
    pub fn reset_outfit(&mut self) {
        for slot in ArmorSlot::ALL {
            self.set_armor(slot, None);
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerSettings
// ---------------------------------------------------------------------------

/// Per-player toggles surfaced in the settings tab.
///
/// Stored on the profile so they survive reconnects. `#[serde(default)]`
/// on the profile field keeps records written before settings existed
/// loadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSettings {
    /// Automatically re-queue for the next match after one ends.
    pub auto_queue: bool,
    /// Show the kill feed overlay.
    pub show_killfeed: bool,
    /// Show a notification when a weapon or attachment levels up.
    pub level_up_notifications: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            auto_queue: false,
            show_killfeed: true,
            level_up_notifications: true,
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerProfile
// ---------------------------------------------------------------------------

/// Everything a player has earned, keyed by their [`PlayerId`].
///
/// Mutated in memory while a session is live and persisted through
/// [`ProfileStore`](crate::ProfileStore). The token balance is a `u64`,
/// so the "never negative" invariant holds by construction — the ledger
/// above guards against underflow before subtracting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Immutable identity; doubles as the data file name.
    pub id: PlayerId,

    /// Token balance. Mutate only through the economy ledger.
    pub tokens: u64,

    /// Skins, weapons, and attachments the player has purchased.
    /// Insertion-only during normal play; admin resets may discard it.
    #[serde(default)]
    pub owned_skins: BTreeSet<String>,

    /// Armor item ids the player has purchased.
    #[serde(default)]
    pub owned_armor: BTreeSet<String>,

    /// Weapon id → upgrade level. Absent means level 0.
    #[serde(default)]
    pub weapon_levels: BTreeMap<String, u32>,

    /// Attachment id → upgrade level. Absent means level 0.
    #[serde(default)]
    pub attachment_levels: BTreeMap<String, u32>,

    /// Saved loadouts; index 0 is the active one. Never empty once the
    /// profile is in use ([`PlayerProfile::active_loadout_mut`] lazily
    /// inserts the default).
    #[serde(default)]
    pub loadouts: Vec<Loadout>,

    /// Granted by the store integration; read by the UI.
    #[serde(default)]
    pub is_vip: bool,

    /// Lifetime counters. Monotonically non-decreasing during a session.
    #[serde(default)]
    pub total_kills: u32,
    #[serde(default)]
    pub total_deaths: u32,
    #[serde(default)]
    pub matches_played: u32,

    /// Settings-tab toggles.
    #[serde(default)]
    pub settings: PlayerSettings,

    /// Unix seconds of the last successful save. Set by the store on
    /// every write; zero for a record that has never been persisted.
    #[serde(default)]
    pub last_updated: u64,
}

impl PlayerProfile {
    /// Creates a fresh profile with the starting token grant and one
    /// default loadout. Used for first-time players and admin resets.
    pub fn new(id: PlayerId, starting_tokens: u64) -> Self {
        Self {
            id,
            tokens: starting_tokens,
            owned_skins: BTreeSet::new(),
            owned_armor: BTreeSet::new(),
            weapon_levels: BTreeMap::new(),
            attachment_levels: BTreeMap::new(),
            loadouts: vec![Loadout::default()],
            is_vip: false,
            total_kills: 0,
            total_deaths: 0,
            matches_played: 0,
            settings: PlayerSettings::default(),
            last_updated: 0,
        }
    }

    /// The active loadout (index 0), if any exist.
    pub fn active_loadout(&self) -> Option<&Loadout> {
        self.loadouts.first()
    }

    /// The active loadout, creating the default one first if the list is
    /// empty (a record hand-edited or written by an older version may
    /// have none).
    pub fn active_loadout_mut(&mut self) -> &mut Loadout {
        if self.loadouts.is_empty() {
            self.loadouts.push(Loadout::default());
        }
        &mut self.loadouts[0]
    }

    /// Current upgrade level for a weapon (0 if never upgraded).
    pub fn weapon_level(&self, weapon_id: &str) -> u32 {
        self.weapon_levels.get(weapon_id).copied().unwrap_or(0)
    }

    /// Current upgrade level for an attachment (0 if never upgraded).
    pub fn attachment_level(&self, attachment_id: &str) -> u32 {
        self.attachment_levels.get(attachment_id).copied().unwrap_or(0)
    }

    /// True if the player owns `item_id` as a skin/weapon/attachment
    /// purchase or as an armor piece.
    pub fn owns(&self, item_id: &str) -> bool {
        self.owned_skins.contains(item_id) || self.owned_armor.contains(item_id)
    }
}
