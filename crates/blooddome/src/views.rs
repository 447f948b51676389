//! Owned snapshot views handed to the presentation layer.
//!
//! Every read accessor on the command surface returns one of these (or
//! a plain map/primitive). They are copies taken at call time: the
//! presentation layer can hold or mutate them freely without touching
//! live core state, and they serialize to JSON for UI templating.

use std::collections::BTreeMap;

use serde::Serialize;

use blooddome_profile::PlayerId;

/// Snapshot of one session's runtime state: balance plus UI cursors.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub player_id: PlayerId,
    pub tokens: u64,
    pub is_vip: bool,
    pub in_match: bool,
    pub editing_weapon_slot: String,
    pub loadout_tab: String,
    pub attachment_category: String,
    pub store_category: String,
    pub guns_store_page: u32,
    pub skins_store_page: u32,
}

/// Snapshot of the active loadout.
#[derive(Debug, Clone, Serialize)]
pub struct LoadoutView {
    pub name: String,
    pub primary: String,
    pub secondary: String,
    pub primary_attachments: BTreeMap<String, String>,
    pub secondary_attachments: BTreeMap<String, String>,
    /// Weapon id → applied skin id.
    pub skins: BTreeMap<String, String>,
    /// Armor slot name → equipped piece id. Unequipped slots are absent.
    pub armor: BTreeMap<String, String>,
}

/// Snapshot of a profile's progression and lifetime counters.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileStatsView {
    pub player_id: PlayerId,
    pub tokens: u64,
    pub is_vip: bool,
    pub total_kills: u32,
    pub total_deaths: u32,
    pub matches_played: u32,
    pub owned_skins: Vec<String>,
    pub owned_armor: Vec<String>,
    pub weapon_levels: BTreeMap<String, u32>,
    pub attachment_levels: BTreeMap<String, u32>,
}

/// Snapshot of a player's toggles.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSettingsView {
    pub auto_queue: bool,
    pub show_killfeed: bool,
    pub level_up_notifications: bool,
}
