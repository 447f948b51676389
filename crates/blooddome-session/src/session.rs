//! Session types: a connected player's runtime state.

use std::time::{Duration, Instant};

use blooddome_profile::{PlayerProfile, WeaponSlot};

use crate::RateLimiter;

// ---------------------------------------------------------------------------
// UiState
// ---------------------------------------------------------------------------

/// Which top-level tab of the loadout editor a player is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadoutTab {
    #[default]
    Weapons,
    Outfit,
}

impl LoadoutTab {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadoutTab::Weapons => "weapons",
            LoadoutTab::Outfit => "outfit",
        }
    }
}

/// Where a player's UI cursors currently point.
///
/// Pure navigation state — none of it is persisted. A fresh connection
/// always opens on the primary weapon slot, the "scopes" attachment
/// category, and the first page of the guns store.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Which loadout slot the weapon editor is changing.
    pub editing_weapon_slot: WeaponSlot,

    /// Weapons vs. outfit tab in the loadout editor.
    pub loadout_tab: LoadoutTab,

    /// Open attachment category in the attachment picker.
    pub attachment_category: String,

    /// Open category in the store ("guns", "skins", "armor").
    pub store_category: String,

    /// Zero-based page cursors, one per paged store listing.
    pub guns_store_page: u32,
    pub skins_store_page: u32,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            editing_weapon_slot: WeaponSlot::Primary,
            loadout_tab: LoadoutTab::default(),
            attachment_category: "scopes".to_string(),
            store_category: "guns".to_string(),
            guns_store_page: 0,
            skins_store_page: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A single connected player's runtime state.
///
/// Created by [`crate::SessionTable::get_or_create`] when the player
/// connects; dropped after the profile is saved on disconnect. The
/// profile inside is the authoritative in-memory copy — disk is only
/// touched on save.
#[derive(Debug)]
pub struct Session {
    /// The player's loaded (or freshly defaulted) persistent record.
    pub profile: PlayerProfile,

    /// UI cursors, reset on every connect.
    pub ui: UiState,

    /// Sliding-window limiter for UI-driven commands.
    pub limiter: RateLimiter,

    /// When the last wager was accepted, for the wager cooldown.
    /// `None` until the first wager of the session.
    pub last_wager: Option<Instant>,

    /// Whether the player is currently in a running match.
    pub in_match: bool,
}

impl Session {
    pub fn new(profile: PlayerProfile, max_actions_per_window: usize, window: Duration) -> Self {
        Self {
            profile,
            ui: UiState::default(),
            limiter: RateLimiter::new(max_actions_per_window, window),
            last_wager: None,
            in_match: false,
        }
    }
}
