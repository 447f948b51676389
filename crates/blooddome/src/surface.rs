//! The typed seam between the core and the presentation module.

use std::collections::BTreeMap;

use blooddome_profile::{ArmorSlot, PlayerId, WeaponSlot};
use blooddome_registry::StatBlock;
use blooddome_session::LoadoutTab;

use crate::{LoadoutView, OpOutcome, PlayerSettingsView, ProfileStatsView, SessionView};

/// Every operation the presentation module may invoke on the core.
///
/// The UI renderer is a separately loaded, independently reloadable
/// module; it receives this trait by injection and knows nothing about
/// the core's internals. The contract at this seam:
///
/// - mutations return an [`OpOutcome`]; a non-`Ok` outcome means
///   nothing changed, in memory or on disk
/// - successful mutations of durable state are persisted before the
///   call returns (a failed disk write is logged, in-memory state stays
///   authoritative)
/// - reads return owned snapshots or empty defaults, never references
///   into live sessions, so a held view cannot corrupt core state
/// - nothing panics across this boundary
///
/// Sessions are created by the connect event, not by this surface:
/// operations against a player who is not connected answer `NoSession`
/// (mutations) or `None`/empty (reads).
pub trait CommandSurface {
    // -- Store and progression mutations ------------------------------------

    /// Charges `cost` tokens and adds `item_id` to the owned set.
    fn purchase_item(&mut self, player_id: PlayerId, item_id: &str, cost: u64) -> OpOutcome;

    /// Buys an armor piece at its catalog price.
    fn purchase_armor(&mut self, player_id: PlayerId, armor_id: &str) -> OpOutcome;

    /// Applies an owned skin to the weapon equipped in `slot`.
    fn apply_skin(&mut self, player_id: PlayerId, slot: WeaponSlot, skin_id: &str) -> OpOutcome;

    /// Equips an unlocked attachment on the weapon in `slot`, under the
    /// given attachment slot key.
    fn apply_attachment(
        &mut self,
        player_id: PlayerId,
        slot: WeaponSlot,
        attachment_slot: &str,
        attachment_id: &str,
    ) -> OpOutcome;

    /// Steps the weapon in `slot` through the catalog, wrapping at both
    /// ends.
    fn cycle_weapon(&mut self, player_id: PlayerId, slot: WeaponSlot, direction: i64) -> OpOutcome;

    /// Steps the armor in `slot` through the pieces the player owns for
    /// that slot, wrapping at both ends.
    fn cycle_armor(&mut self, player_id: PlayerId, slot: ArmorSlot, direction: i64) -> OpOutcome;

    /// Pays the level-scaled cost and raises a weapon's level by one.
    fn upgrade_weapon(&mut self, player_id: PlayerId, weapon_id: &str) -> OpOutcome;

    /// Pays the level-scaled cost and raises an attachment's level by one.
    fn upgrade_attachment(&mut self, player_id: PlayerId, attachment_id: &str) -> OpOutcome;

    /// Puts the active loadout's weapons, attachments, and skins back to
    /// the starter defaults.
    fn reset_loadout(&mut self, player_id: PlayerId) -> OpOutcome;

    /// Empties all five armor slots of the active loadout.
    fn reset_outfit(&mut self, player_id: PlayerId) -> OpOutcome;

    /// Flips one settings toggle by name.
    fn set_player_setting(&mut self, player_id: PlayerId, setting: &str, value: bool) -> OpOutcome;

    // -- UI navigation state ------------------------------------------------

    fn set_editing_weapon_slot(&mut self, player_id: PlayerId, slot: WeaponSlot) -> OpOutcome;

    fn set_loadout_tab(&mut self, player_id: PlayerId, tab: LoadoutTab) -> OpOutcome;

    fn set_attachment_category(&mut self, player_id: PlayerId, category: &str) -> OpOutcome;

    /// Switches the store category and rewinds both page cursors.
    fn set_store_category(&mut self, player_id: PlayerId, category: &str) -> OpOutcome;

    /// Pages the open store listing, clamped to the catalog's page count.
    fn change_store_page(&mut self, player_id: PlayerId, direction: i64) -> OpOutcome;

    // -- Reads (owned snapshots) --------------------------------------------

    fn session_data(&self, player_id: PlayerId) -> Option<SessionView>;

    fn current_loadout(&self, player_id: PlayerId) -> Option<LoadoutView>;

    fn player_profile(&self, player_id: PlayerId) -> Option<ProfileStatsView>;

    /// Attachment-slot → attachment id for the weapon in `slot`. Empty
    /// when the player is not connected.
    fn equipped_attachments(&self, player_id: PlayerId, slot: WeaponSlot)
        -> BTreeMap<String, String>;

    fn player_settings(&self, player_id: PlayerId) -> Option<PlayerSettingsView>;

    /// True iff the player owns `item_id` (skin or armor).
    fn check_ownership(&self, player_id: PlayerId, item_id: &str) -> bool;

    /// Effective stats of the weapon in `slot` with its equipped
    /// attachments multiplied in. Empty when the player is not connected.
    fn weapon_stats(&self, player_id: PlayerId, slot: WeaponSlot) -> StatBlock;

    // -- Admin --------------------------------------------------------------

    /// Sets a balance outright, bypassing spend checks.
    fn set_tokens(&mut self, player_id: PlayerId, amount: u64) -> OpOutcome;

    /// Grants an item without charging for it.
    fn grant_item(&mut self, player_id: PlayerId, item_id: &str) -> OpOutcome;

    /// Discards the profile and recreates it fresh, persisting
    /// immediately.
    fn reset_progress(&mut self, player_id: PlayerId) -> OpOutcome;
}
