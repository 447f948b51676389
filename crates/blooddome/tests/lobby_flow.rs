//! End-to-end flows through the facade: connect, spend, upgrade, equip,
//! disconnect, reconnect. Each test builds an isolated core over a
//! temporary data directory.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use blooddome::{
    ArmorSlot, CommandSurface, CoreConfig, LoadoutTab, LobbyCore, OpOutcome, PlayerId, WeaponSlot,
};

fn config(dir: &std::path::Path) -> CoreConfig {
    CoreConfig {
        data_dir: dir.to_path_buf(),
        // High UI budget so multi-step tests never trip the limiter;
        // the limiter has its own tests.
        ui_actions_per_second: 10_000,
        ..CoreConfig::default()
    }
}

fn core(dir: &std::path::Path) -> LobbyCore {
    LobbyCore::new(config(dir)).expect("core should construct")
}

fn pid(id: u64) -> PlayerId {
    PlayerId(id)
}

// =========================================================================
// Sessions and persistence
// =========================================================================

#[test]
fn test_connect_creates_session_without_touching_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());

    core.handle_connect(pid(1));

    assert!(core.is_connected(pid(1)));
    assert_eq!(core.session_data(pid(1)).unwrap().tokens, core.config().starting_tokens);
    // Loading a missing record must not create one; the file appears
    // only once something is saved.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_double_connect_keeps_the_existing_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());

    core.handle_connect(pid(1));
    core.set_tokens(pid(1), 999);
    core.handle_connect(pid(1));

    assert_eq!(core.connected_count(), 1);
    assert_eq!(
        core.session_data(pid(1)).unwrap().tokens,
        999,
        "a repeat connect must not reload or reset the live session"
    );
}

#[test]
fn test_disconnect_then_reconnect_restores_progress() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());

    core.handle_connect(pid(1));
    core.set_tokens(pid(1), 2000);
    assert!(core.upgrade_weapon(pid(1), "mp5").is_ok());
    assert!(core.grant_item(pid(1), "skin_mp5_tactical").is_ok());
    core.handle_disconnect(pid(1));
    assert!(!core.is_connected(pid(1)));

    core.handle_connect(pid(1));

    let stats = core.player_profile(pid(1)).unwrap();
    assert_eq!(stats.tokens, 1900);
    assert_eq!(stats.weapon_levels.get("mp5"), Some(&1));
    assert!(stats.owned_skins.contains(&"skin_mp5_tactical".to_string()));
}

#[test]
fn test_restart_reloads_profiles_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut core = core(dir.path());
        core.handle_connect(pid(1));
        core.set_tokens(pid(1), 1234);
        core.shutdown();
    }

    // A brand-new core over the same data directory: same progress.
    let mut core = core(dir.path());
    core.handle_connect(pid(1));
    assert_eq!(core.session_data(pid(1)).unwrap().tokens, 1234);
}

#[test]
fn test_on_tick_autosaves_after_interval() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path());
    config.autosave_interval_secs = 0;
    let mut core = LobbyCore::new(config).unwrap();

    core.handle_connect(pid(1));
    core.handle_connect(pid(2));

    let saved = core.on_tick(Instant::now());

    assert_eq!(saved, 2);
    assert_eq!(core.connected_count(), 2, "autosave evicts nobody");
    assert_eq!(core.telemetry().count("autosave_sweep"), 1);
}

#[test]
fn test_on_tick_between_intervals_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path()); // 300 s interval
    core.handle_connect(pid(1));

    assert_eq!(core.on_tick(Instant::now()), 0);
}

// =========================================================================
// Economy
// =========================================================================

#[test]
fn test_purchase_walks_the_ledger_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());
    core.handle_connect(pid(1));

    // 500 in the bank: a 600-token purchase is refused outright.
    assert_eq!(
        core.purchase_item(pid(1), "skin_lr300_gold", 600),
        OpOutcome::InsufficientTokens
    );
    assert_eq!(core.session_data(pid(1)).unwrap().tokens, 500);
    assert!(!core.check_ownership(pid(1), "skin_lr300_gold"));

    // Top up to 700, then the same purchase goes through.
    core.set_tokens(pid(1), 700);
    assert!(core.purchase_item(pid(1), "skin_lr300_gold", 600).is_ok());
    assert_eq!(core.session_data(pid(1)).unwrap().tokens, 100);
    assert!(core.check_ownership(pid(1), "skin_lr300_gold"));
}

#[test]
fn test_purchase_item_twice_rejected_as_already_owned() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());
    core.handle_connect(pid(1));

    assert!(core.purchase_item(pid(1), "skin_ak47_classic", 200).is_ok());
    assert_eq!(
        core.purchase_item(pid(1), "skin_ak47_classic", 200),
        OpOutcome::AlreadyOwned
    );
    assert_eq!(core.session_data(pid(1)).unwrap().tokens, 300);
}

#[test]
fn test_purchase_armor_uses_catalog_price() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());
    core.handle_connect(pid(1));

    // Boots cost 60 in the shipped catalog.
    assert!(core.purchase_armor(pid(1), "shoes.boots").is_ok());
    assert_eq!(core.session_data(pid(1)).unwrap().tokens, 440);
    assert_eq!(
        core.purchase_armor(pid(1), "shoes.boots"),
        OpOutcome::AlreadyOwned
    );
    assert_eq!(
        core.purchase_armor(pid(1), "cardboard.box"),
        OpOutcome::UnknownItem
    );
}

#[test]
fn test_operations_against_offline_player_fail_soft() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());

    assert_eq!(core.purchase_item(pid(9), "skin_ak47_classic", 1), OpOutcome::NoSession);
    assert_eq!(core.upgrade_weapon(pid(9), "ak47"), OpOutcome::NoSession);
    assert_eq!(core.reset_loadout(pid(9)), OpOutcome::NoSession);
    assert!(core.session_data(pid(9)).is_none());
    assert!(core.current_loadout(pid(9)).is_none());
    assert!(core.weapon_stats(pid(9), WeaponSlot::Primary).is_empty());
    assert!(!core.check_ownership(pid(9), "skin_ak47_classic"));
}

#[test]
fn test_play_dice_moves_tokens_consistently() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path());
    config.wager_cooldown_secs = 0;
    let mut core = LobbyCore::new(config).unwrap();
    core.handle_connect(pid(1));
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..10 {
        let before = core.session_data(pid(1)).unwrap().tokens;
        let roll = core.play_dice_with(pid(1), 20, &mut rng).unwrap();
        let after = core.session_data(pid(1)).unwrap().tokens;
        let expected = before - roll.bet + roll.payout;
        assert_eq!(after, expected);
    }
    assert_eq!(core.telemetry().count("dice_played"), 10);
}

// =========================================================================
// Progression
// =========================================================================

#[test]
fn test_upgrade_weapon_costs_scale_with_level() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());
    core.handle_connect(pid(1));
    core.set_tokens(pid(1), 1000);

    // Level 0 → 1 costs 100, level 1 → 2 costs 200.
    assert!(core.upgrade_weapon(pid(1), "ak47").is_ok());
    assert_eq!(core.session_data(pid(1)).unwrap().tokens, 900);
    assert!(core.upgrade_weapon(pid(1), "ak47").is_ok());
    assert_eq!(core.session_data(pid(1)).unwrap().tokens, 700);
    assert_eq!(
        core.player_profile(pid(1)).unwrap().weapon_levels.get("ak47"),
        Some(&2)
    );
}

#[test]
fn test_upgrade_attachment_stops_at_max_level() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());
    core.handle_connect(pid(1));
    core.set_tokens(pid(1), 1_000_000);

    // Reflex caps at level 3.
    for _ in 0..3 {
        assert!(core.upgrade_attachment(pid(1), "reflex").is_ok());
    }
    let balance = core.session_data(pid(1)).unwrap().tokens;

    assert_eq!(core.upgrade_attachment(pid(1), "reflex"), OpOutcome::MaxLevel);
    assert_eq!(
        core.session_data(pid(1)).unwrap().tokens,
        balance,
        "a refused upgrade charges nothing"
    );
    assert_eq!(
        core.player_profile(pid(1)).unwrap().attachment_levels.get("reflex"),
        Some(&3)
    );
}

#[test]
fn test_upgrade_unknown_ids_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());
    core.handle_connect(pid(1));

    assert_eq!(core.upgrade_weapon(pid(1), "railgun"), OpOutcome::UnknownItem);
    assert_eq!(core.upgrade_attachment(pid(1), "bayonet"), OpOutcome::UnknownItem);
}

// =========================================================================
// Loadout editing
// =========================================================================

#[test]
fn test_cycle_weapon_wraps_both_directions() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());
    core.handle_connect(pid(1));

    // Fresh primary is ak47, the first of the ten builtin guns;
    // stepping back wraps to the last (m39).
    assert!(core.cycle_weapon(pid(1), WeaponSlot::Primary, -1).is_ok());
    assert_eq!(core.current_loadout(pid(1)).unwrap().primary, "m39");

    // And +1 from the end wraps back to the start.
    assert!(core.cycle_weapon(pid(1), WeaponSlot::Primary, 1).is_ok());
    assert_eq!(core.current_loadout(pid(1)).unwrap().primary, "ak47");
}

#[test]
fn test_cycle_weapon_full_loop_returns_to_start() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());
    core.handle_connect(pid(1));

    for _ in 0..10 {
        assert!(core.cycle_weapon(pid(1), WeaponSlot::Secondary, 1).is_ok());
    }
    assert_eq!(core.current_loadout(pid(1)).unwrap().secondary, "python");
}

#[test]
fn test_apply_skin_requires_ownership() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());
    core.handle_connect(pid(1));

    assert_eq!(
        core.apply_skin(pid(1), WeaponSlot::Primary, "skin_ak47_classic"),
        OpOutcome::NotOwned
    );
    assert!(core.current_loadout(pid(1)).unwrap().skins.is_empty());

    core.grant_item(pid(1), "skin_ak47_classic");
    assert!(core.apply_skin(pid(1), WeaponSlot::Primary, "skin_ak47_classic").is_ok());
    assert_eq!(
        core.current_loadout(pid(1)).unwrap().skins.get("ak47"),
        Some(&"skin_ak47_classic".to_string())
    );
}

#[test]
fn test_apply_attachment_requires_unlock() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());
    core.handle_connect(pid(1));
    core.set_tokens(pid(1), 1000);

    assert_eq!(
        core.apply_attachment(pid(1), WeaponSlot::Primary, "barrel", "silencer"),
        OpOutcome::NotOwned
    );

    // Upgrading to level 1 unlocks it.
    assert!(core.upgrade_attachment(pid(1), "silencer").is_ok());
    assert!(core
        .apply_attachment(pid(1), WeaponSlot::Primary, "barrel", "silencer")
        .is_ok());
    assert_eq!(
        core.equipped_attachments(pid(1), WeaponSlot::Primary).get("barrel"),
        Some(&"silencer".to_string())
    );
}

#[test]
fn test_weapon_stats_reflect_equipped_attachments() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());
    core.handle_connect(pid(1));
    core.set_tokens(pid(1), 1000);

    let base = core.weapon_stats(pid(1), WeaponSlot::Primary);
    let base_damage = *base.get("damage").unwrap();

    core.upgrade_attachment(pid(1), "silencer");
    core.apply_attachment(pid(1), WeaponSlot::Primary, "barrel", "silencer");

    let modified = core.weapon_stats(pid(1), WeaponSlot::Primary);
    let damage = *modified.get("damage").unwrap();
    assert!((damage - base_damage * 0.95).abs() < 1e-4);
    assert!(modified.contains_key("noise"));
}

#[test]
fn test_cycle_armor_walks_owned_pieces_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());
    core.handle_connect(pid(1));

    // Nothing owned for the slot yet.
    assert_eq!(
        core.cycle_armor(pid(1), ArmorSlot::Head, 1),
        OpOutcome::NotOwned
    );

    core.grant_item(pid(1), "metal.facemask");
    core.grant_item(pid(1), "coffeecan.helmet");

    // Empty slot +1 equips the first owned piece (catalog order).
    assert!(core.cycle_armor(pid(1), ArmorSlot::Head, 1).is_ok());
    assert_eq!(
        core.current_loadout(pid(1)).unwrap().armor.get("head"),
        Some(&"metal.facemask".to_string())
    );

    // Stepping again reaches the second, then wraps.
    core.cycle_armor(pid(1), ArmorSlot::Head, 1);
    assert_eq!(
        core.current_loadout(pid(1)).unwrap().armor.get("head"),
        Some(&"coffeecan.helmet".to_string())
    );
    core.cycle_armor(pid(1), ArmorSlot::Head, 1);
    assert_eq!(
        core.current_loadout(pid(1)).unwrap().armor.get("head"),
        Some(&"metal.facemask".to_string())
    );
}

#[test]
fn test_reset_loadout_and_outfit_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());
    core.handle_connect(pid(1));
    core.grant_item(pid(1), "shoes.boots");

    core.cycle_weapon(pid(1), WeaponSlot::Primary, 2);
    core.cycle_armor(pid(1), ArmorSlot::Feet, 1);

    assert!(core.reset_loadout(pid(1)).is_ok());
    let loadout = core.current_loadout(pid(1)).unwrap();
    assert_eq!(loadout.primary, "ak47");
    assert_eq!(
        loadout.armor.get("feet"),
        Some(&"shoes.boots".to_string()),
        "weapon reset leaves the outfit alone"
    );

    assert!(core.reset_outfit(pid(1)).is_ok());
    assert!(core.current_loadout(pid(1)).unwrap().armor.is_empty());
}

// =========================================================================
// UI state
// =========================================================================

#[test]
fn test_ui_cursors_follow_navigation_calls() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());
    core.handle_connect(pid(1));

    assert!(core.set_editing_weapon_slot(pid(1), WeaponSlot::Secondary).is_ok());
    assert!(core.set_loadout_tab(pid(1), LoadoutTab::Outfit).is_ok());
    assert!(core.set_attachment_category(pid(1), "barrels").is_ok());

    let view = core.session_data(pid(1)).unwrap();
    assert_eq!(view.editing_weapon_slot, "secondary");
    assert_eq!(view.loadout_tab, "outfit");
    assert_eq!(view.attachment_category, "barrels");
}

#[test]
fn test_ui_state_resets_on_reconnect_but_profile_survives() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());
    core.handle_connect(pid(1));
    core.set_loadout_tab(pid(1), LoadoutTab::Outfit);
    core.set_player_setting(pid(1), "auto_queue", true);

    core.handle_disconnect(pid(1));
    core.handle_connect(pid(1));

    let view = core.session_data(pid(1)).unwrap();
    assert_eq!(view.loadout_tab, "weapons", "UI cursors are transient");
    assert!(
        core.player_settings(pid(1)).unwrap().auto_queue,
        "settings are part of the durable profile"
    );
}

// =========================================================================
// Admin
// =========================================================================

#[test]
fn test_reset_progress_recreates_a_fresh_profile() {
    let dir = tempfile::tempdir().unwrap();
    let mut core = core(dir.path());
    core.handle_connect(pid(1));
    core.set_tokens(pid(1), 9000);
    core.grant_item(pid(1), "skin_ak47_glory");
    core.upgrade_weapon(pid(1), "ak47");

    assert!(core.reset_progress(pid(1)).is_ok());

    let stats = core.player_profile(pid(1)).unwrap();
    assert_eq!(stats.tokens, 500);
    assert!(stats.owned_skins.is_empty());
    assert!(stats.weapon_levels.is_empty());

    // The reset is durable: reconnect sees the fresh profile.
    core.handle_disconnect(pid(1));
    core.handle_connect(pid(1));
    assert_eq!(core.session_data(pid(1)).unwrap().tokens, 500);
}
