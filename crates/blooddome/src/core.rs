//! The facade: host events in, command surface out.

use std::collections::BTreeMap;
use std::time::Instant;

use rand::Rng;

use blooddome_economy::{DiceRoll, DiceWager, TokenLedger, WagerDenied};
use blooddome_profile::{ArmorSlot, PlayerId, PlayerProfile, ProfileStore, WeaponSlot};
use blooddome_registry::{calculate_stats, upgrade_cost, ItemCatalog, StatBlock};
use blooddome_session::{LoadoutTab, SessionTable};

use crate::{
    CommandSurface, CoreConfig, CoreError, LoadoutView, MatchQueue, MatchRecord, OpOutcome,
    PlayerSettingsView, ProfileStatsView, SessionView, Telemetry,
};

/// Items per page in store listings.
const STORE_PAGE_SIZE: usize = 6;

/// The core of the plugin: owns every shared structure and wires host
/// events to the session, economy, and registry layers.
///
/// The host engine drives it from one thread:
///
/// ```text
/// connect ──→ handle_connect ──→ SessionTable (load profile)
/// UI call ──→ CommandSurface op ──→ ledger/registry/profile ──→ persist
/// tick ────→ on_tick ──→ autosave sweep
/// disconnect ──→ handle_disconnect ──→ final save + evict
/// ```
///
/// Everything is dependency-injected at construction; there are no
/// globals, so tests build as many independent cores as they like.
pub struct LobbyCore {
    config: CoreConfig,
    catalog: ItemCatalog,
    table: SessionTable,
    wager: DiceWager,
    telemetry: Telemetry,
    queue: MatchQueue,
    last_autosave: Instant,
}

impl LobbyCore {
    /// Builds a core with the shipped item catalog.
    pub fn new(config: CoreConfig) -> Result<Self, CoreError> {
        Self::with_catalog(config, ItemCatalog::default())
    }

    /// Builds a core with a caller-supplied catalog (custom deployments,
    /// tests with tiny catalogs).
    pub fn with_catalog(config: CoreConfig, catalog: ItemCatalog) -> Result<Self, CoreError> {
        let store = ProfileStore::open(&config.data_dir)?;
        let table = SessionTable::new(
            store,
            config.starting_tokens,
            config.ui_actions_per_second,
            std::time::Duration::from_secs(1),
        );
        let wager = DiceWager {
            min_bet: config.wager_min_bet,
            max_bet: config.wager_max_bet,
            cooldown: config.wager_cooldown(),
        };
        Ok(Self {
            config,
            catalog,
            table,
            wager,
            telemetry: Telemetry::new(),
            queue: MatchQueue::new(),
            last_autosave: Instant::now(),
        })
    }

    // -- Host event entry points --------------------------------------------

    /// Player connected: load their profile and open a session.
    pub fn handle_connect(&mut self, player_id: PlayerId) {
        self.table.get_or_create(player_id);
        self.telemetry.increment("player_connected");
    }

    /// Player disconnected: save the profile, drop the session, and pull
    /// them out of the match queue.
    pub fn handle_disconnect(&mut self, player_id: PlayerId) {
        self.queue.remove(player_id);
        self.table.remove(player_id);
        self.telemetry.increment("player_disconnected");
    }

    /// A kill happened: bump counters and pay the attacker.
    ///
    /// Self-kills count as a death but never pay out. Counters live in
    /// memory until the next save (autosave, disconnect, or a persisting
    /// mutation).
    pub fn record_kill(&mut self, attacker: PlayerId, victim: PlayerId) {
        if let Some(session) = self.table.get_mut(victim) {
            session.profile.total_deaths += 1;
        }
        if attacker != victim {
            if let Some(session) = self.table.get_mut(attacker) {
                session.profile.total_kills += 1;
            }
            TokenLedger::new(&mut self.table).award(attacker, self.config.tokens_per_kill);
        }
        self.telemetry.increment("kill_recorded");
    }

    /// Tick callback: runs the autosave sweep when the interval has
    /// elapsed. Safe to call every tick; between sweeps it is a clock
    /// comparison and nothing else. Returns how many profiles were
    /// written.
    pub fn on_tick(&mut self, now: Instant) -> usize {
        if now.duration_since(self.last_autosave) < self.config.autosave_interval() {
            return 0;
        }
        self.last_autosave = now;
        let saved = self.table.save_all();
        self.telemetry.increment("autosave_sweep");
        tracing::info!(saved, "autosave sweep complete");
        saved
    }

    /// Saves everyone and drops all sessions. Call once on unload.
    pub fn shutdown(&mut self) -> usize {
        self.table.shutdown()
    }

    // -- Dice wager ---------------------------------------------------------

    /// Runs one dice wager with the process RNG.
    pub fn play_dice(&mut self, player_id: PlayerId, bet: u64) -> Result<DiceRoll, WagerDenied> {
        self.play_dice_with(player_id, bet, &mut rand::rng())
    }

    /// Runs one dice wager with a caller-supplied RNG (tests seed a
    /// `StdRng` here). The changed balance is persisted on success.
    pub fn play_dice_with(
        &mut self,
        player_id: PlayerId,
        bet: u64,
        rng: &mut impl Rng,
    ) -> Result<DiceRoll, WagerDenied> {
        let roll = self.wager.play(&mut self.table, player_id, bet, rng)?;
        self.telemetry.increment("dice_played");
        self.persist(player_id);
        Ok(roll)
    }

    // -- Match queue --------------------------------------------------------

    /// Queues a connected player for the next match. `false` if they are
    /// not connected or already queued.
    pub fn add_to_queue(&mut self, player_id: PlayerId) -> bool {
        if self.table.get(player_id).is_none() {
            return false;
        }
        self.queue.enqueue(player_id)
    }

    /// Drains the queue into a match, marking every participant's
    /// session and bumping their `matches_played`.
    pub fn start_match(&mut self) -> Option<MatchRecord> {
        let record = self.queue.start_match()?;
        for player_id in &record.participants {
            if let Some(session) = self.table.get_mut(*player_id) {
                session.in_match = true;
                session.profile.matches_played += 1;
            }
        }
        self.telemetry.increment("match_started");
        Some(record)
    }

    /// Unmarks a finished match's participants.
    pub fn end_match(&mut self, record: &MatchRecord) {
        for player_id in &record.participants {
            if let Some(session) = self.table.get_mut(*player_id) {
                session.in_match = false;
            }
        }
        self.telemetry.increment("match_ended");
    }

    // -- Introspection ------------------------------------------------------

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn is_connected(&self, player_id: PlayerId) -> bool {
        self.table.get(player_id).is_some()
    }

    pub fn connected_count(&self) -> usize {
        self.table.len()
    }

    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    // -- Internals ----------------------------------------------------------

    /// Writes one player's profile after a successful mutation. Failure
    /// is logged, not propagated: the in-memory copy stays authoritative
    /// until the next save attempt.
    fn persist(&mut self, player_id: PlayerId) {
        if let Err(error) = self.table.save(player_id) {
            tracing::warn!(%player_id, %error, "profile save failed after mutation");
        }
    }
}

impl CommandSurface for LobbyCore {
    // -- Store and progression mutations ------------------------------------

    fn purchase_item(&mut self, player_id: PlayerId, item_id: &str, cost: u64) -> OpOutcome {
        let Some(session) = self.table.get(player_id) else {
            return OpOutcome::NoSession;
        };
        if session.profile.owns(item_id) {
            return OpOutcome::AlreadyOwned;
        }
        if !TokenLedger::new(&mut self.table).spend(player_id, cost) {
            return OpOutcome::InsufficientTokens;
        }
        if let Some(session) = self.table.get_mut(player_id) {
            session.profile.owned_skins.insert(item_id.to_string());
        }
        self.telemetry.increment("item_purchased");
        self.persist(player_id);
        OpOutcome::Ok
    }

    fn purchase_armor(&mut self, player_id: PlayerId, armor_id: &str) -> OpOutcome {
        let Some(session) = self.table.get(player_id) else {
            return OpOutcome::NoSession;
        };
        let Some(def) = self.catalog.armor.get(armor_id) else {
            return OpOutcome::UnknownItem;
        };
        if session.profile.owned_armor.contains(armor_id) {
            return OpOutcome::AlreadyOwned;
        }
        let cost = def.cost;
        if !TokenLedger::new(&mut self.table).spend(player_id, cost) {
            return OpOutcome::InsufficientTokens;
        }
        if let Some(session) = self.table.get_mut(player_id) {
            session.profile.owned_armor.insert(armor_id.to_string());
        }
        self.telemetry.increment("item_purchased");
        self.persist(player_id);
        OpOutcome::Ok
    }

    fn apply_skin(&mut self, player_id: PlayerId, slot: WeaponSlot, skin_id: &str) -> OpOutcome {
        let Some(session) = self.table.get_mut(player_id) else {
            return OpOutcome::NoSession;
        };
        if !session.profile.owned_skins.contains(skin_id) {
            return OpOutcome::NotOwned;
        }
        let loadout = session.profile.active_loadout_mut();
        let weapon = loadout.weapon(slot).to_string();
        loadout.skins.insert(weapon, skin_id.to_string());
        self.persist(player_id);
        OpOutcome::Ok
    }

    fn apply_attachment(
        &mut self,
        player_id: PlayerId,
        slot: WeaponSlot,
        attachment_slot: &str,
        attachment_id: &str,
    ) -> OpOutcome {
        if self.catalog.attachments.get(attachment_id).is_none() {
            return OpOutcome::UnknownItem;
        }
        let Some(session) = self.table.get_mut(player_id) else {
            return OpOutcome::NoSession;
        };
        // Attachments are unlocked by upgrading them at least once.
        if session.profile.attachment_level(attachment_id) == 0 {
            return OpOutcome::NotOwned;
        }
        session
            .profile
            .active_loadout_mut()
            .attachments_mut(slot)
            .insert(attachment_slot.to_string(), attachment_id.to_string());
        self.persist(player_id);
        OpOutcome::Ok
    }

    fn cycle_weapon(&mut self, player_id: PlayerId, slot: WeaponSlot, direction: i64) -> OpOutcome {
        let Some(session) = self.table.get_mut(player_id) else {
            return OpOutcome::NoSession;
        };
        if !session.limiter.try_acquire(Instant::now()) {
            return OpOutcome::RateLimited;
        }
        let loadout = session.profile.active_loadout_mut();
        let current = loadout.weapon(slot).to_string();
        let Some(next) = self.catalog.weapons.cycle(&current, direction) else {
            return OpOutcome::UnknownItem;
        };
        loadout.set_weapon(slot, next);
        self.persist(player_id);
        OpOutcome::Ok
    }

    fn cycle_armor(&mut self, player_id: PlayerId, slot: ArmorSlot, direction: i64) -> OpOutcome {
        let Some(session) = self.table.get_mut(player_id) else {
            return OpOutcome::NoSession;
        };
        if !session.limiter.try_acquire(Instant::now()) {
            return OpOutcome::RateLimited;
        }
        // Only pieces the player owns take part in the cycle.
        let owned: Vec<&str> = self
            .catalog
            .armor
            .for_slot(slot)
            .filter(|p| session.profile.owned_armor.contains(&p.id))
            .map(|p| p.id.as_str())
            .collect();
        if owned.is_empty() {
            return OpOutcome::NotOwned;
        }
        let loadout = session.profile.active_loadout_mut();
        // An empty slot sits "before" the list, so +1 lands on the
        // first owned piece.
        let index = loadout
            .armor(slot)
            .and_then(|current| owned.iter().position(|id| *id == current))
            .map(|i| i as i64)
            .unwrap_or(-1);
        let next = owned[(index + direction).rem_euclid(owned.len() as i64) as usize].to_string();
        loadout.set_armor(slot, Some(next));
        self.persist(player_id);
        OpOutcome::Ok
    }

    fn upgrade_weapon(&mut self, player_id: PlayerId, weapon_id: &str) -> OpOutcome {
        let Some(def) = self.catalog.weapons.get(weapon_id) else {
            return OpOutcome::UnknownItem;
        };
        let cap = def.max_level.min(self.config.max_weapon_level);
        let Some(session) = self.table.get(player_id) else {
            return OpOutcome::NoSession;
        };
        let level = session.profile.weapon_level(weapon_id);
        if level >= cap {
            return OpOutcome::MaxLevel;
        }
        if !TokenLedger::new(&mut self.table).spend(player_id, upgrade_cost(level)) {
            return OpOutcome::InsufficientTokens;
        }
        if let Some(session) = self.table.get_mut(player_id) {
            session
                .profile
                .weapon_levels
                .insert(weapon_id.to_string(), level + 1);
        }
        tracing::info!(%player_id, weapon_id, level = level + 1, "weapon upgraded");
        self.persist(player_id);
        OpOutcome::Ok
    }

    fn upgrade_attachment(&mut self, player_id: PlayerId, attachment_id: &str) -> OpOutcome {
        let Some(def) = self.catalog.attachments.get(attachment_id) else {
            return OpOutcome::UnknownItem;
        };
        let cap = def.max_level.min(self.config.max_attachment_level);
        let Some(session) = self.table.get(player_id) else {
            return OpOutcome::NoSession;
        };
        let level = session.profile.attachment_level(attachment_id);
        if level >= cap {
            return OpOutcome::MaxLevel;
        }
        if !TokenLedger::new(&mut self.table).spend(player_id, upgrade_cost(level)) {
            return OpOutcome::InsufficientTokens;
        }
        if let Some(session) = self.table.get_mut(player_id) {
            session
                .profile
                .attachment_levels
                .insert(attachment_id.to_string(), level + 1);
        }
        tracing::info!(%player_id, attachment_id, level = level + 1, "attachment upgraded");
        self.persist(player_id);
        OpOutcome::Ok
    }

    fn reset_loadout(&mut self, player_id: PlayerId) -> OpOutcome {
        let Some(session) = self.table.get_mut(player_id) else {
            return OpOutcome::NoSession;
        };
        session.profile.active_loadout_mut().reset_weapons();
        self.persist(player_id);
        OpOutcome::Ok
    }

    fn reset_outfit(&mut self, player_id: PlayerId) -> OpOutcome {
        let Some(session) = self.table.get_mut(player_id) else {
            return OpOutcome::NoSession;
        };
        session.profile.active_loadout_mut().reset_outfit();
        self.persist(player_id);
        OpOutcome::Ok
    }

    fn set_player_setting(&mut self, player_id: PlayerId, setting: &str, value: bool) -> OpOutcome {
        let Some(session) = self.table.get_mut(player_id) else {
            return OpOutcome::NoSession;
        };
        let settings = &mut session.profile.settings;
        match setting {
            "auto_queue" => settings.auto_queue = value,
            "show_killfeed" => settings.show_killfeed = value,
            "level_up_notifications" => settings.level_up_notifications = value,
            _ => return OpOutcome::UnknownItem,
        }
        self.persist(player_id);
        OpOutcome::Ok
    }

    // -- UI navigation state ------------------------------------------------

    fn set_editing_weapon_slot(&mut self, player_id: PlayerId, slot: WeaponSlot) -> OpOutcome {
        let Some(session) = self.table.get_mut(player_id) else {
            return OpOutcome::NoSession;
        };
        if !session.limiter.try_acquire(Instant::now()) {
            return OpOutcome::RateLimited;
        }
        session.ui.editing_weapon_slot = slot;
        OpOutcome::Ok
    }

    fn set_loadout_tab(&mut self, player_id: PlayerId, tab: LoadoutTab) -> OpOutcome {
        let Some(session) = self.table.get_mut(player_id) else {
            return OpOutcome::NoSession;
        };
        if !session.limiter.try_acquire(Instant::now()) {
            return OpOutcome::RateLimited;
        }
        session.ui.loadout_tab = tab;
        OpOutcome::Ok
    }

    fn set_attachment_category(&mut self, player_id: PlayerId, category: &str) -> OpOutcome {
        let Some(session) = self.table.get_mut(player_id) else {
            return OpOutcome::NoSession;
        };
        if !session.limiter.try_acquire(Instant::now()) {
            return OpOutcome::RateLimited;
        }
        session.ui.attachment_category = category.to_string();
        OpOutcome::Ok
    }

    fn set_store_category(&mut self, player_id: PlayerId, category: &str) -> OpOutcome {
        let Some(session) = self.table.get_mut(player_id) else {
            return OpOutcome::NoSession;
        };
        if !session.limiter.try_acquire(Instant::now()) {
            return OpOutcome::RateLimited;
        }
        session.ui.store_category = category.to_string();
        session.ui.guns_store_page = 0;
        session.ui.skins_store_page = 0;
        OpOutcome::Ok
    }

    fn change_store_page(&mut self, player_id: PlayerId, direction: i64) -> OpOutcome {
        let Some(session) = self.table.get_mut(player_id) else {
            return OpOutcome::NoSession;
        };
        if !session.limiter.try_acquire(Instant::now()) {
            return OpOutcome::RateLimited;
        }
        let (item_count, page) = if session.ui.store_category == "skins" {
            (self.catalog.skins.len(), &mut session.ui.skins_store_page)
        } else {
            (self.catalog.weapons.len(), &mut session.ui.guns_store_page)
        };
        let max_page = item_count.saturating_sub(1) / STORE_PAGE_SIZE;
        *page = (i64::from(*page) + direction).clamp(0, max_page as i64) as u32;
        OpOutcome::Ok
    }

    // -- Reads (owned snapshots) --------------------------------------------

    fn session_data(&self, player_id: PlayerId) -> Option<SessionView> {
        let session = self.table.get(player_id)?;
        Some(SessionView {
            player_id,
            tokens: session.profile.tokens,
            is_vip: session.profile.is_vip,
            in_match: session.in_match,
            editing_weapon_slot: session.ui.editing_weapon_slot.as_str().to_string(),
            loadout_tab: session.ui.loadout_tab.as_str().to_string(),
            attachment_category: session.ui.attachment_category.clone(),
            store_category: session.ui.store_category.clone(),
            guns_store_page: session.ui.guns_store_page,
            skins_store_page: session.ui.skins_store_page,
        })
    }

    fn current_loadout(&self, player_id: PlayerId) -> Option<LoadoutView> {
        let session = self.table.get(player_id)?;
        let loadout = session.profile.active_loadout()?;
        let mut armor = BTreeMap::new();
        for slot in ArmorSlot::ALL {
            if let Some(piece) = loadout.armor(slot) {
                armor.insert(slot.as_str().to_string(), piece.to_string());
            }
        }
        Some(LoadoutView {
            name: loadout.name.clone(),
            primary: loadout.primary.clone(),
            secondary: loadout.secondary.clone(),
            primary_attachments: loadout.primary_attachments.clone(),
            secondary_attachments: loadout.secondary_attachments.clone(),
            skins: loadout.skins.clone(),
            armor,
        })
    }

    fn player_profile(&self, player_id: PlayerId) -> Option<ProfileStatsView> {
        let session = self.table.get(player_id)?;
        let profile = &session.profile;
        Some(ProfileStatsView {
            player_id,
            tokens: profile.tokens,
            is_vip: profile.is_vip,
            total_kills: profile.total_kills,
            total_deaths: profile.total_deaths,
            matches_played: profile.matches_played,
            owned_skins: profile.owned_skins.iter().cloned().collect(),
            owned_armor: profile.owned_armor.iter().cloned().collect(),
            weapon_levels: profile.weapon_levels.clone(),
            attachment_levels: profile.attachment_levels.clone(),
        })
    }

    fn equipped_attachments(
        &self,
        player_id: PlayerId,
        slot: WeaponSlot,
    ) -> BTreeMap<String, String> {
        self.table
            .get(player_id)
            .and_then(|s| s.profile.active_loadout())
            .map(|loadout| loadout.attachments(slot).clone())
            .unwrap_or_default()
    }

    fn player_settings(&self, player_id: PlayerId) -> Option<PlayerSettingsView> {
        let session = self.table.get(player_id)?;
        let settings = session.profile.settings;
        Some(PlayerSettingsView {
            auto_queue: settings.auto_queue,
            show_killfeed: settings.show_killfeed,
            level_up_notifications: settings.level_up_notifications,
        })
    }

    fn check_ownership(&self, player_id: PlayerId, item_id: &str) -> bool {
        self.table
            .get(player_id)
            .is_some_and(|s| s.profile.owns(item_id))
    }

    fn weapon_stats(&self, player_id: PlayerId, slot: WeaponSlot) -> StatBlock {
        let Some(loadout) = self
            .table
            .get(player_id)
            .and_then(|s| s.profile.active_loadout())
        else {
            return StatBlock::new();
        };
        calculate_stats(
            &self.catalog.weapons,
            &self.catalog.attachments,
            loadout.weapon(slot),
            loadout.attachments(slot).values(),
        )
    }

    // -- Admin --------------------------------------------------------------

    fn set_tokens(&mut self, player_id: PlayerId, amount: u64) -> OpOutcome {
        if !TokenLedger::new(&mut self.table).set_balance(player_id, amount) {
            return OpOutcome::NoSession;
        }
        self.persist(player_id);
        OpOutcome::Ok
    }

    fn grant_item(&mut self, player_id: PlayerId, item_id: &str) -> OpOutcome {
        let is_armor = self.catalog.armor.get(item_id).is_some();
        let is_skin = self.catalog.skins.get(item_id).is_some();
        if !is_armor && !is_skin {
            return OpOutcome::UnknownItem;
        }
        let Some(session) = self.table.get_mut(player_id) else {
            return OpOutcome::NoSession;
        };
        if is_armor {
            session.profile.owned_armor.insert(item_id.to_string());
        } else {
            session.profile.owned_skins.insert(item_id.to_string());
        }
        tracing::info!(%player_id, item_id, "item granted");
        self.persist(player_id);
        OpOutcome::Ok
    }

    fn reset_progress(&mut self, player_id: PlayerId) -> OpOutcome {
        let Some(session) = self.table.get_mut(player_id) else {
            return OpOutcome::NoSession;
        };
        session.profile = PlayerProfile::new(player_id, self.config.starting_tokens);
        tracing::info!(%player_id, "profile reset by admin");
        self.persist(player_id);
        OpOutcome::Ok
    }
}

// =========================================================================
// Tests
// =========================================================================
