//! The session table: every connected player's session, keyed by id.

use std::collections::HashMap;
use std::time::Duration;

use blooddome_profile::{PlayerId, ProfileError, ProfileStore};

use crate::Session;

/// Tracks all connected players and their loaded profiles.
///
/// The table owns the [`ProfileStore`] so that loading on connect and
/// saving on disconnect, autosave, and shutdown all flow through one
/// place.
///
/// ## Lifecycle
///
/// ```text
/// get_or_create() ──→ [in table] ──→ remove()
///       │                  │            │
///       ▼                  ▼            ▼
///   load profile       save_all()   final save
///                     (autosave)
/// ```
///
/// There is no expiry or eviction: a session lives exactly as long as
/// the player is connected, and `HashMap` keyed by [`PlayerId`] makes
/// "at most one session per player" structural.
pub struct SessionTable {
    sessions: HashMap<PlayerId, Session>,
    store: ProfileStore,
    starting_tokens: u64,
    max_actions_per_window: usize,
    window: Duration,
}

impl SessionTable {
    pub fn new(
        store: ProfileStore,
        starting_tokens: u64,
        max_actions_per_window: usize,
        window: Duration,
    ) -> Self {
        Self {
            sessions: HashMap::new(),
            store,
            starting_tokens,
            max_actions_per_window,
            window,
        }
    }

    /// Returns the player's session, loading their profile from disk
    /// and creating the session if they are not connected yet.
    ///
    /// Calling this twice for the same player returns the same session;
    /// the profile is only read from disk on the first call.
    pub fn get_or_create(&mut self, player_id: PlayerId) -> &mut Session {
        if !self.sessions.contains_key(&player_id) {
            let mut profile = self.store.load(player_id, self.starting_tokens);
            // A hand-edited or pre-loadout record can carry an empty
            // loadout list; materialize the active loadout here so read
            // paths never see one missing.
            profile.active_loadout_mut();
            let session = Session::new(profile, self.max_actions_per_window, self.window);
            self.sessions.insert(player_id, session);
            tracing::info!(%player_id, "session created");
        }
        self.sessions
            .get_mut(&player_id)
            .expect("just inserted")
    }

    /// Looks up a session without creating one.
    pub fn get(&self, player_id: PlayerId) -> Option<&Session> {
        self.sessions.get(&player_id)
    }

    pub fn get_mut(&mut self, player_id: PlayerId) -> Option<&mut Session> {
        self.sessions.get_mut(&player_id)
    }

    /// Saves one connected player's profile to disk.
    pub fn save(&mut self, player_id: PlayerId) -> Result<(), ProfileError> {
        if let Some(session) = self.sessions.get_mut(&player_id) {
            self.store.save(&mut session.profile)?;
        }
        Ok(())
    }

    /// Removes a player's session, writing their profile first.
    ///
    /// A failed final save is logged and the session is still dropped —
    /// at disconnect there is nobody left to retry for, and keeping the
    /// session alive would leak it.
    pub fn remove(&mut self, player_id: PlayerId) {
        let Some(mut session) = self.sessions.remove(&player_id) else {
            return;
        };
        if let Err(error) = self.store.save(&mut session.profile) {
            tracing::warn!(%player_id, %error, "final profile save failed on disconnect");
        } else {
            tracing::info!(%player_id, "session closed, profile saved");
        }
    }

    /// Saves every connected player's profile, without evicting anyone.
    ///
    /// Used by the autosave tick and shutdown. Individual failures are
    /// logged and skipped so one bad disk write cannot block the rest.
    /// Returns how many profiles were written.
    pub fn save_all(&mut self) -> usize {
        let mut saved = 0;
        for session in self.sessions.values_mut() {
            match self.store.save(&mut session.profile) {
                Ok(()) => saved += 1,
                Err(error) => {
                    tracing::warn!(
                        player_id = %session.profile.id,
                        %error,
                        "profile save failed during save_all"
                    );
                }
            }
        }
        saved
    }

    /// Saves everyone and drops every session. For server shutdown.
    pub fn shutdown(&mut self) -> usize {
        let saved = self.save_all();
        let dropped = self.sessions.len();
        self.sessions.clear();
        tracing::info!(saved, dropped, "session table shut down");
        saved
    }

    /// All connected player ids, in no particular order.
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.sessions.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn table(dir: &std::path::Path) -> SessionTable {
        let store = ProfileStore::open(dir).expect("store should open");
        SessionTable::new(store, 500, 5, Duration::from_secs(1))
    }

    fn pid(id: u64) -> PlayerId {
        PlayerId(id)
    }

    #[test]
    fn test_get_or_create_new_player_gets_starting_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let mut tbl = table(dir.path());

        let session = tbl.get_or_create(pid(1));

        assert_eq!(session.profile.tokens, 500);
        assert_eq!(tbl.len(), 1);
    }

    #[test]
    fn test_get_or_create_same_player_returns_one_session() {
        // At most one session per player: mutating through a second
        // call must be visible through the first.
        let dir = tempfile::tempdir().unwrap();
        let mut tbl = table(dir.path());

        tbl.get_or_create(pid(1)).profile.tokens = 42;
        let again = tbl.get_or_create(pid(1));

        assert_eq!(again.profile.tokens, 42);
        assert_eq!(tbl.len(), 1);
    }

    #[test]
    fn test_get_or_create_repairs_record_with_no_loadouts() {
        // A record edited by hand (or written before loadouts existed)
        // may have an empty loadout list; connecting must restore the
        // active loadout so reads never come up empty.
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::open(dir.path()).expect("store should open");
        let mut profile = blooddome_profile::PlayerProfile::new(pid(7), 500);
        profile.loadouts.clear();
        store.save(&mut profile).expect("save");

        let mut tbl = table(dir.path());
        let session = tbl.get_or_create(pid(7));

        assert!(session.profile.active_loadout().is_some());
    }

    #[test]
    fn test_remove_saves_profile_for_next_connect() {
        let dir = tempfile::tempdir().unwrap();
        let mut tbl = table(dir.path());

        tbl.get_or_create(pid(1)).profile.tokens = 750;
        tbl.remove(pid(1));
        assert!(tbl.is_empty());

        // Reconnect: the saved balance comes back, not the default.
        let session = tbl.get_or_create(pid(1));
        assert_eq!(session.profile.tokens, 750);
    }

    #[test]
    fn test_remove_unknown_player_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut tbl = table(dir.path());

        tbl.remove(pid(99));
        assert!(tbl.is_empty());
    }

    #[test]
    fn test_save_all_writes_everyone_and_evicts_nobody() {
        let dir = tempfile::tempdir().unwrap();
        let mut tbl = table(dir.path());

        tbl.get_or_create(pid(1)).profile.tokens = 100;
        tbl.get_or_create(pid(2)).profile.tokens = 200;

        let saved = tbl.save_all();

        assert_eq!(saved, 2);
        assert_eq!(tbl.len(), 2, "autosave must not disconnect anyone");

        // A fresh table sees the saved balances.
        let mut fresh = table(dir.path());
        assert_eq!(fresh.get_or_create(pid(1)).profile.tokens, 100);
        assert_eq!(fresh.get_or_create(pid(2)).profile.tokens, 200);
    }

    #[test]
    fn test_save_all_empty_table_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut tbl = table(dir.path());

        assert_eq!(tbl.save_all(), 0);
    }

    #[test]
    fn test_player_ids_lists_connected_players() {
        let dir = tempfile::tempdir().unwrap();
        let mut tbl = table(dir.path());

        tbl.get_or_create(pid(1));
        tbl.get_or_create(pid(2));

        let mut ids = tbl.player_ids();
        ids.sort();
        assert_eq!(ids, vec![pid(1), pid(2)]);
    }
}
