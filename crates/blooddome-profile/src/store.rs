//! The durable profile store: one JSON file per player, written atomically.
//!
//! # Recovery policy
//!
//! - Missing file → fresh default profile. First connect looks exactly
//!   like a returning player whose record was never created.
//! - Unreadable/unparseable file → the file is renamed to a quarantine
//!   name (`{id}.json.corrupt-{unix}`) and a fresh default is returned.
//!   Quarantining first means the next save cannot silently destroy a
//!   record that a human might still salvage.
//!
//! `load` therefore never fails; only `open` and `save` return errors,
//! and the layers above log those instead of propagating them.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{PlayerId, PlayerProfile, ProfileError};

/// Loads and saves [`PlayerProfile`] records under a data directory.
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, ProfileError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads the record for `id`, or a fresh default when no usable
    /// record exists.
    ///
    /// Never writes to disk: a default returned here only becomes durable
    /// once the caller invokes [`ProfileStore::save`].
    pub fn load(&self, id: PlayerId, starting_tokens: u64) -> PlayerProfile {
        let path = self.record_path(id);

        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(player_id = %id, "no profile on disk, creating default");
                return PlayerProfile::new(id, starting_tokens);
            }
            Err(e) => {
                tracing::warn!(player_id = %id, error = %e, "profile unreadable, quarantining");
                self.quarantine(&path, id);
                return PlayerProfile::new(id, starting_tokens);
            }
        };

        match serde_json::from_str::<PlayerProfile>(&data) {
            Ok(profile) => {
                tracing::debug!(player_id = %id, "profile loaded");
                profile
            }
            Err(e) => {
                tracing::warn!(player_id = %id, error = %e, "profile corrupt, quarantining");
                self.quarantine(&path, id);
                PlayerProfile::new(id, starting_tokens)
            }
        }
    }

    /// Persists `profile`, stamping `last_updated` first.
    ///
    /// The record is serialized to `{id}.json.tmp` and then renamed over
    /// the canonical path. Rename is atomic within one filesystem, so a
    /// crash mid-save leaves either the old record or the new one —
    /// never a torn file. Saving the same profile twice in a row is
    /// harmless (idempotent apart from the timestamp).
    pub fn save(&self, profile: &mut PlayerProfile) -> Result<(), ProfileError> {
        profile.last_updated = unix_now();

        let path = self.record_path(profile.id);
        let tmp = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        tracing::debug!(player_id = %profile.id, "profile saved");
        Ok(())
    }

    /// True if a durable record exists for `id` (readable or not).
    pub fn exists(&self, id: PlayerId) -> bool {
        self.record_path(id).exists()
    }

    fn record_path(&self, id: PlayerId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Moves a bad record aside under a timestamped name. A counter
    /// suffix keeps a second corrupt load in the same second from
    /// overwriting the first quarantined file. Best-effort: if the
    /// rename itself fails there is nothing more we can do but log.
    fn quarantine(&self, path: &Path, id: PlayerId) {
        let stamp = unix_now();
        let mut quarantined = self.dir.join(format!("{id}.json.corrupt-{stamp}"));
        let mut n = 1u32;
        while quarantined.exists() {
            quarantined = self.dir.join(format!("{id}.json.corrupt-{stamp}-{n}"));
            n += 1;
        }
        if let Err(e) = fs::rename(path, &quarantined) {
            tracing::error!(player_id = %id, error = %e, "failed to quarantine corrupt profile");
        } else {
            tracing::warn!(
                player_id = %id,
                quarantined = %quarantined.display(),
                "corrupt profile preserved for inspection"
            );
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// =========================================================================
// Tests
// =========================================================================
