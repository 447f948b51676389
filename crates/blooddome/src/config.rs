//! Core configuration, loaded once at startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// All tunables the core reads. Injected at construction; never
/// re-read mid-operation.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Directory holding one JSON record per player.
    pub data_dir: PathBuf,

    /// Token grant for a brand-new profile.
    pub starting_tokens: u64,

    /// Tokens awarded to the attacker per kill.
    pub tokens_per_kill: u64,

    /// Global weapon upgrade cap. The effective cap for one weapon is
    /// the lower of this and the weapon's own `max_level`.
    pub max_weapon_level: u32,

    /// Global attachment upgrade cap, combined the same way.
    pub max_attachment_level: u32,

    /// Seconds between autosave sweeps of all connected profiles.
    pub autosave_interval_secs: u64,

    /// UI command budget per player per second.
    pub ui_actions_per_second: usize,

    /// Dice wager bet bounds and per-player cooldown.
    pub wager_min_bet: u64,
    pub wager_max_bet: u64,
    pub wager_cooldown_secs: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/blooddome"),
            starting_tokens: 500,
            tokens_per_kill: 10,
            max_weapon_level: 10,
            max_attachment_level: 5,
            autosave_interval_secs: 300,
            ui_actions_per_second: 5,
            wager_min_bet: 10,
            wager_max_bet: 100,
            wager_cooldown_secs: 30,
        }
    }
}

impl CoreConfig {
    /// Reads a config file, falling back to defaults.
    ///
    /// A missing file is normal on first boot (logged at debug); an
    /// unreadable or malformed file is a deployment mistake worth a
    /// warning, but the server still comes up on defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Self::default();
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "config unreadable, using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "config malformed, using defaults");
                Self::default()
            }
        }
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }

    pub fn wager_cooldown(&self) -> Duration {
        Duration::from_secs(self.wager_cooldown_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_shipped_tuning() {
        let config = CoreConfig::default();
        assert_eq!(config.starting_tokens, 500);
        assert_eq!(config.tokens_per_kill, 10);
        assert_eq!(config.max_weapon_level, 10);
        assert_eq!(config.max_attachment_level, 5);
        assert_eq!(config.autosave_interval_secs, 300);
        assert_eq!(config.wager_min_bet, 10);
        assert_eq!(config.wager_max_bet, 100);
    }

    #[test]
    fn test_deserialize_partial_file_keeps_defaults() {
        let config: CoreConfig =
            serde_json::from_str(r#"{"starting_tokens": 1000}"#).unwrap();
        assert_eq!(config.starting_tokens, 1000);
        assert_eq!(config.tokens_per_kill, 10);
    }

    #[test]
    fn test_load_or_default_missing_file_uses_defaults() {
        let config = CoreConfig::load_or_default("/nonexistent/blooddome.json");
        assert_eq!(config.starting_tokens, 500);
    }
}
