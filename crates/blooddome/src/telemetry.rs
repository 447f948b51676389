//! Named event counters.

use std::collections::BTreeMap;

/// Counts named events over the process lifetime.
///
/// A lightweight tally the host can dump from an admin command; it is
/// not a metrics pipeline. Counter names are free-form strings chosen
/// at the call site ("player_connected", "kill_recorded", ...).
#[derive(Debug, Default)]
pub struct Telemetry {
    counters: BTreeMap<String, u64>,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumps one counter, creating it at 1 if unseen.
    pub fn increment(&mut self, name: &str) {
        *self.counters.entry(name.to_string()).or_insert(0) += 1;
    }

    /// One counter's current value; 0 if never incremented.
    pub fn count(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Owned snapshot of every counter.
    pub fn counts(&self) -> BTreeMap<String, u64> {
        self.counters.clone()
    }
}
