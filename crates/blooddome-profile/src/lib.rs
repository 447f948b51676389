//! Player progression data for Blooddome.
//!
//! This crate is the bottom of the stack: it defines WHO a player is
//! ([`PlayerId`]) and WHAT they have earned ([`PlayerProfile`] — tokens,
//! owned items, weapon levels, loadouts), plus the [`ProfileStore`] that
//! moves those records to and from disk.
//!
//! # How it fits in the stack
//!
//! ```text
//! Lobby facade (above)    ← command surface, economy, match flow
//!     ↕
//! Session layer           ← wraps one live PlayerProfile per connected player
//!     ↕
//! Profile layer (this crate)  ← durable records, one JSON file per player
//! ```
//!
//! # Persistence contract
//!
//! One `{player_id}.json` file per identity. Writes go through a
//! temp-file-then-rename sequence so a crash mid-write can never leave a
//! half-written record at the canonical path. Reads never fail hard: a
//! missing file yields a fresh default profile, and an unreadable file is
//! quarantined before a fresh default is returned.

mod error;
mod profile;
mod store;
mod types;

pub use error::ProfileError;
pub use profile::{Loadout, PlayerProfile, PlayerSettings};
pub use store::ProfileStore;
pub use types::{ArmorSlot, PlayerId, WeaponSlot};
