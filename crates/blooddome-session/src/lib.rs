//! The in-memory session layer for Blooddome.
//!
//! A session is the server's runtime record of a connected player: their
//! loaded profile plus everything that only matters while they are
//! online — UI cursors for the loadout editor and store, the command
//! rate limiter, and wager cooldown bookkeeping. Sessions are created
//! on connect, live in [`SessionTable`], and are written back to disk
//! on disconnect, autosave, and shutdown.
//!
//! # How it fits in the stack
//!
//! ```text
//!   blooddome (facade)
//!        │ owns
//!        ▼
//!   SessionTable ──── loads/saves via ───→ blooddome-profile
//!        │ holds
//!        ▼
//!   Session { profile, ui, limiter, ... }
//! ```
//!
//! # Concurrency note
//!
//! `SessionTable` is NOT thread-safe by itself — it uses a plain
//! `HashMap`. The host engine drives the plugin from a single game
//! thread, so there is nothing to synchronize; keeping it simple here
//! avoids hidden locking overhead.

mod limiter;
mod session;
mod table;

pub use limiter::RateLimiter;
pub use session::{LoadoutTab, Session, UiState};
pub use table::SessionTable;
