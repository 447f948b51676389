//! # Blooddome
//!
//! Lobby, loadout, and token economy core for a tick-driven game server.
//!
//! The host engine loads this component next to a separate presentation
//! module (the UI renderer). The presentation module talks to the core
//! exclusively through the [`CommandSurface`] trait: typed operations
//! that take a [`PlayerId`] plus primitive arguments and return
//! [`OpOutcome`]s or owned snapshot views — never references into live
//! state, never panics across the boundary.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use blooddome::{CoreConfig, LobbyCore, CommandSurface};
//! use blooddome_profile::PlayerId;
//!
//! # fn main() -> Result<(), blooddome::CoreError> {
//! let config = CoreConfig::load_or_default("config/blooddome.json");
//! let mut core = LobbyCore::new(config)?;
//!
//! core.handle_connect(PlayerId(76561198000000001));
//! let outcome = core.cycle_weapon(PlayerId(76561198000000001),
//!     blooddome_profile::WeaponSlot::Primary, 1);
//! assert!(outcome.is_ok());
//! # Ok(())
//! # }
//! ```

mod config;
mod core;
mod error;
pub mod logging;
mod outcome;
mod queue;
mod surface;
mod telemetry;
mod views;

pub use config::CoreConfig;
pub use core::LobbyCore;
pub use error::CoreError;
pub use outcome::OpOutcome;
pub use queue::{MatchQueue, MatchRecord};
pub use surface::CommandSurface;
pub use telemetry::Telemetry;
pub use views::{LoadoutView, PlayerSettingsView, ProfileStatsView, SessionView};

pub use blooddome_economy::{DiceRoll, WagerDenied, WagerOutcome};
pub use blooddome_profile::{ArmorSlot, PlayerId, WeaponSlot};
pub use blooddome_registry::{ItemCatalog, StatBlock};
pub use blooddome_session::LoadoutTab;
