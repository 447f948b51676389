//! Static item catalogs for Blooddome.
//!
//! Everything here is loaded once at startup and read-only afterwards:
//!
//! - [`WeaponRegistry`] — the guns players can equip and upgrade
//! - [`AttachmentRegistry`] — barrel/mag/optic attachments and their
//!   stat multipliers
//! - [`ArmorRegistry`] — outfit pieces per armor slot
//! - [`SkinRegistry`] — purchasable weapon skins
//! - [`ItemCatalog`] — the four registries bundled for injection into
//!   the layers above
//!
//! Mutation operations in the facade consult these catalogs to validate
//! item identities, costs, and level caps. Definitions derive
//! `Deserialize`, so a server owner can replace the built-in defaults
//! with a JSON catalog file; [`ItemCatalog::default`] is the shipped set.
//!
//! # Stat rule
//!
//! Every attachment stat modifier is a **multiplier** applied to the
//! weapon's base stat block — there are no additive modifiers. See
//! [`calculate_stats`].

mod armor;
mod attachment;
mod catalog;
mod skin;
mod stats;
mod weapon;

pub use armor::{ArmorDef, ArmorRegistry};
pub use attachment::{AttachmentDef, AttachmentRegistry};
pub use catalog::{ItemCatalog, Rarity};
pub use skin::{SkinDef, SkinRegistry};
pub use stats::{calculate_stats, upgrade_cost, StatBlock, UPGRADE_COST_BASE};
pub use weapon::{WeaponDef, WeaponRegistry};
