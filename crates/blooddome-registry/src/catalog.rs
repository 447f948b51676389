//! The bundled catalog and shared definition pieces.

use serde::{Deserialize, Serialize};

use crate::{ArmorRegistry, AttachmentRegistry, SkinRegistry, WeaponRegistry};

/// Rarity tier shown as a badge in the store UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

/// All four item registries, bundled so dependents take one injected
/// value instead of four.
///
/// `Default` is the shipped catalog. The whole bundle derives
/// `Deserialize`, so a deployment can swap in its own catalog file and
/// add guns/skins without touching code — new entries automatically show
/// up in weapon cycling and store listings.
///
/// Registries omitted from an explicit catalog file deserialize as
/// empty, not as the shipped builtins: a file replaces the whole set,
/// so a deployment that strips the skin store can simply leave `skins`
/// out.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemCatalog {
    #[serde(default = "empty_weapons")]
    pub weapons: WeaponRegistry,
    #[serde(default = "empty_attachments")]
    pub attachments: AttachmentRegistry,
    #[serde(default = "empty_armor")]
    pub armor: ArmorRegistry,
    #[serde(default = "empty_skins")]
    pub skins: SkinRegistry,
}

// Serde field defaults. `Default` on the registries is the builtin
// catalog, which is the wrong fallback inside an explicit file.
fn empty_weapons() -> WeaponRegistry {
    WeaponRegistry::new(Vec::new())
}

fn empty_attachments() -> AttachmentRegistry {
    AttachmentRegistry::new(Vec::new())
}

fn empty_armor() -> ArmorRegistry {
    ArmorRegistry::new(Vec::new())
}

fn empty_skins() -> SkinRegistry {
    SkinRegistry::new(Vec::new())
}
