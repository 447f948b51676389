//! Weapon skin definitions.

use serde::Deserialize;

use crate::Rarity;

/// One purchasable weapon skin.
#[derive(Debug, Clone, Deserialize)]
pub struct SkinDef {
    /// Stable identifier ("skin_ak47_classic").
    pub id: String,

    /// Name shown to players.
    pub display_name: String,

    /// The weapon this skin applies to. A skin bought for one gun
    /// cannot be applied to another.
    pub weapon_id: String,

    /// Purchase price in tokens.
    pub cost: u64,

    /// The host engine's workshop skin tag applied when the weapon is
    /// granted. Zero means the default appearance.
    #[serde(default)]
    pub tag: u64,

    #[serde(default)]
    pub rarity: Rarity,

    /// Store tile image. Empty means no image configured.
    #[serde(default)]
    pub image_url: String,
}

/// The catalog of skins, in declaration order.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct SkinRegistry {
    skins: Vec<SkinDef>,
}

impl SkinRegistry {
    pub fn new(skins: Vec<SkinDef>) -> Self {
        Self { skins }
    }

    /// Looks up a skin by id.
    pub fn get(&self, skin_id: &str) -> Option<&SkinDef> {
        self.skins.iter().find(|s| s.id == skin_id)
    }

    /// All skins for one weapon, in declaration order.
    pub fn for_weapon(&self, weapon_id: &str) -> impl Iterator<Item = &SkinDef> {
        self.skins.iter().filter(move |s| s.weapon_id == weapon_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkinDef> {
        self.skins.iter()
    }

    pub fn len(&self) -> usize {
        self.skins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skins.is_empty()
    }
}

impl Default for SkinRegistry {
    fn default() -> Self {
        Self::new(builtin_skins())
    }
}

fn skin(id: &str, display_name: &str, weapon_id: &str, cost: u64, tag: u64, rarity: Rarity) -> SkinDef {
    SkinDef {
        id: id.to_string(),
        display_name: display_name.to_string(),
        weapon_id: weapon_id.to_string(),
        cost,
        tag,
        rarity,
        image_url: String::new(),
    }
}

/// The shipped skin catalog.
fn builtin_skins() -> Vec<SkinDef> {
    use Rarity::*;

    vec![
        skin("skin_ak47_classic", "AK-47 | Classic", "ak47", 200, 1826520371, Rare),
        skin("skin_ak47_glory", "AK-47 | Glory", "ak47", 500, 2128371674, Legendary),
        skin("skin_lr300_gold", "LR-300 | Gold", "lr300", 450, 2088959797, Legendary),
        skin("skin_mp5_tactical", "MP5 | Tactical", "mp5", 250, 1557687423, Epic),
        skin("skin_thompson_frontier", "Thompson | Frontier", "thompson", 180, 1810504287, Rare),
        skin("skin_python_viper", "Python | Viper", "python", 220, 1871930607, Epic),
        skin("skin_bolt_hunter", "Bolt | Hunter", "bolt", 300, 1903792342, Epic),
        skin("skin_m39_marksman", "M39 | Marksman", "m39", 260, 2101866940, Epic),
    ]
}
