//! Armor piece definitions, grouped by outfit slot.

use blooddome_profile::ArmorSlot;
use serde::Deserialize;

use crate::Rarity;

/// One purchasable armor piece.
#[derive(Debug, Clone, Deserialize)]
pub struct ArmorDef {
    /// Stable identifier, conventionally the host engine's item
    /// shortname ("metal.facemask").
    pub id: String,

    /// Name shown to players.
    pub display_name: String,

    /// Which outfit slot the piece occupies. Exactly one piece per slot
    /// can be equipped.
    pub slot: ArmorSlot,

    /// Purchase price in tokens.
    pub cost: u64,

    #[serde(default)]
    pub rarity: Rarity,

    /// Store tile image. Empty means no image configured.
    #[serde(default)]
    pub image_url: String,
}

/// The catalog of armor pieces, in declaration order.
///
/// Ordered like [`crate::WeaponRegistry`] so per-slot cycling in the
/// outfit editor walks a stable sequence.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ArmorRegistry {
    pieces: Vec<ArmorDef>,
}

impl ArmorRegistry {
    pub fn new(pieces: Vec<ArmorDef>) -> Self {
        Self { pieces }
    }

    /// Looks up an armor piece by id.
    pub fn get(&self, armor_id: &str) -> Option<&ArmorDef> {
        self.pieces.iter().find(|p| p.id == armor_id)
    }

    /// All pieces for one outfit slot, in declaration order.
    pub fn for_slot(&self, slot: ArmorSlot) -> impl Iterator<Item = &ArmorDef> {
        self.pieces.iter().filter(move |p| p.slot == slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArmorDef> {
        self.pieces.iter()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl Default for ArmorRegistry {
    fn default() -> Self {
        Self::new(builtin_armor())
    }
}

fn piece(id: &str, display_name: &str, slot: ArmorSlot, cost: u64, rarity: Rarity) -> ArmorDef {
    ArmorDef {
        id: id.to_string(),
        display_name: display_name.to_string(),
        slot,
        cost,
        rarity,
        image_url: String::new(),
    }
}

/// The shipped armor catalog.
fn builtin_armor() -> Vec<ArmorDef> {
    use ArmorSlot::*;
    use Rarity::*;

    vec![
        piece("metal.facemask", "Metal Facemask", Head, 300, Epic),
        piece("coffeecan.helmet", "Coffee Can Helmet", Head, 150, Rare),
        piece("metal.plate.torso", "Metal Chest Plate", Chest, 300, Epic),
        piece("roadsign.jacket", "Road Sign Jacket", Chest, 150, Rare),
        piece("heavy.plate.pants", "Heavy Plate Pants", Legs, 250, Epic),
        piece("roadsign.kilt", "Road Sign Kilt", Legs, 100, Rare),
        piece("tactical.gloves", "Tactical Gloves", Hands, 120, Rare),
        piece("shoes.boots", "Boots", Feet, 60, Common),
    ]
}
