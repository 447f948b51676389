//! Identity and slot types shared by every layer above.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PlayerId
// ---------------------------------------------------------------------------

/// A player's 64-bit platform identity.
///
/// Newtype wrapper so a player id can never be confused with a token
/// amount or any other `u64` in a signature. `#[serde(transparent)]`
/// keeps the persisted form a plain number, which is what the host
/// runtime hands us and what older data files already contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// WeaponSlot
// ---------------------------------------------------------------------------

/// The two weapon positions in a loadout.
///
/// The UI collaborator passes these as strings ("primary"/"secondary");
/// everything on this side of the boundary uses the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponSlot {
    Primary,
    Secondary,
}

impl WeaponSlot {
    /// The stable string form used in persisted data and the UI boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for WeaponSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ArmorSlot
// ---------------------------------------------------------------------------

/// The five outfit positions in a loadout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmorSlot {
    Head,
    Chest,
    Legs,
    Hands,
    Feet,
}

impl ArmorSlot {
    /// Every slot, in display order. Used when resetting an outfit or
    /// rendering all five slots.
    pub const ALL: [ArmorSlot; 5] = [
        Self::Head,
        Self::Chest,
        Self::Legs,
        Self::Hands,
        Self::Feet,
    ];

    /// The stable string form used in persisted data and the UI boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Chest => "chest",
            Self::Legs => "legs",
            Self::Hands => "hands",
            Self::Feet => "feet",
        }
    }
}

impl fmt::Display for ArmorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_serializes_as_plain_number() {
        // `#[serde(transparent)]` means PlayerId(42) → `42`, not `{"0":42}`.
        // Existing data files store the id as a bare number.
        let json = serde_json::to_string(&PlayerId(76561198000000001)).unwrap();
        assert_eq!(json, "76561198000000001");
    }

    #[test]
    fn test_player_id_deserializes_from_plain_number() {
        let pid: PlayerId = serde_json::from_str("42").unwrap();
        assert_eq!(pid, PlayerId(42));
    }

    #[test]
    fn test_weapon_slot_round_trips_lowercase() {
        let json = serde_json::to_string(&WeaponSlot::Primary).unwrap();
        assert_eq!(json, "\"primary\"");
        let slot: WeaponSlot = serde_json::from_str("\"secondary\"").unwrap();
        assert_eq!(slot, WeaponSlot::Secondary);
    }

    #[test]
    fn test_armor_slot_all_covers_every_slot() {
        let strs: Vec<&str> = ArmorSlot::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(strs, ["head", "chest", "legs", "hands", "feet"]);
    }
}
