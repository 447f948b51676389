//! Upgrade cost and effective stat math.

use std::collections::BTreeMap;

use crate::{AttachmentRegistry, WeaponRegistry};

/// Named stats and their values, e.g. `{"damage": 35.0}`.
///
/// `BTreeMap` so serialized blocks list stats in a stable order.
pub type StatBlock = BTreeMap<String, f32>;

/// Cost of the first upgrade level. Each subsequent level costs one more
/// multiple of this.
pub const UPGRADE_COST_BASE: u64 = 100;

/// Tokens required to upgrade from `current_level` to the next level.
///
/// Linear ramp: level 0→1 costs 100, 1→2 costs 200, and so on.
pub fn upgrade_cost(current_level: u32) -> u64 {
    UPGRADE_COST_BASE * (u64::from(current_level) + 1)
}

/// Computes a weapon's effective stat block with attachments applied.
///
/// Starts from the weapon's base stats and multiplies in every equipped
/// attachment's modifiers. A modifier for a stat the base block does not
/// carry is inserted as if the base value were 1.0, so purely additive
/// stats like `noise` still show up. Unknown weapon ids yield an empty
/// base block; unknown attachment ids are skipped.
///
/// Multiplication order does not matter, so two attachments touching the
/// same stat compose the same way regardless of equip order.
pub fn calculate_stats(
    weapons: &WeaponRegistry,
    attachments: &AttachmentRegistry,
    weapon_id: &str,
    equipped: impl IntoIterator<Item = impl AsRef<str>>,
) -> StatBlock {
    let mut block = weapons
        .get(weapon_id)
        .map(|w| w.base_stats.clone())
        .unwrap_or_default();

    for attachment_id in equipped {
        let Some(def) = attachments.get(attachment_id.as_ref()) else {
            continue;
        };
        for (stat, factor) in &def.stat_modifiers {
            *block.entry(stat.clone()).or_insert(1.0) *= factor;
        }
    }

    block
}
