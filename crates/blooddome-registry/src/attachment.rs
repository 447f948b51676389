//! Attachment definitions: slots, level caps, and stat multipliers.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::StatBlock;

/// One attachment: which slot it occupies and how it bends the weapon's
/// stats.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentDef {
    /// Stable identifier ("silencer").
    pub id: String,

    /// Name shown to players.
    pub display_name: String,

    /// Attachment slot this occupies on a weapon ("barrel", "mag",
    /// "optic"). One attachment per slot per weapon.
    pub slot: String,

    /// Upgrade level cap for this attachment.
    #[serde(default = "default_attachment_max_level")]
    pub max_level: u32,

    /// Stat multipliers applied to the weapon's base block. 1.0 is
    /// neutral; 0.95 weakens a stat by 5%, 1.5 boosts it by 50%.
    #[serde(default)]
    pub stat_modifiers: StatBlock,
}

fn default_attachment_max_level() -> u32 {
    5
}

/// The catalog of attachments, keyed by id.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct AttachmentRegistry {
    attachments: BTreeMap<String, AttachmentDef>,
}

impl AttachmentRegistry {
    pub fn new(defs: Vec<AttachmentDef>) -> Self {
        Self {
            attachments: defs.into_iter().map(|d| (d.id.clone(), d)).collect(),
        }
    }

    /// Looks up an attachment by id.
    pub fn get(&self, attachment_id: &str) -> Option<&AttachmentDef> {
        self.attachments.get(attachment_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttachmentDef> {
        self.attachments.values()
    }

    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }
}

impl Default for AttachmentRegistry {
    fn default() -> Self {
        Self::new(builtin_attachments())
    }
}

fn modifiers(pairs: &[(&str, f32)]) -> StatBlock {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

/// The shipped attachment catalog. All modifiers are multipliers.
fn builtin_attachments() -> Vec<AttachmentDef> {
    vec![
        AttachmentDef {
            id: "silencer".to_string(),
            display_name: "Silencer".to_string(),
            slot: "barrel".to_string(),
            max_level: 5,
            stat_modifiers: modifiers(&[("noise", 0.20), ("damage", 0.95)]),
        },
        AttachmentDef {
            id: "extended_mag".to_string(),
            display_name: "Extended Magazine".to_string(),
            slot: "mag".to_string(),
            max_level: 5,
            stat_modifiers: modifiers(&[("mag_size", 1.50), ("reload_speed", 0.90)]),
        },
        AttachmentDef {
            id: "reflex".to_string(),
            display_name: "Reflex Sight".to_string(),
            slot: "optic".to_string(),
            max_level: 3,
            stat_modifiers: modifiers(&[("accuracy", 1.20)]),
        },
    ]
}
