//! The enumerated improvement roster and its fixed effects.

use crate::ability::DamageKind;
use crate::character::{ImprovementId, ImprovementKind};
use crate::stats::StatName;

/// Extra data for improvements that defer a multi-field choice.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImprovementDetails {
    /// Attunement: pick a damage kind to favor and a stat to grow.
    Attunement {
        damage: DamageKind,
        stat: StatName,
    },
}

/// Fixed effect of one improvement id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImprovementEffect {
    /// +1 Max Light.
    MaxLight,

    /// +10 max HP and +5 Stagger Resist.
    Toughness,

    /// One additional ability slot.
    ExtraAbilitySlot,

    /// Deferred multi-field choice, resolved via [`ImprovementDetails`].
    Attune,
}

/// Looks up an improvement id in the fixed roster.
///
/// Returns the weight class the id belongs to and its effect; `None` for
/// unknown ids.
pub fn improvement_effect(id: &ImprovementId) -> Option<(ImprovementKind, ImprovementEffect)> {
    match id.as_str() {
        "lamp_oil" => Some((ImprovementKind::Minor, ImprovementEffect::MaxLight)),
        "tempering" => Some((ImprovementKind::Minor, ImprovementEffect::Toughness)),
        "workshop_rights" => Some((ImprovementKind::Major, ImprovementEffect::ExtraAbilitySlot)),
        "attunement" => Some((ImprovementKind::Major, ImprovementEffect::Attune)),
        _ => None,
    }
}
