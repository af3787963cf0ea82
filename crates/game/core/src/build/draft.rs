//! The working draft owned by a build session.
//!
//! The draft is never handed out mutably; the session exposes command
//! methods and read-only snapshots, so the presentation layer cannot bypass
//! validation.

use crate::ability::{
    DieIndex, DieRole, DieSize, DieSpec, DieTagSpec, DieType, EffectRecord, EffectTag, EgoBenefit,
    PassiveSelection, notation,
};
use crate::catalog::{BaseId, ModuleId, ModuleRank};
use crate::pool::ModuleCounts;

/// What kind of ability a session is building.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityKind {
    Skill,
    Ego,
}

/// A per-die working copy of a template die.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkingDie {
    pub index: DieIndex,
    pub tag: DieTagSpec,

    /// Chosen type for configurable dice.
    pub chosen: Option<DieType>,

    pub size: DieSize,
    pub bonus: i32,
    pub notation: String,
    pub effects: Vec<EffectRecord>,
}

impl WorkingDie {
    pub(super) fn from_spec(index: u8, spec: &DieSpec) -> Self {
        Self {
            index: DieIndex(index),
            tag: spec.tag,
            chosen: None,
            size: spec.size,
            bonus: spec.bonus,
            notation: notation(spec.size, spec.bonus),
            effects: Vec::new(),
        }
    }

    /// The die's current type: fixed, or chosen if configured.
    pub fn die_type(&self) -> Option<DieType> {
        match self.tag {
            DieTagSpec::Fixed(die_type) => Some(die_type),
            _ => self.chosen,
        }
    }

    pub fn role(&self) -> DieRole {
        self.tag.role()
    }

    pub fn has_tag(&self, tag: &EffectTag) -> bool {
        self.effects.iter().any(|effect| &effect.tag == tag)
    }

    pub(super) fn refresh_notation(&mut self) {
        self.notation = notation(self.size, self.bonus);
    }
}

/// Where an applied module is bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModuleTarget {
    Die(DieIndex),
    Ability,
}

/// Exactly what applying a module did, so removal is a true inverse.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppliedEffect {
    PowerBonus { amount: i32 },

    /// `from == to` when the ladder cap made the upgrade a no-op.
    SizeUpgrade { from: DieSize, to: DieSize },

    TagEffect { record: EffectRecord },
}

/// A module slotted into the draft.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedModule {
    pub module: ModuleId,
    pub name: String,
    pub rank: ModuleRank,
    pub target: ModuleTarget,

    /// The module's uniqueness tag, copied from its spec.
    pub tag: Option<EffectTag>,

    pub option: Option<String>,

    /// Drawn from the spare pool rather than an innate slot.
    pub spare: bool,

    pub effect: AppliedEffect,
}

/// Mutable single-session draft, exclusively owned by its [`BuildSession`].
///
/// [`BuildSession`]: super::BuildSession
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildDraft {
    pub kind: AbilityKind,
    pub base: Option<BaseId>,
    pub base_name: String,
    pub cost: u8,
    pub unique: bool,
    pub dice: Vec<WorkingDie>,
    pub ability_effects: Vec<EffectRecord>,
    pub modules: Vec<AppliedModule>,
    pub benefit: Option<EgoBenefit>,
    pub passive: Option<PassiveSelection>,
}

impl BuildDraft {
    pub(super) fn new(kind: AbilityKind) -> Self {
        Self {
            kind,
            base: None,
            base_name: String::new(),
            cost: 0,
            unique: false,
            dice: Vec::new(),
            ability_effects: Vec::new(),
            modules: Vec::new(),
            benefit: None,
            passive: None,
        }
    }

    /// The cost as referenced by effect templates: the base cost, plus one
    /// under the `CostEcho` benefit.
    pub fn effective_cost(&self) -> u8 {
        match self.benefit {
            Some(EgoBenefit::CostEcho) => self.cost.saturating_add(1),
            _ => self.cost,
        }
    }

    pub fn die(&self, index: DieIndex) -> Option<&WorkingDie> {
        self.dice.get(index.0 as usize)
    }

    pub(super) fn die_mut(&mut self, index: DieIndex) -> Option<&mut WorkingDie> {
        self.dice.get_mut(index.0 as usize)
    }

    pub fn ability_has_tag(&self, tag: &EffectTag) -> bool {
        self.ability_effects.iter().any(|effect| &effect.tag == tag)
    }

    /// True iff every configurable die has a chosen type.
    ///
    /// Unique templates are trivially complete.
    pub fn is_configuration_complete(&self) -> bool {
        self.unique || self.dice.iter().all(|die| die.die_type().is_some())
    }

    /// Module counts by rank across the whole draft.
    pub fn module_counts(&self) -> ModuleCounts {
        let mut counts = ModuleCounts::default();
        for module in &self.modules {
            counts.add_rank(module.rank, 1);
        }
        counts
    }

    /// Counts of innate (non-spare) modules by rank.
    pub fn innate_counts(&self) -> ModuleCounts {
        let mut counts = ModuleCounts::default();
        for module in self.modules.iter().filter(|module| !module.spare) {
            counts.add_rank(module.rank, 1);
        }
        counts
    }

    pub(super) fn innate_quota_filled(&self) -> bool {
        let innate = self.innate_counts();
        innate.rank1 >= crate::pool::INNATE_RANK1 && innate.rank2 >= crate::pool::INNATE_RANK2
    }

    /// Rebuild every effect text from its stored template, then re-deduplicate.
    ///
    /// Used when the effective cost changes after records already exist.
    pub(super) fn rebuild_effect_texts(&mut self) {
        let cost = self.effective_cost();
        for die in &mut self.dice {
            for effect in &mut die.effects {
                effect.rerender(cost);
            }
            dedup_by_text(&mut die.effects);
        }
        for effect in &mut self.ability_effects {
            effect.rerender(cost);
        }
        dedup_by_text(&mut self.ability_effects);
    }
}

/// Drops later records whose rendered text duplicates an earlier one.
pub(super) fn dedup_by_text(records: &mut Vec<EffectRecord>) {
    let mut seen: Vec<String> = Vec::with_capacity(records.len());
    records.retain(|record| {
        if seen.iter().any(|text| text == &record.text) {
            false
        } else {
            seen.push(record.text.clone());
            true
        }
    });
}
