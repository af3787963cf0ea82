//! Finalized ability artifacts.
//!
//! A finalize call resolves every die target to its stable index, bakes in
//! the canonical description, and emits one of these immutable records. They
//! are plain data from here on; nothing mutates a finalized ability except
//! deleting it wholesale.

use arrayvec::ArrayVec;

use crate::catalog::{BaseId, ModuleId, ModuleRank, PassiveId};

use super::die::{DieRole, DieSize, DieType};
use super::effect::EffectRecord;

/// Rated (non-base) E.G.O. slot cap.
pub const RATED_EGO_SLOTS: usize = 4;

/// A die of a finalized ability, fully resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinalizedDie {
    pub role: DieRole,
    pub die_type: DieType,
    pub size: DieSize,
    pub bonus: i32,
    pub effects: Vec<EffectRecord>,
}

/// A module as recorded on a finalized ability.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinalizedModule {
    pub id: ModuleId,
    pub name: String,
    pub rank: ModuleRank,
    pub spare: bool,
}

/// An immutable, fully-built skill.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinalizedSkill {
    pub base: BaseId,
    pub name: String,
    pub cost: u8,
    pub dice: Vec<FinalizedDie>,
    pub ability_effects: Vec<EffectRecord>,
    pub modules: Vec<FinalizedModule>,
    pub unique: bool,
    pub description: String,
}

impl FinalizedSkill {
    /// Modules of a given rank.
    pub fn module_count(&self, rank: ModuleRank) -> u32 {
        self.modules
            .iter()
            .filter(|module| module.rank == rank)
            .count() as u32
    }
}

/// The two-way Base E.G.O. power benefit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EgoBenefit {
    /// Scale every die's power: one die +3, two dice +2 each, three or more
    /// +1 each.
    PowerSurge,

    /// Treat the cost placeholder as one higher everywhere it is referenced.
    CostEcho,
}

impl EgoBenefit {
    /// Per-die power bonus for `PowerSurge` given the dice count.
    pub const fn surge_bonus(dice_count: usize) -> i32 {
        match dice_count {
            0 | 1 => 3,
            2 => 2,
            _ => 1,
        }
    }
}

/// The passive chosen for an E.G.O., with any `{choice}` resolution applied.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveSelection {
    pub id: PassiveId,
    pub name: String,
    pub template: String,

    /// Rendered description; keeps `{choice}` when no choice was supplied.
    pub text: String,

    pub choice: Option<String>,
}

/// Rating of a non-base E.G.O.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EgoRank {
    Rank1,
    Rank2,
    Rank3,
}

/// An immutable, fully-built E.G.O. ability.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinalizedEgo {
    pub base: BaseId,
    pub name: String,
    pub cost: u8,
    pub dice: Vec<FinalizedDie>,
    pub ability_effects: Vec<EffectRecord>,
    pub modules: Vec<FinalizedModule>,
    pub benefit: EgoBenefit,
    pub passive: PassiveSelection,

    /// `None` for the Base E.G.O.; the rating for additional slots.
    pub rank: Option<EgoRank>,

    pub description: String,
}

/// A character's E.G.O. abilities: one Base slot plus rated extras.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EgoCollection {
    pub base: Option<FinalizedEgo>,
    pub rated: ArrayVec<FinalizedEgo, RATED_EGO_SLOTS>,
}

impl EgoCollection {
    pub const fn new() -> Self {
        Self {
            base: None,
            rated: ArrayVec::new_const(),
        }
    }

    pub fn has_base(&self) -> bool {
        self.base.is_some()
    }
}
