//! Progression state: a character's outstanding leveling obligations.

use std::collections::BTreeSet;

use core::fmt;

use crate::ability::DamageKind;
use crate::stats::StatName;

/// Identifier of an improvement.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImprovementId(String);

impl ImprovementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImprovementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImprovementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Improvement weight class. Major improvement ids are single-use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImprovementKind {
    Minor,
    Major,
}

/// An unapplied stat-increase token granted by a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatIncreaseToken {
    pub level: u8,
    pub amount: u8,

    /// If set, the token may not push the stat past this value.
    pub cap: Option<i32>,
}

/// An improvement choice granted by a level but not yet resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingImprovement {
    pub level: u8,
    pub kind: ImprovementKind,
}

/// An improvement the player has resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedImprovement {
    pub id: ImprovementId,
    pub kind: ImprovementKind,

    /// Stat chosen by a deferred-choice improvement, if any.
    pub chosen_stat: Option<StatName>,

    /// Damage kind chosen by a deferred-choice improvement, if any.
    pub chosen_damage: Option<DamageKind>,
}

/// Per-rank E.G.O. module grants accumulated from levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EgoRankBonuses {
    pub rank1: u8,
    pub rank2: u8,
    pub rank3: u8,
}

/// The character's outstanding (unresolved) leveling obligations.
///
/// Invariant: a character cannot hold level N's benefits without first
/// resolving level N-1's; `pending_level_ups` is kept sorted and benefits
/// apply lowest-first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionState {
    /// Levels advanced to but not yet benefit-applied, ascending.
    pub pending_level_ups: Vec<u8>,

    /// Levels whose benefit row has been applied.
    pub applied_levels: BTreeSet<u8>,

    /// Unapplied stat-increase tokens.
    pub stat_tokens: Vec<StatIncreaseToken>,

    /// Improvement choices granted but unresolved.
    pub pending_improvements: Vec<PendingImprovement>,

    /// Improvements the player has resolved.
    pub improvements: Vec<AppliedImprovement>,

    /// Major improvement ids already consumed.
    pub major_ids_used: BTreeSet<ImprovementId>,

    /// E.G.O. rank-module grants from the level table.
    pub ego_rank_bonuses: EgoRankBonuses,

    /// The level table has demanded a Base E.G.O.
    pub base_ego_required: bool,

    /// The character has finalized a Base E.G.O.
    pub base_ego_created: bool,
}

impl ProgressionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowest pending level, if any. Benefits must resolve in this order.
    pub fn next_pending_level(&self) -> Option<u8> {
        self.pending_level_ups.first().copied()
    }
}
