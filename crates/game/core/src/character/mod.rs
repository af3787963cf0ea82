//! The character record: stats, finalized abilities, resource accounting.
//!
//! A `Character` is owned exclusively by its player's record and is a plain,
//! fully-serializable value when crossing the persistence boundary. All
//! mutation flows through the progression engine and finalized-build merges;
//! derived stats are recomputed, never hand-edited.

mod progression;

use core::fmt;

pub use progression::{
    AppliedImprovement, EgoRankBonuses, ImprovementId, ImprovementKind, PendingImprovement,
    ProgressionState, StatIncreaseToken,
};

use crate::ability::{EgoCollection, FinalizedEgo, FinalizedSkill};
use crate::pool::ModuleCounts;
use crate::stats::{CoreStats, DerivedBonuses, DerivedStats, ResourceCurrent};

/// Identifier of a character record.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CharacterId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Accumulated resource grants (stored state).
///
/// The pool itself is derived: grants recorded here plus the Intellect base,
/// minus consumption across finalized skills.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceState {
    /// Spare-module grants per rank from the level table.
    pub module_grants: ModuleCounts,

    /// Skill-slot grants from the level table.
    pub skill_slot_grants: u8,

    /// Extra ability slots from improvements.
    pub extra_ability_slots: u8,
}

/// A player character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub stats: CoreStats,
    pub bonuses: DerivedBonuses,
    pub resources: ResourceCurrent,
    pub skills: Vec<FinalizedSkill>,
    pub ego: EgoCollection,
    pub resource_state: ResourceState,
    pub progression: ProgressionState,
}

impl Character {
    /// Create a fresh level-1 character with full trackers.
    pub fn new(id: impl Into<CharacterId>, name: impl Into<String>, stats: CoreStats) -> Self {
        let bonuses = DerivedBonuses::new();
        let derived = DerivedStats::compute(&stats, &bonuses);
        Self {
            id: id.into(),
            name: name.into(),
            stats,
            bonuses,
            resources: ResourceCurrent::at_max(&derived),
            skills: Vec::new(),
            ego: EgoCollection::new(),
            resource_state: ResourceState::default(),
            progression: ProgressionState::new(),
        }
    }

    /// The current derived stat block.
    pub fn derived(&self) -> DerivedStats {
        DerivedStats::compute(&self.stats, &self.bonuses)
    }

    /// Mutate stats or grants through `apply`, then reconcile the current
    /// trackers against the recomputed maximums.
    pub fn update_stats(&mut self, apply: impl FnOnce(&mut CoreStats, &mut DerivedBonuses)) {
        let old = self.derived();
        apply(&mut self.stats, &mut self.bonuses);
        let new = self.derived();
        self.resources.reconcile(&old, &new);
    }

    /// Merge a finalized skill into the record.
    pub fn add_skill(&mut self, skill: FinalizedSkill) {
        self.skills.push(skill);
    }

    /// Merge a finalized Base E.G.O. into the record.
    pub fn set_base_ego(&mut self, ego: FinalizedEgo) {
        self.ego.base = Some(ego);
        self.progression.base_ego_created = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatName;

    #[test]
    fn update_stats_reconciles_trackers() {
        let mut character = Character::new("c1", "Tester", CoreStats::default());
        let full_hp = character.derived().hp_max;
        assert_eq!(character.resources.hp, full_hp);

        // At full: growth follows the maximum.
        character.update_stats(|stats, _| stats.set(StatName::Might, 4));
        assert_eq!(character.resources.hp, character.derived().hp_max);

        // Wounded: growth preserves damage taken.
        character.resources.hp -= 5;
        let wounded = character.resources.hp;
        character.update_stats(|stats, _| stats.set(StatName::Might, 6));
        assert_eq!(character.resources.hp, wounded);
    }
}
