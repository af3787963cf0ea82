//! Resource pool: spare-module and ability-slot availability.
//!
//! Availability is derived, never stored: the Intellect base plus recorded
//! grants, minus consumption across every finalized skill beyond its innate
//! quota. Ranks are accounted independently and counts saturate at zero.

use crate::catalog::ModuleRank;
use crate::character::Character;

/// Innate quota: modules every non-unique skill carries free of the pool.
pub const INNATE_RANK1: u32 = 3;
/// Innate rank-2 quota per skill.
pub const INNATE_RANK2: u32 = 1;

/// Base number of skill slots before grants.
pub const BASE_SKILL_SLOTS: u32 = 3;

/// Spare-module counts per rank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleCounts {
    pub rank1: u32,
    pub rank2: u32,
    pub rank3: u32,
}

impl ModuleCounts {
    pub const fn new(rank1: u32, rank2: u32, rank3: u32) -> Self {
        Self {
            rank1,
            rank2,
            rank3,
        }
    }

    /// Count for a pool-backed rank; Special modules sit outside the pool.
    pub const fn get(&self, rank: ModuleRank) -> u32 {
        match rank {
            ModuleRank::One => self.rank1,
            ModuleRank::Two => self.rank2,
            ModuleRank::Three => self.rank3,
            ModuleRank::Special => 0,
        }
    }

    pub const fn add_rank(&mut self, rank: ModuleRank, amount: u32) {
        match rank {
            ModuleRank::One => self.rank1 += amount,
            ModuleRank::Two => self.rank2 += amount,
            ModuleRank::Three => self.rank3 += amount,
            ModuleRank::Special => {}
        }
    }

    pub const fn sub_rank(&mut self, rank: ModuleRank, amount: u32) {
        match rank {
            ModuleRank::One => self.rank1 = self.rank1.saturating_sub(amount),
            ModuleRank::Two => self.rank2 = self.rank2.saturating_sub(amount),
            ModuleRank::Three => self.rank3 = self.rank3.saturating_sub(amount),
            ModuleRank::Special => {}
        }
    }

    pub const fn plus(&self, other: &Self) -> Self {
        Self {
            rank1: self.rank1 + other.rank1,
            rank2: self.rank2 + other.rank2,
            rank3: self.rank3 + other.rank3,
        }
    }

    pub const fn saturating_minus(&self, other: &Self) -> Self {
        Self {
            rank1: self.rank1.saturating_sub(other.rank1),
            rank2: self.rank2.saturating_sub(other.rank2),
            rank3: self.rank3.saturating_sub(other.rank3),
        }
    }
}

/// Intellect milestone granting +1 rank-2.
const RANK2_MILESTONE: i32 = 5;
/// Intellect milestone granting +1 rank-3.
const RANK3_MILESTONE: i32 = 8;

/// Derives module and slot availability from a character's record.
pub struct ResourcePool;

impl ResourcePool {
    /// Spare modules currently available per rank.
    pub fn available_modules(character: &Character) -> ModuleCounts {
        let ceiling = Self::module_ceiling(character);
        let consumed = Self::consumed_modules(character);
        ceiling.saturating_minus(&consumed)
    }

    /// Total allotment before consumption: Intellect base, level-table
    /// grants, stat milestones.
    pub fn module_ceiling(character: &Character) -> ModuleCounts {
        let intellect = character.stats.intellect.max(0) as u32;
        let mut ceiling = ModuleCounts::new(intellect, 0, 0);
        ceiling = ceiling.plus(&character.resource_state.module_grants);
        if character.stats.intellect >= RANK2_MILESTONE {
            ceiling.rank2 += 1;
        }
        if character.stats.intellect >= RANK3_MILESTONE {
            ceiling.rank3 += 1;
        }
        ceiling
    }

    /// Consumption across every finalized skill beyond its innate quota.
    ///
    /// 3 rank-1 + 1 rank-2 are always free per skill; every rank-3 module
    /// and every module beyond the innate quota counts against the pool.
    /// Unique skills ship pre-built and consume nothing; the Base E.G.O.'s
    /// fixed quota is likewise free.
    pub fn consumed_modules(character: &Character) -> ModuleCounts {
        let mut consumed = ModuleCounts::default();
        for skill in character.skills.iter().filter(|skill| !skill.unique) {
            consumed.rank1 += skill.module_count(ModuleRank::One).saturating_sub(INNATE_RANK1);
            consumed.rank2 += skill.module_count(ModuleRank::Two).saturating_sub(INNATE_RANK2);
            consumed.rank3 += skill.module_count(ModuleRank::Three);
        }
        consumed
    }

    /// Skill slots: base plus level-table and improvement grants.
    pub fn ability_slots(character: &Character) -> u32 {
        BASE_SKILL_SLOTS
            + character.resource_state.skill_slot_grants as u32
            + character.resource_state.extra_ability_slots as u32
    }
}
