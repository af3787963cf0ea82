//! The progression engine: level advancement and benefit resolution.
//!
//! Advancement only enqueues obligations; benefits are applied separately so
//! the player can resolve them interactively (stat picks, improvements, the
//! Base E.G.O.). Benefit application is idempotent per level and resolves
//! lowest-pending-first.

use core::str::FromStr;

use crate::character::{
    AppliedImprovement, Character, ImprovementId, ImprovementKind, PendingImprovement,
    StatIncreaseToken,
};
use crate::error::{CoreError, ErrorSeverity};
use crate::stats::StatName;

use super::improvement::{ImprovementDetails, ImprovementEffect, improvement_effect};
use super::table::{EgoGrant, LevelTable};

/// Why a character may not advance right now, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockReason {
    #[error("{count} pending level-up(s) must be resolved first")]
    PendingLevelUps { count: usize },

    #[error("{count} stat-increase token(s) must be resolved first")]
    UnresolvedStatTokens { count: usize },

    #[error("a Base E.G.O. must be created first")]
    BaseEgoMissing,
}

/// Result of the advancement gate. Informational; never an `Err`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AdvanceGate {
    Clear,
    Blocked(BlockReason),
}

impl AdvanceGate {
    pub const fn is_clear(&self) -> bool {
        matches!(self, Self::Clear)
    }
}

/// Errors from progression operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressionError {
    #[error("target level {target} is not above the current level {current}")]
    AlreadyAtOrAboveTarget { current: u8, target: u8 },

    #[error("target level {target} exceeds the maximum level {max}")]
    MaxLevelExceeded { target: u8, max: u8 },

    #[error("cannot advance: {reason}")]
    Blocked { reason: BlockReason },

    #[error("level {level} has no pending level-up")]
    LevelNotPending { level: u8 },

    #[error("level {level} benefits cannot apply before level {expected}")]
    OutOfOrder { level: u8, expected: u8 },

    #[error("level {level} has no benefit row")]
    UnknownLevel { level: u8 },

    #[error("unknown stat: {name}")]
    InvalidStat { name: String },

    #[error("no stat-increase token at position {index}")]
    NoSuchToken { index: usize },

    #[error("{stat} already meets the token's cap of {cap}")]
    CapReached { stat: StatName, cap: i32 },

    #[error("unknown improvement: {id}")]
    UnknownImprovement { id: ImprovementId },

    #[error("improvement {id} is not of the requested kind")]
    ImprovementKindMismatch { id: ImprovementId },

    #[error("no pending improvement of that kind")]
    NoPendingImprovement,

    #[error("major improvement {id} has already been used")]
    AlreadyUsed { id: ImprovementId },

    #[error("improvement {id} requires its choice details")]
    MissingDetails { id: ImprovementId },
}

impl CoreError for ProgressionError {
    fn severity(&self) -> ErrorSeverity {
        use ProgressionError::*;
        match self {
            InvalidStat { .. } | UnknownImprovement { .. } | ImprovementKindMismatch { .. } => {
                ErrorSeverity::Validation
            }
            UnknownLevel { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use ProgressionError::*;
        match self {
            AlreadyAtOrAboveTarget { .. } => "PROGRESSION_ALREADY_AT_OR_ABOVE_TARGET",
            MaxLevelExceeded { .. } => "PROGRESSION_MAX_LEVEL_EXCEEDED",
            Blocked { .. } => "PROGRESSION_BLOCKED",
            LevelNotPending { .. } => "PROGRESSION_LEVEL_NOT_PENDING",
            OutOfOrder { .. } => "PROGRESSION_OUT_OF_ORDER",
            UnknownLevel { .. } => "PROGRESSION_UNKNOWN_LEVEL",
            InvalidStat { .. } => "PROGRESSION_INVALID_STAT",
            NoSuchToken { .. } => "PROGRESSION_NO_SUCH_TOKEN",
            CapReached { .. } => "PROGRESSION_CAP_REACHED",
            UnknownImprovement { .. } => "PROGRESSION_UNKNOWN_IMPROVEMENT",
            ImprovementKindMismatch { .. } => "PROGRESSION_IMPROVEMENT_KIND_MISMATCH",
            NoPendingImprovement => "PROGRESSION_NO_PENDING_IMPROVEMENT",
            AlreadyUsed { .. } => "PROGRESSION_ALREADY_USED",
            MissingDetails { .. } => "PROGRESSION_MISSING_DETAILS",
        }
    }
}

/// Parses a player-supplied stat name.
pub fn parse_stat(name: &str) -> Result<StatName, ProgressionError> {
    StatName::from_str(name).map_err(|_| ProgressionError::InvalidStat {
        name: name.to_string(),
    })
}

/// Owns the level table and resolves level benefits against characters.
#[derive(Clone, Copy, Debug)]
pub struct ProgressionEngine<'a> {
    table: &'a LevelTable,
}

impl<'a> ProgressionEngine<'a> {
    pub fn new(table: &'a LevelTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a LevelTable {
        self.table
    }

    /// Whether the character may advance further right now.
    ///
    /// Blocking reasons in priority order: unresolved pending level-ups,
    /// unresolved stat-increase tokens, required-but-missing Base E.G.O.
    pub fn can_advance(&self, character: &Character) -> AdvanceGate {
        let progression = &character.progression;
        if !progression.pending_level_ups.is_empty() {
            return AdvanceGate::Blocked(BlockReason::PendingLevelUps {
                count: progression.pending_level_ups.len(),
            });
        }
        if !progression.stat_tokens.is_empty() {
            return AdvanceGate::Blocked(BlockReason::UnresolvedStatTokens {
                count: progression.stat_tokens.len(),
            });
        }
        if progression.base_ego_required && !progression.base_ego_created {
            return AdvanceGate::Blocked(BlockReason::BaseEgoMissing);
        }
        AdvanceGate::Clear
    }

    /// Advance to `target` (default: one level), enqueueing a pending
    /// level-up for every level gained. Grants nothing by itself.
    pub fn advance_level(
        &self,
        character: &mut Character,
        target: Option<u8>,
    ) -> Result<(), ProgressionError> {
        let current = character.stats.level;
        let target = target.unwrap_or(current.saturating_add(1));
        if target <= current {
            return Err(ProgressionError::AlreadyAtOrAboveTarget { current, target });
        }
        let max = self.table.max_level();
        if target > max {
            return Err(ProgressionError::MaxLevelExceeded { target, max });
        }
        if let AdvanceGate::Blocked(reason) = self.can_advance(character) {
            return Err(ProgressionError::Blocked { reason });
        }

        for level in (current + 1)..=target {
            character.progression.pending_level_ups.push(level);
        }
        character.stats.level = target;
        Ok(())
    }

    /// Apply the static benefit row for `level`.
    ///
    /// Idempotent: re-applying an already-applied level is a no-op. Pending
    /// levels resolve lowest-first; module, HP, and slot grants apply
    /// immediately, while the stat increase and the improvement are enqueued
    /// for the player to resolve.
    pub fn apply_level_benefits(
        &self,
        character: &mut Character,
        level: u8,
    ) -> Result<(), ProgressionError> {
        if character.progression.applied_levels.contains(&level) {
            return Ok(());
        }
        match character.progression.next_pending_level() {
            None => return Err(ProgressionError::LevelNotPending { level }),
            Some(expected) if expected != level => {
                return if character.progression.pending_level_ups.contains(&level) {
                    Err(ProgressionError::OutOfOrder { level, expected })
                } else {
                    Err(ProgressionError::LevelNotPending { level })
                };
            }
            Some(_) => {}
        }
        let row = *self
            .table
            .row(level)
            .ok_or(ProgressionError::UnknownLevel { level })?;

        character.resource_state.module_grants =
            character.resource_state.module_grants.plus(&row.module_grants);
        if row.skill_slot {
            character.resource_state.skill_slot_grants += 1;
        }
        if row.hp_grant > 0 {
            character.update_stats(|_, bonuses| bonuses.hp_max += row.hp_grant as i32);
        }
        if let Some(grant) = row.stat_increase {
            character.progression.stat_tokens.push(StatIncreaseToken {
                level,
                amount: grant.amount,
                cap: grant.cap,
            });
        }
        if let Some(kind) = row.improvement {
            character
                .progression
                .pending_improvements
                .push(PendingImprovement { level, kind });
        }
        match row.ego {
            Some(EgoGrant::Rank(rank)) => {
                let bonuses = &mut character.progression.ego_rank_bonuses;
                match rank {
                    crate::ability::EgoRank::Rank1 => bonuses.rank1 += 1,
                    crate::ability::EgoRank::Rank2 => bonuses.rank2 += 1,
                    crate::ability::EgoRank::Rank3 => bonuses.rank3 += 1,
                }
            }
            Some(EgoGrant::CreateBase) => character.progression.base_ego_required = true,
            None => {}
        }

        character.progression.pending_level_ups.retain(|&l| l != level);
        character.progression.applied_levels.insert(level);
        Ok(())
    }

    /// Spend the stat-increase token at `token` on `stat`.
    pub fn apply_stat_increase(
        &self,
        character: &mut Character,
        stat: StatName,
        token: usize,
    ) -> Result<(), ProgressionError> {
        let entry = *character
            .progression
            .stat_tokens
            .get(token)
            .ok_or(ProgressionError::NoSuchToken { index: token })?;

        let current = character.stats.get(stat);
        if let Some(cap) = entry.cap {
            if current >= cap {
                return Err(ProgressionError::CapReached { stat, cap });
            }
        }

        character.update_stats(|stats, _| {
            let mut value = stats.get(stat) + entry.amount as i32;
            if let Some(cap) = entry.cap {
                value = value.min(cap);
            }
            stats.set(stat, value);
        });
        character.progression.stat_tokens.remove(token);
        Ok(())
    }

    /// Resolve a pending improvement choice.
    pub fn apply_improvement(
        &self,
        character: &mut Character,
        kind: ImprovementKind,
        id: &ImprovementId,
        details: Option<ImprovementDetails>,
    ) -> Result<(), ProgressionError> {
        let (roster_kind, effect) =
            improvement_effect(id).ok_or_else(|| ProgressionError::UnknownImprovement {
                id: id.clone(),
            })?;
        if roster_kind != kind {
            return Err(ProgressionError::ImprovementKindMismatch { id: id.clone() });
        }
        let pending = character
            .progression
            .pending_improvements
            .iter()
            .position(|entry| entry.kind == kind)
            .ok_or(ProgressionError::NoPendingImprovement)?;
        if kind == ImprovementKind::Major && character.progression.major_ids_used.contains(id) {
            return Err(ProgressionError::AlreadyUsed { id: id.clone() });
        }

        let mut applied = AppliedImprovement {
            id: id.clone(),
            kind,
            chosen_stat: None,
            chosen_damage: None,
        };
        match effect {
            ImprovementEffect::MaxLight => {
                character.update_stats(|_, bonuses| bonuses.light_max += 1);
            }
            ImprovementEffect::Toughness => {
                character.update_stats(|_, bonuses| {
                    bonuses.hp_max += 10;
                    bonuses.stagger_max += 5;
                });
            }
            ImprovementEffect::ExtraAbilitySlot => {
                character.resource_state.extra_ability_slots += 1;
            }
            ImprovementEffect::Attune => {
                let Some(ImprovementDetails::Attunement { damage, stat }) = details else {
                    return Err(ProgressionError::MissingDetails { id: id.clone() });
                };
                character.update_stats(|stats, _| stats.set(stat, stats.get(stat) + 1));
                applied.chosen_stat = Some(stat);
                applied.chosen_damage = Some(damage);
            }
        }

        character.progression.pending_improvements.remove(pending);
        if kind == ImprovementKind::Major {
            character.progression.major_ids_used.insert(id.clone());
        }
        character.progression.improvements.push(applied);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;
    use crate::pool::ModuleCounts;
    use crate::progression::table::{LevelRow, StatIncreaseGrant};
    use crate::stats::CoreStats;

    fn table() -> LevelTable {
        LevelTable::new(vec![
            LevelRow {
                stat_increase: Some(StatIncreaseGrant {
                    amount: 1,
                    cap: Some(3),
                }),
                module_grants: ModuleCounts::new(1, 0, 0),
                hp_grant: 2,
                ..LevelRow::empty(2)
            },
            LevelRow {
                improvement: Some(ImprovementKind::Minor),
                skill_slot: true,
                ..LevelRow::empty(3)
            },
            LevelRow {
                ego: Some(EgoGrant::CreateBase),
                ..LevelRow::empty(4)
            },
        ])
    }

    fn character() -> Character {
        Character::new("c1", "Tester", CoreStats::default())
    }

    #[test]
    fn advance_enqueues_each_level() {
        let table = table();
        let engine = ProgressionEngine::new(&table);
        let mut character = character();
        engine.advance_level(&mut character, Some(3)).unwrap();
        assert_eq!(character.progression.pending_level_ups, vec![2, 3]);
        assert_eq!(character.stats.level, 3);
    }

    #[test]
    fn advance_rejects_bad_targets() {
        let table = table();
        let engine = ProgressionEngine::new(&table);
        let mut character = character();
        assert!(matches!(
            engine.advance_level(&mut character, Some(1)),
            Err(ProgressionError::AlreadyAtOrAboveTarget { .. })
        ));
        assert!(matches!(
            engine.advance_level(&mut character, Some(9)),
            Err(ProgressionError::MaxLevelExceeded { max: 4, .. })
        ));
    }

    #[test]
    fn benefits_apply_once() {
        let table = table();
        let engine = ProgressionEngine::new(&table);
        let mut character = character();
        engine.advance_level(&mut character, Some(2)).unwrap();

        engine.apply_level_benefits(&mut character, 2).unwrap();
        let grants = character.resource_state.module_grants;
        let tokens = character.progression.stat_tokens.len();

        // Second application is a no-op.
        engine.apply_level_benefits(&mut character, 2).unwrap();
        assert_eq!(character.resource_state.module_grants, grants);
        assert_eq!(character.progression.stat_tokens.len(), tokens);
    }

    #[test]
    fn benefits_resolve_lowest_first() {
        let table = table();
        let engine = ProgressionEngine::new(&table);
        let mut character = character();
        engine.advance_level(&mut character, Some(3)).unwrap();
        assert!(matches!(
            engine.apply_level_benefits(&mut character, 3),
            Err(ProgressionError::OutOfOrder { expected: 2, .. })
        ));
    }

    #[test]
    fn stat_token_respects_cap() {
        let table = table();
        let engine = ProgressionEngine::new(&table);
        let mut character = character();
        character.stats.might = 3;
        engine.advance_level(&mut character, Some(2)).unwrap();
        engine.apply_level_benefits(&mut character, 2).unwrap();
        assert!(matches!(
            engine.apply_stat_increase(&mut character, StatName::Might, 0),
            Err(ProgressionError::CapReached { cap: 3, .. })
        ));
        engine
            .apply_stat_increase(&mut character, StatName::Agility, 0)
            .unwrap();
        assert_eq!(character.stats.agility, 3);
        assert!(character.progression.stat_tokens.is_empty());
    }

    #[test]
    fn gate_priority_order() {
        let table = table();
        let engine = ProgressionEngine::new(&table);
        let mut character = character();
        engine.advance_level(&mut character, Some(4)).unwrap();
        assert!(matches!(
            engine.can_advance(&character),
            AdvanceGate::Blocked(BlockReason::PendingLevelUps { count: 3 })
        ));

        engine.apply_level_benefits(&mut character, 2).unwrap();
        engine.apply_level_benefits(&mut character, 3).unwrap();
        engine.apply_level_benefits(&mut character, 4).unwrap();
        assert!(matches!(
            engine.can_advance(&character),
            AdvanceGate::Blocked(BlockReason::UnresolvedStatTokens { count: 1 })
        ));

        engine
            .apply_stat_increase(&mut character, StatName::Persona, 0)
            .unwrap();
        assert!(matches!(
            engine.can_advance(&character),
            AdvanceGate::Blocked(BlockReason::BaseEgoMissing)
        ));

        character.progression.base_ego_created = true;
        assert!(engine.can_advance(&character).is_clear());
    }

    #[test]
    fn major_improvement_single_use() {
        let table = table();
        let engine = ProgressionEngine::new(&table);
        let mut character = character();
        character.progression.pending_improvements.extend([
            PendingImprovement {
                level: 5,
                kind: ImprovementKind::Major,
            },
            PendingImprovement {
                level: 9,
                kind: ImprovementKind::Major,
            },
        ]);
        let id = ImprovementId::new("workshop_rights");
        engine
            .apply_improvement(&mut character, ImprovementKind::Major, &id, None)
            .unwrap();
        assert_eq!(character.resource_state.extra_ability_slots, 1);
        assert!(matches!(
            engine.apply_improvement(&mut character, ImprovementKind::Major, &id, None),
            Err(ProgressionError::AlreadyUsed { .. })
        ));
    }
}
