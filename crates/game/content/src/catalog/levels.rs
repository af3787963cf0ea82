//! The standard level table.
//!
//! The explicit per-level rows are authoritative for every grant kind; there
//! is no formula-derived fallback for rank-2/3 module grants.

use forge_core::ability::EgoRank;
use forge_core::character::ImprovementKind;
use forge_core::pool::ModuleCounts;
use forge_core::progression::{EgoGrant, LevelRow, LevelTable, StatIncreaseGrant};

/// Levels 2 through 10; level 1 is character creation.
pub fn standard_level_table() -> LevelTable {
    LevelTable::new(vec![
        LevelRow {
            stat_increase: Some(StatIncreaseGrant {
                amount: 1,
                cap: None,
            }),
            module_grants: ModuleCounts::new(1, 0, 0),
            hp_grant: 2,
            ..LevelRow::empty(2)
        },
        LevelRow {
            stat_increase: Some(StatIncreaseGrant {
                amount: 1,
                cap: Some(6),
            }),
            module_grants: ModuleCounts::new(0, 1, 0),
            improvement: Some(ImprovementKind::Minor),
            skill_slot: true,
            ..LevelRow::empty(3)
        },
        LevelRow {
            stat_increase: Some(StatIncreaseGrant {
                amount: 1,
                cap: None,
            }),
            hp_grant: 2,
            ego: Some(EgoGrant::CreateBase),
            ..LevelRow::empty(4)
        },
        LevelRow {
            module_grants: ModuleCounts::new(1, 1, 0),
            improvement: Some(ImprovementKind::Major),
            skill_slot: true,
            ..LevelRow::empty(5)
        },
        LevelRow {
            stat_increase: Some(StatIncreaseGrant {
                amount: 1,
                cap: None,
            }),
            hp_grant: 2,
            ego: Some(EgoGrant::Rank(EgoRank::Rank1)),
            ..LevelRow::empty(6)
        },
        LevelRow {
            module_grants: ModuleCounts::new(0, 0, 1),
            improvement: Some(ImprovementKind::Minor),
            skill_slot: true,
            ..LevelRow::empty(7)
        },
        LevelRow {
            stat_increase: Some(StatIncreaseGrant {
                amount: 1,
                cap: Some(8),
            }),
            hp_grant: 2,
            ego: Some(EgoGrant::Rank(EgoRank::Rank2)),
            ..LevelRow::empty(8)
        },
        LevelRow {
            module_grants: ModuleCounts::new(1, 0, 1),
            improvement: Some(ImprovementKind::Major),
            skill_slot: true,
            ..LevelRow::empty(9)
        },
        LevelRow {
            stat_increase: Some(StatIncreaseGrant {
                amount: 2,
                cap: None,
            }),
            hp_grant: 4,
            ego: Some(EgoGrant::Rank(EgoRank::Rank3)),
            ..LevelRow::empty(10)
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_spans_to_level_ten() {
        let table = standard_level_table();
        assert_eq!(table.max_level(), 10);
        assert_eq!(table.base_ego_level(), Some(4));
        for level in 2..=10 {
            assert!(table.row(level).is_some(), "missing row for level {level}");
        }
    }
}
