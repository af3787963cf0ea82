//! The level table: static benefit rows, injected like any other catalog.
//!
//! The explicit per-level table is authoritative for every grant kind,
//! including rank-2/3 modules. Rows are indexed by the level being reached;
//! level 1 is character creation and has no row.

use crate::ability::EgoRank;
use crate::character::ImprovementKind;
use crate::pool::ModuleCounts;

/// A stat increase granted by a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatIncreaseGrant {
    pub amount: u8,

    /// If set, the resulting stat may not exceed this value.
    pub cap: Option<i32>,
}

/// E.G.O.-related grant on a level row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EgoGrant {
    /// Additional modules for E.G.O. abilities of this rating.
    Rank(EgoRank),

    /// The character must create their Base E.G.O. from this level onward.
    CreateBase,
}

/// Static benefits of reaching one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelRow {
    pub level: u8,
    pub stat_increase: Option<StatIncreaseGrant>,
    pub module_grants: ModuleCounts,
    pub hp_grant: u32,
    pub improvement: Option<ImprovementKind>,
    pub skill_slot: bool,
    pub ego: Option<EgoGrant>,
}

impl LevelRow {
    /// An empty row for the given level.
    pub const fn empty(level: u8) -> Self {
        Self {
            level,
            stat_increase: None,
            module_grants: ModuleCounts::new(0, 0, 0),
            hp_grant: 0,
            improvement: None,
            skill_slot: false,
            ego: None,
        }
    }
}

/// The full level table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelTable {
    rows: Vec<LevelRow>,
}

impl LevelTable {
    /// Build a table from rows. Rows must be for levels ≥ 2, strictly
    /// ascending; violations are reference-data corruption and only tests
    /// assert against them.
    pub fn new(rows: Vec<LevelRow>) -> Self {
        debug_assert!(rows.windows(2).all(|pair| pair[0].level < pair[1].level));
        debug_assert!(rows.first().is_none_or(|row| row.level >= 2));
        Self { rows }
    }

    /// The benefit row for reaching `level`.
    pub fn row(&self, level: u8) -> Option<&LevelRow> {
        self.rows.iter().find(|row| row.level == level)
    }

    /// Highest level the table supports.
    pub fn max_level(&self) -> u8 {
        self.rows.last().map_or(1, |row| row.level)
    }

    /// The level from which a Base E.G.O. is required, if the table has a
    /// `CreateBase` row.
    pub fn base_ego_level(&self) -> Option<u8> {
        self.rows
            .iter()
            .find(|row| matches!(row.ego, Some(EgoGrant::CreateBase)))
            .map(|row| row.level)
    }
}
