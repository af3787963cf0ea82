//! Level progression: the level table and the engine that resolves it.

mod engine;
mod improvement;
mod table;

pub use engine::{AdvanceGate, BlockReason, ProgressionEngine, ProgressionError, parse_stat};
pub use improvement::{ImprovementDetails, ImprovementEffect, improvement_effect};
pub use table::{EgoGrant, LevelRow, LevelTable, StatIncreaseGrant};
