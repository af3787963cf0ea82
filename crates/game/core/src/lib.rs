//! Deterministic ability-building and progression logic.
//!
//! `forge-core` defines the canonical rules (catalogs, the build session,
//! progression, resource accounting, rendering) and exposes pure APIs with no
//! I/O, no logging, and no global state. Catalogs and the level table are
//! immutable data injected at construction; all draft mutation flows through
//! [`build::BuildSession`], and supporting crates depend on the types
//! re-exported here.

pub mod ability;
pub mod build;
pub mod catalog;
pub mod character;
pub mod error;
pub mod pool;
pub mod progression;
pub mod render;
pub mod stats;

pub use ability::{
    DamageKind, DefenseKind, DieIndex, DieRole, DieSize, DieSpec, DieTagSpec, DieType,
    EffectRecord, EffectTag, EgoBenefit, EgoCollection, EgoRank, FinalizedDie, FinalizedEgo,
    FinalizedModule, FinalizedSkill, PassiveSelection, Trigger,
};
pub use build::{
    AbilityKind, AddModuleOutcome, BuildDraft, BuildError, BuildPhase, BuildSession,
    FinalizedAbility,
};
pub use catalog::{
    BaseId, BaseOracle, BaseTemplate, CatalogError, CatalogSource, Catalogs, ModuleBehavior,
    ModuleId, ModuleOption, ModuleOracle, ModuleRank, ModuleSpec, PassiveId, PassiveOracle,
    PassiveSpec, SlotGate, TargetKind, TargetRule, UniqueLoadout,
};
pub use character::{Character, CharacterId, ImprovementId, ImprovementKind, ProgressionState};
pub use error::{CoreError, ErrorSeverity};
pub use pool::{ModuleCounts, ResourcePool};
pub use progression::{
    AdvanceGate, BlockReason, ImprovementDetails, LevelRow, LevelTable, ProgressionEngine,
    ProgressionError,
};
pub use stats::{CoreStats, DerivedStats, ResourceCurrent, StatName};
