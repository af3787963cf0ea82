//! Build session errors.
//!
//! Every command validates fully before mutating; an `Err` from a session
//! command means the draft is unchanged. Ambiguous targeting is not an error
//! (see `AddModuleOutcome::NeedsTarget`).

use crate::ability::{DieIndex, EffectTag};
use crate::catalog::{BaseId, CatalogError, ModuleId, ModuleRank, PassiveId};
use crate::error::{CoreError, ErrorSeverity};

use super::session::BuildPhase;

/// Errors from build-session commands.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// A required catalog was missing (wiring bug, not player error).
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("unknown base: {id}")]
    UnknownBase { id: BaseId },

    #[error("{operation} is not legal in the {phase} phase")]
    OutOfPhase {
        operation: &'static str,
        phase: BuildPhase,
    },

    #[error("the session is complete and must not be reused")]
    SessionComplete,

    #[error("{die} has a fixed type")]
    NotConfigurable { die: DieIndex },

    #[error("invalid choice: {value}")]
    InvalidChoice { value: String },

    #[error("this ability has no {die}")]
    UnknownDie { die: DieIndex },

    #[error("unknown module: {id}")]
    ModuleNotFound { id: ModuleId },

    #[error("no spare {rank} modules remain in the pool")]
    InsufficientSpareModules { rank: ModuleRank },

    #[error("no eligible die for module {id}")]
    NoEligibleTarget { id: ModuleId },

    #[error("module {id} cannot be added twice")]
    DuplicateModule { id: ModuleId },

    #[error("tag [{tag}] is already present on {scope}")]
    TagConflict { tag: EffectTag, scope: String },

    #[error("{die} is not an eligible target: {reason}")]
    TargetIneligible { die: DieIndex, reason: String },

    #[error("{reason}")]
    GateUnsatisfied { reason: String },

    #[error("{reason}")]
    Validation { reason: String },

    #[error("every configurable die needs a chosen type")]
    ConfigurationIncomplete,

    #[error("innate modules missing: {rank1}/3 rank-1, {rank2}/1 rank-2")]
    InnateModulesMissing { rank1: u32, rank2: u32 },

    #[error("E.G.O. quota unmet: {rank1}/3 rank-1, {rank2}/1 rank-2, {rank3}/1 rank-3")]
    EgoQuotaUnmet { rank1: u32, rank2: u32, rank3: u32 },

    #[error("a power benefit must be chosen")]
    BenefitNotChosen,

    #[error("a passive must be chosen")]
    PassiveNotChosen,

    #[error("unknown passive: {id}")]
    UnknownPassive { id: PassiveId },

    #[error("no applied module at position {index}")]
    NoSuchModuleSlot { index: usize },
}

impl BuildError {
    pub(super) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

impl CoreError for BuildError {
    fn severity(&self) -> ErrorSeverity {
        use BuildError::*;
        match self {
            Catalog(error) => error.severity(),
            UnknownBase { .. } | InvalidChoice { .. } | ModuleNotFound { .. }
            | UnknownPassive { .. } | UnknownDie { .. } | SessionComplete => {
                ErrorSeverity::Validation
            }
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use BuildError::*;
        match self {
            Catalog(_) => "BUILD_CATALOG_UNAVAILABLE",
            UnknownBase { .. } => "BUILD_UNKNOWN_BASE",
            OutOfPhase { .. } => "BUILD_OUT_OF_PHASE",
            SessionComplete => "BUILD_SESSION_COMPLETE",
            NotConfigurable { .. } => "BUILD_NOT_CONFIGURABLE",
            InvalidChoice { .. } => "BUILD_INVALID_CHOICE",
            UnknownDie { .. } => "BUILD_UNKNOWN_DIE",
            ModuleNotFound { .. } => "BUILD_MODULE_NOT_FOUND",
            InsufficientSpareModules { .. } => "BUILD_INSUFFICIENT_SPARE_MODULES",
            NoEligibleTarget { .. } => "BUILD_NO_ELIGIBLE_TARGET",
            DuplicateModule { .. } => "BUILD_DUPLICATE_MODULE",
            TagConflict { .. } => "BUILD_TAG_CONFLICT",
            TargetIneligible { .. } => "BUILD_TARGET_INELIGIBLE",
            GateUnsatisfied { .. } => "BUILD_GATE_UNSATISFIED",
            Validation { .. } => "BUILD_VALIDATION",
            ConfigurationIncomplete => "BUILD_CONFIGURATION_INCOMPLETE",
            InnateModulesMissing { .. } => "BUILD_INNATE_MODULES_MISSING",
            EgoQuotaUnmet { .. } => "BUILD_EGO_QUOTA_UNMET",
            BenefitNotChosen => "BUILD_BENEFIT_NOT_CHOSEN",
            PassiveNotChosen => "BUILD_PASSIVE_NOT_CHOSEN",
            UnknownPassive { .. } => "BUILD_UNKNOWN_PASSIVE",
            NoSuchModuleSlot { .. } => "BUILD_NO_SUCH_MODULE_SLOT",
        }
    }
}
