//! Runtime-layer errors.

use forge_core::build::BuildError;
use forge_core::character::CharacterId;
use forge_core::progression::ProgressionError;

use crate::repository::StorageError;

/// Result type for workshop operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors surfaced by the workshop service.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    #[error("character not found: {id}")]
    CharacterNotFound { id: CharacterId },

    #[error("no build session is active for {id}")]
    NoActiveSession { id: CharacterId },

    #[error("a build session is already active for {id}")]
    SessionAlreadyActive { id: CharacterId },

    #[error("all {slots} ability slots are in use")]
    NoFreeSlot { slots: u32 },

    #[error("the Base E.G.O. has already been created")]
    BaseEgoExists,

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
