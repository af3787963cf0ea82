//! Repository contract for character persistence.
//!
//! The engine treats a [`Character`] as a plain, fully-serializable record
//! when crossing this boundary. Saves are fire-and-forget from the
//! workshop's perspective: the in-memory state is authoritative and the
//! last writer wins. Multi-device concurrent editing is unsupported by
//! design (characters are single-owner); see the crate docs.

mod memory;

pub use memory::MemoryCharacterRepository;

use async_trait::async_trait;

use forge_core::character::{Character, CharacterId};

/// A storage failure, carried as an opaque message.
#[derive(Debug, Clone, thiserror::Error)]
#[error("storage failure: {0}")]
pub struct StorageError(pub String);

/// Repository for character records.
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Load a character by id; `None` when no record exists.
    async fn load(&self, id: &CharacterId) -> Result<Option<Character>, StorageError>;

    /// Save (upsert) a character record.
    async fn save(&self, character: &Character) -> Result<(), StorageError>;

    /// Delete a character record.
    async fn delete(&self, id: &CharacterId) -> Result<(), StorageError>;
}
