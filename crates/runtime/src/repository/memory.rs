//! In-memory character repository, primarily for tests and local play.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use forge_core::character::{Character, CharacterId};

use super::{CharacterRepository, StorageError};

/// Stores characters as JSON values keyed by id.
///
/// Round-tripping through JSON keeps this implementation honest about the
/// "plain serializable record" contract.
#[derive(Debug, Default)]
pub struct MemoryCharacterRepository {
    records: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryCharacterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl CharacterRepository for MemoryCharacterRepository {
    async fn load(&self, id: &CharacterId) -> Result<Option<Character>, StorageError> {
        let records = self.records.read().await;
        match records.get(id.as_str()) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|error| StorageError(error.to_string())),
            None => Ok(None),
        }
    }

    async fn save(&self, character: &Character) -> Result<(), StorageError> {
        let value =
            serde_json::to_value(character).map_err(|error| StorageError(error.to_string()))?;
        self.records
            .write()
            .await
            .insert(character.id.as_str().to_string(), value);
        Ok(())
    }

    async fn delete(&self, id: &CharacterId) -> Result<(), StorageError> {
        self.records.write().await.remove(id.as_str());
        Ok(())
    }
}
