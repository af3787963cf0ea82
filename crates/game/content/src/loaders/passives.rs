//! Passive catalog loader.

use std::path::Path;

use forge_core::catalog::PassiveSpec;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Passive catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassiveCatalog {
    pub passives: Vec<PassiveSpec>,
}

/// Loader for passives from RON files.
pub struct PassiveLoader;

impl PassiveLoader {
    /// Load passives from a RON file containing a [`PassiveCatalog`].
    pub fn load(path: &Path) -> LoadResult<Vec<PassiveSpec>> {
        let content = read_file(path)?;
        let catalog: PassiveCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse passive catalog RON: {}", e))?;

        Ok(catalog.passives)
    }
}
