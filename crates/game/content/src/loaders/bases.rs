//! Base template loader.

use std::path::Path;

use forge_core::catalog::BaseTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Base catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseCatalog {
    pub bases: Vec<BaseTemplate>,
}

/// Loader for base templates from RON files.
pub struct BaseLoader;

impl BaseLoader {
    /// Load base templates from a RON file containing a [`BaseCatalog`].
    pub fn load(path: &Path) -> LoadResult<Vec<BaseTemplate>> {
        let content = read_file(path)?;
        let catalog: BaseCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse base catalog RON: {}", e))?;

        Ok(catalog.bases)
    }
}
