//! Module catalog loader.

use std::path::Path;

use forge_core::catalog::ModuleSpec;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Module catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleCatalog {
    pub modules: Vec<ModuleSpec>,
}

/// Loader for module specs from RON files.
pub struct ModuleLoader;

impl ModuleLoader {
    /// Load module specs from a RON file containing a [`ModuleCatalog`].
    pub fn load(path: &Path) -> LoadResult<Vec<ModuleSpec>> {
        let content = read_file(path)?;
        let catalog: ModuleCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse module catalog RON: {}", e))?;

        Ok(catalog.modules)
    }
}
