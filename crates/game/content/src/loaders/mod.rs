//! Content loaders for reading catalog data from files.
//!
//! Loaders convert RON files into the same catalog types the built-in
//! roster uses; a loaded catalog and the built-in one are interchangeable.

pub mod bases;
pub mod modules;
pub mod passives;

pub use bases::BaseLoader;
pub use modules::ModuleLoader;
pub use passives::PassiveLoader;

use std::path::Path;

use forge_core::catalog::{BaseTemplate, ModuleSpec, PassiveSpec};

use crate::catalog::StandardCatalog;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Load a complete catalog from a directory holding `bases.ron`,
/// `modules.ron`, and `passives.ron`.
pub fn load_catalog(dir: &Path) -> LoadResult<StandardCatalog> {
    let bases: Vec<BaseTemplate> = BaseLoader::load(&dir.join("bases.ron"))?;
    let modules: Vec<ModuleSpec> = ModuleLoader::load(&dir.join("modules.ron"))?;
    let passives: Vec<PassiveSpec> = PassiveLoader::load(&dir.join("passives.ron"))?;
    if let Some(empty) = bases.iter().find(|template| template.dice.is_empty()) {
        anyhow::bail!("base template {} has no dice", empty.id);
    }
    Ok(StandardCatalog::from_parts(bases, modules, passives))
}
