//! Data-driven catalog definitions and loaders.
//!
//! This crate houses the static reference data the build engine consumes:
//! - Base templates (built-in roster, or data-driven via RON)
//! - Module specs by rank
//! - Passives
//! - The standard level table
//!
//! Catalog data is consumed through the forge-core oracle traits and never
//! appears in character state. All loaders use forge-core types directly with
//! serde for RON deserialization.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{
    StandardCatalog, standard_bases, standard_level_table, standard_modules, standard_passives,
};

#[cfg(feature = "loaders")]
pub use loaders::{BaseLoader, ModuleLoader, PassiveLoader, load_catalog};
