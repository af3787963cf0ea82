//! Traits describing immutable reference data.
//!
//! Catalogs expose base templates, module specs, and passives. The
//! [`Catalogs`] aggregate bundles them so the build session can access
//! everything it needs without hard coupling to concrete implementations,
//! and without any ambient global lookup.

mod base;
mod error;
mod module;
mod passive;

pub use base::{BakedEffect, BaseId, BaseOracle, BaseTemplate, UniqueLoadout};
pub use error::CatalogError;
pub use module::{
    ModuleBehavior, ModuleId, ModuleOption, ModuleOracle, ModuleRank, ModuleSpec, SlotGate,
    TargetKind, TargetRule,
};
pub use passive::{PassiveChoice, PassiveId, PassiveOracle, PassiveSpec};

/// Aggregates read-only catalogs required by the build session.
#[derive(Clone, Copy, Debug)]
pub struct Catalogs<'a, B, M, P>
where
    B: BaseOracle + ?Sized,
    M: ModuleOracle + ?Sized,
    P: PassiveOracle + ?Sized,
{
    bases: Option<&'a B>,
    modules: Option<&'a M>,
    passives: Option<&'a P>,
}

/// Trait-object form used throughout the engine.
pub type CatalogSource<'a> =
    Catalogs<'a, dyn BaseOracle + 'a, dyn ModuleOracle + 'a, dyn PassiveOracle + 'a>;

impl<'a, B, M, P> Catalogs<'a, B, M, P>
where
    B: BaseOracle + ?Sized,
    M: ModuleOracle + ?Sized,
    P: PassiveOracle + ?Sized,
{
    pub fn new(bases: Option<&'a B>, modules: Option<&'a M>, passives: Option<&'a P>) -> Self {
        Self {
            bases,
            modules,
            passives,
        }
    }

    pub fn with_all(bases: &'a B, modules: &'a M, passives: &'a P) -> Self {
        Self::new(Some(bases), Some(modules), Some(passives))
    }

    pub fn empty() -> Self {
        Self {
            bases: None,
            modules: None,
            passives: None,
        }
    }

    /// Returns the base catalog, or an error if not available.
    pub fn bases(&self) -> Result<&'a B, CatalogError> {
        self.bases.ok_or(CatalogError::BasesNotAvailable)
    }

    /// Returns the module catalog, or an error if not available.
    pub fn modules(&self) -> Result<&'a M, CatalogError> {
        self.modules.ok_or(CatalogError::ModulesNotAvailable)
    }

    /// Returns the passive catalog, or an error if not available.
    pub fn passives(&self) -> Result<&'a P, CatalogError> {
        self.passives.ok_or(CatalogError::PassivesNotAvailable)
    }
}

impl<'a, B, M, P> Catalogs<'a, B, M, P>
where
    B: BaseOracle + 'a,
    M: ModuleOracle + 'a,
    P: PassiveOracle + 'a,
{
    /// Converts this aggregate into the trait-object based [`CatalogSource`].
    pub fn as_source(&self) -> CatalogSource<'a> {
        let bases: Option<&'a dyn BaseOracle> = self.bases.map(|bases| bases as _);
        let modules: Option<&'a dyn ModuleOracle> = self.modules.map(|modules| modules as _);
        let passives: Option<&'a dyn PassiveOracle> = self.passives.map(|passives| passives as _);
        Catalogs::new(bases, modules, passives)
    }
}
