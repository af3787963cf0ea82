//! The built-in standard catalog.

mod bases;
mod levels;
mod modules;
mod passives;

pub use bases::standard_bases;
pub use levels::standard_level_table;
pub use modules::standard_modules;
pub use passives::standard_passives;

use forge_core::catalog::{
    BaseId, BaseOracle, BaseTemplate, CatalogSource, Catalogs, ModuleId, ModuleOracle, ModuleRank,
    ModuleSpec, PassiveId, PassiveOracle, PassiveSpec,
};

/// Owns catalog data and serves all three oracle traits.
///
/// Built once at process start (from the built-in roster or from loaded
/// files) and never mutated by the engine.
#[derive(Clone, Debug)]
pub struct StandardCatalog {
    bases: Vec<BaseTemplate>,
    modules: Vec<ModuleSpec>,
    passives: Vec<PassiveSpec>,
}

impl StandardCatalog {
    /// The built-in roster.
    pub fn standard() -> Self {
        Self::from_parts(standard_bases(), standard_modules(), standard_passives())
    }

    /// Assemble a catalog from already-loaded parts.
    pub fn from_parts(
        bases: Vec<BaseTemplate>,
        modules: Vec<ModuleSpec>,
        passives: Vec<PassiveSpec>,
    ) -> Self {
        debug_assert!(bases.iter().all(|template| !template.dice.is_empty()));
        Self {
            bases,
            modules,
            passives,
        }
    }

    /// The trait-object aggregate the build session consumes.
    pub fn as_source(&self) -> CatalogSource<'_> {
        Catalogs::with_all(self, self, self).as_source()
    }
}

impl BaseOracle for StandardCatalog {
    fn template(&self, id: &BaseId) -> Option<&BaseTemplate> {
        self.bases.iter().find(|template| &template.id == id)
    }

    fn all_templates(&self) -> Vec<&BaseTemplate> {
        self.bases.iter().collect()
    }
}

impl ModuleOracle for StandardCatalog {
    fn module(&self, id: &ModuleId) -> Option<&ModuleSpec> {
        self.modules.iter().find(|module| &module.id == id)
    }

    fn by_rank(&self, rank: ModuleRank) -> Vec<&ModuleSpec> {
        self.modules
            .iter()
            .filter(|module| module.rank == rank)
            .collect()
    }
}

impl PassiveOracle for StandardCatalog {
    fn passive(&self, id: &PassiveId) -> Option<&PassiveSpec> {
        self.passives.iter().find(|passive| &passive.id == id)
    }

    fn all_passives(&self) -> Vec<&PassiveSpec> {
        self.passives.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::catalog::TargetKind;

    #[test]
    fn standard_catalog_is_well_formed() {
        let catalog = StandardCatalog::standard();
        assert!(catalog.template(&BaseId::new("triple_threat")).is_some());
        assert!(!catalog.by_rank(ModuleRank::One).is_empty());
        assert!(catalog.passive(&PassiveId::new("affinity")).is_some());

        // Option modules always enumerate their options.
        for module in catalog.by_rank(ModuleRank::Two) {
            if matches!(
                module.behavior,
                forge_core::catalog::ModuleBehavior::OptionEffect { .. }
            ) {
                assert!(!module.options.is_empty(), "{} has no options", module.id);
            }
        }

        // Die-targeted behavior never appears on skill-target modules.
        for module in catalog.by_rank(ModuleRank::Special) {
            assert_eq!(module.target, TargetKind::Skill);
        }
    }
}
