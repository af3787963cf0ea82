//! Base template catalog: the fixed starting shapes for skills and E.G.O.

use core::fmt;

use crate::ability::{DieSpec, EffectTag, Trigger};

/// Identifier of a base template.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BaseId(String);

impl BaseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BaseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// An effect baked into a unique template's loadout.
///
/// Baked effects carry templates like module effects do; `{cost}` is
/// substituted against the template's own cost when the base is selected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BakedEffect {
    pub tag: EffectTag,
    pub template: String,
    pub trigger: Option<Trigger>,
}

/// The fixed loadout of a unique template.
///
/// Unique templates ship fully built: their effects are pre-applied on
/// selection and the session skips the module states entirely.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniqueLoadout {
    /// Effects bound to a die by template-order index.
    pub die_effects: Vec<(u8, BakedEffect)>,

    /// Ability-scoped effects.
    pub ability_effects: Vec<BakedEffect>,
}

/// Fixed starting shape for a skill or E.G.O.: dice plus a Light cost.
///
/// Invariant: every template has at least one die. Loaders and built-in
/// catalogs are responsible for upholding it; tests assert it defensively.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseTemplate {
    pub id: BaseId,
    pub name: String,
    pub cost: u8,
    pub dice: Vec<DieSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unique: Option<UniqueLoadout>,
}

impl BaseTemplate {
    pub fn new(
        id: impl Into<BaseId>,
        name: impl Into<String>,
        cost: u8,
        dice: Vec<DieSpec>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
            dice,
            unique: None,
        }
    }

    pub fn with_unique(mut self, loadout: UniqueLoadout) -> Self {
        self.unique = Some(loadout);
        self
    }

    pub fn is_unique(&self) -> bool {
        self.unique.is_some()
    }
}

/// Read-only lookup over base templates.
pub trait BaseOracle: Send + Sync {
    fn template(&self, id: &BaseId) -> Option<&BaseTemplate>;

    /// Returns every template in this catalog, in catalog order.
    fn all_templates(&self) -> Vec<&BaseTemplate>;
}
