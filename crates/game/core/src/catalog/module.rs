//! Module catalog: rank-tagged modifiers attachable to dice or whole abilities.
//!
//! Module behavior is a closed set of kinds dispatched by pattern matching;
//! adding a new module of an existing kind is pure data and needs no new code
//! path.

use core::fmt;

use crate::ability::{DieRole, DieType, EffectTag, Trigger};

/// Identifier of a module.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Module ranks. Rank 1-3 draw on the character's module pool; Special
/// modules sit outside the pool and are admitted only through their gates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModuleRank {
    One,
    Two,
    Three,
    Special,
}

impl ModuleRank {
    /// Short label used in module summaries.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::One => "R1",
            Self::Two => "R2",
            Self::Three => "R3",
            Self::Special => "Special",
        }
    }
}

impl fmt::Display for ModuleRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a module attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    Die,
    Skill,
}

/// One selectable option of an option-bearing module.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleOption {
    pub id: String,
    pub label: String,
    pub template: String,
}

/// The closed set of module behavior kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModuleBehavior {
    /// Adds a flat amount to the target die's power.
    PowerBonus(i32),

    /// Advances the target die one step up the size ladder (capped).
    SizeUpgrade,

    /// Appends a tagged effect rendered from `template`.
    TagEffect {
        template: String,
        trigger: Option<Trigger>,
    },

    /// Like `TagEffect`, but the template comes from the chosen option.
    OptionEffect { trigger: Option<Trigger> },
}

/// Predicate restricting which dice a module may target.
///
/// A module's eligibility is the conjunction of its rules.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRule {
    /// Die must currently carry this exact type (e.g. only Evade dice).
    TypeIs(DieType),

    /// Die must have this role.
    RoleIs(DieRole),

    /// Die must not already carry an effect with this tag
    /// (e.g. only dice not already inflicting Fragile).
    NotTagged(EffectTag),
}

/// Slot-capacity gate checked against the ability as a whole.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotGate {
    /// The ability must already carry this ability-scoped tag.
    RequiresAbilityTag(EffectTag),

    /// The ability's cost must be at least this much.
    MinimumCost(u8),
}

/// A rank-tagged modifier: target kind, uniqueness tag, behavior, gates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleSpec {
    pub id: ModuleId,
    pub name: String,
    pub rank: ModuleRank,
    pub target: TargetKind,

    /// Mutually-exclusive marker; dies and abilities reject duplicate tags.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tag: Option<EffectTag>,

    /// Whether the module may be applied more than once per ability.
    #[cfg_attr(feature = "serde", serde(default))]
    pub repeating: bool,

    pub behavior: ModuleBehavior,

    /// Options for `OptionEffect` behavior; empty otherwise.
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Vec<ModuleOption>,

    /// Conjunction of per-die eligibility rules. Empty means any die.
    #[cfg_attr(feature = "serde", serde(default))]
    pub eligibility: Vec<TargetRule>,

    /// Ability-wide admission gates. Empty means always admitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub gates: Vec<SlotGate>,
}

impl ModuleSpec {
    /// Plain die-targeted module with the given behavior.
    pub fn die_module(
        id: impl Into<ModuleId>,
        name: impl Into<String>,
        rank: ModuleRank,
        behavior: ModuleBehavior,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rank,
            target: TargetKind::Die,
            tag: None,
            repeating: false,
            behavior,
            options: Vec::new(),
            eligibility: Vec::new(),
            gates: Vec::new(),
        }
    }

    /// Ability-targeted module with the given behavior.
    pub fn skill_module(
        id: impl Into<ModuleId>,
        name: impl Into<String>,
        rank: ModuleRank,
        behavior: ModuleBehavior,
    ) -> Self {
        Self {
            target: TargetKind::Skill,
            ..Self::die_module(id, name, rank, behavior)
        }
    }

    pub fn with_tag(mut self, tag: impl Into<EffectTag>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn repeating(mut self) -> Self {
        self.repeating = true;
        self
    }

    pub fn with_eligibility(mut self, rules: Vec<TargetRule>) -> Self {
        self.eligibility = rules;
        self
    }

    pub fn with_gates(mut self, gates: Vec<SlotGate>) -> Self {
        self.gates = gates;
        self
    }

    pub fn with_options(mut self, options: Vec<ModuleOption>) -> Self {
        self.options = options;
        self
    }
}

/// Read-only lookup over module specs.
pub trait ModuleOracle: Send + Sync {
    fn module(&self, id: &ModuleId) -> Option<&ModuleSpec>;

    /// All modules of a rank, in catalog order.
    fn by_rank(&self, rank: ModuleRank) -> Vec<&ModuleSpec>;
}
