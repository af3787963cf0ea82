//! Dice primitives: roles, types, sizes, and display notation.
//!
//! Every ability is a bag of dice. A die has a role (offensive or defensive),
//! a concrete type once configured (a damage kind or a defense kind), a size
//! on the fixed d4..d12 ladder, and a flat power bonus.

use core::fmt;

/// Whether a die attacks or answers an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DieRole {
    Offensive,
    Defensive,
}

/// Damage kinds an offensive die can carry.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageKind {
    Slash,
    Pierce,
    Blunt,
}

/// Defense kinds a defensive die can carry.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefenseKind {
    Block,
    Evade,
}

/// Concrete die type: the tag printed in front of the notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DieType {
    Damage(DamageKind),
    Defense(DefenseKind),
}

impl DieType {
    /// The role implied by this type.
    pub const fn role(&self) -> DieRole {
        match self {
            Self::Damage(_) => DieRole::Offensive,
            Self::Defense(_) => DieRole::Defensive,
        }
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Damage(kind) => kind.fmt(f),
            Self::Defense(kind) => kind.fmt(f),
        }
    }
}

/// Die sizes on the upgrade ladder.
///
/// Size-upgrade modules advance a die one step; the ladder is capped at d12,
/// so upgrading a d12 is a no-op recorded as such.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DieSize {
    D4,
    D6,
    D8,
    D10,
    D12,
}

impl DieSize {
    /// Number of faces.
    pub const fn sides(&self) -> u8 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
        }
    }

    /// One step up the ladder; saturates at d12.
    pub const fn upgraded(&self) -> Self {
        match self {
            Self::D4 => Self::D6,
            Self::D6 => Self::D8,
            Self::D8 => Self::D10,
            Self::D10 | Self::D12 => Self::D12,
        }
    }
}

impl fmt::Display for DieSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// Canonical display notation for a die: `d8`, `d8+2`, `d8-1`.
pub fn notation(size: DieSize, bonus: i32) -> String {
    match bonus {
        0 => size.to_string(),
        b if b > 0 => format!("{size}+{b}"),
        b => format!("{size}{b}"),
    }
}

/// How a template die's type is determined.
///
/// Fixed dice ship with their type; configurable dice are chosen during the
/// `ConfigureDice` phase from the set their spec allows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DieTagSpec {
    /// The type is baked into the template.
    Fixed(DieType),

    /// Player picks any damage kind.
    AnyOffensive,

    /// Player picks Block or Evade.
    BlockOrEvade,
}

impl DieTagSpec {
    /// True when the player must pick the type.
    pub const fn is_configurable(&self) -> bool {
        !matches!(self, Self::Fixed(_))
    }

    /// The role this spec commits the die to.
    pub const fn role(&self) -> DieRole {
        match self {
            Self::Fixed(die_type) => die_type.role(),
            Self::AnyOffensive => DieRole::Offensive,
            Self::BlockOrEvade => DieRole::Defensive,
        }
    }

    /// Whether `choice` is inside this spec's allowed set.
    pub const fn allows(&self, choice: DieType) -> bool {
        match (self, choice) {
            (Self::AnyOffensive, DieType::Damage(_)) => true,
            (Self::BlockOrEvade, DieType::Defense(_)) => true,
            _ => false,
        }
    }
}

/// One die of a base template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieSpec {
    pub tag: DieTagSpec,
    pub size: DieSize,
    pub bonus: i32,
}

impl DieSpec {
    pub const fn new(tag: DieTagSpec, size: DieSize, bonus: i32) -> Self {
        Self { tag, size, bonus }
    }

    /// Shorthand for a fixed-type die.
    pub const fn fixed(die_type: DieType, size: DieSize, bonus: i32) -> Self {
        Self::new(DieTagSpec::Fixed(die_type), size, bonus)
    }
}

/// Stable index of a die inside its ability, in template order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieIndex(pub u8);

impl fmt::Display for DieIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "die {}", self.0 + 1)
    }
}
