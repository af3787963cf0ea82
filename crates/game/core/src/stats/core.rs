//! Core stats - the stored layer of the stat system.
//!
//! The six core attributes plus character level are the Single Source of
//! Truth and the only stats that are permanently stored. Everything else
//! (HP, Stagger Resist, Speed die, Light, Emotion Points) is derived.

/// Names of the six core attributes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatName {
    Might,
    Vitality,
    Agility,
    Intellect,
    Instinct,
    Persona,
}

/// The six core attributes that define a character.
///
/// - **Might**: physical power; drives max HP
/// - **Vitality**: resilience; drives Stagger Resist
/// - **Agility**: reflexes; drives the Speed die size
/// - **Intellect**: drives the base rank-1 module allotment and milestones
/// - **Instinct**: drives the Max Light ladder
/// - **Persona**: force of self; equals Emotion Points
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreStats {
    pub might: i32,
    pub vitality: i32,
    pub agility: i32,
    pub intellect: i32,
    pub instinct: i32,
    pub persona: i32,
    pub level: u8,
}

impl CoreStats {
    pub const fn new(
        might: i32,
        vitality: i32,
        agility: i32,
        intellect: i32,
        instinct: i32,
        persona: i32,
    ) -> Self {
        Self {
            might,
            vitality,
            agility,
            intellect,
            instinct,
            persona,
            level: 1,
        }
    }

    /// Read a stat by name.
    pub const fn get(&self, stat: StatName) -> i32 {
        match stat {
            StatName::Might => self.might,
            StatName::Vitality => self.vitality,
            StatName::Agility => self.agility,
            StatName::Intellect => self.intellect,
            StatName::Instinct => self.instinct,
            StatName::Persona => self.persona,
        }
    }

    /// Write a stat by name.
    pub const fn set(&mut self, stat: StatName, value: i32) {
        match stat {
            StatName::Might => self.might = value,
            StatName::Vitality => self.vitality = value,
            StatName::Agility => self.agility = value,
            StatName::Instinct => self.instinct = value,
            StatName::Intellect => self.intellect = value,
            StatName::Persona => self.persona = value,
        }
    }
}

impl Default for CoreStats {
    /// Default stats: all 2 (a fresh fixer), level 1.
    fn default() -> Self {
        Self::new(2, 2, 2, 2, 2, 2)
    }
}
