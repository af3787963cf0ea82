//! Derived stats - recomputed from the core stat block, never hand-edited.
//!
//! Maximums are a pure function of [`CoreStats`] plus accumulated flat grants
//! (level-table HP grants, improvements). They are NOT stored on their own;
//! the character recomputes them whenever the inputs change and reconciles
//! its current trackers against the new maximums.

use crate::ability::DieSize;

use super::core::CoreStats;

/// Flat grants that stack on top of the computed maximums.
///
/// Sources: level-table HP grants, improvements (+10 HP & +5 Stagger Resist,
/// +1 Max Light). Stored on the character; there is nothing percentage-based
/// in this system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedBonuses {
    pub hp_max: i32,
    pub stagger_max: i32,
    pub light_max: i32,
}

impl DerivedBonuses {
    pub const fn new() -> Self {
        Self {
            hp_max: 0,
            stagger_max: 0,
            light_max: 0,
        }
    }
}

/// The derived stat block.
///
/// Base formulas (before flat grants):
/// - HP max: 20 + Might × 2
/// - Stagger Resist max: 10 + Vitality × 2
/// - Speed die: stepped lookup by Agility
/// - Light max: 3 + Instinct threshold ladder
/// - Emotion Points max: Persona
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    pub hp_max: u32,
    pub stagger_max: u32,
    pub speed_die: DieSize,
    pub light_max: u32,
    pub emotion_max: u32,
}

impl DerivedStats {
    /// Compute the full derived block from core stats and flat grants.
    pub fn compute(core: &CoreStats, bonuses: &DerivedBonuses) -> Self {
        Self {
            hp_max: clamp_min_one(20 + core.might * 2 + bonuses.hp_max),
            stagger_max: clamp_min_one(10 + core.vitality * 2 + bonuses.stagger_max),
            speed_die: speed_die(core.agility),
            light_max: clamp_min_one(3 + light_ladder(core.instinct) + bonuses.light_max),
            emotion_max: core.persona.max(0) as u32,
        }
    }

    /// Compute with no grants (base stats only).
    pub fn from_base(core: &CoreStats) -> Self {
        Self::compute(core, &DerivedBonuses::new())
    }
}

/// Speed die size by Agility, stepped.
///
/// ≤2 → d4, 3-4 → d6, 5-6 → d8, 7-8 → d10, 9+ → d12
fn speed_die(agility: i32) -> DieSize {
    match agility {
        i32::MIN..=2 => DieSize::D4,
        3..=4 => DieSize::D6,
        5..=6 => DieSize::D8,
        7..=8 => DieSize::D10,
        _ => DieSize::D12,
    }
}

/// Max Light bonus ladder by Instinct: +1 at 4, +1 at 7, +1 at 10.
fn light_ladder(instinct: i32) -> i32 {
    [4, 7, 10].iter().filter(|&&step| instinct >= step).count() as i32
}

fn clamp_min_one(value: i32) -> u32 {
    value.max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hp_scales_with_might() {
        let mut core = CoreStats::default();
        core.might = 3;
        assert_eq!(DerivedStats::from_base(&core).hp_max, 26);
    }

    #[test]
    fn speed_die_steps() {
        let steps = [(1, DieSize::D4), (3, DieSize::D6), (6, DieSize::D8), (8, DieSize::D10), (11, DieSize::D12)];
        for (agility, expected) in steps {
            let mut core = CoreStats::default();
            core.agility = agility;
            assert_eq!(DerivedStats::from_base(&core).speed_die, expected);
        }
    }

    #[test]
    fn light_ladder_thresholds() {
        let mut core = CoreStats::default();
        core.instinct = 3;
        assert_eq!(DerivedStats::from_base(&core).light_max, 3);
        core.instinct = 4;
        assert_eq!(DerivedStats::from_base(&core).light_max, 4);
        core.instinct = 10;
        assert_eq!(DerivedStats::from_base(&core).light_max, 6);
    }

    #[test]
    fn grants_stack_flat() {
        let core = CoreStats::default();
        let bonuses = DerivedBonuses {
            hp_max: 10,
            stagger_max: 5,
            light_max: 1,
        };
        let derived = DerivedStats::compute(&core, &bonuses);
        assert_eq!(derived.hp_max, 34);
        assert_eq!(derived.stagger_max, 19);
        assert_eq!(derived.light_max, 4);
    }
}
