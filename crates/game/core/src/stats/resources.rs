//! Current resource trackers (stored state).
//!
//! Maximums are recomputed from core stats; the current values here are the
//! only part of the resource system that is persisted. Reconciliation after
//! a stat change follows two rules:
//!
//! - clamp: current may never exceed a newly-lowered maximum
//! - raise-if-full: current rises with a raised maximum only when the
//!   character was at full before the change (damage taken is preserved
//!   across stat growth)

use super::derived::DerivedStats;

/// Current HP, Stagger Resist, Light, and Emotion Points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceCurrent {
    pub hp: u32,
    pub stagger: u32,
    pub light: u32,
    pub emotion: u32,
}

impl ResourceCurrent {
    /// All trackers at their maximums (fresh character).
    pub const fn at_max(max: &DerivedStats) -> Self {
        Self {
            hp: max.hp_max,
            stagger: max.stagger_max,
            light: max.light_max,
            emotion: max.emotion_max,
        }
    }

    /// Reconcile every tracker against recomputed maximums.
    pub fn reconcile(&mut self, old: &DerivedStats, new: &DerivedStats) {
        self.hp = reconcile_one(self.hp, old.hp_max, new.hp_max);
        self.stagger = reconcile_one(self.stagger, old.stagger_max, new.stagger_max);
        self.light = reconcile_one(self.light, old.light_max, new.light_max);
        self.emotion = reconcile_one(self.emotion, old.emotion_max, new.emotion_max);
    }
}

fn reconcile_one(current: u32, old_max: u32, new_max: u32) -> u32 {
    if current >= old_max {
        // Was at (or somehow above) full: follow the maximum.
        new_max
    } else {
        current.min(new_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::DieSize;

    fn max(hp: u32, stagger: u32) -> DerivedStats {
        DerivedStats {
            hp_max: hp,
            stagger_max: stagger,
            speed_die: DieSize::D6,
            light_max: 3,
            emotion_max: 2,
        }
    }

    #[test]
    fn full_trackers_follow_raised_max() {
        let old = max(24, 14);
        let new = max(30, 14);
        let mut current = ResourceCurrent::at_max(&old);
        current.reconcile(&old, &new);
        assert_eq!(current.hp, 30);
    }

    #[test]
    fn damage_taken_is_preserved() {
        let old = max(24, 14);
        let new = max(30, 14);
        let mut current = ResourceCurrent::at_max(&old);
        current.hp = 20;
        current.reconcile(&old, &new);
        assert_eq!(current.hp, 20);
    }

    #[test]
    fn current_clamps_to_lowered_max() {
        let old = max(30, 14);
        let new = max(24, 14);
        let mut current = ResourceCurrent::at_max(&old);
        current.hp = 28;
        current.reconcile(&old, &new);
        assert_eq!(current.hp, 24);
    }
}
