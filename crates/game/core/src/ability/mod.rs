//! Ability primitives: dice, effects, and finalized artifacts.

mod artifact;
mod die;
mod effect;

pub use artifact::{
    EgoBenefit, EgoCollection, EgoRank, FinalizedDie, FinalizedEgo, FinalizedModule,
    FinalizedSkill, PassiveSelection, RATED_EGO_SLOTS,
};
pub use die::{
    DamageKind, DefenseKind, DieIndex, DieRole, DieSize, DieSpec, DieTagSpec, DieType, notation,
};
pub use effect::{
    CHOICE_PLACEHOLDER, COST_PLACEHOLDER, EffectRecord, EffectTag, Trigger, substitute_choice,
    substitute_cost,
};
