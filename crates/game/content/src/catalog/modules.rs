//! Built-in module roster.

use forge_core::ability::{DamageKind, DefenseKind, DieRole, DieType, EffectTag, Trigger};
use forge_core::catalog::{
    ModuleBehavior, ModuleOption, ModuleRank, ModuleSpec, SlotGate, TargetRule,
};

/// The standard module roster, all ranks.
pub fn standard_modules() -> Vec<ModuleSpec> {
    let mut modules = rank_one();
    modules.extend(rank_two());
    modules.extend(rank_three());
    modules.extend(special());
    modules
}

fn rank_one() -> Vec<ModuleSpec> {
    vec![
        ModuleSpec::die_module(
            "stronger",
            "Stronger",
            ModuleRank::One,
            ModuleBehavior::PowerBonus(1),
        )
        .repeating(),
        ModuleSpec::die_module(
            "burn",
            "Burn",
            ModuleRank::One,
            ModuleBehavior::TagEffect {
                template: "Inflict {cost} Burn".into(),
                trigger: None,
            },
        )
        .with_tag(EffectTag::new("Burn"))
        .with_eligibility(vec![TargetRule::RoleIs(DieRole::Offensive)]),
        ModuleSpec::die_module(
            "fragile",
            "Fragile",
            ModuleRank::One,
            ModuleBehavior::TagEffect {
                template: "Inflict 1 Fragile".into(),
                trigger: None,
            },
        )
        .with_tag(EffectTag::new("Fragile"))
        .with_eligibility(vec![
            TargetRule::RoleIs(DieRole::Offensive),
            TargetRule::NotTagged(EffectTag::new("Fragile")),
        ]),
        ModuleSpec::die_module(
            "sharpen",
            "Sharpen",
            ModuleRank::One,
            ModuleBehavior::PowerBonus(1),
        )
        .with_eligibility(vec![TargetRule::TypeIs(DieType::Damage(DamageKind::Slash))])
        .repeating(),
        ModuleSpec::die_module(
            "slippery",
            "Slippery",
            ModuleRank::One,
            ModuleBehavior::TagEffect {
                template: "On evade win, recover {cost} Light".into(),
                trigger: None,
            },
        )
        .with_tag(EffectTag::new("Slippery"))
        .with_eligibility(vec![TargetRule::TypeIs(DieType::Defense(
            DefenseKind::Evade,
        ))]),
        ModuleSpec::skill_module(
            "focus",
            "Focus",
            ModuleRank::One,
            ModuleBehavior::TagEffect {
                template: "Gain 1 Focus".into(),
                trigger: Some(Trigger::OnUse),
            },
        )
        .with_tag(EffectTag::new("Focus")),
    ]
}

fn rank_two() -> Vec<ModuleSpec> {
    vec![
        ModuleSpec::die_module(
            "bigger",
            "Bigger",
            ModuleRank::Two,
            ModuleBehavior::SizeUpgrade,
        )
        .repeating(),
        ModuleSpec::die_module(
            "guardbreak",
            "Guardbreak",
            ModuleRank::Two,
            ModuleBehavior::TagEffect {
                template: "On clash win, destroy one of the target's Block dice".into(),
                trigger: None,
            },
        )
        .with_tag(EffectTag::new("Guardbreak"))
        .with_eligibility(vec![TargetRule::RoleIs(DieRole::Offensive)]),
        ModuleSpec::skill_module(
            "limiter",
            "Limiter",
            ModuleRank::Two,
            ModuleBehavior::TagEffect {
                template: "Usable once per Scene".into(),
                trigger: None,
            },
        )
        .with_tag(EffectTag::new("Limit")),
        ModuleSpec::skill_module(
            "split_focus",
            "Split Focus",
            ModuleRank::Two,
            ModuleBehavior::OptionEffect {
                trigger: Some(Trigger::ClashWin),
            },
        )
        .with_options(vec![
            ModuleOption {
                id: "offense".into(),
                label: "Offense".into(),
                template: "Your next offensive die gains +2 power".into(),
            },
            ModuleOption {
                id: "defense".into(),
                label: "Defense".into(),
                template: "Your next defensive die gains +2 power".into(),
            },
        ]),
    ]
}

fn rank_three() -> Vec<ModuleSpec> {
    vec![
        ModuleSpec::skill_module(
            "overflow",
            "Overflow",
            ModuleRank::Three,
            ModuleBehavior::TagEffect {
                template: "Spend {cost} Light: all dice gain +1 power".into(),
                trigger: Some(Trigger::OnUse),
            },
        ),
        ModuleSpec::die_module(
            "executioner",
            "Executioner",
            ModuleRank::Three,
            ModuleBehavior::TagEffect {
                template: "Deal double damage to Staggered targets".into(),
                trigger: None,
            },
        )
        .with_tag(EffectTag::new("Execute"))
        .with_eligibility(vec![TargetRule::RoleIs(DieRole::Offensive)]),
    ]
}

fn special() -> Vec<ModuleSpec> {
    vec![
        ModuleSpec::skill_module(
            "limit_break",
            "Limit Break",
            ModuleRank::Special,
            ModuleBehavior::TagEffect {
                template: "Reroll every losing clash die".into(),
                trigger: Some(Trigger::ClashLose),
            },
        )
        .with_gates(vec![
            SlotGate::RequiresAbilityTag(EffectTag::new("Limit")),
            SlotGate::MinimumCost(2),
        ]),
    ]
}
