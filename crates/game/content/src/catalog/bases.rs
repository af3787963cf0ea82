//! Built-in base templates.

use forge_core::ability::{
    DamageKind, DefenseKind, DieSize, DieSpec, DieTagSpec, DieType, EffectTag, Trigger,
};
use forge_core::catalog::{BakedEffect, BaseTemplate, UniqueLoadout};

const SLASH: DieType = DieType::Damage(DamageKind::Slash);
const PIERCE: DieType = DieType::Damage(DamageKind::Pierce);
const BLOCK: DieType = DieType::Defense(DefenseKind::Block);

/// The standard base roster.
pub fn standard_bases() -> Vec<BaseTemplate> {
    vec![
        BaseTemplate::new(
            "workhorse",
            "Workhorse",
            1,
            vec![
                DieSpec::fixed(SLASH, DieSize::D8, 1),
                DieSpec::fixed(BLOCK, DieSize::D6, 0),
            ],
        ),
        BaseTemplate::new(
            "triple_threat",
            "Triple Threat",
            2,
            vec![
                DieSpec::new(DieTagSpec::AnyOffensive, DieSize::D8, 0),
                DieSpec::new(DieTagSpec::BlockOrEvade, DieSize::D6, 0),
                DieSpec::new(DieTagSpec::AnyOffensive, DieSize::D6, 0),
            ],
        ),
        BaseTemplate::new(
            "lone_fang",
            "Lone Fang",
            2,
            vec![DieSpec::new(DieTagSpec::AnyOffensive, DieSize::D12, 0)],
        ),
        BaseTemplate::new(
            "stone_wall",
            "Stone Wall",
            1,
            vec![
                DieSpec::new(DieTagSpec::BlockOrEvade, DieSize::D8, 0),
                DieSpec::new(DieTagSpec::BlockOrEvade, DieSize::D8, 0),
            ],
        ),
        BaseTemplate::new(
            "twin_fang",
            "Twin Fang",
            2,
            vec![
                DieSpec::fixed(SLASH, DieSize::D8, 0),
                DieSpec::fixed(PIERCE, DieSize::D6, 0),
            ],
        ),
        // Unique: ships fully built and skips module selection.
        BaseTemplate::new(
            "borrowed_grief",
            "Borrowed Grief",
            3,
            vec![
                DieSpec::fixed(DieType::Damage(DamageKind::Blunt), DieSize::D10, 1),
                DieSpec::fixed(BLOCK, DieSize::D8, 1),
            ],
        )
        .with_unique(UniqueLoadout {
            die_effects: vec![(
                0,
                BakedEffect {
                    tag: EffectTag::new("Grief"),
                    template: "On hit, the target loses {cost} Stagger Resist".into(),
                    trigger: None,
                },
            )],
            ability_effects: vec![BakedEffect {
                tag: EffectTag::new("Resonance"),
                template: "If this clashes against an E.G.O., gain +2 power on every die".into(),
                trigger: Some(Trigger::OnUse),
            }],
        }),
    ]
}
