//! Build session behavior tests against a small in-memory catalog.

use crate::ability::{
    DamageKind, DefenseKind, DieIndex, DieSize, DieSpec, DieTagSpec, DieType, EffectTag,
    EgoBenefit, Trigger,
};
use crate::catalog::{
    BaseId, BaseOracle, BaseTemplate, Catalogs, ModuleBehavior, ModuleId, ModuleOption,
    ModuleOracle, ModuleRank, ModuleSpec, PassiveId, PassiveOracle, PassiveSpec, SlotGate,
    TargetRule, UniqueLoadout,
};
use crate::catalog::{BakedEffect, CatalogSource};
use crate::pool::ModuleCounts;
use crate::render;

use super::draft::ModuleTarget;
use super::error::BuildError;
use super::session::{AddModuleOutcome, BuildPhase, BuildSession, FinalizedAbility};

const SLASH: DieType = DieType::Damage(DamageKind::Slash);
const PIERCE: DieType = DieType::Damage(DamageKind::Pierce);
const BLOCK: DieType = DieType::Defense(DefenseKind::Block);

struct TestCatalog {
    bases: Vec<BaseTemplate>,
    modules: Vec<ModuleSpec>,
    passives: Vec<PassiveSpec>,
}

impl BaseOracle for TestCatalog {
    fn template(&self, id: &BaseId) -> Option<&BaseTemplate> {
        self.bases.iter().find(|template| &template.id == id)
    }

    fn all_templates(&self) -> Vec<&BaseTemplate> {
        self.bases.iter().collect()
    }
}

impl ModuleOracle for TestCatalog {
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

impl PassiveOracle for TestCatalog {
    fn passive(&self, id: &PassiveId) -> Option<&PassiveSpec> {
        self.passives.iter().find(|passive| &passive.id == id)
    }

    fn all_passives(&self) -> Vec<&PassiveSpec> {
        self.passives.iter().collect()
    }
}

fn catalog() -> TestCatalog {
    TestCatalog {
        bases: vec![
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
                "twin_fang",
                "Twin Fang",
                2,
                vec![
                    DieSpec::fixed(SLASH, DieSize::D8, 0),
                    DieSpec::fixed(PIERCE, DieSize::D6, 0),
                ],
            ),
            BaseTemplate::new(
                "mimicry",
                "Mimicry",
                3,
                vec![DieSpec::fixed(DieType::Damage(DamageKind::Blunt), DieSize::D10, 1)],
            )
            .with_unique(UniqueLoadout {
                die_effects: vec![(
                    0,
                    BakedEffect {
                        tag: EffectTag::new("Feast"),
                        template: "On hit, restore {cost} HP".into(),
                        trigger: None,
                    },
                )],
                ability_effects: vec![BakedEffect {
                    tag: EffectTag::new("Mimic"),
                    template: "Copies the last skill used against you".into(),
                    trigger: Some(Trigger::OnUse),
                }],
            }),
        ],
        modules: vec![
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
            .with_eligibility(vec![TargetRule::RoleIs(crate::ability::DieRole::Offensive)]),
            ModuleSpec::die_module(
                "ignite",
                "Ignite",
                ModuleRank::One,
                ModuleBehavior::TagEffect {
                    template: "Spread 1 Burn on hit".into(),
                    trigger: None,
                },
            )
            .with_tag(EffectTag::new("Burn"))
            .with_eligibility(vec![TargetRule::RoleIs(crate::ability::DieRole::Offensive)]),
            ModuleSpec::die_module(
                "sharpen",
                "Sharpen",
                ModuleRank::One,
                ModuleBehavior::PowerBonus(1),
            )
            .with_eligibility(vec![TargetRule::TypeIs(SLASH)])
            .repeating(),
            ModuleSpec::die_module(
                "bigger",
                "Bigger",
                ModuleRank::Two,
                ModuleBehavior::SizeUpgrade,
            )
            .repeating(),
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
                "seal",
                "Seal",
                ModuleRank::Two,
                ModuleBehavior::TagEffect {
                    template: "Locks after one use per Scene".into(),
                    trigger: None,
                },
            )
            .with_tag(EffectTag::new("Limit")),
            ModuleSpec::skill_module(
                "overflow",
                "Overflow",
                ModuleRank::Three,
                ModuleBehavior::TagEffect {
                    template: "Spend {cost} Light: all dice gain +1 power".into(),
                    trigger: Some(Trigger::OnUse),
                },
            ),
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
                    template: "Next offensive die gains +2 power".into(),
                },
                ModuleOption {
                    id: "defense".into(),
                    label: "Defense".into(),
                    template: "Next defensive die gains +2 power".into(),
                },
            ]),
        ],
        passives: vec![
            PassiveSpec::new("ember", "Ember", "On kill, gain 1 Emotion Point"),
            PassiveSpec::new("affinity", "Affinity", "Gain +1 power on {choice} dice")
                .with_choice("Choose a damage type", vec![
                    "Slash".into(),
                    "Pierce".into(),
                    "Blunt".into(),
                ]),
        ],
    }
}

fn source(catalog: &TestCatalog) -> CatalogSource<'_> {
    Catalogs::with_all(catalog, catalog, catalog).as_source()
}

/// Skill session with configuration done and innate slots open.
fn skill_at_modules(catalog: &TestCatalog, budget: ModuleCounts) -> BuildSession {
    let source = source(catalog);
    let mut session = BuildSession::new_skill(budget);
    session.select_base(&source, &BaseId::new("triple_threat")).unwrap();
    session.configure_die_type(DieIndex(0), SLASH).unwrap();
    session.configure_die_type(DieIndex(1), BLOCK).unwrap();
    session.configure_die_type(DieIndex(2), SLASH).unwrap();
    session.add_innate_modules().unwrap();
    session
}

fn fill_innate(session: &mut BuildSession, source: &CatalogSource<'_>) {
    session
        .add_module(source, &ModuleId::new("stronger"), ModuleRank::One, Some(DieIndex(1)), false, None)
        .unwrap();
    session
        .add_module(source, &ModuleId::new("burn"), ModuleRank::One, Some(DieIndex(0)), false, None)
        .unwrap();
    session
        .add_module(source, &ModuleId::new("stronger"), ModuleRank::One, Some(DieIndex(0)), false, None)
        .unwrap();
    session
        .add_module(source, &ModuleId::new("bigger"), ModuleRank::Two, Some(DieIndex(2)), false, None)
        .unwrap();
}

#[test]
fn unknown_base_is_rejected() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = BuildSession::new_skill(ModuleCounts::default());
    assert!(matches!(
        session.select_base(&source, &BaseId::new("nope")),
        Err(BuildError::UnknownBase { .. })
    ));
    assert_eq!(session.phase(), BuildPhase::SelectBase);
}

#[test]
fn configure_rejects_fixed_and_foreign_types() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = BuildSession::new_skill(ModuleCounts::default());
    session.select_base(&source, &BaseId::new("triple_threat")).unwrap();

    assert!(matches!(
        session.configure_die_type(DieIndex(0), BLOCK),
        Err(BuildError::InvalidChoice { .. })
    ));

    let mut fixed = BuildSession::new_skill(ModuleCounts::default());
    fixed.select_base(&source, &BaseId::new("twin_fang")).unwrap();
    assert!(matches!(
        fixed.configure_die_type(DieIndex(0), SLASH),
        Err(BuildError::NotConfigurable { .. })
    ));
}

#[test]
fn modules_require_open_innate_slots() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = BuildSession::new_skill(ModuleCounts::default());
    session.select_base(&source, &BaseId::new("triple_threat")).unwrap();
    assert!(matches!(
        session.add_module(&source, &ModuleId::new("stronger"), ModuleRank::One, None, false, None),
        Err(BuildError::OutOfPhase { .. })
    ));

    // Innate slots cannot open before configuration completes.
    assert!(matches!(
        session.add_innate_modules(),
        Err(BuildError::ConfigurationIncomplete)
    ));
}

#[test]
fn non_repeating_module_fails_on_second_add() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = skill_at_modules(&catalog, ModuleCounts::default());
    session
        .add_module(&source, &ModuleId::new("burn"), ModuleRank::One, Some(DieIndex(0)), false, None)
        .unwrap();
    let before = session.draft().modules.len();
    // Different target, same id: still a duplicate.
    assert!(matches!(
        session.add_module(&source, &ModuleId::new("burn"), ModuleRank::One, Some(DieIndex(2)), false, None),
        Err(BuildError::DuplicateModule { .. })
    ));
    assert_eq!(session.draft().modules.len(), before);
}

#[test]
fn shared_tags_conflict_only_on_the_same_die() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = skill_at_modules(&catalog, ModuleCounts::default());
    session
        .add_module(&source, &ModuleId::new("burn"), ModuleRank::One, Some(DieIndex(0)), false, None)
        .unwrap();
    assert!(matches!(
        session.add_module(&source, &ModuleId::new("ignite"), ModuleRank::One, Some(DieIndex(0)), false, None),
        Err(BuildError::TagConflict { .. })
    ));
    // A different die target coexists.
    session
        .add_module(&source, &ModuleId::new("ignite"), ModuleRank::One, Some(DieIndex(2)), false, None)
        .unwrap();
}

#[test]
fn ability_scoped_tags_conflict_at_ability_scope() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = skill_at_modules(&catalog, ModuleCounts::new(3, 2, 0));
    fill_innate(&mut session, &source);
    session
        .add_module(&source, &ModuleId::new("limiter"), ModuleRank::Two, None, true, None)
        .unwrap();
    // A different module carrying the same tag conflicts at ability scope.
    assert!(matches!(
        session.add_module(&source, &ModuleId::new("seal"), ModuleRank::Two, None, true, None),
        Err(BuildError::TagConflict { .. })
    ));
}

#[test]
fn auto_bind_and_ambiguity() {
    let catalog = catalog();
    let source = source(&catalog);
    // Both offensive dice are Slash: two candidates.
    let mut session = skill_at_modules(&catalog, ModuleCounts::new(3, 1, 0));
    fill_innate(&mut session, &source);
    match session
        .add_module(&source, &ModuleId::new("sharpen"), ModuleRank::One, None, true, None)
        .unwrap()
    {
        AddModuleOutcome::NeedsTarget { candidates } => {
            assert_eq!(candidates, vec![DieIndex(0), DieIndex(2)]);
        }
        outcome => panic!("expected NeedsTarget, got {outcome:?}"),
    }
    // Re-invoking with an explicit id resolves it.
    match session
        .add_module(&source, &ModuleId::new("sharpen"), ModuleRank::One, Some(DieIndex(2)), true, None)
        .unwrap()
    {
        AddModuleOutcome::Applied { index } => {
            assert_eq!(session.draft().modules[index].target, ModuleTarget::Die(DieIndex(2)));
        }
        outcome => panic!("expected Applied, got {outcome:?}"),
    }

    // One Slash die only: auto-binds without error.
    let source2 = self::source(&catalog);
    let mut single = BuildSession::new_skill(ModuleCounts::new(3, 1, 0));
    single.select_base(&source2, &BaseId::new("triple_threat")).unwrap();
    single.configure_die_type(DieIndex(0), SLASH).unwrap();
    single.configure_die_type(DieIndex(1), BLOCK).unwrap();
    single.configure_die_type(DieIndex(2), PIERCE).unwrap();
    single.add_innate_modules().unwrap();
    fill_innate(&mut single, &source2);
    match single
        .add_module(&source2, &ModuleId::new("sharpen"), ModuleRank::One, None, true, None)
        .unwrap()
    {
        AddModuleOutcome::Applied { index } => {
            assert_eq!(single.draft().modules[index].target, ModuleTarget::Die(DieIndex(0)));
        }
        outcome => panic!("expected Applied, got {outcome:?}"),
    }
}

#[test]
fn no_eligible_target_fails() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = BuildSession::new_skill(ModuleCounts::new(3, 1, 0));
    session.select_base(&source, &BaseId::new("triple_threat")).unwrap();
    session.configure_die_type(DieIndex(0), PIERCE).unwrap();
    session.configure_die_type(DieIndex(1), BLOCK).unwrap();
    session.configure_die_type(DieIndex(2), PIERCE).unwrap();
    session.add_innate_modules().unwrap();
    assert!(matches!(
        session.add_module(&source, &ModuleId::new("sharpen"), ModuleRank::One, None, false, None),
        Err(BuildError::NoEligibleTarget { .. })
    ));
}

#[test]
fn spares_wait_for_innate_quota_and_budget() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = skill_at_modules(&catalog, ModuleCounts::new(1, 0, 0));
    assert!(matches!(
        session.add_module(&source, &ModuleId::new("stronger"), ModuleRank::One, Some(DieIndex(0)), true, None),
        Err(BuildError::Validation { .. })
    ));
    fill_innate(&mut session, &source);
    session
        .add_module(&source, &ModuleId::new("stronger"), ModuleRank::One, Some(DieIndex(0)), true, None)
        .unwrap();
    // Budget of one rank-1 spare is now spent.
    assert!(matches!(
        session.add_module(&source, &ModuleId::new("stronger"), ModuleRank::One, Some(DieIndex(0)), true, None),
        Err(BuildError::InsufficientSpareModules { rank: ModuleRank::One })
    ));
}

#[test]
fn rank3_modules_always_draw_from_the_pool() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = skill_at_modules(&catalog, ModuleCounts::new(0, 0, 1));
    assert!(matches!(
        session.add_module(&source, &ModuleId::new("overflow"), ModuleRank::Three, None, false, None),
        Err(BuildError::Validation { .. })
    ));
    fill_innate(&mut session, &source);
    session
        .add_module(&source, &ModuleId::new("overflow"), ModuleRank::Three, None, true, None)
        .unwrap();
}

#[test]
fn slot_gates_check_ability_tags_and_cost() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = skill_at_modules(&catalog, ModuleCounts::new(3, 1, 0));
    fill_innate(&mut session, &source);
    assert!(matches!(
        session.add_module(&source, &ModuleId::new("limit_break"), ModuleRank::Special, None, false, None),
        Err(BuildError::GateUnsatisfied { .. })
    ));
    session
        .add_module(&source, &ModuleId::new("limiter"), ModuleRank::Two, None, true, None)
        .unwrap();
    session
        .add_module(&source, &ModuleId::new("limit_break"), ModuleRank::Special, None, false, None)
        .unwrap();
}

#[test]
fn option_modules_resolve_their_choice() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = skill_at_modules(&catalog, ModuleCounts::new(3, 1, 0));
    fill_innate(&mut session, &source);
    assert!(matches!(
        session.add_module(&source, &ModuleId::new("split_focus"), ModuleRank::Two, None, true, None),
        Err(BuildError::Validation { .. })
    ));
    assert!(matches!(
        session.add_module(&source, &ModuleId::new("split_focus"), ModuleRank::Two, None, true, Some("both")),
        Err(BuildError::InvalidChoice { .. })
    ));
    session
        .add_module(&source, &ModuleId::new("split_focus"), ModuleRank::Two, None, true, Some("offense"))
        .unwrap();
    assert!(
        session
            .draft()
            .ability_effects
            .iter()
            .any(|effect| effect.text == "Next offensive die gains +2 power")
    );
}

#[test]
fn remove_module_reverses_and_returns_the_slot() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = skill_at_modules(&catalog, ModuleCounts::new(1, 0, 0));
    fill_innate(&mut session, &source);
    let die2_size = session.draft().dice[2].size;
    assert_eq!(die2_size, DieSize::D8); // bigger upgraded d6 → d8

    session
        .add_module(&source, &ModuleId::new("stronger"), ModuleRank::One, Some(DieIndex(0)), true, None)
        .unwrap();
    let spare_index = session.draft().modules.len() - 1;
    let bonus_before = session.draft().dice[0].bonus;
    session.remove_module(spare_index).unwrap();
    assert_eq!(session.draft().dice[0].bonus, bonus_before - 1);

    // The slot is back: the same spare can be added again.
    session
        .add_module(&source, &ModuleId::new("stronger"), ModuleRank::One, Some(DieIndex(0)), true, None)
        .unwrap();
}

#[test]
fn removing_the_sole_source_drops_the_record() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = skill_at_modules(&catalog, ModuleCounts::new(3, 1, 0));
    fill_innate(&mut session, &source);
    // burn was applied to die 0 during innate fill; its record is present.
    let burn_index = session
        .draft()
        .modules
        .iter()
        .position(|module| module.module == ModuleId::new("burn"))
        .unwrap();
    session.remove_module(burn_index).unwrap();
    assert!(!session.draft().dice[0].effects.iter().any(|e| e.text.contains("Burn")));
}

#[test]
fn finalize_requires_exact_innate_quota() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = skill_at_modules(&catalog, ModuleCounts::default());
    session
        .add_module(&source, &ModuleId::new("stronger"), ModuleRank::One, Some(DieIndex(0)), false, None)
        .unwrap();
    assert!(matches!(
        session.finalize(None),
        Err(BuildError::InnateModulesMissing { rank1: 1, rank2: 0 })
    ));

    let mut full = skill_at_modules(&catalog, ModuleCounts::default());
    fill_innate(&mut full, &source);
    assert!(full.finalize(None).is_ok());
}

#[test]
fn burning_blade_scenario() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = skill_at_modules(&catalog, ModuleCounts::default());
    fill_innate(&mut session, &source);

    let FinalizedAbility::Skill(skill) = session.finalize(Some("Burning Blade")).unwrap() else {
        panic!("expected a skill artifact");
    };
    assert_eq!(skill.name, "Burning Blade");

    let lines: Vec<&str> = skill.description.lines().collect();
    assert_eq!(lines[0], "Burning Blade (2 Light)");
    assert_eq!(lines[1], "[Slash] d8+1: Inflict 2 Burn");
    // The boosted defensive die shows its +1 bonus.
    assert_eq!(lines[2], "[Block] d6+1");
    assert_eq!(lines[3], "[Slash] d8");
    assert_eq!(lines[4], "Modules: R1 Stronger x2, Burn; R2 Bigger");
    assert_eq!(skill.description.matches("Inflict 2 Burn").count(), 1);

    // Rendering the finalized artifact again is byte-identical.
    assert_eq!(render::describe_skill(&skill), skill.description);
    assert!(matches!(
        session.finalize(None),
        Err(BuildError::SessionComplete)
    ));
}

#[test]
fn unique_templates_skip_module_selection() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = BuildSession::new_skill(ModuleCounts::default());
    session.select_base(&source, &BaseId::new("mimicry")).unwrap();
    assert_eq!(session.phase(), BuildPhase::Finalize);

    let FinalizedAbility::Skill(skill) = session.finalize(None).unwrap() else {
        panic!("expected a skill artifact");
    };
    assert!(skill.unique);
    assert!(skill.description.contains("On Use: Copies the last skill used against you"));
    assert!(skill.description.contains("On hit, restore 3 HP"));
    assert!(!skill.description.contains("Modules:"));
}

fn ego_with_quota(catalog: &TestCatalog) -> BuildSession {
    let source = source(catalog);
    let mut session = BuildSession::new_base_ego();
    session.select_base(&source, &BaseId::new("twin_fang")).unwrap();
    assert_eq!(session.phase(), BuildPhase::AddModules);
    session
        .add_module(&source, &ModuleId::new("burn"), ModuleRank::One, Some(DieIndex(0)), false, None)
        .unwrap();
    session
        .add_module(&source, &ModuleId::new("stronger"), ModuleRank::One, Some(DieIndex(0)), false, None)
        .unwrap();
    session
        .add_module(&source, &ModuleId::new("stronger"), ModuleRank::One, Some(DieIndex(1)), false, None)
        .unwrap();
    session
        .add_module(&source, &ModuleId::new("bigger"), ModuleRank::Two, Some(DieIndex(1)), false, None)
        .unwrap();
    session
        .add_module(&source, &ModuleId::new("overflow"), ModuleRank::Three, None, false, None)
        .unwrap();
    session
}

#[test]
fn ego_walks_benefit_and_passive_states() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = ego_with_quota(&catalog);
    assert_eq!(session.phase(), BuildPhase::ChooseBenefit);

    // Finalizing early names the missing piece.
    assert!(matches!(session.finalize(None), Err(BuildError::BenefitNotChosen)));

    session.choose_benefit(EgoBenefit::PowerSurge).unwrap();
    // Two dice: +2 each (on top of the Stronger bonuses).
    assert_eq!(session.draft().dice[0].bonus, 3);
    assert_eq!(session.draft().dice[1].bonus, 3);

    assert!(matches!(session.finalize(None), Err(BuildError::PassiveNotChosen)));
    assert!(matches!(
        session.select_passive(&source, &PassiveId::new("unknown"), None),
        Err(BuildError::UnknownPassive { .. })
    ));
    session
        .select_passive(&source, &PassiveId::new("affinity"), Some("Slash"))
        .unwrap();

    let FinalizedAbility::Ego(ego) = session.finalize(Some("Red Gaze")).unwrap() else {
        panic!("expected an E.G.O. artifact");
    };
    assert_eq!(ego.benefit, EgoBenefit::PowerSurge);
    assert!(ego.description.contains("Passive — Affinity: Gain +1 power on Slash dice"));
    assert_eq!(render::describe_ego(&ego), ego.description);
}

#[test]
fn ego_quota_is_exactly_three_one_one() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = BuildSession::new_base_ego();
    session.select_base(&source, &BaseId::new("twin_fang")).unwrap();
    session
        .add_module(&source, &ModuleId::new("stronger"), ModuleRank::One, Some(DieIndex(0)), false, None)
        .unwrap();
    assert!(matches!(
        session.finalize(None),
        Err(BuildError::EgoQuotaUnmet { rank1: 1, rank2: 0, rank3: 0 })
    ));
    // The quota never draws spares.
    assert!(matches!(
        session.add_module(&source, &ModuleId::new("stronger"), ModuleRank::One, Some(DieIndex(1)), true, None),
        Err(BuildError::Validation { .. })
    ));
}

#[test]
fn cost_echo_rebuilds_rendered_text_from_templates() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = ego_with_quota(&catalog);

    let burn_text_before = session.draft().dice[0].effects[0].text.clone();
    assert_eq!(burn_text_before, "Inflict 2 Burn");
    assert!(
        session
            .draft()
            .ability_effects
            .iter()
            .any(|effect| effect.text == "Spend 2 Light: all dice gain +1 power")
    );

    session.choose_benefit(EgoBenefit::CostEcho).unwrap();
    assert_eq!(session.draft().dice[0].effects[0].text, "Inflict 3 Burn");
    assert!(
        session
            .draft()
            .ability_effects
            .iter()
            .any(|effect| effect.text == "Spend 3 Light: all dice gain +1 power")
    );

    session
        .select_passive(&source, &PassiveId::new("ember"), None)
        .unwrap();
    let FinalizedAbility::Ego(ego) = session.finalize(None).unwrap() else {
        panic!("expected an E.G.O. artifact");
    };
    assert!(ego.description.contains("Inflict 3 Burn"));
}

#[test]
fn passive_keeps_placeholder_until_choice_arrives() {
    let catalog = catalog();
    let source = source(&catalog);
    let mut session = ego_with_quota(&catalog);
    session.choose_benefit(EgoBenefit::PowerSurge).unwrap();

    session
        .select_passive(&source, &PassiveId::new("affinity"), None)
        .unwrap();
    assert_eq!(
        session.draft().passive.as_ref().unwrap().text,
        "Gain +1 power on {choice} dice"
    );

    // Re-selecting with a value resolves it; an out-of-set value fails.
    assert!(matches!(
        session.select_passive(&source, &PassiveId::new("affinity"), Some("Fire")),
        Err(BuildError::InvalidChoice { .. })
    ));
    session
        .select_passive(&source, &PassiveId::new("affinity"), Some("Pierce"))
        .unwrap();
    assert_eq!(
        session.draft().passive.as_ref().unwrap().text,
        "Gain +1 power on Pierce dice"
    );
}
