//! The build session: a short-lived, single-owner draft walking a fixed
//! state machine.
//!
//! `SelectBase → ConfigureDice → AddModules → [ChooseBenefit →
//! SelectPassive] → Finalize`, terminal `Complete`. The two bracketed states
//! exist only for E.G.O. sessions. Abandoning a session is simply dropping
//! it; nothing is persisted until the caller merges the finalized artifact.
//!
//! Catalogs are passed into each command (they are injected data, not
//! session state), and every command validates fully before mutating.

use crate::ability::{
    DieIndex, DieType, EffectRecord, EffectTag, EgoBenefit, FinalizedDie, FinalizedEgo,
    FinalizedModule, FinalizedSkill, PassiveSelection, substitute_choice, substitute_cost,
};
use crate::catalog::{
    BaseId, CatalogSource, ModuleBehavior, ModuleId, ModuleRank, ModuleSpec, PassiveId, TargetKind,
};
use crate::pool::{INNATE_RANK1, INNATE_RANK2, ModuleCounts};
use crate::render;

use super::draft::{
    AbilityKind, AppliedEffect, AppliedModule, BuildDraft, ModuleTarget, WorkingDie,
};
use super::error::BuildError;
use super::validate::{
    check_gates, check_repeat, check_tag_unique, die_ineligible_reason, eligible_dice,
};

/// States of the build machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildPhase {
    SelectBase,
    ConfigureDice,
    AddModules,
    ChooseBenefit,
    SelectPassive,
    Finalize,
    Complete,
}

/// Result of an `add_module` call.
///
/// `NeedsTarget` is not a failure: the module is ambiguous between several
/// eligible dice and the caller re-invokes with an explicit target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddModuleOutcome {
    Applied { index: usize },
    NeedsTarget { candidates: Vec<DieIndex> },
}

/// The artifact a session emits on finalize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FinalizedAbility {
    Skill(FinalizedSkill),
    Ego(FinalizedEgo),
}

/// A short-lived draft walking the build state machine.
///
/// One session exists per "create skill" / "create Base E.G.O." action; it
/// exclusively owns its [`BuildDraft`] and exposes only command methods.
#[derive(Clone, Debug)]
pub struct BuildSession {
    phase: BuildPhase,
    draft: BuildDraft,
    spare_budget: ModuleCounts,
    spare_used: ModuleCounts,
}

impl BuildSession {
    /// Start a skill build. `spare_budget` is the pool availability at
    /// session start; spare additions are checked against it.
    pub fn new_skill(spare_budget: ModuleCounts) -> Self {
        Self {
            phase: BuildPhase::SelectBase,
            draft: BuildDraft::new(AbilityKind::Skill),
            spare_budget,
            spare_used: ModuleCounts::default(),
        }
    }

    /// Start a Base E.G.O. build. The fixed 3/1/1 quota draws nothing from
    /// the spare pool.
    pub fn new_base_ego() -> Self {
        Self {
            phase: BuildPhase::SelectBase,
            draft: BuildDraft::new(AbilityKind::Ego),
            spare_budget: ModuleCounts::default(),
            spare_used: ModuleCounts::default(),
        }
    }

    pub fn phase(&self) -> BuildPhase {
        self.phase
    }

    /// Read-only view of the draft for presentation.
    pub fn draft(&self) -> &BuildDraft {
        &self.draft
    }

    /// True iff every configurable die has a chosen type.
    pub fn is_configuration_complete(&self) -> bool {
        self.draft.is_configuration_complete()
    }

    fn guard(&self, operation: &'static str, allowed: &[BuildPhase]) -> Result<(), BuildError> {
        if self.phase == BuildPhase::Complete {
            return Err(BuildError::SessionComplete);
        }
        if !allowed.contains(&self.phase) {
            return Err(BuildError::OutOfPhase {
                operation,
                phase: self.phase,
            });
        }
        Ok(())
    }

    /// Select the base template and copy its dice into working records.
    ///
    /// Unique templates pre-apply their baked loadout and skip the module
    /// states entirely.
    pub fn select_base(
        &mut self,
        catalogs: &CatalogSource<'_>,
        id: &BaseId,
    ) -> Result<(), BuildError> {
        self.guard("select base", &[BuildPhase::SelectBase])?;
        let template = catalogs
            .bases()?
            .template(id)
            .ok_or_else(|| BuildError::UnknownBase { id: id.clone() })?;

        self.draft.base = Some(template.id.clone());
        self.draft.base_name = template.name.clone();
        self.draft.cost = template.cost;
        self.draft.dice = template
            .dice
            .iter()
            .enumerate()
            .map(|(index, spec)| WorkingDie::from_spec(index as u8, spec))
            .collect();

        if let Some(loadout) = &template.unique {
            self.draft.unique = true;
            let cost = self.draft.cost;
            for (die_index, baked) in &loadout.die_effects {
                if let Some(die) = self.draft.die_mut(DieIndex(*die_index)) {
                    die.effects.push(EffectRecord::render(
                        baked.tag.clone(),
                        baked.template.clone(),
                        cost,
                        None,
                        baked.trigger,
                    ));
                }
            }
            for baked in &loadout.ability_effects {
                self.draft.ability_effects.push(EffectRecord::render(
                    baked.tag.clone(),
                    baked.template.clone(),
                    cost,
                    None,
                    baked.trigger,
                ));
            }
            self.phase = match self.draft.kind {
                AbilityKind::Skill => BuildPhase::Finalize,
                AbilityKind::Ego => BuildPhase::ChooseBenefit,
            };
            return Ok(());
        }

        self.phase = if self.draft.kind == AbilityKind::Ego && self.draft.is_configuration_complete()
        {
            BuildPhase::AddModules
        } else {
            BuildPhase::ConfigureDice
        };
        Ok(())
    }

    /// Choose the type of a configurable die.
    pub fn configure_die_type(
        &mut self,
        die: DieIndex,
        choice: DieType,
    ) -> Result<(), BuildError> {
        self.guard("configure die type", &[BuildPhase::ConfigureDice])?;
        let working = self
            .draft
            .die(die)
            .ok_or(BuildError::UnknownDie { die })?;
        if !working.tag.is_configurable() {
            return Err(BuildError::NotConfigurable { die });
        }
        if !working.tag.allows(choice) {
            return Err(BuildError::InvalidChoice {
                value: choice.to_string(),
            });
        }

        // Checks passed; bind and refresh the display notation.
        let working = self
            .draft
            .die_mut(die)
            .ok_or(BuildError::UnknownDie { die })?;
        working.chosen = Some(choice);
        working.refresh_notation();

        if self.draft.kind == AbilityKind::Ego && self.draft.is_configuration_complete() {
            self.phase = BuildPhase::AddModules;
        }
        Ok(())
    }

    /// Open the three rank-1 + one rank-2 mandatory slots (skills only).
    ///
    /// Spare modules may not be added before this transition; calling it out
    /// of order fails.
    pub fn add_innate_modules(&mut self) -> Result<(), BuildError> {
        if self.draft.kind != AbilityKind::Skill {
            return Err(BuildError::validation(
                "only skills carry innate module slots",
            ));
        }
        self.guard("open innate slots", &[BuildPhase::ConfigureDice])?;
        if !self.draft.is_configuration_complete() {
            return Err(BuildError::ConfigurationIncomplete);
        }
        self.phase = BuildPhase::AddModules;
        Ok(())
    }

    /// Add a module, resolving its target if ambiguous.
    ///
    /// Resolution order: lookup, spare-budget check, target resolution
    /// (auto-bind on a single eligible die, `NeedsTarget` on several), then
    /// the all-or-nothing validation gates, then application.
    pub fn add_module(
        &mut self,
        catalogs: &CatalogSource<'_>,
        id: &ModuleId,
        rank: ModuleRank,
        target: Option<DieIndex>,
        as_spare: bool,
        option: Option<&str>,
    ) -> Result<AddModuleOutcome, BuildError> {
        self.guard("add module", &[BuildPhase::AddModules])?;
        let spec = catalogs
            .modules()?
            .module(id)
            .filter(|spec| spec.rank == rank)
            .ok_or_else(|| BuildError::ModuleNotFound { id: id.clone() })?;

        self.check_quota(rank, as_spare)?;

        // Resolve the target before the deeper gates so ambiguity surfaces
        // as an outcome, not an error.
        let target = match spec.target {
            TargetKind::Skill => {
                if target.is_some() {
                    return Err(BuildError::validation(format!(
                        "module {id} targets the whole ability, not a die"
                    )));
                }
                ModuleTarget::Ability
            }
            TargetKind::Die => match target {
                Some(index) => {
                    let die = self
                        .draft
                        .die(index)
                        .ok_or(BuildError::UnknownDie { die: index })?;
                    if let Some(reason) = die_ineligible_reason(spec, die) {
                        return Err(BuildError::TargetIneligible { die: index, reason });
                    }
                    ModuleTarget::Die(index)
                }
                None => {
                    let mut candidates = eligible_dice(spec, &self.draft);
                    match candidates.len() {
                        0 => return Err(BuildError::NoEligibleTarget { id: id.clone() }),
                        1 => ModuleTarget::Die(candidates.remove(0)),
                        _ => return Ok(AddModuleOutcome::NeedsTarget { candidates }),
                    }
                }
            },
        };

        check_gates(spec, &self.draft)?;
        check_repeat(spec, &self.draft)?;
        check_tag_unique(spec, &self.draft, target)?;

        let effect = self.build_effect(spec, target, option)?;
        self.apply_effect(&effect, target)?;

        if as_spare {
            self.spare_used.add_rank(rank, 1);
        }
        self.draft.modules.push(AppliedModule {
            module: id.clone(),
            name: spec.name.clone(),
            rank,
            target,
            tag: spec.tag.clone(),
            option: option.map(str::to_string),
            spare: as_spare,
            effect,
        });

        if self.draft.kind == AbilityKind::Ego && self.ego_quota_complete() {
            self.phase = BuildPhase::ChooseBenefit;
        }
        Ok(AddModuleOutcome::Applied {
            index: self.draft.modules.len() - 1,
        })
    }

    /// Remove an applied module, reversing its effect exactly and returning
    /// its resource slot.
    pub fn remove_module(&mut self, index: usize) -> Result<(), BuildError> {
        self.guard("remove module", &[BuildPhase::AddModules])?;
        if index >= self.draft.modules.len() {
            return Err(BuildError::NoSuchModuleSlot { index });
        }
        let removed = self.draft.modules.remove(index);
        match &removed.effect {
            AppliedEffect::PowerBonus { amount } => {
                if let ModuleTarget::Die(die_index) = removed.target {
                    if let Some(die) = self.draft.die_mut(die_index) {
                        die.bonus -= amount;
                        die.refresh_notation();
                    }
                }
            }
            AppliedEffect::SizeUpgrade { from, .. } => {
                if let ModuleTarget::Die(die_index) = removed.target {
                    if let Some(die) = self.draft.die_mut(die_index) {
                        die.size = *from;
                        die.refresh_notation();
                    }
                }
            }
            AppliedEffect::TagEffect { record } => {
                // Keep the record while any other applied module still
                // renders the same text on the same target.
                let still_sourced = self.draft.modules.iter().any(|other| {
                    other.target == removed.target
                        && matches!(&other.effect, AppliedEffect::TagEffect { record: kept }
                            if kept.text == record.text)
                });
                if !still_sourced {
                    match removed.target {
                        ModuleTarget::Die(die_index) => {
                            if let Some(die) = self.draft.die_mut(die_index) {
                                die.effects.retain(|kept| kept.text != record.text);
                            }
                        }
                        ModuleTarget::Ability => {
                            self.draft
                                .ability_effects
                                .retain(|kept| kept.text != record.text);
                        }
                    }
                }
            }
        }
        if removed.spare {
            self.spare_used.sub_rank(removed.rank, 1);
        }
        Ok(())
    }

    /// Choose the E.G.O. power benefit.
    pub fn choose_benefit(&mut self, benefit: EgoBenefit) -> Result<(), BuildError> {
        if self.draft.kind != AbilityKind::Ego {
            return Err(BuildError::validation(
                "only E.G.O. abilities choose a power benefit",
            ));
        }
        self.guard("choose benefit", &[BuildPhase::ChooseBenefit])?;

        self.draft.benefit = Some(benefit);
        match benefit {
            EgoBenefit::PowerSurge => {
                let bonus = EgoBenefit::surge_bonus(self.draft.dice.len());
                for die in &mut self.draft.dice {
                    die.bonus += bonus;
                    die.refresh_notation();
                }
            }
            EgoBenefit::CostEcho => {
                // Every stored template re-renders against the raised cost.
                self.draft.rebuild_effect_texts();
            }
        }
        self.phase = BuildPhase::SelectPassive;
        Ok(())
    }

    /// Choose the E.G.O. passive, optionally resolving its `{choice}`.
    ///
    /// Re-invoking (before finalize) replaces the selection, so an
    /// unresolved placeholder can be filled in later.
    pub fn select_passive(
        &mut self,
        catalogs: &CatalogSource<'_>,
        id: &PassiveId,
        choice: Option<&str>,
    ) -> Result<(), BuildError> {
        if self.draft.kind != AbilityKind::Ego {
            return Err(BuildError::validation("only E.G.O. abilities carry a passive"));
        }
        self.guard(
            "select passive",
            &[BuildPhase::SelectPassive, BuildPhase::Finalize],
        )?;
        let spec = catalogs
            .passives()?
            .passive(id)
            .ok_or_else(|| BuildError::UnknownPassive { id: id.clone() })?;

        if let (Some(choice_spec), Some(value)) = (&spec.choice, choice) {
            if !choice_spec.allows(value) {
                return Err(BuildError::InvalidChoice {
                    value: value.to_string(),
                });
            }
        }

        let with_cost = substitute_cost(&spec.template, self.draft.effective_cost());
        let text = substitute_choice(&with_cost, choice);
        self.draft.passive = Some(PassiveSelection {
            id: spec.id.clone(),
            name: spec.name.clone(),
            template: spec.template.clone(),
            text,
            choice: choice.map(str::to_string),
        });
        self.phase = BuildPhase::Finalize;
        Ok(())
    }

    /// Finalize into an immutable artifact and complete the session.
    pub fn finalize(&mut self, name: Option<&str>) -> Result<FinalizedAbility, BuildError> {
        match self.draft.kind {
            AbilityKind::Skill => {
                self.guard("finalize", &[BuildPhase::AddModules, BuildPhase::Finalize])?
            }
            AbilityKind::Ego => self.guard(
                "finalize",
                &[
                    BuildPhase::AddModules,
                    BuildPhase::ChooseBenefit,
                    BuildPhase::SelectPassive,
                    BuildPhase::Finalize,
                ],
            )?,
        }
        if !self.draft.is_configuration_complete() {
            return Err(BuildError::ConfigurationIncomplete);
        }
        if !self.draft.unique {
            match self.draft.kind {
                AbilityKind::Skill => {
                    let innate = self.draft.innate_counts();
                    if innate.rank1 != INNATE_RANK1 || innate.rank2 != INNATE_RANK2 {
                        return Err(BuildError::InnateModulesMissing {
                            rank1: innate.rank1,
                            rank2: innate.rank2,
                        });
                    }
                }
                AbilityKind::Ego => {
                    if !self.ego_quota_complete() {
                        let counts = self.draft.module_counts();
                        return Err(BuildError::EgoQuotaUnmet {
                            rank1: counts.rank1,
                            rank2: counts.rank2,
                            rank3: counts.rank3,
                        });
                    }
                }
            }
        }

        let base = self
            .draft
            .base
            .clone()
            .ok_or_else(|| BuildError::validation("no base selected"))?;
        let mut dice = Vec::with_capacity(self.draft.dice.len());
        for die in &self.draft.dice {
            let Some(die_type) = die.die_type() else {
                return Err(BuildError::ConfigurationIncomplete);
            };
            dice.push(FinalizedDie {
                role: die.role(),
                die_type,
                size: die.size,
                bonus: die.bonus,
                effects: die.effects.clone(),
            });
        }
        let modules: Vec<FinalizedModule> = self
            .draft
            .modules
            .iter()
            .map(|module| FinalizedModule {
                id: module.module.clone(),
                name: module.name.clone(),
                rank: module.rank,
                spare: module.spare,
            })
            .collect();
        let name = name
            .filter(|value| !value.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.draft.base_name.clone());

        let artifact = match self.draft.kind {
            AbilityKind::Skill => {
                let mut skill = FinalizedSkill {
                    base,
                    name,
                    cost: self.draft.cost,
                    dice,
                    ability_effects: self.draft.ability_effects.clone(),
                    modules,
                    unique: self.draft.unique,
                    description: String::new(),
                };
                skill.description = render::describe_skill(&skill);
                FinalizedAbility::Skill(skill)
            }
            AbilityKind::Ego => {
                let Some(benefit) = self.draft.benefit else {
                    return Err(BuildError::BenefitNotChosen);
                };
                let Some(passive) = self.draft.passive.clone() else {
                    return Err(BuildError::PassiveNotChosen);
                };
                let mut ego = FinalizedEgo {
                    base,
                    name,
                    cost: self.draft.cost,
                    dice,
                    ability_effects: self.draft.ability_effects.clone(),
                    modules,
                    benefit,
                    passive,
                    rank: None,
                    description: String::new(),
                };
                ego.description = render::describe_ego(&ego);
                FinalizedAbility::Ego(ego)
            }
        };
        self.phase = BuildPhase::Complete;
        Ok(artifact)
    }

    fn ego_quota_complete(&self) -> bool {
        self.draft.module_counts() == ModuleCounts::new(3, 1, 1)
    }

    /// Quota and spare-budget checks that precede target resolution.
    fn check_quota(&self, rank: ModuleRank, as_spare: bool) -> Result<(), BuildError> {
        match self.draft.kind {
            AbilityKind::Ego => {
                if as_spare {
                    return Err(BuildError::validation(
                        "the Base E.G.O. quota is innate; nothing draws from the spare pool",
                    ));
                }
                let counts = self.draft.module_counts();
                let full = match rank {
                    ModuleRank::One => counts.rank1 >= 3,
                    ModuleRank::Two => counts.rank2 >= 1,
                    ModuleRank::Three => counts.rank3 >= 1,
                    ModuleRank::Special => {
                        return Err(BuildError::validation(
                            "special modules cannot be slotted into an E.G.O.",
                        ));
                    }
                };
                if full {
                    return Err(BuildError::validation(format!(
                        "the E.G.O. already carries its full {rank} quota"
                    )));
                }
            }
            AbilityKind::Skill => {
                match rank {
                    ModuleRank::Special => {
                        if as_spare {
                            return Err(BuildError::validation(
                                "special modules sit outside the spare pool",
                            ));
                        }
                    }
                    ModuleRank::Three => {
                        if !as_spare {
                            return Err(BuildError::validation(
                                "rank-3 modules always draw from the spare pool",
                            ));
                        }
                    }
                    ModuleRank::One | ModuleRank::Two => {
                        if !as_spare {
                            let innate = self.draft.innate_counts();
                            let full = match rank {
                                ModuleRank::One => innate.rank1 >= INNATE_RANK1,
                                _ => innate.rank2 >= INNATE_RANK2,
                            };
                            if full {
                                return Err(BuildError::validation(format!(
                                    "the innate {rank} slots are full; add it as a spare"
                                )));
                            }
                        }
                    }
                }
                if as_spare {
                    if !self.draft.innate_quota_filled() {
                        return Err(BuildError::validation(
                            "fill the innate module slots before adding spares",
                        ));
                    }
                    if self.spare_used.get(rank) + 1 > self.spare_budget.get(rank) {
                        return Err(BuildError::InsufficientSpareModules { rank });
                    }
                }
            }
        }
        Ok(())
    }

    /// Compute what applying the module will do, without mutating anything.
    fn build_effect(
        &self,
        spec: &ModuleSpec,
        target: ModuleTarget,
        option: Option<&str>,
    ) -> Result<AppliedEffect, BuildError> {
        let cost = self.draft.effective_cost();
        let tag = spec
            .tag
            .clone()
            .unwrap_or_else(|| EffectTag::new(spec.name.clone()));
        match &spec.behavior {
            ModuleBehavior::PowerBonus(amount) => {
                let ModuleTarget::Die(_) = target else {
                    return Err(BuildError::validation(format!(
                        "module {} adjusts a die's power and must target a die",
                        spec.id
                    )));
                };
                Ok(AppliedEffect::PowerBonus { amount: *amount })
            }
            ModuleBehavior::SizeUpgrade => {
                let ModuleTarget::Die(index) = target else {
                    return Err(BuildError::validation(format!(
                        "module {} upgrades a die's size and must target a die",
                        spec.id
                    )));
                };
                let from = self
                    .draft
                    .die(index)
                    .ok_or(BuildError::UnknownDie { die: index })?
                    .size;
                Ok(AppliedEffect::SizeUpgrade {
                    from,
                    to: from.upgraded(),
                })
            }
            ModuleBehavior::TagEffect { template, trigger } => Ok(AppliedEffect::TagEffect {
                record: EffectRecord::render(
                    tag,
                    template.clone(),
                    cost,
                    Some(spec.id.clone()),
                    *trigger,
                ),
            }),
            ModuleBehavior::OptionEffect { trigger } => {
                let Some(option_id) = option else {
                    return Err(BuildError::validation(format!(
                        "module {} requires an option choice",
                        spec.id
                    )));
                };
                let chosen = spec
                    .options
                    .iter()
                    .find(|candidate| candidate.id == option_id)
                    .ok_or_else(|| BuildError::InvalidChoice {
                        value: option_id.to_string(),
                    })?;
                Ok(AppliedEffect::TagEffect {
                    record: EffectRecord::render(
                        tag,
                        chosen.template.clone(),
                        cost,
                        Some(spec.id.clone()),
                        *trigger,
                    ),
                })
            }
        }
    }

    /// Mutate the draft according to a pre-computed effect.
    fn apply_effect(
        &mut self,
        effect: &AppliedEffect,
        target: ModuleTarget,
    ) -> Result<(), BuildError> {
        match (effect, target) {
            (AppliedEffect::PowerBonus { amount }, ModuleTarget::Die(index)) => {
                let die = self
                    .draft
                    .die_mut(index)
                    .ok_or(BuildError::UnknownDie { die: index })?;
                die.bonus += amount;
                die.refresh_notation();
            }
            (AppliedEffect::SizeUpgrade { to, .. }, ModuleTarget::Die(index)) => {
                let die = self
                    .draft
                    .die_mut(index)
                    .ok_or(BuildError::UnknownDie { die: index })?;
                die.size = *to;
                die.refresh_notation();
            }
            (AppliedEffect::TagEffect { record }, ModuleTarget::Die(index)) => {
                let die = self
                    .draft
                    .die_mut(index)
                    .ok_or(BuildError::UnknownDie { die: index })?;
                // Dedup by final rendered text: an equivalent effect from a
                // different source collapses into the existing record.
                if !die.effects.iter().any(|kept| kept.text == record.text) {
                    die.effects.push(record.clone());
                }
            }
            (AppliedEffect::TagEffect { record }, ModuleTarget::Ability) => {
                if !self
                    .draft
                    .ability_effects
                    .iter()
                    .any(|kept| kept.text == record.text)
                {
                    self.draft.ability_effects.push(record.clone());
                }
            }
            (_, ModuleTarget::Ability) => {
                return Err(BuildError::validation(
                    "numeric and size effects must target a die",
                ));
            }
        }
        Ok(())
    }
}
