//! Module-addition validation, separated from application.
//!
//! Every check here is read-only; the session runs all of them before the
//! first mutation so that a failed addition is all-or-nothing.

use crate::ability::DieIndex;
use crate::catalog::{ModuleSpec, SlotGate, TargetRule};

use super::draft::{BuildDraft, ModuleTarget, WorkingDie};
use super::error::BuildError;

/// Checks the module's ability-wide admission gates.
pub(super) fn check_gates(spec: &ModuleSpec, draft: &BuildDraft) -> Result<(), BuildError> {
    for gate in &spec.gates {
        match gate {
            SlotGate::RequiresAbilityTag(tag) => {
                if !draft.ability_has_tag(tag) {
                    return Err(BuildError::GateUnsatisfied {
                        reason: format!("module {} requires the ability to carry [{tag}]", spec.id),
                    });
                }
            }
            SlotGate::MinimumCost(min) => {
                if draft.cost < *min {
                    return Err(BuildError::GateUnsatisfied {
                        reason: format!(
                            "module {} requires a cost of at least {min}, this ability costs {}",
                            spec.id, draft.cost
                        ),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Non-repeating module ids may appear once per ability, regardless of target.
pub(super) fn check_repeat(spec: &ModuleSpec, draft: &BuildDraft) -> Result<(), BuildError> {
    if !spec.repeating
        && draft
            .modules
            .iter()
            .any(|applied| applied.module == spec.id)
    {
        return Err(BuildError::DuplicateModule {
            id: spec.id.clone(),
        });
    }
    Ok(())
}

/// A module's tag may not duplicate an existing tag on the same target:
/// die-scoped for die targets, ability-scoped for skill targets.
pub(super) fn check_tag_unique(
    spec: &ModuleSpec,
    draft: &BuildDraft,
    target: ModuleTarget,
) -> Result<(), BuildError> {
    let Some(tag) = &spec.tag else {
        return Ok(());
    };
    let tagged_by_module = draft
        .modules
        .iter()
        .any(|applied| applied.target == target && applied.tag.as_ref() == Some(tag));
    match target {
        ModuleTarget::Die(index) => {
            let die = draft.die(index).ok_or(BuildError::UnknownDie { die: index })?;
            if tagged_by_module || die.has_tag(tag) {
                return Err(BuildError::TagConflict {
                    tag: tag.clone(),
                    scope: index.to_string(),
                });
            }
        }
        ModuleTarget::Ability => {
            if tagged_by_module || draft.ability_has_tag(tag) {
                return Err(BuildError::TagConflict {
                    tag: tag.clone(),
                    scope: "this ability".to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Evaluates the eligibility conjunction for one die.
///
/// Returns the human-readable reason the die fails, if it does.
pub(super) fn die_ineligible_reason(spec: &ModuleSpec, die: &WorkingDie) -> Option<String> {
    for rule in &spec.eligibility {
        match rule {
            TargetRule::TypeIs(required) => {
                if die.die_type() != Some(*required) {
                    return Some(format!("only {required} dice qualify"));
                }
            }
            TargetRule::RoleIs(required) => {
                if die.role() != *required {
                    return Some(format!("only {required} dice qualify"));
                }
            }
            TargetRule::NotTagged(tag) => {
                if die.has_tag(tag) {
                    return Some(format!("die already carries [{tag}]"));
                }
            }
        }
    }
    None
}

/// The set of dice the module's predicate admits, in template order.
pub(super) fn eligible_dice(spec: &ModuleSpec, draft: &BuildDraft) -> Vec<DieIndex> {
    draft
        .dice
        .iter()
        .filter(|die| die_ineligible_reason(spec, die).is_none())
        .map(|die| die.index)
        .collect()
}
