//! Canonical description rendering.
//!
//! Pure functions from an ability (finalized or in progress) to display
//! text. Rendering is deterministic: the same input yields byte-identical
//! output, and finalized artifacts bake the rendered string in at finalize
//! time.
//!
//! Layout: ability-scoped lifecycle effects first, one line per die, then
//! (for non-unique abilities) a module summary grouped by rank with repeated
//! names compressed to a multiplier suffix.

use crate::ability::{
    EffectRecord, FinalizedEgo, FinalizedSkill, PassiveSelection, notation,
};
use crate::build::BuildDraft;
use crate::catalog::ModuleRank;

/// Renders a finalized skill.
pub fn describe_skill(skill: &FinalizedSkill) -> String {
    let die_lines = skill
        .dice
        .iter()
        .map(|die| die_line(&die.die_type.to_string(), notation(die.size, die.bonus), &die.effects))
        .collect();
    let summary = (!skill.unique)
        .then(|| module_summary(skill.modules.iter().map(|m| (m.name.as_str(), m.rank))))
        .flatten();
    compose(
        header(&skill.name, skill.cost),
        &skill.ability_effects,
        die_lines,
        None,
        summary,
    )
}

/// Renders a finalized E.G.O.
pub fn describe_ego(ego: &FinalizedEgo) -> String {
    let die_lines = ego
        .dice
        .iter()
        .map(|die| die_line(&die.die_type.to_string(), notation(die.size, die.bonus), &die.effects))
        .collect();
    let summary =
        module_summary(ego.modules.iter().map(|m| (m.name.as_str(), m.rank)));
    compose(
        header(&ego.name, ego.cost),
        &ego.ability_effects,
        die_lines,
        Some(&ego.passive),
        summary,
    )
}

/// Renders an in-progress draft for presentation.
///
/// Unconfigured dice show their role in place of a type.
pub fn describe_draft(draft: &BuildDraft) -> String {
    let die_lines = draft
        .dice
        .iter()
        .map(|die| {
            let label = match die.die_type() {
                Some(die_type) => die_type.to_string(),
                None => die.role().to_string(),
            };
            die_line(&label, die.notation.clone(), &die.effects)
        })
        .collect();
    let summary = (!draft.unique)
        .then(|| module_summary(draft.modules.iter().map(|m| (m.name.as_str(), m.rank))))
        .flatten();
    compose(
        header(&draft.base_name, draft.effective_cost()),
        &draft.ability_effects,
        die_lines,
        draft.passive.as_ref(),
        summary,
    )
}

fn header(name: &str, cost: u8) -> String {
    format!("{name} ({cost} Light)")
}

fn die_line(label: &str, notation: String, effects: &[EffectRecord]) -> String {
    if effects.is_empty() {
        format!("[{label}] {notation}")
    } else {
        let texts: Vec<&str> = effects.iter().map(|effect| effect.text.as_str()).collect();
        format!("[{label}] {notation}: {}", texts.join("; "))
    }
}

fn effect_line(effect: &EffectRecord) -> String {
    match effect.trigger {
        Some(trigger) => format!("{trigger}: {}", effect.text),
        None => effect.text.clone(),
    }
}

/// Module summary grouped by rank, repeated names compressed (`Stronger x2`).
fn module_summary<'a>(modules: impl Iterator<Item = (&'a str, ModuleRank)>) -> Option<String> {
    let modules: Vec<(&str, ModuleRank)> = modules.collect();
    if modules.is_empty() {
        return None;
    }
    let mut groups = Vec::new();
    for rank in [
        ModuleRank::One,
        ModuleRank::Two,
        ModuleRank::Three,
        ModuleRank::Special,
    ] {
        // Count by name in first-appearance order.
        let mut entries: Vec<(&str, usize)> = Vec::new();
        for &(name, module_rank) in modules.iter().filter(|(_, r)| *r == rank) {
            match entries.iter_mut().find(|(seen, _)| *seen == name) {
                Some((_, count)) => *count += 1,
                None => entries.push((name, 1)),
            }
        }
        if entries.is_empty() {
            continue;
        }
        let rendered: Vec<String> = entries
            .into_iter()
            .map(|(name, count)| {
                if count > 1 {
                    format!("{name} x{count}")
                } else {
                    name.to_string()
                }
            })
            .collect();
        groups.push(format!("{} {}", rank.label(), rendered.join(", ")));
    }
    Some(format!("Modules: {}", groups.join("; ")))
}

fn compose(
    header: String,
    ability_effects: &[EffectRecord],
    die_lines: Vec<String>,
    passive: Option<&PassiveSelection>,
    summary: Option<String>,
) -> String {
    let mut lines = Vec::with_capacity(2 + ability_effects.len() + die_lines.len());
    lines.push(header);
    lines.extend(ability_effects.iter().map(effect_line));
    lines.extend(die_lines);
    if let Some(passive) = passive {
        lines.push(format!("Passive — {}: {}", passive.name, passive.text));
    }
    if let Some(summary) = summary {
        lines.push(summary);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{
        DamageKind, DieRole, DieSize, DieType, EffectRecord, EffectTag, FinalizedDie,
        FinalizedModule, FinalizedSkill, Trigger,
    };
    use crate::catalog::{BaseId, ModuleId};

    fn sample_skill() -> FinalizedSkill {
        FinalizedSkill {
            base: BaseId::new("workhorse"),
            name: "Opening Gambit".into(),
            cost: 1,
            dice: vec![FinalizedDie {
                role: DieRole::Offensive,
                die_type: DieType::Damage(DamageKind::Slash),
                size: DieSize::D8,
                bonus: 1,
                effects: vec![EffectRecord::render(
                    EffectTag::new("Burn"),
                    "Inflict {cost} Burn",
                    1,
                    None,
                    None,
                )],
            }],
            ability_effects: vec![EffectRecord::render(
                EffectTag::new("Focus"),
                "Gain {cost} Focus",
                1,
                None,
                Some(Trigger::OnUse),
            )],
            modules: vec![
                FinalizedModule {
                    id: ModuleId::new("stronger"),
                    name: "Stronger".into(),
                    rank: ModuleRank::One,
                    spare: false,
                },
                FinalizedModule {
                    id: ModuleId::new("stronger"),
                    name: "Stronger".into(),
                    rank: ModuleRank::One,
                    spare: false,
                },
                FinalizedModule {
                    id: ModuleId::new("bigger"),
                    name: "Bigger".into(),
                    rank: ModuleRank::Two,
                    spare: false,
                },
            ],
            unique: false,
            description: String::new(),
        }
    }

    #[test]
    fn layout_is_effects_then_dice_then_summary() {
        let text = describe_skill(&sample_skill());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Opening Gambit (1 Light)");
        assert_eq!(lines[1], "On Use: Gain 1 Focus");
        assert_eq!(lines[2], "[Slash] d8+1: Inflict 1 Burn");
        assert_eq!(lines[3], "Modules: R1 Stronger x2; R2 Bigger");
    }

    #[test]
    fn rendering_is_deterministic() {
        let skill = sample_skill();
        assert_eq!(describe_skill(&skill), describe_skill(&skill));
    }

    #[test]
    fn unique_abilities_omit_the_summary() {
        let mut skill = sample_skill();
        skill.unique = true;
        assert!(!describe_skill(&skill).contains("Modules:"));
    }
}
