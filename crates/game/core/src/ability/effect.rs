//! Effect records and template substitution.
//!
//! An [`EffectRecord`] is built exactly once, when a module (or a unique
//! template's baked loadout) is applied: the source template has its
//! placeholders substituted and the rendered text is stored alongside the
//! template. Later changes that alter substitution inputs (the E.G.O. cost
//! benefit) rebuild the text from the stored template; rendered strings are
//! never edited in place.

use core::fmt;

use crate::catalog::ModuleId;

/// Placeholder for the owning ability's cost, as written in effect templates.
pub const COST_PLACEHOLDER: &str = "{cost}";

/// Placeholder for a player-made choice (passives, option modules).
pub const CHOICE_PLACEHOLDER: &str = "{choice}";

/// Marker carried by tagged effects and modules.
///
/// Tags are the currency of the uniqueness gates: a module's tag may not
/// duplicate an existing tag on the same target (die-scoped for die targets,
/// ability-scoped for skill targets).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EffectTag(String);

impl EffectTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EffectTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EffectTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Lifecycle marker for ability-scoped effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trigger {
    OnUse,
    ClashWin,
    ClashLose,
}

impl Trigger {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OnUse => "On Use",
            Self::ClashWin => "Clash Win",
            Self::ClashLose => "Clash Lose",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single applied effect: tag, source template, rendered text, provenance.
///
/// `source` is `None` for effects baked into a unique base template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectRecord {
    pub tag: EffectTag,
    pub template: String,
    pub text: String,
    pub source: Option<ModuleId>,
    pub trigger: Option<Trigger>,
}

impl EffectRecord {
    /// Builds a record by substituting `{cost}` in `template`.
    pub fn render(
        tag: EffectTag,
        template: impl Into<String>,
        cost: u8,
        source: Option<ModuleId>,
        trigger: Option<Trigger>,
    ) -> Self {
        let template = template.into();
        let text = substitute_cost(&template, cost);
        Self {
            tag,
            template,
            text,
            source,
            trigger,
        }
    }

    /// Rebuilds the rendered text from the stored template.
    ///
    /// Used when the effective cost changes after records already exist.
    pub fn rerender(&mut self, cost: u8) {
        self.text = substitute_cost(&self.template, cost);
    }
}

/// Substitutes the `{cost}` placeholder with the ability's effective cost.
pub fn substitute_cost(template: &str, cost: u8) -> String {
    template.replace(COST_PLACEHOLDER, &cost.to_string())
}

/// Substitutes the `{choice}` placeholder with a player-made choice.
///
/// A missing choice leaves the placeholder intact so the caller can resolve
/// it later.
pub fn substitute_choice(template: &str, choice: Option<&str>) -> String {
    match choice {
        Some(value) => template.replace(CHOICE_PLACEHOLDER, value),
        None => template.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_substitution_is_total() {
        assert_eq!(
            substitute_cost("Spend {cost} Light, gain {cost} Power", 3),
            "Spend 3 Light, gain 3 Power"
        );
    }

    #[test]
    fn missing_choice_keeps_placeholder() {
        assert_eq!(
            substitute_choice("Gain +1 power on {choice} dice", None),
            "Gain +1 power on {choice} dice"
        );
        assert_eq!(
            substitute_choice("Gain +1 power on {choice} dice", Some("Slash")),
            "Gain +1 power on Slash dice"
        );
    }

    #[test]
    fn rerender_rebuilds_from_template() {
        let mut record = EffectRecord::render(
            EffectTag::new("Burn"),
            "Inflict {cost} Burn",
            2,
            None,
            None,
        );
        assert_eq!(record.text, "Inflict 2 Burn");
        record.rerender(3);
        assert_eq!(record.text, "Inflict 3 Burn");
    }
}
