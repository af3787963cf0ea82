//! Built-in passive roster.

use forge_core::catalog::PassiveSpec;

/// The standard passives a Base E.G.O. may carry.
pub fn standard_passives() -> Vec<PassiveSpec> {
    vec![
        PassiveSpec::new("ember", "Ember", "On kill, gain 1 Emotion Point"),
        PassiveSpec::new(
            "second_wind",
            "Second Wind",
            "The first time you would be Staggered each Scene, recover {cost} Stagger Resist instead",
        ),
        PassiveSpec::new("affinity", "Affinity", "Gain +1 power on {choice} dice").with_choice(
            "Choose a damage type",
            vec!["Slash".into(), "Pierce".into(), "Blunt".into()],
        ),
        PassiveSpec::new(
            "carrier",
            "Carrier",
            "Your {choice} effects count as one stack higher when they resolve",
        )
        .with_choice(
            "Choose an ailment",
            vec!["Burn".into(), "Fragile".into(), "Bleed".into()],
        ),
    ]
}
