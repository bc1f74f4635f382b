//! Shared helpers for unit and integration tests.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::model::{
    Band, EffectBundle, EventDefinition, EventOption, RandomEffectEntry, ResourceKey, StratumKey,
    TriggerConditions,
};

/// Deterministic RNG for tests.
pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// A small stone-age-flavored catalog: a food-gated scavenging event, a
/// population-gated plague, and an ungated wanderer visit.
pub fn stone_age_catalog() -> Vec<EventDefinition> {
    let mut scavenge_conditions = TriggerConditions {
        max_epoch: Some(0),
        ..Default::default()
    };
    scavenge_conditions.resource_percent.insert(
        ResourceKey::Food,
        Band {
            min: None,
            max: Some(100.0),
        },
    );
    let mut scavenge_effects = EffectBundle::default();
    scavenge_effects.resources.insert(ResourceKey::Food, 25.0);

    let mut plague_effects = EffectBundle::default();
    plague_effects.population_percent = Some(-0.05);
    plague_effects.stability = Some(-10.0);
    let mut plague_worse = EffectBundle::default();
    plague_worse.population_percent = Some(-0.05);

    vec![
        EventDefinition {
            id: "lean_season".into(),
            name: "Lean Season".into(),
            description: "The stores run low; foragers range further afield.".into(),
            trigger_conditions: Some(scavenge_conditions),
            options: vec![EventOption {
                id: "forage".into(),
                text: "Send out foragers".into(),
                effects: scavenge_effects,
                ..Default::default()
            }],
            ..Default::default()
        },
        EventDefinition {
            id: "camp_sickness".into(),
            name: "Camp Sickness".into(),
            description: "Illness spreads through the crowded camp.".into(),
            trigger_conditions: Some(TriggerConditions {
                min_population: Some(30),
                ..Default::default()
            }),
            options: vec![EventOption {
                id: "endure".into(),
                text: "Endure it".into(),
                effects: plague_effects,
                random_effects: vec![RandomEffectEntry {
                    chance: 0.4,
                    effects: plague_worse,
                    description: Some("The sickness lingers".into()),
                }],
                ..Default::default()
            }],
            ..Default::default()
        },
        EventDefinition {
            id: "wanderers".into(),
            name: "Wanderers".into(),
            description: "A small band asks to join the camp.".into(),
            trigger_conditions: None,
            options: vec![EventOption {
                id: "welcome".into(),
                text: "Welcome them".into(),
                effects: {
                    let mut b = EffectBundle::default();
                    b.population = Some(5);
                    b.approval.insert(StratumKey::Peasant, 5.0);
                    b
                },
                ..Default::default()
            }],
            ..Default::default()
        },
    ]
}

/// Assert a float is approximately equal, with a named context message.
pub fn assert_approx(actual: f64, expected: f64, tolerance: f64, msg: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{msg}: expected ~{expected} (+-{tolerance}), got {actual}"
    );
}
