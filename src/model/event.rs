use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::demand::DemandDirective;
use super::effect::EffectBundle;
use super::keys::{ResourceKey, StratumKey};

/// An inclusive numeric band; either side may be unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Band {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Band {
    /// Whether a value satisfies the band (inclusive on the provided side).
    pub fn contains(&self, value: f64) -> bool {
        if self.min.is_some_and(|min| value < min) {
            return false;
        }
        if self.max.is_some_and(|max| value > max) {
            return false;
        }
        true
    }
}

/// Per-stratum gating bounds. Any omitted bound is unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StratumCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_pop: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pop: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_approval: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_approval: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_influence_share: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_influence_share: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_wealth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_wealth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_wealth_share: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_wealth_share: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_wealth_delta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_wealth_delta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_income: Option<f64>,
}

/// Gate for event availability. All provided sub-checks must hold (logical
/// AND); an absent block never constrains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_population: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_epoch: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_epoch: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_science: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stability: Option<f64>,
    /// Bands over current resource stock.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resource_percent: BTreeMap<ResourceKey, Band>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub class_conditions: BTreeMap<StratumKey, StratumCondition>,
}

/// A chance-gated additional effect bundle layered onto a deterministic one.
/// Each entry is an independent Bernoulli trial; several may fire at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RandomEffectEntry {
    /// Probability in 0..=1 that the entry fires.
    pub chance: f64,
    pub effects: EffectBundle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventOption {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "EffectBundle::is_empty")]
    pub effects: EffectBundle,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub random_effects: Vec<RandomEffectEntry>,
    /// Present on diplomatic options; the host dispatches on it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demand: Option<DemandDirective>,
}

/// One entry of the event catalog, or a dynamically built diplomatic/
/// political event. Display metadata is opaque to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_conditions: Option<TriggerConditions>,
    #[serde(default)]
    pub options: Vec<EventOption>,
    /// True for dynamically built diplomatic events (not catalog content).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub diplomatic: bool,
}

impl EventDefinition {
    /// Look up an option by id.
    pub fn option(&self, id: &str) -> Option<&EventOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_is_inclusive_on_both_sides() {
        let band = Band {
            min: Some(10.0),
            max: Some(100.0),
        };
        assert!(band.contains(10.0));
        assert!(band.contains(100.0));
        assert!(!band.contains(9.999));
        assert!(!band.contains(100.001));
    }

    #[test]
    fn unbounded_band_accepts_everything() {
        let band = Band::default();
        assert!(band.contains(f64::MIN));
        assert!(band.contains(0.0));
        assert!(band.contains(f64::MAX));
    }

    #[test]
    fn event_deserializes_from_catalog_shape() {
        let json = r#"{
            "id": "plague_outbreak",
            "name": "Plague Outbreak",
            "icon": "alert",
            "description": "A plague spreads through the city.",
            "trigger_conditions": {
                "min_population": 80,
                "min_epoch": 1,
                "resource_percent": {"food": {"max": 100.0}}
            },
            "options": [
                {
                    "id": "quarantine",
                    "text": "Impose quarantine",
                    "effects": {
                        "resource_percent": {"food": -0.03},
                        "stability": -5.0
                    },
                    "random_effects": [
                        {"chance": 0.4, "effects": {"population": -30, "stability": -25.0}}
                    ]
                }
            ]
        }"#;
        let event: EventDefinition = serde_json::from_str(json).unwrap();
        let cond = event.trigger_conditions.as_ref().unwrap();
        assert_eq!(cond.min_population, Some(80));
        assert_eq!(
            cond.resource_percent[&ResourceKey::Food].max,
            Some(100.0)
        );
        let option = event.option("quarantine").unwrap();
        assert_eq!(option.random_effects.len(), 1);
        assert_eq!(option.random_effects[0].chance, 0.4);
        assert_eq!(option.random_effects[0].effects.population, Some(-30));
        assert!(!event.diplomatic);
    }

    #[test]
    fn option_lookup_by_id() {
        let event = EventDefinition {
            id: "e".into(),
            options: vec![
                EventOption {
                    id: "a".into(),
                    ..Default::default()
                },
                EventOption {
                    id: "b".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert!(event.option("b").is_some());
        assert!(event.option("missing").is_none());
    }

    #[test]
    fn stratum_condition_round_trips_sparse() {
        let cond = StratumCondition {
            min_approval: Some(30.0),
            max_influence_share: Some(0.5),
            ..Default::default()
        };
        let json = serde_json::to_string(&cond).unwrap();
        let back: StratumCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cond);
        // Omitted bounds are not serialized
        assert!(!json.contains("min_pop"));
    }
}
