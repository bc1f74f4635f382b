//! Load-time catalog validation.
//!
//! Authoring mistakes surface here, once, when content is loaded, never at
//! decision time. Decision-time code tolerates anything that passes
//! deserialization.

use std::collections::BTreeSet;
use std::fmt;

use crate::model::{Band, EventDefinition, StratumCondition};

/// One authoring problem found in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub event_id: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event \"{}\": {}", self.event_id, self.message)
    }
}

/// Check the catalog for authoring bugs. Returns every issue found; an
/// empty vec means the catalog is clean.
pub fn validate_catalog(catalog: &[EventDefinition]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen_ids = BTreeSet::new();

    for event in catalog {
        let mut push = |message: String| {
            issues.push(ValidationIssue {
                event_id: event.id.clone(),
                message,
            });
        };

        if event.id.is_empty() {
            push("empty event id".to_string());
        } else if !seen_ids.insert(&event.id) {
            push("duplicate event id".to_string());
        }

        if event.options.is_empty() {
            push("no options".to_string());
        }

        for option in &event.options {
            for (index, entry) in option.random_effects.iter().enumerate() {
                if !(0.0..=1.0).contains(&entry.chance) || entry.chance.is_nan() {
                    push(format!(
                        "option \"{}\" random effect {index} has chance {} outside 0..=1",
                        option.id, entry.chance
                    ));
                }
            }
        }

        if let Some(cond) = &event.trigger_conditions {
            if cond
                .min_epoch
                .zip(cond.max_epoch)
                .is_some_and(|(min, max)| min > max)
            {
                push("min_epoch exceeds max_epoch".to_string());
            }
            if cond
                .min_stability
                .zip(cond.max_stability)
                .is_some_and(|(min, max)| min > max)
            {
                push("min_stability exceeds max_stability".to_string());
            }
            for (key, band) in &cond.resource_percent {
                if band_inverted(band) {
                    push(format!("resource band for \"{key}\" has min above max"));
                }
            }
            for (stratum, sc) in &cond.class_conditions {
                for bound in inverted_stratum_bounds(sc) {
                    push(format!("class condition for \"{stratum}\" has {bound}"));
                }
            }
        }
    }

    if !issues.is_empty() {
        tracing::warn!(count = issues.len(), "catalog validation found issues");
    }
    issues
}

fn band_inverted(band: &Band) -> bool {
    band.min.zip(band.max).is_some_and(|(min, max)| min > max)
}

fn inverted_stratum_bounds(sc: &StratumCondition) -> Vec<&'static str> {
    let mut inverted = Vec::new();
    if sc.min_pop.zip(sc.max_pop).is_some_and(|(a, b)| a > b) {
        inverted.push("min_pop above max_pop");
    }
    if sc
        .min_approval
        .zip(sc.max_approval)
        .is_some_and(|(a, b)| a > b)
    {
        inverted.push("min_approval above max_approval");
    }
    if sc
        .min_influence_share
        .zip(sc.max_influence_share)
        .is_some_and(|(a, b)| a > b)
    {
        inverted.push("min_influence_share above max_influence_share");
    }
    if sc
        .min_wealth
        .zip(sc.max_wealth)
        .is_some_and(|(a, b)| a > b)
    {
        inverted.push("min_wealth above max_wealth");
    }
    if sc
        .min_wealth_share
        .zip(sc.max_wealth_share)
        .is_some_and(|(a, b)| a > b)
    {
        inverted.push("min_wealth_share above max_wealth_share");
    }
    if sc
        .min_wealth_delta
        .zip(sc.max_wealth_delta)
        .is_some_and(|(a, b)| a > b)
    {
        inverted.push("min_wealth_delta above max_wealth_delta");
    }
    if sc
        .min_income
        .zip(sc.max_income)
        .is_some_and(|(a, b)| a > b)
    {
        inverted.push("min_income above max_income");
    }
    inverted
}
