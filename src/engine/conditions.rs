use crate::model::{EventDefinition, GameStateSnapshot, ResourceKey, TriggerConditions};

/// Decide whether an event may fire against the given snapshot.
///
/// Pure conjunction over the event's trigger conditions: every provided
/// bound must hold, bounds are inclusive on the provided side, and missing
/// snapshot data falls back to documented defaults (approval 50, everything
/// else 0). An event without conditions is always triggerable. Never panics.
pub fn can_trigger(def: &EventDefinition, snapshot: &GameStateSnapshot) -> bool {
    let Some(conditions) = &def.trigger_conditions else {
        return true;
    };
    conditions_hold(conditions, snapshot)
}

fn conditions_hold(cond: &TriggerConditions, snapshot: &GameStateSnapshot) -> bool {
    if cond
        .min_population
        .is_some_and(|min| snapshot.population < min)
    {
        return false;
    }
    if cond.min_epoch.is_some_and(|min| snapshot.epoch < min) {
        return false;
    }
    if cond.max_epoch.is_some_and(|max| snapshot.epoch > max) {
        return false;
    }
    if cond
        .min_science
        .is_some_and(|min| snapshot.resource(&ResourceKey::Science) < min)
    {
        return false;
    }
    if cond
        .min_stability
        .is_some_and(|min| snapshot.stability < min)
    {
        return false;
    }
    if cond
        .max_stability
        .is_some_and(|max| snapshot.stability > max)
    {
        return false;
    }

    for (key, band) in &cond.resource_percent {
        if !band.contains(snapshot.resource(key)) {
            return false;
        }
    }

    for (stratum, sc) in &cond.class_conditions {
        let pop = snapshot.pop_structure.get(stratum).copied().unwrap_or(0);
        let approval = snapshot.approval(stratum);
        let wealth = snapshot.class_wealth.get(stratum).copied().unwrap_or(0.0);
        let wealth_delta = snapshot
            .class_wealth_delta
            .get(stratum)
            .copied()
            .unwrap_or(0.0);
        let income = snapshot.class_income.get(stratum).copied().unwrap_or(0.0);
        let influence_share = snapshot.influence_share(stratum);
        let wealth_share = snapshot.wealth_share(stratum);

        if sc.min_pop.is_some_and(|min| pop < min) {
            return false;
        }
        if sc.max_pop.is_some_and(|max| pop > max) {
            return false;
        }
        if sc.min_approval.is_some_and(|min| approval < min) {
            return false;
        }
        if sc.max_approval.is_some_and(|max| approval > max) {
            return false;
        }
        if sc
            .min_influence_share
            .is_some_and(|min| influence_share < min)
        {
            return false;
        }
        if sc
            .max_influence_share
            .is_some_and(|max| influence_share > max)
        {
            return false;
        }
        if sc.min_wealth.is_some_and(|min| wealth < min) {
            return false;
        }
        if sc.max_wealth.is_some_and(|max| wealth > max) {
            return false;
        }
        if sc.min_wealth_share.is_some_and(|min| wealth_share < min) {
            return false;
        }
        if sc.max_wealth_share.is_some_and(|max| wealth_share > max) {
            return false;
        }
        if sc.min_wealth_delta.is_some_and(|min| wealth_delta < min) {
            return false;
        }
        if sc.max_wealth_delta.is_some_and(|max| wealth_delta > max) {
            return false;
        }
        if sc.min_income.is_some_and(|min| income < min) {
            return false;
        }
        if sc.max_income.is_some_and(|max| income > max) {
            return false;
        }
    }

    true
}
