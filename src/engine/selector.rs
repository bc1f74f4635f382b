use rand::{Rng, RngCore};

use super::conditions::can_trigger;
use crate::model::{EventDefinition, GameStateSnapshot};

/// Pick one eligible event from the catalog, uniformly at random.
///
/// Filters the catalog through [`can_trigger`], then samples among the
/// survivors: every eligible event has equal probability, there is no
/// weighting. Returns `None` when nothing is eligible (a normal outcome,
/// not an error). Stateless and re-entrant; randomness comes from the
/// injected `rng`.
///
/// Any random-nation selector inside the chosen event is pre-resolved to a
/// single concrete nation here, so every `random` occurrence in the event
/// points at the same nation by the time the UI shows it.
pub fn select_random_event(
    snapshot: &GameStateSnapshot,
    catalog: &[EventDefinition],
    rng: &mut dyn RngCore,
) -> Option<EventDefinition> {
    let eligible: Vec<&EventDefinition> = catalog
        .iter()
        .filter(|def| can_trigger(def, snapshot))
        .collect();

    if eligible.is_empty() {
        return None;
    }

    let index = rng.random_range(0..eligible.len());
    let mut chosen = eligible[index].clone();
    resolve_random_nation(&mut chosen, snapshot, rng);
    Some(chosen)
}

/// Rewrite every `random` nation selector in the event to one concrete
/// nation, drawn uniformly from nations visible in the current epoch. If the
/// event has no such selectors, or no nation qualifies, this is a no-op.
fn resolve_random_nation(
    event: &mut EventDefinition,
    snapshot: &GameStateSnapshot,
    rng: &mut dyn RngCore,
) {
    let references_random = event.options.iter().any(|o| {
        o.effects.references_random_nation()
            || o.random_effects
                .iter()
                .any(|re| re.effects.references_random_nation())
    });
    if !references_random {
        return;
    }

    let candidates = snapshot.eligible_nations();
    if candidates.is_empty() {
        return;
    }
    let nation = candidates[rng.random_range(0..candidates.len())].id;

    for option in &mut event.options {
        option.effects.resolve_random_nation(nation);
        for entry in &mut option.random_effects {
            entry.effects.resolve_random_nation(nation);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::model::{
        EventOption, NationFilter, NationSnapshot, TriggerConditions, WarTarget,
    };

    fn gated_event(id: &str, min_population: u32) -> EventDefinition {
        EventDefinition {
            id: id.into(),
            trigger_conditions: Some(TriggerConditions {
                min_population: Some(min_population),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn empty_catalog_yields_none() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(select_random_event(&GameStateSnapshot::default(), &[], &mut rng).is_none());
    }

    #[test]
    fn no_eligible_event_yields_none() {
        let catalog = vec![gated_event("a", 100), gated_event("b", 200)];
        let mut snap = GameStateSnapshot::default();
        snap.population = 50;
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(select_random_event(&snap, &catalog, &mut rng).is_none());
    }

    #[test]
    fn only_eligible_events_are_sampled() {
        let catalog = vec![gated_event("low", 10), gated_event("high", 1000)];
        let mut snap = GameStateSnapshot::default();
        snap.population = 50;

        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let chosen = select_random_event(&snap, &catalog, &mut rng).unwrap();
            assert_eq!(chosen.id, "low");
        }
    }

    #[test]
    fn sampling_is_uniform_over_survivors() {
        let catalog = vec![
            gated_event("a", 0),
            gated_event("b", 0),
            gated_event("c", 0),
        ];
        let mut snap = GameStateSnapshot::default();
        snap.population = 10;

        let mut counts = std::collections::BTreeMap::new();
        for seed in 0..600 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let chosen = select_random_event(&snap, &catalog, &mut rng).unwrap();
            *counts.entry(chosen.id).or_insert(0u32) += 1;
        }
        // All three events should land well away from zero; a uniform draw
        // over 600 samples puts each around 200.
        for (id, count) in counts {
            assert!(count > 120, "event {id} drawn only {count} times");
        }
    }

    #[test]
    fn random_nation_selectors_resolve_to_one_nation() {
        let mut option = EventOption {
            id: "retaliate".into(),
            ..Default::default()
        };
        option
            .effects
            .nation_relation
            .insert(NationFilter::Random, -20.0);
        option.effects.trigger_war = Some(WarTarget::Random);
        let event = EventDefinition {
            id: "border_incident".into(),
            options: vec![option],
            ..Default::default()
        };

        let mut snap = GameStateSnapshot::default();
        snap.epoch = 1;
        snap.nations = vec![NationSnapshot::new(3, "Rival"), NationSnapshot::new(9, "Rival B")];

        let mut rng = SmallRng::seed_from_u64(7);
        let chosen = select_random_event(&snap, &[event], &mut rng).unwrap();
        let effects = &chosen.options[0].effects;
        assert!(!effects.references_random_nation());

        // Both rewritten selectors point at the same nation
        let (filter, _) = effects.nation_relation.iter().next().unwrap();
        let NationFilter::Nation(relation_id) = filter else {
            panic!("expected concrete nation, got {filter:?}");
        };
        let Some(WarTarget::Nation(war_id)) = effects.trigger_war else {
            panic!("expected concrete war target");
        };
        assert_eq!(*relation_id, war_id);
    }

    #[test]
    fn random_selectors_left_alone_without_candidates() {
        let mut option = EventOption {
            id: "retaliate".into(),
            ..Default::default()
        };
        option
            .effects
            .nation_relation
            .insert(NationFilter::Random, -20.0);
        let event = EventDefinition {
            id: "border_incident".into(),
            options: vec![option],
            ..Default::default()
        };

        // No nations at all
        let snap = GameStateSnapshot::default();
        let mut rng = SmallRng::seed_from_u64(7);
        let chosen = select_random_event(&snap, &[event], &mut rng).unwrap();
        assert!(chosen.options[0].effects.references_random_nation());
    }
}
