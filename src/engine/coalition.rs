use std::collections::BTreeMap;

use crate::model::{
    DemandDirective, DemandKind, EffectBundle, EventDefinition, EventOption, GameStateSnapshot,
    ResourceKey, StratumKey,
};

/// Influence share at which an out-of-power stratum starts demanding a seat.
pub const DEFAULT_INFLUENCE_THRESHOLD: f64 = 0.20;
/// Minimum days between demand events from the same stratum.
pub const DEFAULT_MIN_DAYS_BETWEEN: u32 = 60;

/// Per-capita daily expense assumed when a stratum has no recorded expense,
/// used to price the compensation option.
const FALLBACK_PER_CAPITA_EXPENSE: f64 = 10.0;
/// Days of living costs the compensation covers.
const COMPENSATION_DAYS: f64 = 30.0;

/// Watches for out-of-power strata whose influence share crosses the
/// threshold and promotes the strongest of them into a political demand
/// event, at most once per cooldown window per stratum.
///
/// The cooldown ledger is the only mutable state in the engine. It is owned
/// by this detector instance; reset it via [`reset`](Self::reset) when a
/// save is loaded so stale cooldowns never leak between sessions.
#[derive(Debug, Default)]
pub struct CoalitionDemandDetector {
    threshold: f64,
    min_days_between: u32,
    cooldowns: BTreeMap<StratumKey, u32>,
}

impl CoalitionDemandDetector {
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_INFLUENCE_THRESHOLD,
            min_days_between: DEFAULT_MIN_DAYS_BETWEEN,
            cooldowns: BTreeMap::new(),
        }
    }

    pub fn with_settings(threshold: f64, min_days_between: u32) -> Self {
        Self {
            threshold,
            min_days_between,
            cooldowns: BTreeMap::new(),
        }
    }

    /// Clear the cooldown ledger (call on game load).
    pub fn reset(&mut self) {
        self.cooldowns.clear();
    }

    /// Find the most influential out-of-power stratum at or above the
    /// threshold, or `None`. Pure; does not touch the ledger.
    pub fn strongest_claimant<'a>(
        &self,
        snapshot: &'a GameStateSnapshot,
    ) -> Option<(&'a StratumKey, f64)> {
        let total = snapshot.effective_total_influence();
        if total <= 0.0 {
            return None;
        }

        snapshot
            .class_influence
            .iter()
            .filter(|(key, _)| {
                key.is_politically_eligible()
                    && !snapshot.ruling_coalition.contains(*key)
                    && snapshot.pop_structure.get(*key).copied().unwrap_or(0) > 0
            })
            .map(|(key, influence)| (key, influence / total))
            .filter(|(_, share)| *share >= self.threshold)
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Emit a demand event for the strongest claimant, unless that stratum
    /// is still cooling down. Records the emission day on success.
    pub fn check_and_create(&mut self, snapshot: &GameStateSnapshot) -> Option<EventDefinition> {
        let (stratum, share) = self.strongest_claimant(snapshot)?;
        let stratum = stratum.clone();

        if let Some(&last_day) = self.cooldowns.get(&stratum) {
            if snapshot.days_elapsed.saturating_sub(last_day) < self.min_days_between {
                return None;
            }
        }
        self.cooldowns.insert(stratum.clone(), snapshot.days_elapsed);

        Some(build_demand_event(&stratum, share, snapshot))
    }
}

/// Monthly living costs for the whole stratum, the price of buying it off.
fn compensation_amount(stratum: &StratumKey, snapshot: &GameStateSnapshot) -> f64 {
    let pop = snapshot.pop_structure.get(stratum).copied().unwrap_or(0);
    let total_expense = snapshot.class_expense.get(stratum).copied().unwrap_or(0.0);
    let per_capita = if pop > 0 && total_expense > 0.0 {
        total_expense / f64::from(pop)
    } else {
        FALLBACK_PER_CAPITA_EXPENSE
    };
    (f64::from(pop) * per_capita * COMPENSATION_DAYS).ceil()
}

fn build_demand_event(
    stratum: &StratumKey,
    share: f64,
    snapshot: &GameStateSnapshot,
) -> EventDefinition {
    let compensation = compensation_amount(stratum, snapshot);

    let mut accept_effects = EffectBundle::default();
    accept_effects.stability = Some(5.0);
    accept_effects.approval.insert(stratum.clone(), 15.0);
    accept_effects.add_to_coalition.insert(stratum.clone());

    let mut compensate_effects = EffectBundle::default();
    compensate_effects.stability = Some(-3.0);
    compensate_effects.approval.insert(stratum.clone(), -5.0);
    compensate_effects
        .resources
        .insert(ResourceKey::Silver, -compensation);
    compensate_effects
        .class_wealth
        .insert(stratum.clone(), compensation);

    let mut refuse_effects = EffectBundle::default();
    refuse_effects.stability = Some(-8.0);
    refuse_effects.approval.insert(stratum.clone(), -25.0);

    EventDefinition {
        id: format!("coalition_demand_{}_{}", stratum, snapshot.days_elapsed),
        name: format!("Political demands of the {stratum} class"),
        icon: Some("users".to_string()),
        description: format!(
            "The {stratum} class now commands {:.1}% of political influence, yet \
             remains shut out of the ruling coalition. Their representatives gather \
             at the palace gates demanding a voice: \"We have given this realm so \
             much,\" their petition reads, \"and have no say in its course. That \
             must change.\"",
            share * 100.0
        ),
        trigger_conditions: None,
        options: vec![
            EventOption {
                id: "accept_join".to_string(),
                text: "Admit them to the ruling coalition".to_string(),
                description: format!(
                    "Grant the {stratum} class a seat at the table in exchange for \
                     their support."
                ),
                effects: accept_effects,
                ..Default::default()
            },
            EventOption {
                id: "pay_compensation".to_string(),
                text: format!("Placate them with {compensation:.0} silver"),
                description: format!(
                    "Buy a month of quiet — thirty days of living costs for the \
                     whole {stratum} class — and promise to revisit the question."
                ),
                effects: compensate_effects,
                ..Default::default()
            },
            EventOption {
                id: "refuse_firmly".to_string(),
                text: "Refuse outright".to_string(),
                description: "Make clear they have no place in government and that \
                              the present order stands."
                    .to_string(),
                effects: refuse_effects,
                demand: Some(DemandDirective::flat(DemandKind::Reject)),
                ..Default::default()
            },
        ],
        diplomatic: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_claimant() -> GameStateSnapshot {
        let mut snap = GameStateSnapshot::default();
        snap.days_elapsed = 100;
        snap.total_influence = 100.0;
        snap.class_influence.insert(StratumKey::Merchant, 40.0);
        snap.class_influence.insert(StratumKey::Peasant, 60.0);
        snap.pop_structure.insert(StratumKey::Merchant, 50);
        snap.pop_structure.insert(StratumKey::Peasant, 500);
        snap.ruling_coalition.insert(StratumKey::Peasant);
        snap
    }

    #[test]
    fn detects_strongest_out_of_power_stratum() {
        let detector = CoalitionDemandDetector::new();
        let snap = snapshot_with_claimant();
        let (stratum, share) = detector.strongest_claimant(&snap).unwrap();
        assert_eq!(stratum, &StratumKey::Merchant);
        assert!((share - 0.40).abs() < 1e-12);
    }

    #[test]
    fn coalition_members_are_not_claimants() {
        let detector = CoalitionDemandDetector::new();
        let mut snap = snapshot_with_claimant();
        snap.ruling_coalition.insert(StratumKey::Merchant);
        assert!(detector.strongest_claimant(&snap).is_none());
    }

    #[test]
    fn ineligible_strata_never_claim() {
        let detector = CoalitionDemandDetector::new();
        let mut snap = GameStateSnapshot::default();
        snap.total_influence = 100.0;
        snap.class_influence.insert(StratumKey::Slave, 70.0);
        snap.class_influence.insert(StratumKey::Unemployed, 30.0);
        snap.pop_structure.insert(StratumKey::Slave, 900);
        snap.pop_structure.insert(StratumKey::Unemployed, 100);
        assert!(detector.strongest_claimant(&snap).is_none());
    }

    #[test]
    fn empty_strata_never_claim() {
        let detector = CoalitionDemandDetector::new();
        let mut snap = snapshot_with_claimant();
        snap.pop_structure.remove(&StratumKey::Merchant);
        assert!(detector.strongest_claimant(&snap).is_none());
    }

    #[test]
    fn below_threshold_is_quiet() {
        let detector = CoalitionDemandDetector::new();
        let mut snap = snapshot_with_claimant();
        snap.class_influence.insert(StratumKey::Merchant, 19.0);
        snap.class_influence.insert(StratumKey::Peasant, 81.0);
        assert!(detector.strongest_claimant(&snap).is_none());
    }

    #[test]
    fn zero_total_influence_is_quiet() {
        let detector = CoalitionDemandDetector::new();
        let mut snap = snapshot_with_claimant();
        snap.total_influence = 0.0;
        snap.class_influence.clear();
        assert!(detector.strongest_claimant(&snap).is_none());
    }

    #[test]
    fn demand_event_carries_three_resolutions() {
        let mut detector = CoalitionDemandDetector::new();
        let snap = snapshot_with_claimant();
        let event = detector.check_and_create(&snap).unwrap();

        assert_eq!(event.id, "coalition_demand_merchant_100");
        assert_eq!(event.options.len(), 3);

        let accept = event.option("accept_join").unwrap();
        assert!(accept.effects.add_to_coalition.contains(&StratumKey::Merchant));
        assert_eq!(accept.effects.stability, Some(5.0));
        assert_eq!(accept.effects.approval[&StratumKey::Merchant], 15.0);

        let refuse = event.option("refuse_firmly").unwrap();
        assert_eq!(refuse.effects.stability, Some(-8.0));
        assert_eq!(refuse.effects.approval[&StratumKey::Merchant], -25.0);
    }

    #[test]
    fn compensation_prices_a_month_of_expenses() {
        let mut detector = CoalitionDemandDetector::new();
        let mut snap = snapshot_with_claimant();
        // 50 merchants spending 200/day in total -> 4/day per head
        snap.class_expense.insert(StratumKey::Merchant, 200.0);
        let event = detector.check_and_create(&snap).unwrap();
        let pay = event.option("pay_compensation").unwrap();

        // 50 * 4 * 30 = 6000
        assert_eq!(pay.effects.resources[&ResourceKey::Silver], -6000.0);
        assert_eq!(pay.effects.class_wealth[&StratumKey::Merchant], 6000.0);
        assert_eq!(pay.effects.approval[&StratumKey::Merchant], -5.0);
        assert_eq!(pay.effects.stability, Some(-3.0));
    }

    #[test]
    fn compensation_falls_back_when_no_expense_recorded() {
        let mut detector = CoalitionDemandDetector::new();
        let snap = snapshot_with_claimant();
        let event = detector.check_and_create(&snap).unwrap();
        let pay = event.option("pay_compensation").unwrap();
        // 50 heads * 10/day fallback * 30 days
        assert_eq!(pay.effects.resources[&ResourceKey::Silver], -15_000.0);
    }

    #[test]
    fn cooldown_suppresses_then_reset_reallows() {
        let mut detector = CoalitionDemandDetector::new();
        let mut snap = snapshot_with_claimant();

        assert!(detector.check_and_create(&snap).is_some());
        // Within the window: suppressed
        snap.days_elapsed = 130;
        assert!(detector.check_and_create(&snap).is_none());
        // Reset clears the ledger
        detector.reset();
        assert!(detector.check_and_create(&snap).is_some());
    }

    #[test]
    fn cooldown_expires_after_the_window() {
        let mut detector = CoalitionDemandDetector::new();
        let mut snap = snapshot_with_claimant();

        assert!(detector.check_and_create(&snap).is_some());
        snap.days_elapsed = 159;
        assert!(detector.check_and_create(&snap).is_none());
        snap.days_elapsed = 160;
        assert!(detector.check_and_create(&snap).is_some());
    }

    #[test]
    fn cooldowns_are_per_stratum() {
        let mut detector = CoalitionDemandDetector::new();
        let mut snap = snapshot_with_claimant();

        // Merchant fires and cools down
        assert!(detector.check_and_create(&snap).is_some());

        // A different stratum crossing the threshold is not blocked by the
        // merchant cooldown
        snap.class_influence.insert(StratumKey::Merchant, 5.0);
        snap.class_influence.insert(StratumKey::Cleric, 35.0);
        snap.class_influence.insert(StratumKey::Peasant, 60.0);
        snap.pop_structure.insert(StratumKey::Cleric, 40);
        snap.days_elapsed = 101;
        let event = detector.check_and_create(&snap).unwrap();
        assert_eq!(event.id, "coalition_demand_cleric_101");
    }
}
