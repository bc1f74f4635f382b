use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::keys::{DiplomaticActionKind, NationId, ResourceKey, StratumKey};

/// Read-only view of the simulation at one decision point.
///
/// Produced fresh by the host each tick; the engine never mutates it and
/// never holds on to it past a single call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub population: u32,
    pub max_population: u32,
    /// Integer era index (0 = stone age).
    pub epoch: u32,
    pub days_elapsed: u32,
    /// Realm-wide stability, 0-100.
    pub stability: f64,
    /// Current stock per resource. Absent key reads as 0.
    #[serde(default)]
    pub resources: BTreeMap<ResourceKey, f64>,
    /// Head-count per social stratum.
    #[serde(default)]
    pub pop_structure: BTreeMap<StratumKey, u32>,
    /// Approval per stratum, 0-100. Absent key reads as 50.
    #[serde(default)]
    pub class_approval: BTreeMap<StratumKey, f64>,
    #[serde(default)]
    pub class_influence: BTreeMap<StratumKey, f64>,
    /// If non-positive, recomputed as the sum over `class_influence`.
    #[serde(default)]
    pub total_influence: f64,
    #[serde(default)]
    pub class_wealth: BTreeMap<StratumKey, f64>,
    /// Same fallback rule as `total_influence`.
    #[serde(default)]
    pub total_wealth: f64,
    #[serde(default)]
    pub class_wealth_delta: BTreeMap<StratumKey, f64>,
    #[serde(default)]
    pub class_income: BTreeMap<StratumKey, f64>,
    /// Total daily expense per stratum (not per capita).
    #[serde(default)]
    pub class_expense: BTreeMap<StratumKey, f64>,
    /// Strata currently holding political power.
    #[serde(default)]
    pub ruling_coalition: BTreeSet<StratumKey>,
    #[serde(default)]
    pub nations: Vec<NationSnapshot>,
}

/// Diplomatic context for one foreign nation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NationSnapshot {
    pub id: NationId,
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub appear_epoch: u32,
    #[serde(default)]
    pub expire_epoch: Option<u32>,
    /// Relation toward the player, 0-100.
    #[serde(default)]
    pub relation: f64,
    #[serde(default)]
    pub wealth: f64,
    /// Scenario-authored wealth target, used as a baseline floor.
    #[serde(default)]
    pub wealth_template: f64,
    /// Foreign-power scaling factor applied to the minimum wealth baseline.
    #[serde(default = "default_wealth_factor")]
    pub wealth_factor: f64,
    #[serde(default)]
    pub population: u32,
    #[serde(default)]
    pub base_population: u32,
    /// Losses this nation has suffered in the current war against the player.
    #[serde(default)]
    pub enemy_losses: u32,
    /// Days the current war has lasted.
    #[serde(default)]
    pub war_duration: u32,
    #[serde(default)]
    pub last_diplomatic_action_day: BTreeMap<DiplomaticActionKind, u32>,
}

fn default_visible() -> bool {
    true
}

fn default_wealth_factor() -> f64 {
    1.0
}

impl GameStateSnapshot {
    /// Total influence, falling back to the per-stratum sum when the recorded
    /// total is non-positive.
    pub fn effective_total_influence(&self) -> f64 {
        if self.total_influence > 0.0 {
            self.total_influence
        } else {
            self.class_influence.values().sum()
        }
    }

    /// Total wealth with the same non-positive fallback as influence.
    pub fn effective_total_wealth(&self) -> f64 {
        if self.total_wealth > 0.0 {
            self.total_wealth
        } else {
            self.class_wealth.values().sum()
        }
    }

    /// Share of total influence held by a stratum. A non-positive total is a
    /// 0.0 share, never a division by zero.
    pub fn influence_share(&self, stratum: &StratumKey) -> f64 {
        let total = self.effective_total_influence();
        if total > 0.0 {
            self.class_influence.get(stratum).copied().unwrap_or(0.0) / total
        } else {
            0.0
        }
    }

    /// Share of total wealth held by a stratum, with the same fallback.
    pub fn wealth_share(&self, stratum: &StratumKey) -> f64 {
        let total = self.effective_total_wealth();
        if total > 0.0 {
            self.class_wealth.get(stratum).copied().unwrap_or(0.0) / total
        } else {
            0.0
        }
    }

    /// Approval of a stratum, defaulting to the neutral 50.
    pub fn approval(&self, stratum: &StratumKey) -> f64 {
        self.class_approval.get(stratum).copied().unwrap_or(50.0)
    }

    /// Current stock of a resource, defaulting to 0.
    pub fn resource(&self, key: &ResourceKey) -> f64 {
        self.resources.get(key).copied().unwrap_or(0.0)
    }

    /// Nations a random-nation selector may resolve to: visible and present
    /// in the current epoch.
    pub fn eligible_nations(&self) -> Vec<&NationSnapshot> {
        self.nations
            .iter()
            .filter(|n| {
                n.visible
                    && n.appear_epoch <= self.epoch
                    && n.expire_epoch.is_none_or(|e| self.epoch <= e)
            })
            .collect()
    }
}

impl NationSnapshot {
    pub fn new(id: NationId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            visible: true,
            appear_epoch: 0,
            expire_epoch: None,
            relation: 50.0,
            wealth: 0.0,
            wealth_template: 0.0,
            wealth_factor: 1.0,
            population: 0,
            base_population: 0,
            enemy_losses: 0,
            war_duration: 0,
            last_diplomatic_action_day: BTreeMap::new(),
        }
    }

    /// Days since the given diplomatic action was last taken toward this
    /// nation, or `None` if it never was.
    pub fn days_since_action(&self, kind: DiplomaticActionKind, today: u32) -> Option<u32> {
        self.last_diplomatic_action_day
            .get(&kind)
            .map(|&day| today.saturating_sub(day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn influence_share_zero_total_is_zero() {
        let mut snap = GameStateSnapshot::default();
        snap.class_influence.insert(StratumKey::Peasant, 0.0);
        snap.total_influence = 0.0;
        let share = snap.influence_share(&StratumKey::Peasant);
        assert_eq!(share, 0.0);
        assert!(share.is_finite());
    }

    #[test]
    fn influence_share_recomputes_total_from_strata() {
        let mut snap = GameStateSnapshot::default();
        snap.class_influence.insert(StratumKey::Peasant, 60.0);
        snap.class_influence.insert(StratumKey::Merchant, 40.0);
        // Recorded total is stale/absent; sum fallback kicks in
        snap.total_influence = 0.0;
        assert!((snap.influence_share(&StratumKey::Merchant) - 0.40).abs() < 1e-12);
    }

    #[test]
    fn wealth_share_prefers_recorded_total() {
        let mut snap = GameStateSnapshot::default();
        snap.class_wealth.insert(StratumKey::Merchant, 50.0);
        snap.total_wealth = 200.0;
        assert!((snap.wealth_share(&StratumKey::Merchant) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn approval_defaults_to_fifty() {
        let snap = GameStateSnapshot::default();
        assert_eq!(snap.approval(&StratumKey::Cleric), 50.0);
    }

    #[test]
    fn missing_resource_reads_as_zero() {
        let snap = GameStateSnapshot::default();
        assert_eq!(snap.resource(&ResourceKey::Food), 0.0);
    }

    #[test]
    fn eligible_nations_respect_epoch_window() {
        let mut snap = GameStateSnapshot::default();
        snap.epoch = 2;
        let mut early = NationSnapshot::new(1, "Early Empire");
        early.expire_epoch = Some(1);
        let mut late = NationSnapshot::new(2, "Late Kingdom");
        late.appear_epoch = 3;
        let mut current = NationSnapshot::new(3, "Current Realm");
        current.appear_epoch = 1;
        let mut hidden = NationSnapshot::new(4, "Hidden Tribe");
        hidden.visible = false;
        snap.nations = vec![early, late, current, hidden];

        let ids: Vec<NationId> = snap.eligible_nations().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn days_since_action_tracks_ledger() {
        let mut nation = NationSnapshot::new(1, "Rival");
        nation
            .last_diplomatic_action_day
            .insert(DiplomaticActionKind::Gift, 100);
        assert_eq!(nation.days_since_action(DiplomaticActionKind::Gift, 130), Some(30));
        assert_eq!(nation.days_since_action(DiplomaticActionKind::Provoke, 130), None);
    }

    #[test]
    fn snapshot_deserializes_with_sparse_fields() {
        let json = r#"{
            "population": 20,
            "max_population": 50,
            "epoch": 0,
            "days_elapsed": 12,
            "stability": 55.0,
            "resources": {"food": 90.0}
        }"#;
        let snap: GameStateSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.population, 20);
        assert_eq!(snap.resource(&ResourceKey::Food), 90.0);
        assert!(snap.ruling_coalition.is_empty());
        assert!(snap.nations.is_empty());
    }
}
