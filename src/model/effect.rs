use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::keys::{BuildingKey, NationId, ResourceKey, StratumKey};

/// Addressing mode for bulk nation effects (`nation_relation` etc.).
///
/// `Random` is normally pre-resolved to a concrete `Nation(id)` at selection
/// time so every occurrence within one event points at the same nation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum NationFilter {
    All,
    Friendly,
    Hostile,
    Random,
    Nation(NationId),
}

impl From<NationFilter> for String {
    fn from(v: NationFilter) -> Self {
        match v {
            NationFilter::All => "all".to_string(),
            NationFilter::Friendly => "friendly".to_string(),
            NationFilter::Hostile => "hostile".to_string(),
            NationFilter::Random => "random".to_string(),
            NationFilter::Nation(id) => id.to_string(),
        }
    }
}

impl TryFrom<String> for NationFilter {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "all" => Ok(NationFilter::All),
            "friendly" => Ok(NationFilter::Friendly),
            "hostile" => Ok(NationFilter::Hostile),
            "random" => Ok(NationFilter::Random),
            other => other
                .parse::<NationId>()
                .map(NationFilter::Nation)
                .map_err(|_| format!("unknown nation filter: {other}")),
        }
    }
}

/// Target of a `trigger_war` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum WarTarget {
    Strongest,
    Random,
    Nation(NationId),
}

impl From<WarTarget> for String {
    fn from(v: WarTarget) -> Self {
        match v {
            WarTarget::Strongest => "strongest".to_string(),
            WarTarget::Random => "random".to_string(),
            WarTarget::Nation(id) => id.to_string(),
        }
    }
}

impl TryFrom<String> for WarTarget {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "strongest" => Ok(WarTarget::Strongest),
            "random" => Ok(WarTarget::Random),
            other => other
                .parse::<NationId>()
                .map(WarTarget::Nation)
                .map_err(|_| format!("unknown war target: {other}")),
        }
    }
}

/// Declarative description of how one chosen option changes game state.
///
/// Every field is optional and independently applicable; the engine only
/// assembles bundles, the host applies them. When both `resource_percent`
/// and `resources` target the same key in one bundle, the host applies the
/// percent delta first, then the absolute delta.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectBundle {
    /// Fractional delta of current stock (`-0.03` = lose 3%).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resource_percent: BTreeMap<ResourceKey, f64>,
    /// Absolute stock deltas.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<ResourceKey, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<i64>,
    /// Delta to population capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pop: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<f64>,
    /// Approval delta per stratum.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub approval: BTreeMap<StratumKey, f64>,
    /// Demand-side modifier per resource; decay is owned by the economic
    /// simulator, the engine only emits magnitude.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resource_demand_mod: BTreeMap<ResourceKey, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stratum_demand_mod: BTreeMap<StratumKey, f64>,
    /// Production modifier per building; `BuildingKey::All` hits every building.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub building_production_mod: BTreeMap<BuildingKey, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nation_relation: BTreeMap<NationFilter, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nation_wealth: BTreeMap<NationFilter, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nation_aggression: BTreeMap<NationFilter, f64>,
    /// Directive: strata to admit into the ruling coalition.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub add_to_coalition: BTreeSet<StratumKey>,
    /// Directive: direct wealth transfer per stratum.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub class_wealth: BTreeMap<StratumKey, f64>,
    /// Directive: open a war against the given target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_war: Option<WarTarget>,
}

fn merge_map<K: Ord + Clone>(into: &mut BTreeMap<K, f64>, from: &BTreeMap<K, f64>) {
    for (key, value) in from {
        *into.entry(key.clone()).or_insert(0.0) += value;
    }
}

fn merge_opt_f64(into: &mut Option<f64>, from: Option<f64>) {
    if let Some(v) = from {
        *into = Some(into.unwrap_or(0.0) + v);
    }
}

fn merge_opt_i64(into: &mut Option<i64>, from: Option<i64>) {
    if let Some(v) = from {
        *into = Some(into.unwrap_or(0) + v);
    }
}

impl EffectBundle {
    /// Merge another bundle into this one: numeric fields sum, map fields
    /// union (summing shared keys), set fields union. Commutative and
    /// associative for all of those, so the order in which random branches
    /// fire never changes the result.
    ///
    /// Two bundles both carrying `trigger_war` is an authoring bug; the
    /// first value wins.
    pub fn merge(&mut self, other: &EffectBundle) {
        merge_map(&mut self.resource_percent, &other.resource_percent);
        merge_map(&mut self.resources, &other.resources);
        merge_opt_f64(&mut self.population_percent, other.population_percent);
        merge_opt_i64(&mut self.population, other.population);
        merge_opt_i64(&mut self.max_pop, other.max_pop);
        merge_opt_f64(&mut self.stability, other.stability);
        merge_map(&mut self.approval, &other.approval);
        merge_map(&mut self.resource_demand_mod, &other.resource_demand_mod);
        merge_map(&mut self.stratum_demand_mod, &other.stratum_demand_mod);
        merge_map(
            &mut self.building_production_mod,
            &other.building_production_mod,
        );
        merge_map(&mut self.nation_relation, &other.nation_relation);
        merge_map(&mut self.nation_wealth, &other.nation_wealth);
        merge_map(&mut self.nation_aggression, &other.nation_aggression);
        self.add_to_coalition
            .extend(other.add_to_coalition.iter().cloned());
        merge_map(&mut self.class_wealth, &other.class_wealth);
        if let Some(target) = other.trigger_war {
            if self.trigger_war.is_some() && self.trigger_war != Some(target) {
                debug_assert!(false, "conflicting trigger_war directives in merged bundle");
                tracing::warn!(?target, "conflicting trigger_war directive dropped");
            } else {
                self.trigger_war = Some(target);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == EffectBundle::default()
    }

    /// Rewrite every `Random` nation selector to the given concrete nation,
    /// folding its magnitude into any existing entry for that nation.
    pub fn resolve_random_nation(&mut self, nation: NationId) {
        for map in [
            &mut self.nation_relation,
            &mut self.nation_wealth,
            &mut self.nation_aggression,
        ] {
            if let Some(value) = map.remove(&NationFilter::Random) {
                *map.entry(NationFilter::Nation(nation)).or_insert(0.0) += value;
            }
        }
        if self.trigger_war == Some(WarTarget::Random) {
            self.trigger_war = Some(WarTarget::Nation(nation));
        }
    }

    /// True if any field still addresses a random nation.
    pub fn references_random_nation(&self) -> bool {
        self.nation_relation.contains_key(&NationFilter::Random)
            || self.nation_wealth.contains_key(&NationFilter::Random)
            || self.nation_aggression.contains_key(&NationFilter::Random)
            || self.trigger_war == Some(WarTarget::Random)
    }
}

/// Output of effect resolution: the merged bundle plus the descriptions of
/// the random branches that fired, for the host's event log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedEffectSet {
    pub effects: EffectBundle,
    pub triggered: Vec<String>,
}
