//! Chainable snapshot builder for tests.
//!
//! Mirrors the shape of real decision points without hand-assembling maps:
//!
//! ```
//! use dynasty_engine::scenario::SnapshotBuilder;
//! use dynasty_engine::model::StratumKey;
//!
//! let snapshot = SnapshotBuilder::at_day(100)
//!     .population(500)
//!     .stratum(StratumKey::Peasant)
//!     .count(400)
//!     .influence(60.0)
//!     .in_coalition()
//!     .done()
//!     .stratum(StratumKey::Merchant)
//!     .count(50)
//!     .influence(40.0)
//!     .done()
//!     .build();
//! assert_eq!(snapshot.population, 500);
//! ```

use crate::model::{
    GameStateSnapshot, NationId, NationSnapshot, ResourceKey, StratumKey,
};

#[derive(Default)]
pub struct SnapshotBuilder {
    snap: GameStateSnapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_day(days_elapsed: u32) -> Self {
        let mut builder = Self::default();
        builder.snap.days_elapsed = days_elapsed;
        builder
    }

    pub fn population(mut self, v: u32) -> Self {
        self.snap.population = v;
        self
    }

    pub fn max_population(mut self, v: u32) -> Self {
        self.snap.max_population = v;
        self
    }

    pub fn epoch(mut self, v: u32) -> Self {
        self.snap.epoch = v;
        self
    }

    pub fn stability(mut self, v: f64) -> Self {
        self.snap.stability = v;
        self
    }

    pub fn resource(mut self, key: ResourceKey, amount: f64) -> Self {
        self.snap.resources.insert(key, amount);
        self
    }

    pub fn total_influence(mut self, v: f64) -> Self {
        self.snap.total_influence = v;
        self
    }

    pub fn total_wealth(mut self, v: f64) -> Self {
        self.snap.total_wealth = v;
        self
    }

    /// Start a per-stratum chain; terminate it with [`StratumRef::done`].
    pub fn stratum(self, key: StratumKey) -> StratumRef {
        StratumRef { builder: self, key }
    }

    /// Start a per-nation chain; terminate it with [`NationRef::done`].
    pub fn nation(self, id: NationId, name: &str) -> NationRef {
        NationRef {
            builder: self,
            nation: NationSnapshot::new(id, name),
        }
    }

    /// Escape hatch: apply an arbitrary closure to the snapshot.
    pub fn with(mut self, f: impl FnOnce(&mut GameStateSnapshot)) -> Self {
        f(&mut self.snap);
        self
    }

    pub fn build(self) -> GameStateSnapshot {
        self.snap
    }
}

/// Typed reference to one stratum under construction, enabling chained
/// field assignment. Call [`done`](Self::done) to return to the builder.
pub struct StratumRef {
    builder: SnapshotBuilder,
    key: StratumKey,
}

impl StratumRef {
    pub fn count(mut self, heads: u32) -> Self {
        self.builder
            .snap
            .pop_structure
            .insert(self.key.clone(), heads);
        self
    }

    pub fn approval(mut self, v: f64) -> Self {
        self.builder
            .snap
            .class_approval
            .insert(self.key.clone(), v);
        self
    }

    pub fn influence(mut self, v: f64) -> Self {
        self.builder
            .snap
            .class_influence
            .insert(self.key.clone(), v);
        self
    }

    pub fn wealth(mut self, v: f64) -> Self {
        self.builder.snap.class_wealth.insert(self.key.clone(), v);
        self
    }

    pub fn wealth_delta(mut self, v: f64) -> Self {
        self.builder
            .snap
            .class_wealth_delta
            .insert(self.key.clone(), v);
        self
    }

    pub fn income(mut self, v: f64) -> Self {
        self.builder.snap.class_income.insert(self.key.clone(), v);
        self
    }

    pub fn expense(mut self, v: f64) -> Self {
        self.builder.snap.class_expense.insert(self.key.clone(), v);
        self
    }

    pub fn in_coalition(mut self) -> Self {
        self.builder
            .snap
            .ruling_coalition
            .insert(self.key.clone());
        self
    }

    /// Terminate the chain and hand the builder back.
    pub fn done(self) -> SnapshotBuilder {
        self.builder
    }
}

/// Typed reference to one nation under construction.
pub struct NationRef {
    builder: SnapshotBuilder,
    nation: NationSnapshot,
}

impl NationRef {
    pub fn wealth(mut self, v: f64) -> Self {
        self.nation.wealth = v;
        self
    }

    pub fn wealth_template(mut self, v: f64) -> Self {
        self.nation.wealth_template = v;
        self
    }

    pub fn wealth_factor(mut self, v: f64) -> Self {
        self.nation.wealth_factor = v;
        self
    }

    pub fn population(mut self, v: u32) -> Self {
        self.nation.population = v;
        self
    }

    pub fn relation(mut self, v: f64) -> Self {
        self.nation.relation = v;
        self
    }

    pub fn at_war(mut self, duration: u32, enemy_losses: u32) -> Self {
        self.nation.war_duration = duration;
        self.nation.enemy_losses = enemy_losses;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.nation.visible = false;
        self
    }

    pub fn appears_in_epoch(mut self, epoch: u32) -> Self {
        self.nation.appear_epoch = epoch;
        self
    }

    /// Escape hatch: apply an arbitrary closure to the nation.
    pub fn with(mut self, f: impl FnOnce(&mut NationSnapshot)) -> Self {
        f(&mut self.nation);
        self
    }

    /// Terminate the chain and hand the builder back.
    pub fn done(mut self) -> SnapshotBuilder {
        self.builder.snap.nations.push(self.nation);
        self.builder
    }
}
