#[macro_use]
mod macros;

pub mod demand;
pub mod effect;
pub mod event;
pub mod keys;
pub mod snapshot;

pub use demand::{DemandDirective, DemandKind};
pub use effect::{EffectBundle, NationFilter, ResolvedEffectSet, WarTarget};
pub use event::{
    Band, EventDefinition, EventOption, RandomEffectEntry, StratumCondition, TriggerConditions,
};
pub use keys::{BuildingKey, DiplomaticActionKind, NationId, ResourceKey, StratumKey};
pub use snapshot::{GameStateSnapshot, NationSnapshot};
