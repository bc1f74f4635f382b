pub mod engine;
pub mod model;
pub mod scenario;
pub mod testutil;

pub use engine::{
    CoalitionDemandDetector, PaymentStrategy, StandardPayments, ai_surrender_demand, can_trigger,
    enemy_peace_request, player_peace_proposal, resolve, select_random_event, validate_catalog,
};
pub use model::{
    DemandDirective, DemandKind, EffectBundle, EventDefinition, EventOption, GameStateSnapshot,
    NationSnapshot, ResolvedEffectSet, StratumKey,
};
