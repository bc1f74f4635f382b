pub mod coalition;
pub mod conditions;
pub mod costs;
pub mod diplomatic;
pub mod negotiation;
pub mod payments;
pub mod resolver;
pub mod selector;
pub mod validate;

pub use coalition::CoalitionDemandDetector;
pub use conditions::can_trigger;
pub use negotiation::{ai_surrender_demand, enemy_peace_request, player_peace_proposal};
pub use payments::{
    InstallmentPlan, PaymentMode, PaymentStrategy, PaymentTiers, StandardPayments,
};
pub use resolver::resolve;
pub use selector::select_random_event;
pub use validate::{ValidationIssue, validate_catalog};
