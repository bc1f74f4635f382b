use rand::{Rng, RngCore};

use crate::model::{EventOption, ResolvedEffectSet};

/// Resolve a chosen option into the final effect set for the host to apply.
///
/// The deterministic bundle is copied verbatim; percent deltas stay
/// fractional and are applied by the host against live stock. Each random
/// entry is then an independent Bernoulli trial: one uniform draw per entry,
/// fired when `draw < chance`, merged with the commutative bundle merge. An
/// entry is never evaluated twice, and entry order cannot change the result.
///
/// Resolution is side-effect free; nothing is applied here, so a later
/// "reject" by the host never leaves a bundle half-applied.
pub fn resolve(option: &EventOption, rng: &mut dyn RngCore) -> ResolvedEffectSet {
    let mut resolved = ResolvedEffectSet {
        effects: option.effects.clone(),
        triggered: Vec::new(),
    };

    for entry in &option.random_effects {
        let draw: f64 = rng.random_range(0.0..1.0);
        if draw < entry.chance {
            resolved.effects.merge(&entry.effects);
            if let Some(desc) = &entry.description {
                resolved.triggered.push(desc.clone());
            }
        }
    }

    resolved
}
