//! Diplomatic action costs: gifts, provocations, ally upkeep.
//!
//! All scale with the poorer side's wealth and clamp to fixed ranges, so
//! early-game actions stay affordable and late-game ones stay meaningful.

fn scaled_clamped(base: f64, rate: f64, min: f64, max: f64) -> f64 {
    (base.max(0.0) * rate).floor().clamp(min, max)
}

/// Cost for the player to send a gift: 5% of the poorer side's wealth,
/// clamped to 100..=500_000.
pub fn dynamic_gift_cost(player_wealth: f64, target_wealth: f64) -> f64 {
    scaled_clamped(player_wealth.min(target_wealth), 0.05, 100.0, 500_000.0)
}

/// Gift amount an AI nation sends: 2% of the relevant wealth, clamped to
/// 30..=10_000. When the receiver is known, the poorer side sets the scale.
pub fn ai_gift_amount(sender_wealth: f64, receiver_wealth: Option<f64>) -> f64 {
    let base = match receiver_wealth {
        Some(receiver) => sender_wealth.min(receiver),
        None => sender_wealth,
    };
    scaled_clamped(base, 0.02, 30.0, 10_000.0)
}

/// Upkeep gift that maintains an alliance: 3% of the poorer side's wealth,
/// clamped to 80..=300_000.
pub fn ally_maintenance_cost(player_wealth: f64, ally_wealth: f64) -> f64 {
    scaled_clamped(player_wealth.min(ally_wealth), 0.03, 80.0, 300_000.0)
}

/// Cost to provoke one nation against another: 3% of the poorer side's
/// wealth, clamped to 150..=300_000.
pub fn provoke_cost(player_wealth: f64, target_wealth: f64) -> f64 {
    scaled_clamped(player_wealth.min(target_wealth), 0.03, 150.0, 300_000.0)
}
