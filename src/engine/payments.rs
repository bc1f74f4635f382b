//! Peace-payment and installment formulas behind an injectable seam.
//!
//! The tier factories in [`super::negotiation`] only rely on the contract:
//! tiers ordered `low <= standard <= high`, monotone in war score, capped
//! against the target's wealth. Hosts may swap in their own strategy.

/// Which side pays: `Demanding` prices what the player extracts from a
/// beaten enemy, `Offering` what the player pays to escape a losing war.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMode {
    Demanding,
    Offering,
}

/// Three-step payment menu for one negotiation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentTiers {
    pub low: f64,
    pub standard: f64,
    pub high: f64,
}

/// A lump sum spread over a fixed horizon. The total exceeds the lump sum;
/// deferral is priced in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstallmentPlan {
    pub daily_amount: f64,
    pub total_amount: f64,
    pub duration_days: u32,
}

/// Strategy seam for the external payment formulas.
pub trait PaymentStrategy {
    /// Price a peace settlement from war score, enemy losses, war duration
    /// (days), and the payer-side wealth baseline.
    fn peace_payment(
        &self,
        war_score: f64,
        enemy_losses: u32,
        war_duration: u32,
        wealth_baseline: f64,
        mode: PaymentMode,
    ) -> PaymentTiers;

    /// Spread a lump sum into a daily installment plan.
    fn installment_plan(&self, amount: f64) -> InstallmentPlan;
}

/// Installment total relative to the lump sum.
pub const INSTALLMENT_TOTAL_MULTIPLIER: f64 = 3.5;
/// Installment horizon: three years.
pub const INSTALLMENT_DURATION_DAYS: u32 = 1095;

/// Absolute ceiling on any single payment.
const PEACE_PAYMENT_HARD_CAP: f64 = 200_000_000.0;
/// Minimum headroom below the wealth cap, so tiny nations still pay something.
const MIN_WEALTH_HEADROOM: f64 = 50_000.0;

struct ModeCoefficients {
    high: f64,
    standard: f64,
    low: f64,
}

const DEMANDING: ModeCoefficients = ModeCoefficients {
    high: 120.0,
    standard: 80.0,
    low: 50.0,
};
const OFFERING: ModeCoefficients = ModeCoefficients {
    high: 60.0,
    standard: 40.0,
    low: 25.0,
};

/// Default payment formulas.
///
/// Components per tier: war score x mode coefficient, losses x 80/50/35,
/// duration x 25/18/12. A wealth floor (18%/12%/6% of the baseline) keeps
/// settlements meaningful against rich targets; a strict cap of 50% of the
/// baseline keeps them survivable. Minimums 600/400/200.
pub struct StandardPayments;

impl PaymentStrategy for StandardPayments {
    fn peace_payment(
        &self,
        war_score: f64,
        enemy_losses: u32,
        war_duration: u32,
        wealth_baseline: f64,
        mode: PaymentMode,
    ) -> PaymentTiers {
        let score = war_score.abs();
        let losses = f64::from(enemy_losses);
        let duration = f64::from(war_duration);
        let wealth = wealth_baseline.max(0.0);

        let coef = match mode {
            PaymentMode::Demanding => DEMANDING,
            PaymentMode::Offering => OFFERING,
        };

        let raw_high = (score * coef.high + losses * 80.0 + duration * 25.0).ceil();
        let raw_standard = (score * coef.standard + losses * 50.0 + duration * 18.0).ceil();
        let raw_low = (score * coef.low + losses * 35.0 + duration * 12.0).ceil();

        let effective_cap = PEACE_PAYMENT_HARD_CAP.min((wealth * 0.5).max(MIN_WEALTH_HEADROOM));

        let floor_high = (wealth * 0.18).floor().min(effective_cap);
        let floor_standard = (wealth * 0.12).floor().min(effective_cap);
        let floor_low = (wealth * 0.06).floor().min(effective_cap);

        PaymentTiers {
            high: raw_high.min(effective_cap).max(floor_high).max(600.0),
            standard: raw_standard
                .min(effective_cap)
                .max(floor_standard)
                .max(400.0),
            low: raw_low.min(effective_cap).max(floor_low).max(200.0),
        }
    }

    fn installment_plan(&self, amount: f64) -> InstallmentPlan {
        let total_amount = (amount.max(0.0) * INSTALLMENT_TOTAL_MULTIPLIER).ceil();
        let daily_amount = (total_amount / f64::from(INSTALLMENT_DURATION_DAYS)).ceil();
        InstallmentPlan {
            daily_amount,
            total_amount,
            duration_days: INSTALLMENT_DURATION_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_ordered() {
        let strategy = StandardPayments;
        for (score, losses, duration, wealth) in [
            (0.0, 0, 0, 0.0),
            (80.0, 200, 400, 120_000.0),
            (350.0, 5000, 2000, 2_000_000.0),
            (-120.0, 50, 90, 60_000.0),
        ] {
            for mode in [PaymentMode::Demanding, PaymentMode::Offering] {
                let tiers = strategy.peace_payment(score, losses, duration, wealth, mode);
                assert!(
                    tiers.low <= tiers.standard && tiers.standard <= tiers.high,
                    "tiers out of order for score={score}: {tiers:?}"
                );
            }
        }
    }

    #[test]
    fn demanding_pays_more_than_offering() {
        let strategy = StandardPayments;
        let demanding =
            strategy.peace_payment(200.0, 1000, 500, 500_000.0, PaymentMode::Demanding);
        let offering = strategy.peace_payment(200.0, 1000, 500, 500_000.0, PaymentMode::Offering);
        assert!(demanding.high > offering.high);
        assert!(demanding.standard > offering.standard);
    }

    #[test]
    fn minimums_hold_for_trivial_wars() {
        let tiers =
            StandardPayments.peace_payment(0.0, 0, 0, 0.0, PaymentMode::Offering);
        assert_eq!(tiers.low, 200.0);
        assert_eq!(tiers.standard, 400.0);
        assert_eq!(tiers.high, 600.0);
    }

    #[test]
    fn wealth_cap_limits_extraction() {
        // A huge war score against a modest nation is capped at half its
        // wealth baseline (or the minimum headroom, whichever is larger).
        let tiers = StandardPayments.peace_payment(
            10_000.0,
            100_000,
            5_000,
            400_000.0,
            PaymentMode::Demanding,
        );
        assert_eq!(tiers.high, 200_000.0);
    }

    #[test]
    fn wealth_floor_lifts_small_scores_against_rich_targets() {
        let tiers =
            StandardPayments.peace_payment(1.0, 0, 0, 1_000_000.0, PaymentMode::Demanding);
        assert_eq!(tiers.high, 180_000.0);
        assert_eq!(tiers.standard, 120_000.0);
        assert_eq!(tiers.low, 60_000.0);
    }

    #[test]
    fn installment_total_and_daily_amount() {
        let plan = StandardPayments.installment_plan(10_000.0);
        assert_eq!(plan.total_amount, 35_000.0);
        assert_eq!(plan.duration_days, INSTALLMENT_DURATION_DAYS);
        assert_eq!(plan.daily_amount, (35_000.0_f64 / 1095.0).ceil());
        // Daily payments over the horizon cover the total
        assert!(plan.daily_amount * f64::from(plan.duration_days) >= plan.total_amount);
    }

    #[test]
    fn installment_of_zero_is_zero() {
        let plan = StandardPayments.installment_plan(0.0);
        assert_eq!(plan.total_amount, 0.0);
        assert_eq!(plan.daily_amount, 0.0);
    }
}
