//! War-score negotiation: turns a continuous advantage score into discrete,
//! capped demand menus.
//!
//! Three factories share the same tiering core and differ only in which
//! side's score dominates and which payment mode prices the settlement:
//! the enemy suing for peace (player demanding), the player proposing peace
//! (either side of the ladder), and the AI demanding the player's surrender
//! (player offering). Tier comparisons are strict: a war score of exactly
//! 150 falls into the bucket below.

use super::payments::{PaymentMode, PaymentStrategy};
use crate::model::{
    DemandDirective, DemandKind, EventDefinition, EventOption, GameStateSnapshot, NationSnapshot,
};

/// Floor under every wealth baseline used to price a settlement.
pub const MIN_PEACE_WEALTH_BASELINE: f64 = 50_000.0;
/// Absolute ceiling on any population cession, winning over computed caps.
pub const MAX_TERRITORY_POPULATION: u32 = 5_000;
/// Open-market term: three years.
pub const OPEN_MARKET_DURATION_DAYS: u32 = 1095;

/// War duration feeds cession severity at one point per this many days.
const DURATION_PRESSURE_DIVISOR: f64 = 4_000.0;
/// Severity never drops below 1.2% even in a fresh stalemate.
const MIN_CESSION_SEVERITY: f64 = 0.012;
/// Population base fallbacks when the context carries no numbers.
const POPULATION_BASE_FALLBACK: u32 = 1_000;
const POPULATION_BASE_FLOOR: u32 = 200;
/// Player wealth fallback when stratum wealth is not recorded.
const PLAYER_WEALTH_FALLBACK: f64 = 10_000.0;

/// Baseline wealth a settlement is priced against. Missing or poor nation
/// data degrades to the 50k floor scaled by the nation's power factor.
pub fn wealth_baseline(nation: &NationSnapshot) -> f64 {
    MIN_PEACE_WEALTH_BASELINE
        .max(nation.wealth)
        .max(0.5 * nation.wealth_template)
        .max(MIN_PEACE_WEALTH_BASELINE * nation.wealth_factor)
}

fn nation_population_base(nation: &NationSnapshot) -> u32 {
    let base = if nation.population > 0 {
        nation.population
    } else if nation.base_population > 0 {
        nation.base_population
    } else {
        POPULATION_BASE_FALLBACK
    };
    base.max(POPULATION_BASE_FLOOR)
}

fn player_population_base(snapshot: &GameStateSnapshot) -> u32 {
    let base = if snapshot.population > 0 {
        snapshot.population
    } else if snapshot.max_population > 0 {
        snapshot.max_population
    } else {
        POPULATION_BASE_FALLBACK
    };
    base.max(POPULATION_BASE_FLOOR)
}

fn player_wealth_baseline(snapshot: &GameStateSnapshot) -> f64 {
    let total = snapshot.effective_total_wealth();
    if total > 0.0 { total } else { PLAYER_WEALTH_FALLBACK }
}

/// Population (and capacity) a cession demand asks for.
///
/// `severity = clamp(|war_part| / severity_divisor + war_duration / 4000,
/// 1.2%, max_percent)`, applied to the ceding side's population base, then
/// clamped to `[min_floor, base * max_percent]` and finally to the global
/// [`MAX_TERRITORY_POPULATION`] cap, which always wins.
fn population_cession(
    population_base: u32,
    war_part: f64,
    war_duration: u32,
    severity_divisor: f64,
    max_percent: f64,
    min_floor: u32,
) -> u32 {
    let war_pressure = war_part.abs() / severity_divisor;
    let duration_pressure = f64::from(war_duration) / DURATION_PRESSURE_DIVISOR;
    let severity = (war_pressure + duration_pressure).clamp(MIN_CESSION_SEVERITY, max_percent);
    let raw = (f64::from(population_base) * severity).floor() as u32;
    let hard_cap = (f64::from(population_base) * max_percent).floor() as u32;
    raw.max(min_floor)
        .min(hard_cap.max(min_floor))
        .min(MAX_TERRITORY_POPULATION)
}

fn demand_option(id: &str, text: String, description: String, directive: DemandDirective) -> EventOption {
    EventOption {
        id: id.to_string(),
        text,
        description,
        demand: Some(directive),
        ..Default::default()
    }
}

fn tribute_option(id: &str, verb: &str, amount: f64) -> EventOption {
    demand_option(
        id,
        format!("{verb} {amount:.0} silver"),
        format!("A lump payment of {amount:.0} silver settles the war."),
        DemandDirective::new(DemandKind::Tribute, amount),
    )
}

fn installment_option(id: &str, strategy: &dyn PaymentStrategy, lump_sum: f64) -> EventOption {
    let plan = strategy.installment_plan(lump_sum);
    demand_option(
        id,
        format!("{:.0} silver per day in installments", plan.daily_amount),
        format!(
            "Spread the payment: {:.0} silver per day for {} days ({:.0} in total).",
            plan.daily_amount, plan.duration_days, plan.total_amount
        ),
        DemandDirective::new(DemandKind::Installment, plan.daily_amount),
    )
}

fn cession_option(id: &str, verb: &str, heads: u32) -> EventOption {
    demand_option(
        id,
        format!("{verb} territory for {heads} population"),
        format!("Border territory changes hands, moving {heads} population and capacity."),
        DemandDirective::new(DemandKind::PopulationCession, f64::from(heads)),
    )
}

fn market_option(nation: &NationSnapshot) -> EventOption {
    demand_option(
        "demand_open_market",
        "Demand an open market".to_string(),
        format!(
            "{} opens its market to unrestricted trade for {} days.",
            nation.name, OPEN_MARKET_DURATION_DAYS
        ),
        DemandDirective::new(DemandKind::MarketAccess, f64::from(OPEN_MARKET_DURATION_DAYS)),
    )
}

fn reject_option(id: &str, text: &str, description: &str) -> EventOption {
    demand_option(
        id,
        text.to_string(),
        description.to_string(),
        DemandDirective::flat(DemandKind::Reject),
    )
}

fn peace_only_option() -> EventOption {
    demand_option(
        "peace_only",
        "Unconditional peace".to_string(),
        "End the war with no further terms.".to_string(),
        DemandDirective::flat(DemandKind::PeaceOnly),
    )
}

/// The beaten enemy sues for peace; `war_score` is the player's advantage.
///
/// Tier ladder (strict comparisons): above 300 annexation joins the menu,
/// above 150 vassalization and the open market, above 50 standard tribute
/// replaces the baseline offer. Installments always accompany lump sums,
/// cession scales with tier, and rejection is always available.
pub fn enemy_peace_request(
    nation: &NationSnapshot,
    war_score: f64,
    snapshot: &GameStateSnapshot,
    strategy: &dyn PaymentStrategy,
) -> EventDefinition {
    let baseline = wealth_baseline(nation);
    let payments = strategy.peace_payment(
        war_score,
        nation.enemy_losses,
        nation.war_duration,
        baseline,
        PaymentMode::Demanding,
    );
    let population_base = nation_population_base(nation);
    let mut options = Vec::new();

    let description = if war_score > 300.0 {
        options.push(demand_option(
            "demand_annex",
            format!("Annex {}", nation.name),
            "Their state ceases to exist; everything they hold becomes yours.".to_string(),
            DemandDirective::flat(DemandKind::Annex),
        ));
        options.push(demand_option(
            "demand_vassalize",
            format!("Vassalize {}", nation.name),
            "They keep their throne and pay tribute to yours.".to_string(),
            DemandDirective::flat(DemandKind::Vassalize),
        ));
        options.push(tribute_option("demand_tribute", "Demand", payments.high));
        options.push(installment_option("demand_installment", strategy, payments.high));
        options.push(cession_option(
            "demand_population",
            "Demand",
            population_cession(population_base, war_score, nation.war_duration, 2_000.0, 0.06, 6),
        ));
        options.push(market_option(nation));
        format!(
            "{} has been crushed. Their envoys beg for any peace you will grant; \
             nothing they hold is beyond your reach.",
            nation.name
        )
    } else if war_score > 150.0 {
        options.push(demand_option(
            "demand_vassalize",
            format!("Vassalize {}", nation.name),
            "They keep their throne and pay tribute to yours.".to_string(),
            DemandDirective::flat(DemandKind::Vassalize),
        ));
        options.push(tribute_option("demand_tribute", "Demand", payments.high));
        options.push(installment_option("demand_installment", strategy, payments.high));
        options.push(cession_option(
            "demand_population",
            "Demand",
            population_cession(population_base, war_score, nation.war_duration, 2_500.0, 0.04, 5),
        ));
        options.push(market_option(nation));
        format!(
            "{} has suffered grievous losses and sues for peace. Your advantage \
             lets you dictate harsh terms.",
            nation.name
        )
    } else if war_score > 50.0 {
        options.push(tribute_option("demand_tribute", "Demand", payments.standard));
        options.push(installment_option("demand_installment", strategy, payments.standard));
        options.push(cession_option(
            "demand_population",
            "Demand",
            population_cession(population_base, war_score, nation.war_duration, 3_000.0, 0.02, 4),
        ));
        format!(
            "{} is losing ground and asks for peace, offering reparations to end the war.",
            nation.name
        )
    } else {
        options.push(tribute_option("accept_tribute", "Accept", payments.low));
        options.push(installment_option("accept_installment", strategy, payments.low));
        format!(
            "{} sends envoys asking for peace. The war is not yet decided, but they \
             offer silver as a gesture of good faith.",
            nation.name
        )
    };

    options.push(reject_option(
        "reject",
        "Reject the offer",
        "Continue the war in pursuit of a greater victory.",
    ));

    EventDefinition {
        id: format!("enemy_peace_request_{}_{}", nation.id, snapshot.days_elapsed),
        name: format!("{} sues for peace", nation.name),
        icon: Some("hand_heart".to_string()),
        description,
        trigger_conditions: None,
        options,
        diplomatic: true,
    }
}

/// The player opens negotiations; `war_score` is signed (positive = player
/// advantage). The demanding ladder mirrors the enemy-peace tiers at
/// 500/300/150/50; below -50 and -200 the player must offer concessions
/// instead of extracting them; between the ladders only unconditional peace
/// is on the table.
pub fn player_peace_proposal(
    nation: &NationSnapshot,
    war_score: f64,
    snapshot: &GameStateSnapshot,
    strategy: &dyn PaymentStrategy,
) -> EventDefinition {
    let mut options = Vec::new();

    let description = if war_score > 50.0 {
        let payments = strategy.peace_payment(
            war_score,
            nation.enemy_losses,
            nation.war_duration,
            wealth_baseline(nation),
            PaymentMode::Demanding,
        );
        let population_base = nation_population_base(nation);

        if war_score > 500.0 {
            options.push(demand_option(
                "demand_annex",
                format!("Demand the annexation of {}", nation.name),
                "Total capitulation: their realm is absorbed into yours.".to_string(),
                DemandDirective::flat(DemandKind::Annex),
            ));
        }
        if war_score > 300.0 {
            options.push(demand_option(
                "demand_vassalize",
                format!("Demand vassalage from {}", nation.name),
                "They submit as a tributary of your crown.".to_string(),
                DemandDirective::flat(DemandKind::Vassalize),
            ));
        }
        if war_score > 150.0 {
            options.push(tribute_option("demand_tribute", "Demand", payments.high));
            options.push(installment_option("demand_installment", strategy, payments.high));
            options.push(cession_option(
                "demand_population",
                "Demand",
                population_cession(
                    population_base,
                    war_score,
                    nation.war_duration,
                    2_500.0,
                    0.04,
                    5,
                ),
            ));
            options.push(market_option(nation));
        } else {
            options.push(tribute_option("demand_tribute", "Demand", payments.standard));
            options.push(installment_option("demand_installment", strategy, payments.standard));
            options.push(cession_option(
                "demand_population",
                "Demand",
                population_cession(
                    population_base,
                    war_score,
                    nation.war_duration,
                    3_000.0,
                    0.02,
                    4,
                ),
            ));
        }
        options.push(peace_only_option());
        format!(
            "You hold the upper hand against {}. Now is the moment to name your price for peace.",
            nation.name
        )
    } else if war_score < -50.0 {
        let payments = strategy.peace_payment(
            war_score,
            0,
            nation.war_duration,
            player_wealth_baseline(snapshot),
            PaymentMode::Offering,
        );
        let population_base = player_population_base(snapshot);
        // Only the losing part of the score drives how much must be ceded.
        let war_part = war_score.min(0.0);

        if war_score < -200.0 {
            options.push(tribute_option("pay_reparations", "Pay", payments.high));
            options.push(installment_option("pay_installment", strategy, payments.high));
            options.push(cession_option(
                "offer_population",
                "Cede",
                population_cession(population_base, war_part, nation.war_duration, 320.0, 0.05, 3),
            ));
        } else {
            options.push(tribute_option("pay_reparations", "Pay", payments.standard));
            options.push(installment_option("pay_installment", strategy, payments.standard));
            options.push(cession_option(
                "offer_population",
                "Cede",
                population_cession(population_base, war_part, nation.war_duration, 480.0, 0.03, 3),
            ));
        }
        format!(
            "The war against {} is going badly. Peace will cost you silver or land.",
            nation.name
        )
    } else {
        options.push(peace_only_option());
        format!(
            "The war against {} has reached a stalemate. Neither side holds an \
             advantage worth pressing.",
            nation.name
        )
    };

    options.push(reject_option(
        "cancel",
        "Cancel",
        "Break off the negotiation and fight on.",
    ));

    EventDefinition {
        id: format!("player_peace_proposal_{}_{}", nation.id, snapshot.days_elapsed),
        name: format!("Propose peace to {}", nation.name),
        icon: Some("hand_heart".to_string()),
        description,
        trigger_conditions: None,
        options,
        diplomatic: true,
    }
}

/// A winning AI demands the player's surrender; `ai_war_score` is the AI's
/// advantage (positive). Payments use the offering formulas (the player is
/// the payer), bucketed above 200 and above 50.
pub fn ai_surrender_demand(
    nation: &NationSnapshot,
    ai_war_score: f64,
    snapshot: &GameStateSnapshot,
    strategy: &dyn PaymentStrategy,
) -> EventDefinition {
    let payments = strategy.peace_payment(
        ai_war_score,
        0,
        nation.war_duration,
        player_wealth_baseline(snapshot),
        PaymentMode::Offering,
    );
    let population_base = player_population_base(snapshot);
    let mut options = Vec::new();

    let description = if ai_war_score > 200.0 {
        options.push(tribute_option("pay_high", "Pay", payments.high));
        options.push(installment_option("pay_installment", strategy, payments.high));
        options.push(cession_option(
            "cede_population",
            "Cede",
            population_cession(population_base, ai_war_score, nation.war_duration, 320.0, 0.05, 3),
        ));
        format!(
            "{} has you at their mercy and demands your surrender. Their terms are \
             steep, and refusing may cost you far more.",
            nation.name
        )
    } else if ai_war_score > 50.0 {
        options.push(tribute_option("pay_standard", "Pay", payments.standard));
        options.push(installment_option("pay_installment", strategy, payments.standard));
        options.push(cession_option(
            "cede_population",
            "Cede",
            population_cession(population_base, ai_war_score, nation.war_duration, 480.0, 0.03, 3),
        ));
        format!(
            "{} holds the advantage and demands you capitulate before things get worse.",
            nation.name
        )
    } else {
        options.push(tribute_option("pay_low", "Pay", payments.low));
        options.push(installment_option("pay_installment", strategy, payments.low));
        format!(
            "{} demands your surrender, though their position is hardly commanding.",
            nation.name
        )
    };

    options.push(reject_option(
        "reject",
        "Refuse to surrender",
        "Reject their demands and fight on.",
    ));

    EventDefinition {
        id: format!("ai_surrender_demand_{}_{}", nation.id, snapshot.days_elapsed),
        name: format!("{} demands surrender", nation.name),
        icon: Some("alert_triangle".to_string()),
        description,
        trigger_conditions: None,
        options,
        diplomatic: true,
    }
}
