//! Acknowledgement-style diplomatic events: dynamically built notifications
//! the host shows when a foreign nation acts. Unlike negotiations these
//! carry at most one meaningful choice.

use crate::model::{
    EffectBundle, EventDefinition, EventOption, NationSnapshot, ResourceKey,
};

/// A foreign nation declares war. The single option acknowledges the state
/// of war; opening hostilities is the host's job.
pub fn war_declaration(nation: &NationSnapshot, day: u32) -> EventDefinition {
    EventDefinition {
        id: format!("war_declaration_{}_{}", nation.id, day),
        name: format!("{} declares war", nation.name),
        icon: Some("swords".to_string()),
        description: format!(
            "{} has declared war on your realm! Their armies are massing and the \
             border is in turmoil. The conflict can no longer be avoided — prepare \
             your defenses.",
            nation.name
        ),
        trigger_conditions: None,
        options: vec![EventOption {
            id: "acknowledge".to_string(),
            text: "To arms".to_string(),
            description: "Accept the state of war and prepare to fight.".to_string(),
            ..Default::default()
        }],
        diplomatic: true,
    }
}

/// A foreign nation sends a gift of silver. Accepting credits the amount.
pub fn gift(nation: &NationSnapshot, amount: f64, day: u32) -> EventDefinition {
    let mut effects = EffectBundle::default();
    effects.resources.insert(ResourceKey::Silver, amount);

    EventDefinition {
        id: format!("gift_{}_{}", nation.id, day),
        name: format!("A gift from {}", nation.name),
        icon: Some("gift".to_string()),
        description: format!(
            "An envoy from {} arrives bearing gifts worth {amount:.0} silver — a \
             gesture of goodwill meant to warm relations between your courts.",
            nation.name
        ),
        trigger_conditions: None,
        options: vec![EventOption {
            id: "accept".to_string(),
            text: "Accept the gift".to_string(),
            description: format!("Receive {amount:.0} silver."),
            effects,
            ..Default::default()
        }],
        diplomatic: true,
    }
}

/// Outcome numbers for a battle or raid notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct BattleReport {
    pub victory: bool,
    pub player_losses: u32,
    pub enemy_losses: u32,
    /// Present only for raids.
    pub food_plundered: Option<f64>,
    pub silver_plundered: Option<f64>,
}

impl BattleReport {
    fn is_raid(&self) -> bool {
        self.food_plundered.is_some() || self.silver_plundered.is_some()
    }
}

/// A battle or raid has been resolved; the event reports the outcome. The
/// losses themselves were already applied by the battle layer; this is
/// notification only, so the option carries no effects.
pub fn battle_report(nation: &NationSnapshot, report: &BattleReport, day: u32) -> EventDefinition {
    let mut description = if report.is_raid() {
        let mut text = format!(
            "{} struck without warning, plundering your lands before your forces \
             could respond.\n\nLosses:",
            nation.name
        );
        if let Some(food) = report.food_plundered {
            text.push_str(&format!("\nFood: {food:.0}"));
        }
        if let Some(silver) = report.silver_plundered {
            text.push_str(&format!("\nSilver: {silver:.0}"));
        }
        if report.player_losses > 0 {
            text.push_str(&format!("\nPopulation: {}", report.player_losses));
        }
        text
    } else if report.victory {
        format!(
            "{}'s army attacked but was driven back by your defenders. The enemy \
             withdraws with heavy casualties and broken morale.",
            nation.name
        )
    } else {
        format!(
            "{}'s army struck hard and your forces suffered serious losses. The \
             situation is grave.",
            nation.name
        )
    };
    if !report.is_raid() {
        description.push_str(&format!(
            "\n\nBattle result:\nYour losses: {}\nEnemy losses: {}",
            report.player_losses, report.enemy_losses
        ));
    }

    EventDefinition {
        id: format!("battle_{}_{}", nation.id, day),
        name: if report.is_raid() {
            format!("Raid by {}", nation.name)
        } else {
            format!("Attack by {}", nation.name)
        },
        icon: Some(if report.victory { "shield" } else { "alert_triangle" }.to_string()),
        description,
        trigger_conditions: None,
        options: vec![EventOption {
            id: "acknowledge".to_string(),
            text: "Understood".to_string(),
            description: "Review the details.".to_string(),
            ..Default::default()
        }],
        diplomatic: true,
    }
}
