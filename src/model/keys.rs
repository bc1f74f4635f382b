use serde::{Deserialize, Serialize};

/// Identifier of a foreign nation in the diplomatic layer.
pub type NationId = u32;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ResourceKey {
    Food,
    Silver,
    Wood,
    Stone,
    Tools,
    Cloth,
    Science,
    Culture,
    Spice,
    Delicacies,
    Furniture,
    FineClothes,
    Custom(String),
}

string_enum_open!(ResourceKey, "resource key", {
    Food => "food",
    Silver => "silver",
    Wood => "wood",
    Stone => "stone",
    Tools => "tools",
    Cloth => "cloth",
    Science => "science",
    Culture => "culture",
    Spice => "spice",
    Delicacies => "delicacies",
    Furniture => "furniture",
    FineClothes => "fine_clothes",
});

/// A social/economic class with its own approval, wealth, and influence metrics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StratumKey {
    Peasant,
    Serf,
    Lumberjack,
    Miner,
    Worker,
    Artisan,
    Merchant,
    Cleric,
    Soldier,
    Scribe,
    Official,
    Landowner,
    Capitalist,
    Engineer,
    Navigator,
    Unemployed,
    Slave,
    Custom(String),
}

string_enum_open!(StratumKey, "stratum key", {
    Peasant => "peasant",
    Serf => "serf",
    Lumberjack => "lumberjack",
    Miner => "miner",
    Worker => "worker",
    Artisan => "artisan",
    Merchant => "merchant",
    Cleric => "cleric",
    Soldier => "soldier",
    Scribe => "scribe",
    Official => "official",
    Landowner => "landowner",
    Capitalist => "capitalist",
    Engineer => "engineer",
    Navigator => "navigator",
    Unemployed => "unemployed",
    Slave => "slave",
});

impl StratumKey {
    /// Strata barred from holding political power regardless of influence.
    pub fn is_politically_eligible(&self) -> bool {
        !matches!(self, StratumKey::Unemployed | StratumKey::Slave)
    }
}

/// Target of a production modifier: a single building/category, or every
/// building at once (`All`, serialized as `"all"` in content tables).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BuildingKey {
    All,
    Market,
    Farm,
    Mine,
    LumberCamp,
    Workshop,
    Temple,
    Custom(String),
}

string_enum_open!(BuildingKey, "building key", {
    All => "all",
    Market => "market",
    Farm => "farm",
    Mine => "mine",
    LumberCamp => "lumber_camp",
    Workshop => "workshop",
    Temple => "temple",
});

/// Kinds of dated diplomatic actions tracked per nation for cooldown checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DiplomaticActionKind {
    Gift,
    Provoke,
    PeaceRequest,
    SurrenderDemand,
    WarDeclaration,
    AllySupport,
}

string_enum!(DiplomaticActionKind {
    Gift => "gift",
    Provoke => "provoke",
    PeaceRequest => "peace_request",
    SurrenderDemand => "surrender_demand",
    WarDeclaration => "war_declaration",
    AllySupport => "ally_support",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_key_snake_case() {
        assert_eq!(
            serde_json::to_string(&ResourceKey::FineClothes).unwrap(),
            "\"fine_clothes\""
        );
        assert_eq!(serde_json::to_string(&ResourceKey::Food).unwrap(), "\"food\"");
    }

    #[test]
    fn unknown_resource_deserializes_to_custom() {
        let key: ResourceKey = serde_json::from_str("\"saltpeter\"").unwrap();
        assert_eq!(key, ResourceKey::Custom("saltpeter".to_string()));
    }

    #[test]
    fn empty_stratum_key_is_an_error() {
        let result: Result<StratumKey, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn core_stratum_keys_round_trip() {
        for key in [
            StratumKey::Peasant,
            StratumKey::Merchant,
            StratumKey::Cleric,
            StratumKey::Landowner,
            StratumKey::Unemployed,
            StratumKey::Slave,
        ] {
            let json = serde_json::to_string(&key).unwrap();
            let back: StratumKey = serde_json::from_str(&json).unwrap();
            assert_eq!(back, key);
        }
    }

    #[test]
    fn political_eligibility_excludes_unemployed_and_slaves() {
        assert!(StratumKey::Peasant.is_politically_eligible());
        assert!(StratumKey::Merchant.is_politically_eligible());
        assert!(!StratumKey::Unemployed.is_politically_eligible());
        assert!(!StratumKey::Slave.is_politically_eligible());
    }

    #[test]
    fn building_all_serializes_as_plain_all() {
        assert_eq!(serde_json::to_string(&BuildingKey::All).unwrap(), "\"all\"");
        let back: BuildingKey = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(back, BuildingKey::All);
    }

    #[test]
    fn unknown_action_kind_is_an_error() {
        let result: Result<DiplomaticActionKind, _> = serde_json::from_str("\"bribe\"");
        assert!(result.is_err());
    }
}
