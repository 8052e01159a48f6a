//! Species and role structures

use super::stats::StatOverrides;
use super::weights::{deserialize_ordered, WeightTable};
use serde::Deserialize;

/// One role variant of a species
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleSet {
    /// Selection probability of this role among the species' roles
    pub weight: f64,
    pub abilities: WeightTable,
    pub items: WeightTable,
    #[serde(rename = "teraTypes")]
    pub tera_types: WeightTable,
    /// Move pool; a weight of exactly 1 marks a forced move
    pub moves: WeightTable,
    #[serde(default)]
    pub evs: StatOverrides,
    #[serde(default)]
    pub ivs: StatOverrides,
}

/// Catalog entry for a single species
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeciesEntry {
    pub level: u32,
    /// Roles in declaration order
    #[serde(deserialize_with = "deserialize_ordered")]
    pub roles: Vec<(String, RoleSet)>,
}

impl SpeciesEntry {
    pub fn role(&self, name: &str) -> Option<&RoleSet> {
        self.roles.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    /// Sum of all role weights
    pub fn total_role_weight(&self) -> f64 {
        self.roles.iter().map(|(_, r)| r.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VENUSAUR: &str = r#"{
        "level": 84,
        "abilities": ["Chlorophyll", "Overgrow"],
        "roles": {
            "Bulky Support": {
                "weight": 0.6,
                "abilities": {"Chlorophyll": 0.5, "Overgrow": 0.5},
                "items": {"Black Sludge": 1},
                "teraTypes": {"Steel": 0.5, "Water": 0.5},
                "moves": {"Giga Drain": 1, "Leech Seed": 1, "Sludge Bomb": 0.8, "Earthquake": 0.6, "Sleep Powder": 0.6}
            },
            "Sun Sweeper": {
                "weight": 0.4,
                "abilities": {"Chlorophyll": 1},
                "items": {"Life Orb": 1},
                "teraTypes": {"Grass": 1},
                "moves": {"Growth": 1, "Solar Beam": 1, "Weather Ball": 1, "Sludge Bomb": 1},
                "evs": {"atk": 0},
                "ivs": {"atk": 0}
            }
        }
    }"#;

    #[test]
    fn test_deserialize_species_ignores_unknown_fields() {
        let entry: SpeciesEntry = serde_json::from_str(VENUSAUR).unwrap();
        assert_eq!(entry.level, 84);
        assert_eq!(entry.roles.len(), 2);
        assert_eq!(entry.roles[0].0, "Bulky Support");
        assert_eq!(entry.roles[1].0, "Sun Sweeper");
    }

    #[test]
    fn test_role_fields() {
        let entry: SpeciesEntry = serde_json::from_str(VENUSAUR).unwrap();
        let sun = entry.role("Sun Sweeper").unwrap();
        assert_eq!(sun.tera_types.get("Grass"), Some(1.0));
        assert_eq!(sun.evs.atk, Some(0));
        assert_eq!(sun.ivs.atk, Some(0));

        let bulky = entry.role("Bulky Support").unwrap();
        assert!(bulky.evs.is_empty());
        assert_eq!(bulky.moves.len(), 5);
    }

    #[test]
    fn test_total_role_weight() {
        let entry: SpeciesEntry = serde_json::from_str(VENUSAUR).unwrap();
        assert!((entry.total_role_weight() - 1.0).abs() < 1e-12);
    }
}
