//! The rule table a game is played under
//!
//! A `Rules` is fixed when the `Game` is constructed. It can be deserialized so that runners may load variants
//! from a file; any field left out takes its default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{unit::UnitType, TurnNum};

/// Fixed stats of a kind of unit
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct UnitStats {
    pub max_hp: f64,
    pub movement: u16,
    pub sight: u16,
    pub attack: f64,

    /// Production points debited from a city's reserve to build one
    pub cost: u32,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct CityRules {
    /// Production points a freshly founded city adds to its reserve each turn
    pub production: u32,
    pub max_hp: f64,
    pub control_radius: u16,

    pub production_per_growth: u32,
    pub hp_per_growth: f64,

    /// HP repaired each turn for every point of population
    pub repair_per_population: f64,

    pub growth_turns_base: u16,
    pub growth_turns_per_population: u16,
}

impl CityRules {
    /// Turns a city of the given population waits before growing again
    ///
    /// Saturates rather than overflowing on oversized rule files.
    pub fn growth_turns(&self, population: u16) -> u16 {
        self.growth_turns_per_population
            .saturating_mul(population)
            .saturating_add(self.growth_turns_base)
    }
}

impl Default for CityRules {
    fn default() -> Self {
        Self {
            production: 50,
            max_hp: 100.0,
            control_radius: 1,
            production_per_growth: 10,
            hp_per_growth: 25.0,
            repair_per_population: 5.0,
            growth_turns_base: 5,
            growth_turns_per_population: 5,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Rules {
    /// Per-kind overrides of the built-in unit stats
    pub units: BTreeMap<UnitType, UnitStats>,

    pub city: CityRules,

    /// HP a unit recovers at the start of each of its owner's turns
    pub unit_heal_per_turn: f64,

    /// Stop chaining computer turns once this many rounds have been played
    pub max_rounds: Option<TurnNum>,
}

impl Rules {
    pub fn unit(&self, type_: UnitType) -> UnitStats {
        self.units
            .get(&type_)
            .copied()
            .unwrap_or_else(|| type_.default_stats())
    }

    pub fn unit_cost(&self, type_: UnitType) -> u32 {
        self.unit(type_).cost
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            units: BTreeMap::new(),
            city: CityRules::default(),
            unit_heal_per_turn: 10.0,
            max_rounds: None,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::game::unit::UnitType;

    use super::{Rules, UnitStats};

    #[test]
    fn test_defaults() {
        let rules = Rules::default();
        assert_eq!(rules.unit_cost(UnitType::Scout), 500);
        assert_eq!(rules.unit_cost(UnitType::Settler), 1000);
        assert_eq!(rules.unit_cost(UnitType::Warrior), 750);
        assert_eq!(rules.city.growth_turns(1), 10);
        assert_eq!(rules.city.growth_turns(2), 15);
    }

    #[test]
    fn test_growth_turns_saturate() {
        let rules: Rules = serde_json::from_str(
            r#"{"city": {"growth_turns_base": 60000, "growth_turns_per_population": 10000}}"#,
        )
        .unwrap();
        assert_eq!(rules.city.growth_turns(1), u16::MAX);
        assert_eq!(rules.city.growth_turns(7), u16::MAX);
        assert_eq!(rules.city.growth_turns(0), 60000);
    }

    #[test]
    fn test_override() {
        let mut rules = Rules::default();
        rules.units.insert(
            UnitType::Scout,
            UnitStats {
                max_hp: 1.0,
                movement: 9,
                sight: 1,
                attack: 0.0,
                cost: 5,
            },
        );
        assert_eq!(rules.unit(UnitType::Scout).movement, 9);
        assert_eq!(rules.unit(UnitType::Warrior).movement, 2);
    }

    #[test]
    fn test_partial_json() {
        let rules: Rules =
            serde_json::from_str(r#"{"city": {"production": 80}, "max_rounds": 30}"#).unwrap();
        assert_eq!(rules.city.production, 80);
        assert_eq!(rules.city.max_hp, 100.0);
        assert_eq!(rules.max_rounds, Some(30));
        assert_eq!(rules.unit_heal_per_turn, 10.0);
    }
}
