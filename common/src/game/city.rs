use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    game::{
        combat::CombatCapable,
        error::GameError,
        obs::Observer,
        rules::{CityRules, Rules},
        unit::{Unit, UnitID, UnitType},
        PlayerNum, CivResult,
    },
    util::Location,
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct CityID {
    id: u64,
}
impl CityID {
    pub fn new(id: u64) -> Self {
        Self { id }
    }
    pub fn next(self) -> Self {
        Self { id: self.id + 1 }
    }
}
impl Default for CityID {
    fn default() -> Self {
        CityID::new(0)
    }
}

impl fmt::Display for CityID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}

/// Unit types every city can build regardless of nearby resources
pub const BASE_PRODUCIBLE: [UnitType; 3] = [UnitType::Settler, UnitType::Scout, UnitType::Warrior];

/// The result of a city's per-turn bookkeeping
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct CityIncrement {
    pub grew: bool,
    pub population: u16,
    pub production_reserve: u32,
    pub hp: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct City {
    pub id: CityID,
    pub owner: PlayerNum,
    pub loc: Location,
    name: String,

    /// Production points added to the reserve every turn
    production: u32,

    /// Banked production, spent on units
    production_reserve: u32,

    population: u16,
    turns_before_growth: u16,
    hp: f64,
    max_hp: f64,
    control_radius: u16,
    producible: BTreeSet<UnitType>,
}

impl City {
    pub fn new<S: Into<String>>(
        id: CityID,
        owner: PlayerNum,
        loc: Location,
        name: S,
        rules: &CityRules,
    ) -> City {
        let population = 1;
        City {
            id,
            owner,
            loc,
            name: name.into(),
            production: rules.production,
            production_reserve: 0,
            population,
            turns_before_growth: rules.growth_turns(population),
            hp: rules.max_hp,
            max_hp: rules.max_hp,
            control_radius: rules.control_radius,
            producible: BASE_PRODUCIBLE.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn production(&self) -> u32 {
        self.production
    }

    pub fn production_reserve(&self) -> u32 {
        self.production_reserve
    }

    pub fn population(&self) -> u16 {
        self.population
    }

    pub fn turns_before_growth(&self) -> u16 {
        self.turns_before_growth
    }

    pub fn control_radius(&self) -> u16 {
        self.control_radius
    }

    pub fn can_build(&self, type_: UnitType) -> bool {
        self.producible.contains(&type_)
    }

    /// Add a unit type to what this city can build; true if it wasn't already buildable
    pub fn unlock(&mut self, type_: UnitType) -> bool {
        self.producible.insert(type_)
    }

    /// The per-turn bookkeeping: accrue production, count down to growth, grow, repair
    pub fn city_increment(&mut self, rules: &CityRules) -> CityIncrement {
        self.production_reserve = self.production_reserve.saturating_add(self.production);

        self.turns_before_growth = self.turns_before_growth.saturating_sub(1);
        let grew = self.turns_before_growth == 0;
        if grew {
            self.population = self.population.saturating_add(1);
            self.turns_before_growth = rules.growth_turns(self.population);
            self.production = self.production.saturating_add(rules.production_per_growth);
            self.max_hp += rules.hp_per_growth;
        }

        let repair = rules.repair_per_population * f64::from(self.population);
        self.hp = (self.hp + repair).min(self.max_hp);

        CityIncrement {
            grew,
            population: self.population,
            production_reserve: self.production_reserve,
            hp: self.hp,
        }
    }

    /// Check whether this city could build a unit of the given type right now
    ///
    /// Doesn't consider whether the city tile is free; that's the map's business.
    pub fn production_status(&self, type_: UnitType, rules: &Rules) -> CivResult<()> {
        if !self.can_build(type_) {
            return Err(GameError::UnitTypeNotProducible {
                city: self.id,
                type_,
            });
        }

        let cost = rules.unit_cost(type_);
        if self.production_reserve < cost {
            return Err(GameError::InsufficientProductionReserve {
                city: self.id,
                type_,
                cost,
                reserve: self.production_reserve,
            });
        }

        if type_ == UnitType::Settler && self.population < 2 {
            return Err(GameError::PopulationTooLow {
                city: self.id,
                population: self.population,
            });
        }

        Ok(())
    }

    /// Build a unit of the given type at this city's location, debiting its cost
    ///
    /// Settlers also cost a point of population. Call `production_status` first.
    pub fn produce_unit(&mut self, type_: UnitType, id: UnitID, rules: &Rules) -> Unit {
        let stats = rules.unit(type_);
        self.production_reserve = self.production_reserve.saturating_sub(stats.cost);
        if type_ == UnitType::Settler {
            self.population = self.population.saturating_sub(1);
        }
        Unit::new(id, self.owner, self.loc, type_, stats)
    }
}

impl CombatCapable for City {
    fn hp(&self) -> f64 {
        self.hp
    }
    fn max_hp(&self) -> f64 {
        self.max_hp
    }
    fn take_attack(&mut self, damage: f64) {
        self.hp -= damage;
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Player {}'s city {} at {} (pop. {}, {}/{} HP, reserve {})",
            self.owner,
            self.name,
            self.loc,
            self.population,
            self.hp,
            self.max_hp,
            self.production_reserve
        )
    }
}

impl Observer for City {
    fn sight_distance(&self) -> u16 {
        self.control_radius.saturating_add(1)
    }
}

#[cfg(test)]
mod test {
    use crate::{
        game::{
            combat::CombatCapable,
            error::GameError,
            rules::Rules,
            unit::{UnitID, UnitType},
        },
        util::Location,
    };

    use super::{City, CityID};

    fn city(rules: &Rules) -> City {
        City::new(CityID::new(0), 0, Location::new(5, 5), "Ur", &rules.city)
    }

    #[test]
    fn test_reserve_accrues() {
        let rules = Rules::default();
        let mut city = city(&rules);
        for _ in 0..8 {
            city.city_increment(&rules.city);
        }
        assert_eq!(city.production_reserve(), 400);
        assert_eq!(city.population(), 1);
        assert!(city.production_status(UnitType::Scout, &rules).is_err());

        city.city_increment(&rules.city);
        city.city_increment(&rules.city);
        assert_eq!(city.production_reserve(), 500);
        assert_eq!(city.production_status(UnitType::Scout, &rules), Ok(()));
    }

    #[test]
    fn test_growth() {
        let rules = Rules::default();
        let mut city = city(&rules);
        assert_eq!(city.turns_before_growth(), 10);

        let mut grew_at = None;
        for turn in 1..=10 {
            if city.city_increment(&rules.city).grew {
                grew_at = Some(turn);
            }
        }
        assert_eq!(grew_at, Some(10));
        assert_eq!(city.population(), 2);
        assert_eq!(city.turns_before_growth(), 15);
        assert_eq!(city.production(), 60);
        assert_eq!(city.max_hp(), 125.0);
    }

    #[test]
    fn test_repair_clamped() {
        let rules = Rules::default();
        let mut city = city(&rules);
        city.take_attack(7.0);
        city.city_increment(&rules.city);
        assert_eq!(city.hp(), 98.0);
        city.city_increment(&rules.city);
        assert_eq!(city.hp(), 100.0);
    }

    #[test]
    fn test_produce_unit() {
        let rules = Rules::default();
        let mut city = city(&rules);
        for _ in 0..10 {
            city.city_increment(&rules.city);
        }
        assert_eq!(city.production_reserve(), 500);

        let scout = city.produce_unit(UnitType::Scout, UnitID::new(7), &rules);
        assert_eq!(scout.loc, city.loc);
        assert_eq!(scout.hp(), 50.0);
        assert_eq!(city.production_reserve(), 0);
        assert_eq!(city.population(), 2);
    }

    #[test]
    fn test_settler_costs_population() {
        let rules = Rules::default();
        let mut city = city(&rules);
        for _ in 0..20 {
            city.city_increment(&rules.city);
        }
        assert_eq!(city.population(), 2);
        assert_eq!(city.production_status(UnitType::Settler, &rules), Ok(()));
        city.produce_unit(UnitType::Settler, UnitID::new(0), &rules);
        assert_eq!(city.population(), 1);
    }

    #[test]
    fn test_unproducible() {
        let rules = Rules::default();
        let mut city = city(&rules);
        for _ in 0..30 {
            city.city_increment(&rules.city);
        }
        assert!(matches!(
            city.production_status(UnitType::Swordsman, &rules),
            Err(GameError::UnitTypeNotProducible { .. })
        ));
        assert!(city.unlock(UnitType::Swordsman));
        assert_eq!(city.production_status(UnitType::Swordsman, &rules), Ok(()));
    }

    #[test]
    fn test_lone_settler_would_empty_city() {
        let mut rules = Rules::default();
        let mut cheap_settler = rules.unit(UnitType::Settler);
        cheap_settler.cost = 100;
        rules.units.insert(UnitType::Settler, cheap_settler);

        let mut city = city(&rules);
        for _ in 0..9 {
            city.city_increment(&rules.city);
        }
        assert_eq!(city.population(), 1);
        assert!(matches!(
            city.production_status(UnitType::Settler, &rules),
            Err(GameError::PopulationTooLow { .. })
        ));
    }
}
