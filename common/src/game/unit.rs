//! Units: the mobile pieces of the game.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    game::{
        city::{City, CityID},
        combat::CombatCapable,
        map::Resource,
        obs::Observer,
        rules::{Rules, UnitStats},
        PlayerNum,
    },
    util::Location,
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct UnitID {
    id: u64,
}
impl UnitID {
    pub fn new(id: u64) -> Self {
        Self { id }
    }
    pub fn next(self) -> Self {
        UnitID { id: self.id + 1 }
    }
}

impl Default for UnitID {
    fn default() -> Self {
        UnitID::new(0)
    }
}

impl fmt::Display for UnitID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}

pub const POSSIBLE_UNIT_TYPES: usize = 6;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum UnitType {
    Settler,
    Scout,
    Warrior,
    Militia,
    Cavalry,
    Swordsman,
}

impl UnitType {
    pub const fn values() -> [UnitType; POSSIBLE_UNIT_TYPES] {
        [
            UnitType::Settler,
            UnitType::Scout,
            UnitType::Warrior,
            UnitType::Militia,
            UnitType::Cavalry,
            UnitType::Swordsman,
        ]
    }

    pub fn default_stats(self) -> UnitStats {
        let (max_hp, movement, sight, attack, cost) = match self {
            UnitType::Settler => (50.0, 2, 2, 0.0, 1000),
            UnitType::Scout => (50.0, 4, 4, 10.0, 500),
            UnitType::Warrior => (100.0, 2, 2, 25.0, 750),
            UnitType::Militia => (50.0, 1, 1, 10.0, 400),
            UnitType::Cavalry => (100.0, 3, 2, 30.0, 1000),
            UnitType::Swordsman => (150.0, 2, 2, 40.0, 1250),
        };
        UnitStats {
            max_hp,
            movement,
            sight,
            attack,
            cost,
        }
    }

    /// Can units of this type found cities?
    pub fn can_found_city(self) -> bool {
        self == UnitType::Settler
    }

    /// The resource a city needs within its control radius to build this type, if any
    pub fn unlocked_by(self) -> Option<Resource> {
        match self {
            UnitType::Militia => Some(Resource::Wheat),
            UnitType::Cavalry => Some(Resource::Horse),
            UnitType::Swordsman => Some(Resource::Iron),
            UnitType::Settler | UnitType::Scout | UnitType::Warrior => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UnitType::Settler => "Settler",
            UnitType::Scout => "Scout",
            UnitType::Warrior => "Warrior",
            UnitType::Militia => "Militia",
            UnitType::Cavalry => "Cavalry",
            UnitType::Swordsman => "Swordsman",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for UnitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitType::values()
            .into_iter()
            .find(|type_| type_.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("'{}' is not a unit type", s))
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Unit {
    pub id: UnitID,
    pub owner: PlayerNum,
    pub loc: Location,
    pub type_: UnitType,
    hp: f64,
    max_hp: f64,
    max_movement: u16,
    moves_remaining: u16,
    attack: f64,
    sight: u16,

    /// How many more cities this unit may found
    charges: u16,
}

impl Unit {
    pub fn new(
        id: UnitID,
        owner: PlayerNum,
        loc: Location,
        type_: UnitType,
        stats: UnitStats,
    ) -> Self {
        Unit {
            id,
            owner,
            loc,
            type_,
            hp: stats.max_hp,
            max_hp: stats.max_hp,
            max_movement: stats.movement,
            moves_remaining: stats.movement,
            attack: stats.attack,
            sight: stats.sight,
            charges: if type_.can_found_city() { 1 } else { 0 },
        }
    }

    pub fn moves_remaining(&self) -> u16 {
        self.moves_remaining
    }

    pub fn max_movement(&self) -> u16 {
        self.max_movement
    }

    pub fn attack_value(&self) -> f64 {
        self.attack
    }

    pub fn charges(&self) -> u16 {
        self.charges
    }

    /// Spend `cost` movement and relocate to `loc`
    pub fn move_to(&mut self, cost: u16, loc: Location) {
        self.moves_remaining = self.moves_remaining.saturating_sub(cost);
        self.loc = loc;
    }

    /// Use up the rest of this turn's movement
    pub fn deplete_movement(&mut self) {
        self.moves_remaining = 0;
    }

    pub fn reset_movement(&mut self) {
        self.moves_remaining = self.max_movement;
    }

    /// Restore up to `amount` HP without exceeding the maximum
    pub fn heal(&mut self, amount: f64) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Spend this unit's founding charge on a city at its location
    ///
    /// Returns `None` if the unit has no charge left. The caller is responsible for registering the city and
    /// disposing of the unit.
    pub fn found_city<S: Into<String>>(
        &mut self,
        id: CityID,
        name: S,
        rules: &Rules,
    ) -> Option<City> {
        if self.charges == 0 {
            return None;
        }
        self.charges -= 1;
        Some(City::new(id, self.owner, self.loc, name, &rules.city))
    }
}

impl CombatCapable for Unit {
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

impl Observer for Unit {
    fn sight_distance(&self) -> u16 {
        self.sight
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Player {}'s {} {} at {}",
            self.owner, self.type_, self.id, self.loc
        )
    }
}

#[cfg(test)]
mod test {
    use crate::{
        game::{city::CityID, combat::CombatCapable, rules::Rules},
        util::Location,
    };

    use super::{Unit, UnitID, UnitType};

    fn unit(type_: UnitType) -> Unit {
        Unit::new(
            UnitID::new(0),
            0,
            Location::new(3, 3),
            type_,
            Rules::default().unit(type_),
        )
    }

    #[test]
    fn test_stats() {
        let scout = unit(UnitType::Scout);
        assert_eq!(scout.hp(), 50.0);
        assert_eq!(scout.moves_remaining(), 4);
        assert_eq!(scout.charges(), 0);

        let settler = unit(UnitType::Settler);
        assert_eq!(settler.charges(), 1);
    }

    #[test]
    fn test_take_attack_goes_negative() {
        let mut warrior = unit(UnitType::Warrior);
        warrior.take_attack(75.0);
        assert!(!warrior.is_destroyed());
        warrior.take_attack(40.0);
        assert_eq!(warrior.hp(), -15.0);
        assert!(warrior.is_destroyed());
    }

    #[test]
    fn test_death_threshold_is_inclusive() {
        let mut warrior = unit(UnitType::Warrior);
        warrior.take_attack(100.0);
        assert_eq!(warrior.hp(), 0.0);
        assert!(warrior.is_destroyed());
    }

    #[test]
    fn test_movement_and_healing() {
        let mut warrior = unit(UnitType::Warrior);
        warrior.move_to(1, Location::new(4, 3));
        assert_eq!(warrior.moves_remaining(), 1);
        assert_eq!(warrior.loc, Location::new(4, 3));
        warrior.deplete_movement();
        assert_eq!(warrior.moves_remaining(), 0);
        warrior.reset_movement();
        assert_eq!(warrior.moves_remaining(), 2);

        warrior.take_attack(15.0);
        warrior.heal(10.0);
        assert_eq!(warrior.hp(), 95.0);
        warrior.heal(10.0);
        assert_eq!(warrior.hp(), 100.0);
    }

    #[test]
    fn test_found_city_consumes_charge() {
        let rules = Rules::default();
        let mut settler = unit(UnitType::Settler);
        let city = settler.found_city(CityID::new(0), "Tenochtitlan", &rules).unwrap();
        assert_eq!(city.loc, Location::new(3, 3));
        assert_eq!(city.owner, 0);
        assert_eq!(settler.charges(), 0);
        assert!(settler
            .found_city(CityID::new(1), "Texcoco", &rules)
            .is_none());

        let mut warrior = unit(UnitType::Warrior);
        assert!(warrior.found_city(CityID::new(2), "Nope", &rules).is_none());
    }

    #[test]
    fn test_parse() {
        assert_eq!("Scout".parse::<UnitType>(), Ok(UnitType::Scout));
        assert_eq!("warrior".parse::<UnitType>(), Ok(UnitType::Warrior));
        assert!("Trebuchet".parse::<UnitType>().is_err());
    }
}
