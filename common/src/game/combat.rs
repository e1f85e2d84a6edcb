//! Combat resolution
//!
//! Combat is deterministic: the damage dealt is the combatant's attack value scaled by the attack modifier of the
//! tile it fights from.

use serde::{Deserialize, Serialize};

use super::{city::CityID, unit::UnitID};

pub trait CombatCapable {
    fn hp(&self) -> f64;
    fn max_hp(&self) -> f64;

    /// Subtract `damage` from HP. HP may go negative.
    fn take_attack(&mut self, damage: f64);

    fn is_destroyed(&self) -> bool {
        self.hp() <= 0.0
    }
}

/// The damage a combatant deals from a tile with the given attack modifier
pub fn effective_attack(attack: f64, tile_attack_modifier: f64) -> f64 {
    attack * tile_attack_modifier
}

/// What happened when one unit attacked another
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct UnitCombatOutcome {
    pub attacker: UnitID,
    pub defender: UnitID,

    /// Damage dealt to the defender
    pub damage: f64,

    /// Damage dealt back to the attacker, if the defender survived to counterattack
    pub counter_damage: Option<f64>,

    pub attacker_hp: f64,
    pub defender_hp: f64,
}

impl UnitCombatOutcome {
    pub fn attacker_destroyed(&self) -> bool {
        self.attacker_hp <= 0.0
    }
}

/// What happened when a unit attacked a city
///
/// Cities don't fight back.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CityCombatOutcome {
    pub attacker: UnitID,
    pub city: CityID,
    pub damage: f64,
    pub city_hp: f64,
}

impl CityCombatOutcome {
    pub fn destroyed(&self) -> bool {
        self.city_hp <= 0.0
    }
}

#[cfg(test)]
mod test {
    use super::effective_attack;

    #[test]
    fn test_effective_attack() {
        assert_eq!(effective_attack(25.0, 1.0), 25.0);
        assert_eq!(effective_attack(25.0, 0.5), 12.5);
        assert_eq!(effective_attack(30.0, 0.0), 0.0);
    }
}
