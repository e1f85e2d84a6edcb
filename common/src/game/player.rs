use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    cli::Specified,
    game::{city::CityID, unit::UnitID},
};

/// A player's number, which is also its index in the game's player list
pub type PlayerNum = usize;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum PlayerType {
    Human,

    /// Played by the built-in greedy heuristic
    Computer,
}

impl PlayerType {
    pub fn values() -> [Self; 2] {
        [Self::Human, Self::Computer]
    }

    pub fn is_human(self) -> bool {
        self == Self::Human
    }
}

impl Specified for PlayerType {
    fn desc(&self) -> String {
        match self {
            Self::Human => String::from("human"),
            Self::Computer => String::from("computer"),
        }
    }

    fn spec(&self) -> String {
        match self {
            Self::Human => String::from("h"),
            Self::Computer => String::from("c"),
        }
    }
}

impl TryFrom<String> for PlayerType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::values()
            .into_iter()
            .find(|type_| type_.spec() == value || type_.desc() == value)
            .ok_or_else(|| format!("{} is not a player type", value))
    }
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.desc())
    }
}

/// A participant in the game
///
/// Players hold the IDs of what they own; the units and cities themselves live in the map. Unit order is the
/// order of acquisition, which the computer player relies on.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Player {
    pub num: PlayerNum,
    pub name: String,
    pub type_: PlayerType,
    units: Vec<UnitID>,
    cities: Vec<CityID>,
}

impl Player {
    pub fn new<S: Into<String>>(num: PlayerNum, name: S, type_: PlayerType) -> Self {
        Self {
            num,
            name: name.into(),
            type_,
            units: Vec::new(),
            cities: Vec::new(),
        }
    }

    pub fn is_human(&self) -> bool {
        self.type_.is_human()
    }

    pub fn units(&self) -> &[UnitID] {
        &self.units
    }

    pub fn cities(&self) -> &[CityID] {
        &self.cities
    }

    pub(in crate::game) fn add_unit(&mut self, id: UnitID) {
        self.units.push(id);
    }

    /// Forget a unit, preserving the order of the rest; true if it was ours
    pub(in crate::game) fn remove_unit(&mut self, id: UnitID) -> bool {
        if let Some(idx) = self.units.iter().position(|unit_id| *unit_id == id) {
            self.units.remove(idx);
            true
        } else {
            false
        }
    }

    pub(in crate::game) fn add_city(&mut self, id: CityID) {
        self.cities.push(id);
    }

    pub(in crate::game) fn remove_city(&mut self, id: CityID) -> bool {
        if let Some(idx) = self.cities.iter().position(|city_id| *city_id == id) {
            self.cities.remove(idx);
            true
        } else {
            false
        }
    }

    pub(in crate::game) fn clear_units(&mut self) -> Vec<UnitID> {
        std::mem::take(&mut self.units)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (player {}, {})", self.name, self.num, self.type_)
    }
}

#[cfg(test)]
mod test {
    use crate::game::unit::UnitID;

    use super::{Player, PlayerType};

    #[test]
    fn test_unit_order_preserved() {
        let mut player = Player::new(0, "Hammurabi", PlayerType::Computer);
        for i in 0..4 {
            player.add_unit(UnitID::new(i));
        }
        assert!(player.remove_unit(UnitID::new(1)));
        assert!(!player.remove_unit(UnitID::new(1)));
        assert_eq!(
            player.units(),
            &[UnitID::new(0), UnitID::new(2), UnitID::new(3)]
        );
    }

    #[test]
    fn test_player_type_spec() {
        assert_eq!(
            PlayerType::try_from(String::from("c")),
            Ok(PlayerType::Computer)
        );
        assert_eq!(
            PlayerType::try_from(String::from("human")),
            Ok(PlayerType::Human)
        );
        assert!(PlayerType::try_from(String::from("r")).is_err());
    }
}
