use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    game::{city::CityID, unit::UnitID, PlayerNum},
    util::Location,
};

use super::terrain::{Resource, Terrain, Terrainous, IMPASSABLE_MOVEMENT_MODIFIER};

/// One cell of the board
///
/// The tile refers to its occupant and owning city by ID only; `MapData` owns the units and cities themselves.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Tile {
    pub loc: Location,
    terrain: Terrain,
    movement_modifier: i32,
    attack_modifier: f64,
    pub resource: Option<Resource>,

    /// The city whose area of influence includes this tile. Not necessarily located here.
    pub(in crate::game) owner_city: Option<CityID>,

    pub(in crate::game) unit: Option<UnitID>,

    /// Players who have seen this tile. Only ever grows.
    revealed_to: BTreeSet<PlayerNum>,
}

impl Tile {
    pub fn new(terrain: Terrain, loc: Location) -> Tile {
        Tile {
            loc,
            terrain,
            movement_modifier: terrain.movement_modifier(),
            attack_modifier: terrain.attack_modifier(),
            resource: None,
            owner_city: None,
            unit: None,
            revealed_to: BTreeSet::new(),
        }
    }

    pub fn with_resource(terrain: Terrain, resource: Option<Resource>, loc: Location) -> Tile {
        Tile {
            resource,
            ..Tile::new(terrain, loc)
        }
    }

    pub fn movement_modifier(&self) -> i32 {
        self.movement_modifier
    }

    pub fn attack_modifier(&self) -> f64 {
        self.attack_modifier
    }

    /// What it costs a unit to step onto this tile
    pub fn entry_cost(&self) -> i32 {
        1 - self.movement_modifier
    }

    /// Can any unit ever enter this tile?
    pub fn is_passable(&self) -> bool {
        self.movement_modifier != IMPASSABLE_MOVEMENT_MODIFIER
    }

    pub fn owner_city(&self) -> Option<CityID> {
        self.owner_city
    }

    pub fn unit(&self) -> Option<UnitID> {
        self.unit
    }

    pub fn is_occupied(&self) -> bool {
        self.unit.is_some()
    }

    pub fn can_see_tile(&self, player: PlayerNum) -> bool {
        self.revealed_to.contains(&player)
    }

    /// Reveal to `player`; true if the tile was hidden from them until now
    pub fn reveal_tile(&mut self, player: PlayerNum) -> bool {
        self.revealed_to.insert(player)
    }

    pub fn revealed_to(&self) -> impl Iterator<Item = PlayerNum> + '_ {
        self.revealed_to.iter().copied()
    }

    /// Neutralize the terrain modifiers for the city founded here
    pub(in crate::game) fn found_city(&mut self, city: CityID) {
        self.owner_city = Some(city);
        self.movement_modifier = 0;
        self.attack_modifier = 1.0;
    }

    /// Bring this tile under a city's influence without making it the city tile
    pub(in crate::game) fn claim(&mut self, city: CityID) {
        self.owner_city = Some(city);
    }

    /// Undo `found_city` and any claim, restoring the terrain's own modifiers
    pub(in crate::game) fn release_city(&mut self) {
        self.owner_city = None;
        self.movement_modifier = self.terrain.movement_modifier();
        self.attack_modifier = self.terrain.attack_modifier();
    }
}

impl Terrainous for Tile {
    fn terrain(&self) -> Terrain {
        self.terrain
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.terrain)?;
        if let Some(resource) = self.resource {
            write!(f, " with {}", resource)?;
        }
        write!(f, " at {}", self.loc)
    }
}

#[cfg(test)]
mod test {
    use crate::{
        game::{
            city::CityID,
            map::{Terrain, Terrainous},
            unit::UnitID,
        },
        util::Location,
    };

    use super::Tile;

    #[test]
    fn test_tile() {
        let loc = Location::new(10, 10);
        let mut tile = Tile::new(Terrain::Hill, loc);

        assert_eq!(tile.unit(), None);
        assert_eq!(tile.entry_cost(), 2);
        assert_eq!(tile.attack_modifier(), 1.4);

        tile.unit = Some(UnitID::new(3));
        assert!(tile.is_occupied());

        tile.found_city(CityID::new(0));
        assert_eq!(tile.entry_cost(), 1);
        assert_eq!(tile.attack_modifier(), 1.0);
        assert_eq!(tile.terrain(), Terrain::Hill);

        tile.release_city();
        assert_eq!(tile.owner_city(), None);
        assert_eq!(tile.movement_modifier(), -1);
    }

    #[test]
    fn test_reveal() {
        let mut tile = Tile::new(Terrain::Field, Location::new(0, 0));
        assert!(!tile.can_see_tile(1));
        assert!(tile.reveal_tile(1));
        assert!(!tile.reveal_tile(1));
        assert!(tile.can_see_tile(1));
        assert!(!tile.can_see_tile(0));
    }
}
