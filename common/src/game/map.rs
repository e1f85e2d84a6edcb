//! Abstract map representation
//!
//! Data structures and algorithms for representing and working with the game map.

pub mod desc;
pub mod gen;
pub(in crate::game) mod grid;
pub mod terrain;
pub(in crate::game) mod tile;

pub use self::desc::MapParseError;
pub use self::grid::LocationGrid;
pub use self::terrain::{Resource, Terrain, Terrainous, IMPASSABLE_MOVEMENT_MODIFIER};
pub use self::tile::Tile;

use std::collections::BTreeMap;

use crate::{
    game::{
        city::{City, CityID},
        error::GameError,
        obs::observed_locs,
        unit::{Unit, UnitID, UnitType},
        CivResult, PlayerNum,
    },
    util::{Dimensioned, Dims, Location, Vec2d},
};

/// An abstract, indexed representation of the map data.
///
/// The map owns the tiles and is the arena for every unit and city in the game. Tiles refer back to their
/// occupant and owning city by ID. IDs are handed out in increasing order and never reused.
///
/// Reasonable constraints on tiles, cities, and units are enforced: one unit per tile, and a unit's recorded
/// location always matches the tile that refers to it.
#[derive(Clone, Debug)]
pub struct MapData {
    tiles: LocationGrid<Tile>,

    units: BTreeMap<UnitID, Unit>,

    cities: BTreeMap<CityID, City>,

    next_unit_id: UnitID,

    next_city_id: CityID,
}

impl MapData {
    pub fn new<F>(dims: Dims, mut terrain_initializer: F) -> Self
    where
        F: FnMut(Location) -> Terrain,
    {
        let tiles = LocationGrid::new(dims, |loc| Tile::new(terrain_initializer(loc), loc));
        Self::new_from_grid(tiles)
    }

    pub fn new_from_grid(tiles: LocationGrid<Tile>) -> Self {
        Self {
            tiles,
            units: BTreeMap::new(),
            cities: BTreeMap::new(),
            next_unit_id: UnitID::default(),
            next_city_id: CityID::default(),
        }
    }

    /// The side length of the board
    pub fn size(&self) -> u16 {
        self.dims().width
    }

    pub fn tile(&self, loc: Location) -> Option<&Tile> {
        self.tiles.get(loc)
    }

    pub(in crate::game) fn tile_mut(&mut self, loc: Location) -> Option<&mut Tile> {
        self.tiles.get_mut(loc)
    }

    /// Look up a tile by signed coordinates, which may be off the board
    pub fn tile_at(&self, x: i32, y: i32) -> Option<&Tile> {
        Location::new(0, 0)
            .checked_add(Vec2d::new(x, y), self.dims())
            .and_then(|loc| self.tile(loc))
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn unit_by_id(&self, id: UnitID) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub(in crate::game) fn unit_by_id_mut(&mut self, id: UnitID) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub fn unit_by_loc(&self, loc: Location) -> Option<&Unit> {
        self.tile(loc)
            .and_then(|tile| tile.unit)
            .and_then(|id| self.unit_by_id(id))
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn city_by_id(&self, id: CityID) -> Option<&City> {
        self.cities.get(&id)
    }

    pub(in crate::game) fn city_by_id_mut(&mut self, id: CityID) -> Option<&mut City> {
        self.cities.get_mut(&id)
    }

    /// The city located at `loc`
    ///
    /// Tiles merely claimed by a city don't count.
    pub fn city_by_loc(&self, loc: Location) -> Option<&City> {
        self.tile(loc)
            .and_then(|tile| tile.owner_city)
            .and_then(|id| self.city_by_id(id))
            .filter(|city| city.loc == loc)
    }

    pub fn is_city_tile(&self, loc: Location) -> bool {
        self.city_by_loc(loc).is_some()
    }

    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    pub(in crate::game) fn next_unit_id(&mut self) -> UnitID {
        let id = self.next_unit_id;
        self.next_unit_id = self.next_unit_id.next();
        id
    }

    pub(in crate::game) fn next_city_id(&mut self) -> CityID {
        let id = self.next_city_id;
        self.next_city_id = self.next_city_id.next();
        id
    }

    /// Put a unit on the board at its own location
    ///
    /// Fails without side effects if the location is off the board or already occupied.
    pub(in crate::game) fn set_unit(&mut self, unit: Unit) -> CivResult<UnitID> {
        let loc = unit.loc;
        let tile = self
            .tiles
            .get_mut(loc)
            .ok_or(GameError::NoTileAtLocation { loc })?;

        if let Some(occupant) = tile.unit {
            return Err(GameError::TileOccupied { loc, occupant });
        }

        let id = unit.id;
        tile.unit = Some(id);
        self.units.insert(id, unit);
        Ok(id)
    }

    /// Take a unit off the board and out of the arena
    pub(in crate::game) fn pop_unit_by_id(&mut self, id: UnitID) -> Option<Unit> {
        let unit = self.units.remove(&id)?;
        if let Some(tile) = self.tiles.get_mut(unit.loc) {
            if tile.unit == Some(id) {
                tile.unit = None;
            }
        }
        Some(unit)
    }

    /// Move a unit from its tile to `dest`, spending `cost` movement
    ///
    /// The caller has already checked that the move is legal. Returns the unit's new state.
    pub(in crate::game) fn relocate_unit_by_id(
        &mut self,
        id: UnitID,
        dest: Location,
        cost: u16,
    ) -> CivResult<&Unit> {
        let src = self.unit_by_id(id).ok_or(GameError::NoSuchUnit { id })?.loc;

        let dest_tile = self
            .tiles
            .get_mut(dest)
            .ok_or(GameError::NoTileAtLocation { loc: dest })?;
        if let Some(occupant) = dest_tile.unit {
            return Err(GameError::TileOccupied {
                loc: dest,
                occupant,
            });
        }
        dest_tile.unit = Some(id);

        if let Some(src_tile) = self.tiles.get_mut(src) {
            src_tile.unit = None;
        }

        let unit = self
            .units
            .get_mut(&id)
            .ok_or(GameError::NoSuchUnit { id })?;
        unit.move_to(cost, dest);
        Ok(&*unit)
    }

    /// Register a freshly founded city
    ///
    /// The city tile's modifiers are neutralized and every unowned tile within the control radius is claimed.
    /// Resources under the city's influence unlock the unit types they enable.
    pub(in crate::game) fn new_city(&mut self, mut city: City) -> CivResult<CityID> {
        let loc = city.loc;
        let tile = self
            .tiles
            .get(loc)
            .ok_or(GameError::NoTileAtLocation { loc })?;
        if let Some(owner) = tile.owner_city {
            return Err(GameError::TileAlreadyOwned { loc, city: owner });
        }

        let id = city.id;
        for claimed in observed_locs(loc, city.control_radius(), self.dims()) {
            let tile = &mut self.tiles[claimed];

            if let Some(resource) = tile.resource {
                for type_ in UnitType::values() {
                    if type_.unlocked_by() == Some(resource) {
                        city.unlock(type_);
                    }
                }
            }

            if claimed == loc {
                tile.found_city(id);
            } else if tile.owner_city.is_none() {
                tile.claim(id);
            }
        }

        self.cities.insert(id, city);
        Ok(id)
    }

    /// Remove a city, releasing every tile it held
    pub(in crate::game) fn pop_city_by_id(&mut self, id: CityID) -> Option<City> {
        let city = self.cities.remove(&id)?;
        for tile in self.tiles.iter_mut() {
            if tile.owner_city == Some(id) {
                tile.release_city();
            }
        }
        Some(city)
    }

    /// Reveal every tile within `radius` of `center` to `player`
    ///
    /// Returns the number of tiles the player hadn't seen before.
    pub(in crate::game) fn reveal(
        &mut self,
        player: PlayerNum,
        center: Location,
        radius: u16,
    ) -> usize {
        let dims = self.dims();
        observed_locs(center, radius, dims)
            .into_iter()
            .filter(|loc| self.tiles[*loc].reveal_tile(player))
            .count()
    }
}

impl Dimensioned for MapData {
    fn dims(&self) -> Dims {
        self.tiles.dims()
    }
}

#[cfg(test)]
mod test {
    use crate::{
        game::{
            city::{City, CityID},
            error::GameError,
            rules::Rules,
            unit::{Unit, UnitID, UnitType},
        },
        util::{Dimensioned, Dims, Location},
    };

    use super::{MapData, Resource, Terrain, Tile};

    fn map() -> MapData {
        MapData::new(Dims::square(6), |_| Terrain::Field)
    }

    fn warrior(map: &mut MapData, owner: usize, loc: Location) -> Unit {
        let id = map.next_unit_id();
        Unit::new(
            id,
            owner,
            loc,
            UnitType::Warrior,
            Rules::default().unit(UnitType::Warrior),
        )
    }

    #[test]
    fn test_bounds() {
        let map = map();
        assert_eq!(map.size(), 6);
        assert!(map.tile_at(0, 0).is_some());
        assert!(map.tile_at(5, 5).is_some());
        assert!(map.tile_at(-1, 0).is_none());
        assert!(map.tile_at(0, 6).is_none());
        assert!(map.tile(Location::new(6, 2)).is_none());
        assert_eq!(map.dims(), Dims::square(6));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut map = map();
        let a = map.next_unit_id();
        let b = map.next_unit_id();
        assert_ne!(a, b);
        assert_eq!(b, UnitID::new(1));
    }

    #[test]
    fn test_one_unit_per_tile() {
        let mut map = map();
        let loc = Location::new(2, 2);
        let first = warrior(&mut map, 0, loc);
        let first_id = map.set_unit(first).unwrap();
        assert_eq!(map.tile(loc).unwrap().unit(), Some(first_id));

        let second = warrior(&mut map, 1, loc);
        assert_eq!(
            map.set_unit(second),
            Err(GameError::TileOccupied {
                loc,
                occupant: first_id
            })
        );
        assert_eq!(map.units().count(), 1);
    }

    #[test]
    fn test_relocate() {
        let mut map = map();
        let src = Location::new(2, 2);
        let dest = Location::new(3, 3);
        let unit = warrior(&mut map, 0, src);
        let id = map.set_unit(unit).unwrap();

        let moved = map.relocate_unit_by_id(id, dest, 1).unwrap();
        assert_eq!(moved.loc, dest);
        assert_eq!(moved.moves_remaining(), 1);
        assert_eq!(map.tile(src).unwrap().unit(), None);
        assert_eq!(map.unit_by_loc(dest).unwrap().id, id);

        let popped = map.pop_unit_by_id(id).unwrap();
        assert_eq!(popped.id, id);
        assert_eq!(map.tile(dest).unwrap().unit(), None);
        assert!(map.unit_by_id(id).is_none());
    }

    #[test]
    fn test_city_claims_and_releases() {
        let mut tiles = super::LocationGrid::new(Dims::square(6), |loc| {
            if loc == Location::new(3, 2) {
                Tile::with_resource(Terrain::Hill, Some(Resource::Iron), loc)
            } else {
                Tile::new(Terrain::Hill, loc)
            }
        });
        tiles[Location::new(0, 0)] = Tile::new(Terrain::Water, Location::new(0, 0));
        let mut map = MapData::new_from_grid(tiles);
        let rules = Rules::default();

        let loc = Location::new(2, 2);
        let id = map.next_city_id();
        let city = City::new(id, 0, loc, "Uruk", &rules.city);
        map.new_city(city).unwrap();

        assert!(map.is_city_tile(loc));
        assert!(!map.is_city_tile(Location::new(3, 3)));
        assert_eq!(
            map.tile(Location::new(3, 3)).unwrap().owner_city(),
            Some(id)
        );
        assert_eq!(map.tile(Location::new(4, 4)).unwrap().owner_city(), None);
        assert_eq!(map.tile(loc).unwrap().movement_modifier(), 0);
        assert!(map.city_by_id(id).unwrap().can_build(UnitType::Swordsman));
        assert!(!map.city_by_id(id).unwrap().can_build(UnitType::Cavalry));

        // A neighbor can't be founded on claimed ground
        let neighbor = City::new(map.next_city_id(), 1, Location::new(3, 3), "Kish", &rules.city);
        assert_eq!(
            map.new_city(neighbor),
            Err(GameError::TileAlreadyOwned {
                loc: Location::new(3, 3),
                city: id
            })
        );

        map.pop_city_by_id(id).unwrap();
        assert!(map.tiles().all(|tile| tile.owner_city().is_none()));
        assert_eq!(map.tile(loc).unwrap().movement_modifier(), -1);
        assert!(!map.is_city_tile(loc));
        assert_eq!(map.city_by_id(CityID::new(0)), None);
    }

    #[test]
    fn test_reveal_counts_new_tiles() {
        let mut map = map();
        assert_eq!(map.reveal(0, Location::new(0, 0), 1), 4);
        assert_eq!(map.reveal(0, Location::new(1, 0), 1), 2);
        assert_eq!(map.reveal(1, Location::new(1, 0), 1), 6);
        assert!(map.tile(Location::new(2, 1)).unwrap().can_see_tile(0));
        assert!(!map.tile(Location::new(3, 1)).unwrap().can_see_tile(0));
    }
}
