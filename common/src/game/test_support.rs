//! Test support functions

use crate::{
    game::{
        city::{City, CityID},
        map::{MapData, Terrain},
        rules::Rules,
        unit::{UnitID, UnitType},
        Game, PlayerNum, PlayerType,
    },
    util::{Dims, Location},
};

/// A square board of nothing but fields
pub fn fields(size: u16) -> MapData {
    MapData::new(Dims::square(size), |_loc| Terrain::Field)
}

pub fn game_on_map(map: MapData, players: &[PlayerType]) -> Game {
    Game::new_with_map(map, players, Rules::default(), 0).unwrap()
}

pub fn game_on_fields(size: u16, players: &[PlayerType]) -> Game {
    game_on_map(fields(size), players)
}

/// Two human players, so turns only advance when a test says so
pub fn two_humans_on_fields(size: u16) -> Game {
    game_on_fields(size, &[PlayerType::Human, PlayerType::Human])
}

/// Put a unit on the board for `owner` whether or not it's their turn
pub fn spawn(game: &mut Game, owner: PlayerNum, type_: UnitType, loc: Location) -> UnitID {
    game.spawn_unit(owner, type_, loc, None).unwrap()
}

/// Give `owner` a brand new city at `loc` without going through a settler
pub fn found_city_for(game: &mut Game, owner: PlayerNum, loc: Location) -> CityID {
    let id = game.map.next_city_id();
    let name = game.next_city_name();
    let city = City::new(id, owner, loc, name, &game.rules.city);
    game.map.new_city(city).unwrap();
    game.players[owner].add_city(id);
    id
}

/// End turns until it's `player`'s turn again, `times` times over
pub fn cycle_to(game: &mut Game, player: PlayerNum, times: usize) {
    for _ in 0..times {
        game.end_turn().unwrap();
        while game.current_player() != player {
            game.end_turn().unwrap();
        }
    }
}
