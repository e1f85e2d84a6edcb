use serde::{Deserialize, Serialize};

use thiserror::Error;

use crate::{
    game::{
        city::CityID,
        move_::MoveError,
        player::PlayerNum,
        unit::{UnitID, UnitType},
    },
    util::Location,
};

/// Why the game refused to do what it was asked
///
/// Every variant is a rule rejection: the game state is untouched when one is returned.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("A game needs at least one player")]
    NoPlayers,

    #[error("There is no player {player}")]
    NoSuchPlayer { player: PlayerNum },

    #[error("The game is over")]
    GameOver,

    #[error("The round limit has been reached")]
    RoundLimitReached,

    #[error("No unit with ID {id} exists")]
    NoSuchUnit { id: UnitID },

    #[error("No unit at location {loc} exists")]
    NoUnitAtLocation { loc: Location },

    #[error("No city at location {loc} exists")]
    NoCityAtLocation { loc: Location },

    #[error("No tile at location {loc} exists")]
    NoTileAtLocation { loc: Location },

    #[error("Unit {id} is not controlled by the current player {player}")]
    UnitNotControlledByCurrentPlayer { id: UnitID, player: PlayerNum },

    #[error("City {id} is not controlled by the current player {player}")]
    CityNotControlledByCurrentPlayer { id: CityID, player: PlayerNum },

    #[error("City {city} cannot build {type_}")]
    UnitTypeNotProducible { city: CityID, type_: UnitType },

    #[error("City {city} has {reserve} production banked but {type_} costs {cost}")]
    InsufficientProductionReserve {
        city: CityID,
        type_: UnitType,
        cost: u32,
        reserve: u32,
    },

    #[error("City {city} has population {population}, too small to give up a settler")]
    PopulationTooLow { city: CityID, population: u16 },

    #[error("The tile at {loc} is already occupied by unit {occupant}")]
    TileOccupied { loc: Location, occupant: UnitID },

    #[error("Unit {id} has no charge with which to found a city")]
    NoFoundingCharge { id: UnitID },

    #[error("The tile at {loc} already belongs to city {city}")]
    TileAlreadyOwned { loc: Location, city: CityID },

    #[error("There was a problem moving the unit: {0}")]
    MoveError(#[from] MoveError),
}
