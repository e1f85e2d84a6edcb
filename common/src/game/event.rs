//! The game's event log
//!
//! Every mutating operation on a `Game` appends what happened here. Renderers and runners drain the log with
//! `Game::take_events` and re-query whatever state they need.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::Location;

use super::{
    city::CityID,
    combat::{CityCombatOutcome, UnitCombatOutcome},
    error::GameError,
    unit::{UnitID, UnitType},
    PlayerNum, TurnNum,
};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum GameEvent {
    TurnStarted {
        player: PlayerNum,
        round: TurnNum,
    },

    TurnEnded {
        player: PlayerNum,
    },

    /// A unit appeared on the board, whether placed at the start or produced by a city
    UnitCreated {
        unit: UnitID,
        owner: PlayerNum,
        type_: UnitType,
        loc: Location,
        city: Option<CityID>,
    },

    UnitMoved {
        unit: UnitID,
        src: Location,
        dest: Location,
    },

    /// A move request was refused; nothing changed
    MoveRejected {
        unit: UnitID,
        dest: Location,
        error: GameError,
    },

    UnitCombat(UnitCombatOutcome),

    CityCombat(CityCombatOutcome),

    UnitDestroyed {
        unit: UnitID,
        owner: PlayerNum,
        loc: Location,
    },

    TilesRevealed {
        player: PlayerNum,
        count: usize,
    },

    CityFounded {
        city: CityID,
        owner: PlayerNum,
        loc: Location,
        name: String,
    },

    CityGrew {
        city: CityID,
        population: u16,
    },

    CityDestroyed {
        city: CityID,
        owner: PlayerNum,
        loc: Location,
    },

    PlayerEliminated {
        player: PlayerNum,
    },

    GameOver {
        winner: PlayerNum,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::TurnStarted { player, round } => {
                write!(f, "Round {}: player {}'s turn", round, player)
            }
            Self::TurnEnded { player } => write!(f, "Player {} ended their turn", player),
            Self::UnitCreated {
                unit,
                owner,
                type_,
                loc,
                ..
            } => write!(f, "Player {}'s {} {} appeared at {}", owner, type_, unit, loc),
            Self::UnitMoved { unit, src, dest } => {
                write!(f, "Unit {} moved from {} to {}", unit, src, dest)
            }
            Self::MoveRejected { unit, dest, error } => {
                write!(f, "Unit {} couldn't move to {}: {}", unit, dest, error)
            }
            Self::UnitCombat(combat) => write!(
                f,
                "Unit {} attacked unit {} for {} damage",
                combat.attacker, combat.defender, combat.damage
            ),
            Self::CityCombat(combat) => write!(
                f,
                "Unit {} attacked city {} for {} damage",
                combat.attacker, combat.city, combat.damage
            ),
            Self::UnitDestroyed { unit, owner, loc } => {
                write!(f, "Player {}'s unit {} was destroyed at {}", owner, unit, loc)
            }
            Self::TilesRevealed { player, count } => {
                write!(f, "Player {} discovered {} tiles", player, count)
            }
            Self::CityFounded {
                owner, loc, name, ..
            } => write!(f, "Player {} founded {} at {}", owner, name, loc),
            Self::CityGrew { city, population } => {
                write!(f, "City {} grew to population {}", city, population)
            }
            Self::CityDestroyed { city, owner, loc } => {
                write!(f, "Player {}'s city {} at {} was destroyed", owner, city, loc)
            }
            Self::PlayerEliminated { player } => write!(f, "Player {} was eliminated", player),
            Self::GameOver { winner } => write!(f, "Game over: player {} wins", winner),
        }
    }
}
