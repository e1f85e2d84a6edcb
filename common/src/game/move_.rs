use serde::{Deserialize, Serialize};

use thiserror::Error;

use crate::{
    game::{
        combat::{CityCombatOutcome, UnitCombatOutcome},
        unit::UnitID,
        PlayerNum,
    },
    util::Location,
};

/// Why a move was refused
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum MoveError {
    #[error("Destination {dest} is not adjacent to the unit's location {src}")]
    TooFar { src: Location, dest: Location },

    #[error("The unit is already at {loc}")]
    ZeroLengthMove { loc: Location },

    #[error("Destination {dest} is not on the board")]
    DestinationOutOfBounds { dest: Location },

    #[error("Entering {dest} costs {cost} but only {moves_remaining} movement remains")]
    InsufficientMovement {
        dest: Location,
        cost: i32,
        moves_remaining: u16,
    },

    #[error("Friendly unit {blocker} already occupies {dest}")]
    FriendlyUnitPresent { dest: Location, blocker: UnitID },
}

/// What an accepted move did
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum MoveOutcome {
    /// A plain move onto an empty or friendly-city tile
    Moved {
        unit: UnitID,
        src: Location,
        dest: Location,
        cost: u16,

        /// How many tiles the move newly revealed to the unit's owner
        revealed: usize,
    },

    /// The destination held an enemy unit
    UnitCombat {
        combat: UnitCombatOutcome,

        /// Whether the attacker took the defender's tile
        advanced: bool,
    },

    /// The destination was an enemy city
    CityCombat {
        combat: CityCombatOutcome,

        /// The player knocked out of the game by the city's fall, if any
        eliminated: Option<PlayerNum>,
    },
}

impl MoveOutcome {
    /// Did the moving unit end up at the destination?
    pub fn relocated(&self) -> bool {
        match self {
            Self::Moved { .. } => true,
            Self::UnitCombat { advanced, .. } => *advanced,
            Self::CityCombat { .. } => false,
        }
    }

    /// Did the moving unit die in the attempt?
    pub fn attacker_destroyed(&self) -> bool {
        match self {
            Self::UnitCombat { combat, .. } => combat.attacker_destroyed(),
            _ => false,
        }
    }
}
