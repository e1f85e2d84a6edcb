//! The computer player
//!
//! A greedy heuristic, not a search. Cities always try to turn out Warriors. Settlers found a city as soon as they
//! can and wander until they do. The first few fighting units stay home as defenders and the rest march on the
//! nearest enemy city.
//!
//! Whenever the heuristic doesn't care which of several moves it makes, it picks one with the game's seeded RNG,
//! so a game replays identically from the same seed.

use rand::seq::SliceRandom;

use tracing::{debug, trace};

use crate::{
    conf,
    util::{Dimensioned, Location, Vec2d},
};

use super::{
    city::CityID,
    unit::{UnitID, UnitType},
    Game, PlayerNum,
};

/// Play the current player's turn. The caller ends it.
pub(in crate::game) fn play_turn(game: &mut Game) {
    let player = game.current_player();
    debug!(player, "Computer player taking its turn");

    produce(game, player);
    move_units(game, player);
}

/// Is the move to `dest` an attack, from `player`'s point of view?
fn is_attack(game: &Game, player: PlayerNum, dest: Location) -> bool {
    game.unit_at(dest).map_or(false, |unit| unit.owner != player)
        || game.city_at(dest).map_or(false, |city| city.owner != player)
}

fn peaceful_moves(game: &Game, id: UnitID) -> Vec<Location> {
    let Some(owner) = game.unit(id).map(|unit| unit.owner) else {
        return Vec::new();
    };
    game.valid_moves(id)
        .into_iter()
        .filter(|dest| !is_attack(game, owner, *dest))
        .collect()
}

fn attacks(game: &Game, id: UnitID) -> Vec<Location> {
    let Some(owner) = game.unit(id).map(|unit| unit.owner) else {
        return Vec::new();
    };
    game.valid_moves(id)
        .into_iter()
        .filter(|dest| is_attack(game, owner, *dest))
        .collect()
}

fn arbitrary(game: &mut Game, options: &[Location]) -> Option<Location> {
    options.choose(game.rng_mut()).copied()
}

/// Make one arbitrary move, preferring not to pick a fight
fn step_aside(game: &mut Game, id: UnitID) -> bool {
    let mut options = peaceful_moves(game, id);
    if options.is_empty() {
        options = game.valid_moves(id).into_iter().collect();
    }
    match arbitrary(game, &options) {
        Some(dest) => game.move_unit(id, dest).is_ok(),
        None => false,
    }
}

fn produce(game: &mut Game, player: PlayerNum) {
    let Some(cities) = game.player(player).map(|p| p.cities().to_vec()) else {
        return;
    };

    for city_id in cities {
        let Some(city) = game.city(city_id) else {
            continue;
        };
        let loc = city.loc;

        // Only clear the city tile if the warrior could actually be built
        if city
            .production_status(UnitType::Warrior, game.rules())
            .is_err()
        {
            continue;
        }

        if let Some(occupant) = game.unit_at(loc).map(|unit| unit.id) {
            step_aside(game, occupant);
        }

        match game.create_unit(loc, UnitType::Warrior) {
            Ok(unit) => debug!(city = %city_id, unit = %unit.id, "Computer built a warrior"),
            Err(err) => trace!(city = %city_id, %err, "Computer couldn't build a warrior"),
        }
    }
}

fn move_units(game: &mut Game, player: PlayerNum) {
    let mut idx = 0;
    let mut defenders = 0;

    loop {
        let Some(units) = game.player(player).map(|p| p.units()) else {
            return;
        };
        let Some(id) = units.get(idx).copied() else {
            return;
        };
        let unit_count = units.len();

        let Some(type_) = game.unit(id).map(|unit| unit.type_) else {
            return;
        };

        if type_.can_found_city() {
            settle(game, id);
        } else if defenders < conf::AI_DEFENDERS {
            defenders += 1;
            defend(game, id);
        } else {
            advance_on_nearest_city(game, id);
        }

        if game.game_over() {
            return;
        }

        // Units lost along the way shift the rest down into the current slot
        if game.player(player).map(|p| p.units().len()) == Some(unit_count) {
            idx += 1;
        }
    }
}

fn settle(game: &mut Game, id: UnitID) {
    loop {
        let Some(unit) = game.unit(id) else {
            return;
        };
        let loc = unit.loc;
        let moves_remaining = unit.moves_remaining();

        if game.found_city(loc).is_ok() {
            return;
        }

        if moves_remaining == 0 {
            return;
        }

        let options = peaceful_moves(game, id);
        let Some(dest) = arbitrary(game, &options) else {
            return;
        };
        if game.move_unit(id, dest).is_err() {
            return;
        }
    }
}

fn defend(game: &mut Game, id: UnitID) {
    let Some(loc) = game.unit(id).map(|unit| unit.loc) else {
        return;
    };

    if let Some(target) = attacks(game, id).first().copied() {
        match game.move_unit(id, target) {
            Ok(outcome) => debug!(unit = %id, %target, ?outcome, "Defender attacked"),
            Err(err) => trace!(unit = %id, %target, %err, "Defender couldn't attack"),
        }
    } else if game.is_city_tile(loc) {
        // Keep the city tile free for production
        step_aside(game, id);
    }
}

fn nearest_enemy_city(game: &Game, player: PlayerNum, loc: Location) -> Option<CityID> {
    game.map()
        .cities()
        .filter(|city| city.owner != player)
        .min_by_key(|city| (loc.chebyshev_distance(city.loc), city.loc))
        .map(|city| city.id)
}

/// The single step along one axis that best closes the distance from `src` to `dest`
///
/// Moves along x unless the y distance is strictly greater.
fn ideal_step(src: Location, dest: Location) -> Vec2d<i32> {
    let delta = src.delta_to(dest);
    if delta.y.abs() > delta.x.abs() {
        Vec2d::new(0, delta.y.signum())
    } else {
        Vec2d::new(delta.x.signum(), 0)
    }
}

fn advance_on_nearest_city(game: &mut Game, id: UnitID) {
    let Some(unit) = game.unit(id) else {
        return;
    };
    let Some(target_id) = nearest_enemy_city(game, unit.owner, unit.loc) else {
        return;
    };

    loop {
        let Some(target) = game.city(target_id).map(|city| city.loc) else {
            return;
        };
        let Some(unit) = game.unit(id) else {
            return;
        };
        if unit.moves_remaining() == 0 {
            return;
        }
        let loc = unit.loc;

        let valid: Vec<Location> = game.valid_moves(id).into_iter().collect();
        if valid.is_empty() {
            return;
        }

        let dest = if valid.contains(&target) {
            Some(target)
        } else {
            loc.checked_add(ideal_step(loc, target), game.map().dims())
                .filter(|step| valid.contains(step))
        };
        let Some(dest) = dest.or_else(|| arbitrary(game, &valid)) else {
            return;
        };

        if game.move_unit(id, dest).is_err() {
            return;
        }
    }
}
