//!
//! Abstract game engine.
//!
//! This implements the game logic without regard for user interface.

pub mod ai;
pub mod city;
pub mod combat;
pub mod error;
pub mod event;
pub mod map;
pub mod move_;
pub mod obs;
pub mod player;
pub mod rules;
pub mod turn;
pub mod unit;

#[cfg(test)]
pub(crate) mod test_support;


use std::collections::BTreeSet;

use rand::{rngs::StdRng, SeedableRng};

use serde::{Deserialize, Serialize};

use tracing::{debug, info, warn};

use crate::{
    conf,
    game::{
        city::{City, CityID},
        combat::{effective_attack, CityCombatOutcome, CombatCapable, UnitCombatOutcome},
        error::GameError,
        event::GameEvent,
        map::{gen::generate_map, MapData, Tile},
        move_::{MoveError, MoveOutcome},
        obs::Observer,
        player::Player,
        rules::Rules,
        turn::TurnOrder,
        unit::{Unit, UnitID, UnitType},
    },
    util::{Dimensioned, Location, RELATIVE_NEIGHBORS},
};

pub use self::player::{PlayerNum, PlayerType};

/// What turn is it? The round of play, in other words.
pub type TurnNum = u64;

pub type CivResult<T> = Result<T, GameError>;

/// What a successful `Game::found_city` did
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CityFoundingOutcome {
    /// A copy of the new city
    pub city: City,

    /// A copy of the settler as it was when it was used up, charges spent
    pub settler: Unit,
}

/// The game state and the rules that move it forward
///
/// `Game` is the only way to change anything: callers query the board, units, cities, and players, and ask for
/// moves, production, and city founding on behalf of the current player. Everything that happens is logged as a
/// `GameEvent` for the caller to drain with `take_events`.
///
/// Computer players take their turns as soon as they come up, so control only returns to the caller on a human
/// player's turn, at the end of the game, or when the round limit is hit.
#[derive(Clone, Debug)]
pub struct Game {
    map: MapData,
    players: Vec<Player>,
    turn_order: TurnOrder,
    rules: Rules,

    /// Drives map generation and the computer players' arbitrary choices
    rng: StdRng,

    events: Vec<GameEvent>,

    cities_founded: usize,
}

impl Game {
    /// Generate a board of the given size and seat the players on it
    pub fn new(
        size: u16,
        player_types: &[PlayerType],
        rules: Rules,
        seed: u64,
    ) -> CivResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let map = generate_map(&mut rng, size);
        Self::new_with_map_and_rng(map, player_types, rules, rng)
    }

    pub fn new_with_map(
        map: MapData,
        player_types: &[PlayerType],
        rules: Rules,
        seed: u64,
    ) -> CivResult<Self> {
        Self::new_with_map_and_rng(map, player_types, rules, StdRng::seed_from_u64(seed))
    }

    fn new_with_map_and_rng(
        map: MapData,
        player_types: &[PlayerType],
        rules: Rules,
        rng: StdRng,
    ) -> CivResult<Self> {
        if player_types.is_empty() {
            return Err(GameError::NoPlayers);
        }

        let players: Vec<Player> = player_types
            .iter()
            .enumerate()
            .map(|(num, type_)| Player::new(num, format!("Player {}", num + 1), *type_))
            .collect();

        info!(
            size = map.size(),
            players = players.len(),
            "Created a new game"
        );

        Ok(Self {
            map,
            turn_order: TurnOrder::new((0..players.len()).collect()),
            players,
            rules,
            rng,
            events: Vec::new(),
            cities_founded: 0,
        })
    }

    pub fn size(&self) -> u16 {
        self.map.size()
    }

    pub fn map(&self) -> &MapData {
        &self.map
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn tile(&self, loc: Location) -> Option<&Tile> {
        self.map.tile(loc)
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Option<&Tile> {
        self.map.tile_at(x, y)
    }

    pub fn unit(&self, id: UnitID) -> Option<&Unit> {
        self.map.unit_by_id(id)
    }

    pub fn unit_at(&self, loc: Location) -> Option<&Unit> {
        self.map.unit_by_loc(loc)
    }

    pub fn city(&self, id: CityID) -> Option<&City> {
        self.map.city_by_id(id)
    }

    pub fn city_at(&self, loc: Location) -> Option<&City> {
        self.map.city_by_loc(loc)
    }

    pub fn is_city_tile(&self, loc: Location) -> bool {
        self.map.is_city_tile(loc)
    }

    pub fn player(&self, player: PlayerNum) -> Option<&Player> {
        self.players.get(player)
    }

    /// Every player seated at the start, eliminated or not
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The players still in the game, in turn order
    pub fn turn_order(&self) -> &[PlayerNum] {
        self.turn_order.players()
    }

    pub fn current_player(&self) -> PlayerNum {
        self.turn_order.current_player()
    }

    pub fn round(&self) -> TurnNum {
        self.turn_order.round()
    }

    /// How many players remain in the game
    pub fn num_players(&self) -> usize {
        self.turn_order.len()
    }

    pub fn game_over(&self) -> bool {
        self.turn_order.len() == 1
    }

    /// The last player standing, once the game is over
    pub fn winner(&self) -> Option<PlayerNum> {
        if self.game_over() {
            Some(self.current_player())
        } else {
            None
        }
    }

    pub fn round_limit_reached(&self) -> bool {
        self.rules
            .max_rounds
            .map_or(false, |max_rounds| self.round() >= max_rounds)
    }

    /// Is a human player up and able to act?
    ///
    /// False once the round limit is reached: the turn order has moved on but nobody's turn has begun.
    pub fn is_human_turn(&self) -> bool {
        !self.game_over()
            && !self.round_limit_reached()
            && self.players[self.current_player()].is_human()
    }

    /// Fail if play has stopped, either for good or at the round limit
    fn ensure_in_play(&self) -> CivResult<()> {
        if self.game_over() {
            return Err(GameError::GameOver);
        }
        if self.round_limit_reached() {
            return Err(GameError::RoundLimitReached);
        }
        Ok(())
    }

    /// Drain the event log
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(in crate::game) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    fn event(&mut self, event: GameEvent) {
        debug!("{}", event);
        self.events.push(event);
    }

    fn reveal(&mut self, player: PlayerNum, center: Location, radius: u16) -> usize {
        let count = self.map.reveal(player, center, radius);
        if count > 0 {
            self.event(GameEvent::TilesRevealed { player, count });
        }
        count
    }

    fn next_city_name(&mut self) -> String {
        let names = conf::CITY_NAMES;
        let name = names[self.cities_founded % names.len()];
        let cycle = self.cities_founded / names.len();
        self.cities_founded += 1;
        if cycle == 0 {
            name.to_string()
        } else {
            format!("{} {}", name, cycle + 1)
        }
    }

    /// Create a unit out of thin air and put it on the board
    ///
    /// Used for starting units and test setups. The unit reveals its surroundings to its owner.
    pub(in crate::game) fn spawn_unit(
        &mut self,
        owner: PlayerNum,
        type_: UnitType,
        loc: Location,
        city: Option<CityID>,
    ) -> CivResult<UnitID> {
        if owner >= self.players.len() {
            return Err(GameError::NoSuchPlayer { player: owner });
        }

        let id = self.map.next_unit_id();
        let unit = Unit::new(id, owner, loc, type_, self.rules.unit(type_));
        let sight = unit.sight_distance();
        self.map.set_unit(unit)?;
        self.players[owner].add_unit(id);

        self.event(GameEvent::UnitCreated {
            unit: id,
            owner,
            type_,
            loc,
            city,
        });
        self.reveal(owner, loc, sight);
        Ok(id)
    }

    /// The spot each player's starting units gather around, one board corner per player
    fn start_location(&self, seat: usize) -> Location {
        let last = self.size().saturating_sub(1);
        let inset = conf::START_INSET.min(last / 2);
        let far = last - inset;
        match seat % 4 {
            0 => Location::new(inset, inset),
            1 => Location::new(far, far),
            2 => Location::new(far, inset),
            _ => Location::new(inset, far),
        }
    }

    /// Give every player a Settler and a Warrior near their corner of the board
    ///
    /// Units go on the passable, unoccupied tiles nearest the player's start location. Returns the IDs of the
    /// units placed.
    pub fn place_starting_units(&mut self) -> CivResult<Vec<UnitID>> {
        let mut placed = Vec::new();
        for (seat, player) in self.turn_order.players().to_vec().into_iter().enumerate() {
            let start = self.start_location(seat);

            let mut candidates: Vec<Location> = self
                .map
                .tiles()
                .filter(|tile| tile.is_passable() && !tile.is_occupied())
                .map(|tile| tile.loc)
                .collect();
            candidates.sort_by_key(|loc| (loc.chebyshev_distance(start), *loc));

            let mut candidates = candidates.into_iter();
            for type_ in [UnitType::Settler, UnitType::Warrior] {
                let Some(loc) = candidates.next() else {
                    warn!(player, %type_, "No room on the board for a starting unit");
                    break;
                };
                placed.push(self.spawn_unit(player, type_, loc, None)?);
            }
        }
        Ok(placed)
    }

    pub fn start_game(&mut self) {
        info!(players = self.num_players(), "Starting game");
        self.start_turn();
    }

    /// Begin the current player's turn
    ///
    /// Units regain their movement and heal; cities produce and grow. Computer players then play out their turn
    /// and hand off to the next player, and so on until a human player is up, the game is over, or the round
    /// limit has been reached.
    pub fn start_turn(&mut self) {
        loop {
            if self.game_over() {
                return;
            }
            if self.round_limit_reached() {
                info!(round = self.round(), "Round limit reached");
                return;
            }

            let player = self.current_player();
            self.begin_player_turn(player);

            if self.players[player].is_human() {
                return;
            }

            ai::play_turn(self);

            if self.game_over() {
                return;
            }
            self.advance_turn();
        }
    }

    /// End the current player's turn and start the next one
    ///
    /// If this crosses into the round limit, the turn order advances but the next player's turn never begins;
    /// from then on every action, this one included, fails with `GameError::RoundLimitReached`.
    pub fn end_turn(&mut self) -> CivResult<()> {
        self.ensure_in_play()?;
        self.advance_turn();
        self.start_turn();
        Ok(())
    }

    fn advance_turn(&mut self) {
        let player = self.current_player();
        self.event(GameEvent::TurnEnded { player });
        self.turn_order.advance();
    }

    fn begin_player_turn(&mut self, player: PlayerNum) {
        let round = self.round();
        info!(player, round, "Turn started");
        self.event(GameEvent::TurnStarted { player, round });

        for id in self.players[player].units().to_vec() {
            if let Some(unit) = self.map.unit_by_id_mut(id) {
                unit.reset_movement();
                unit.heal(self.rules.unit_heal_per_turn);
            }
        }

        for id in self.players[player].cities().to_vec() {
            let Some(city) = self.map.city_by_id_mut(id) else {
                continue;
            };
            let increment = city.city_increment(&self.rules.city);
            if increment.grew {
                info!(city = %id, population = increment.population, "City grew");
                self.event(GameEvent::CityGrew {
                    city: id,
                    population: increment.population,
                });
            }
        }
    }

    /// The locations a unit could move to or attack right now
    ///
    /// A neighboring tile qualifies if the unit can afford to enter it and no friendly unit is there.
    pub fn valid_moves(&self, id: UnitID) -> BTreeSet<Location> {
        let Some(unit) = self.map.unit_by_id(id) else {
            return BTreeSet::new();
        };

        RELATIVE_NEIGHBORS
            .iter()
            .filter_map(|delta| unit.loc.checked_add(*delta, self.map.dims()))
            .filter(|loc| {
                self.map.tile(*loc).map_or(false, |tile| {
                    tile.entry_cost() <= i32::from(unit.moves_remaining())
                        && tile
                            .unit()
                            .and_then(|occupant| self.map.unit_by_id(occupant))
                            .map_or(true, |occupant| occupant.owner != unit.owner)
                })
            })
            .collect()
    }

    /// Move a unit one tile, attacking whatever enemy is there
    ///
    /// Every call is logged, including refused moves.
    pub fn move_unit(&mut self, id: UnitID, dest: Location) -> CivResult<MoveOutcome> {
        let result = self.try_move_unit(id, dest);
        if let Err(ref error) = result {
            debug!(unit = %id, %dest, %error, "Move rejected");
            self.event(GameEvent::MoveRejected {
                unit: id,
                dest,
                error: error.clone(),
            });
        }
        result
    }

    fn try_move_unit(&mut self, id: UnitID, dest: Location) -> CivResult<MoveOutcome> {
        self.ensure_in_play()?;

        let player = self.current_player();
        let unit = self.map.unit_by_id(id).ok_or(GameError::NoSuchUnit { id })?;
        if unit.owner != player {
            return Err(GameError::UnitNotControlledByCurrentPlayer { id, player });
        }

        let src = unit.loc;
        let dest_tile = self
            .map
            .tile(dest)
            .ok_or(MoveError::DestinationOutOfBounds { dest })?;

        if src == dest {
            return Err(MoveError::ZeroLengthMove { loc: src }.into());
        }
        if src.chebyshev_distance(dest) > 1 {
            return Err(MoveError::TooFar { src, dest }.into());
        }

        let cost = dest_tile.entry_cost();
        if cost > i32::from(unit.moves_remaining()) {
            return Err(MoveError::InsufficientMovement {
                dest,
                cost,
                moves_remaining: unit.moves_remaining(),
            }
            .into());
        }

        if let Some(occupant) = dest_tile.unit() {
            let occupant_owner = self
                .map
                .unit_by_id(occupant)
                .ok_or(GameError::NoSuchUnit { id: occupant })?
                .owner;
            if occupant_owner == player {
                return Err(MoveError::FriendlyUnitPresent {
                    dest,
                    blocker: occupant,
                }
                .into());
            }
            return self.unit_combat(id, occupant);
        }

        if let Some(city) = self.map.city_by_loc(dest) {
            if city.owner != player {
                let city_id = city.id;
                return self.city_combat(id, city_id);
            }
        }

        // Entry costs are at least 1 and no more than the movement remaining
        let cost = u16::try_from(cost).unwrap_or(u16::MAX);
        let unit = self.map.relocate_unit_by_id(id, dest, cost)?;
        let sight = unit.sight_distance();

        self.event(GameEvent::UnitMoved {
            unit: id,
            src,
            dest,
        });
        let revealed = self.reveal(player, dest, sight);

        Ok(MoveOutcome::Moved {
            unit: id,
            src,
            dest,
            cost,
            revealed,
        })
    }

    fn unit_combat(&mut self, attacker_id: UnitID, defender_id: UnitID) -> CivResult<MoveOutcome> {
        let attacker = self
            .map
            .unit_by_id(attacker_id)
            .ok_or(GameError::NoSuchUnit { id: attacker_id })?;
        let defender = self
            .map
            .unit_by_id(defender_id)
            .ok_or(GameError::NoSuchUnit { id: defender_id })?;

        let attacker_loc = attacker.loc;
        let defender_loc = defender.loc;
        let attacker_owner = attacker.owner;
        let attacker_sight = attacker.sight_distance();
        let attacker_tile_modifier = self.map.tile(attacker_loc).map_or(0.0, |t| t.attack_modifier());
        let defender_tile_modifier = self.map.tile(defender_loc).map_or(0.0, |t| t.attack_modifier());

        let damage = effective_attack(attacker.attack_value(), attacker_tile_modifier);
        let counter = effective_attack(defender.attack_value(), defender_tile_modifier);

        let defender_hp = {
            let defender = self
                .map
                .unit_by_id_mut(defender_id)
                .ok_or(GameError::NoSuchUnit { id: defender_id })?;
            defender.take_attack(damage);
            defender.hp()
        };

        let victorious = defender_hp <= 0.0;
        let counter_damage = if victorious { None } else { Some(counter) };

        let attacker_hp = {
            let attacker = self
                .map
                .unit_by_id_mut(attacker_id)
                .ok_or(GameError::NoSuchUnit { id: attacker_id })?;
            attacker.deplete_movement();
            if let Some(counter_damage) = counter_damage {
                attacker.take_attack(counter_damage);
            }
            attacker.hp()
        };

        let combat = UnitCombatOutcome {
            attacker: attacker_id,
            defender: defender_id,
            damage,
            counter_damage,
            attacker_hp,
            defender_hp,
        };
        info!(
            attacker = %attacker_id,
            defender = %defender_id,
            damage,
            ?counter_damage,
            attacker_hp,
            defender_hp,
            "Unit combat"
        );
        self.event(GameEvent::UnitCombat(combat.clone()));

        let mut advanced = false;
        if victorious {
            self.destroy_unit(defender_id);

            if !self.map.is_city_tile(defender_loc) {
                self.map.relocate_unit_by_id(attacker_id, defender_loc, 0)?;
                self.event(GameEvent::UnitMoved {
                    unit: attacker_id,
                    src: attacker_loc,
                    dest: defender_loc,
                });
                self.reveal(attacker_owner, defender_loc, attacker_sight);
                advanced = true;
            }
        } else if combat.attacker_destroyed() {
            self.destroy_unit(attacker_id);
        }

        Ok(MoveOutcome::UnitCombat { combat, advanced })
    }

    fn city_combat(&mut self, attacker_id: UnitID, city_id: CityID) -> CivResult<MoveOutcome> {
        let attacker = self
            .map
            .unit_by_id_mut(attacker_id)
            .ok_or(GameError::NoSuchUnit { id: attacker_id })?;
        attacker.deplete_movement();
        let attack = attacker.attack_value();
        let attacker_loc = attacker.loc;

        let modifier = self.map.tile(attacker_loc).map_or(0.0, |t| t.attack_modifier());
        let damage = effective_attack(attack, modifier);

        let city = self
            .map
            .city_by_id_mut(city_id)
            .ok_or(GameError::NoCityAtLocation { loc: attacker_loc })?;
        city.take_attack(damage);

        let combat = CityCombatOutcome {
            attacker: attacker_id,
            city: city_id,
            damage,
            city_hp: city.hp(),
        };
        info!(attacker = %attacker_id, city = %city_id, damage, city_hp = combat.city_hp, "City attacked");
        self.event(GameEvent::CityCombat(combat.clone()));

        let eliminated = if combat.destroyed() {
            self.destroy_city(city_id)
        } else {
            None
        };

        Ok(MoveOutcome::CityCombat { combat, eliminated })
    }

    fn destroy_unit(&mut self, id: UnitID) {
        if let Some(unit) = self.map.pop_unit_by_id(id) {
            if let Some(player) = self.players.get_mut(unit.owner) {
                player.remove_unit(id);
            }
            debug!(unit = %id, owner = unit.owner, "Unit destroyed");
            self.event(GameEvent::UnitDestroyed {
                unit: id,
                owner: unit.owner,
                loc: unit.loc,
            });
        }
    }

    /// Tear down a city; returns the owner if that cost them the game
    fn destroy_city(&mut self, id: CityID) -> Option<PlayerNum> {
        let city = self.map.pop_city_by_id(id)?;
        let owner = city.owner;
        self.players[owner].remove_city(id);

        info!(city = %id, name = city.name(), owner, "City destroyed");
        self.event(GameEvent::CityDestroyed {
            city: id,
            owner,
            loc: city.loc,
        });

        if self.players[owner].cities().is_empty() && self.eliminate_player(owner) {
            Some(owner)
        } else {
            None
        }
    }

    /// Knock a player out of the turn order and disband their army
    fn eliminate_player(&mut self, player: PlayerNum) -> bool {
        if !self.turn_order.remove(player) {
            return false;
        }

        info!(player, "Player eliminated");
        self.event(GameEvent::PlayerEliminated { player });

        for id in self.players[player].clear_units() {
            if let Some(unit) = self.map.pop_unit_by_id(id) {
                self.event(GameEvent::UnitDestroyed {
                    unit: id,
                    owner: player,
                    loc: unit.loc,
                });
            }
        }

        if let Some(winner) = self.winner() {
            info!(winner, "Game over");
            self.event(GameEvent::GameOver { winner });
        }
        true
    }

    /// Build a unit in the current player's city at `loc`
    ///
    /// ## Errors
    /// * GameError::NoCityAtLocation
    /// * GameError::CityNotControlledByCurrentPlayer
    /// * GameError::UnitTypeNotProducible
    /// * GameError::InsufficientProductionReserve
    /// * GameError::PopulationTooLow
    /// * GameError::TileOccupied
    pub fn create_unit(&mut self, loc: Location, type_: UnitType) -> CivResult<Unit> {
        self.ensure_in_play()?;

        let player = self.current_player();
        let city = self
            .map
            .city_by_loc(loc)
            .ok_or(GameError::NoCityAtLocation { loc })?;
        if city.owner != player {
            return Err(GameError::CityNotControlledByCurrentPlayer {
                id: city.id,
                player,
            });
        }
        city.production_status(type_, &self.rules)?;

        if let Some(occupant) = self.map.tile(loc).and_then(Tile::unit) {
            return Err(GameError::TileOccupied { loc, occupant });
        }

        let city_id = city.id;
        let id = self.map.next_unit_id();
        let unit = self
            .map
            .city_by_id_mut(city_id)
            .ok_or(GameError::NoCityAtLocation { loc })?
            .produce_unit(type_, id, &self.rules);
        let sight = unit.sight_distance();
        self.map.set_unit(unit.clone())?;
        self.players[player].add_unit(id);

        info!(city = %city_id, unit = %id, %type_, "Unit produced");
        self.event(GameEvent::UnitCreated {
            unit: id,
            owner: player,
            type_,
            loc,
            city: Some(city_id),
        });
        self.reveal(player, loc, sight);

        Ok(unit)
    }

    /// Have the current player's settler at `loc` found a city there
    ///
    /// The settler is used up. The new city claims the unowned tiles around it.
    ///
    /// ## Errors
    /// * GameError::NoUnitAtLocation
    /// * GameError::UnitNotControlledByCurrentPlayer
    /// * GameError::NoFoundingCharge
    /// * GameError::TileAlreadyOwned
    pub fn found_city(&mut self, loc: Location) -> CivResult<CityFoundingOutcome> {
        self.ensure_in_play()?;

        let player = self.current_player();
        let settler = self
            .map
            .unit_by_loc(loc)
            .ok_or(GameError::NoUnitAtLocation { loc })?;
        let settler_id = settler.id;
        if settler.owner != player {
            return Err(GameError::UnitNotControlledByCurrentPlayer {
                id: settler_id,
                player,
            });
        }
        if settler.charges() == 0 {
            return Err(GameError::NoFoundingCharge { id: settler_id });
        }
        if let Some(city) = self.map.tile(loc).and_then(Tile::owner_city) {
            return Err(GameError::TileAlreadyOwned { loc, city });
        }

        let name = self.next_city_name();
        let city_id = self.map.next_city_id();
        let city = self
            .map
            .unit_by_id_mut(settler_id)
            .and_then(|settler| settler.found_city(city_id, name, &self.rules))
            .ok_or(GameError::NoFoundingCharge { id: settler_id })?;

        self.map.new_city(city)?;
        let settler = self
            .map
            .pop_unit_by_id(settler_id)
            .ok_or(GameError::NoSuchUnit { id: settler_id })?;
        self.players[player].remove_unit(settler_id);
        self.players[player].add_city(city_id);

        let city = self
            .map
            .city_by_id(city_id)
            .cloned()
            .ok_or(GameError::NoCityAtLocation { loc })?;

        info!(city = %city_id, name = city.name(), player, %loc, "City founded");
        self.event(GameEvent::CityFounded {
            city: city_id,
            owner: player,
            loc,
            name: city.name().to_string(),
        });
        self.reveal(player, loc, city.sight_distance());

        Ok(CityFoundingOutcome { city, settler })
    }
}
