//!
//! minciv: A Very Small Civilization
//!
//! Headless runner. Sets up a game from the command line and lets it play out, logging what happens.
#![forbid(unsafe_code)]

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use clap::{value_parser, Arg, ArgMatches};

use tracing::{info, warn};

use tracing_subscriber::EnvFilter;

use common::{
    cli::{self, players_arg},
    conf,
    game::{map::MapData, rules::Rules, Game, PlayerType, TurnNum},
};

fn matches() -> ArgMatches {
    cli::app(conf::APP_NAME, conf::APP_SUBTITLE)
        .version(conf::APP_VERSION)
        .arg(players_arg())
        .arg(
            Arg::new("size")
                .short('s')
                .long("size")
                .help("Width and height of a generated board")
                .default_value(conf::BOARD_SIZE)
                .value_parser(|s: &str| {
                    let size: Result<u16, _> = s.trim().parse();
                    size.ok()
                        .filter(|size| *size > 0)
                        .ok_or_else(|| format!("Invalid board size '{}'", s))
                }),
        )
        .arg(
            Arg::new("map")
                .short('m')
                .long("map")
                .help("Load the board from a map description file instead of generating one")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for map generation and the computer players. Random if omitted.")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("rounds")
                .short('r')
                .long("rounds")
                .help("Stop after this many rounds")
                .default_value(conf::MAX_ROUNDS)
                .value_parser(value_parser!(TurnNum)),
        )
        .arg(
            Arg::new("rules")
                .long("rules")
                .help("JSON file overriding the default rules")
                .value_parser(value_parser!(PathBuf)),
        )
        .get_matches()
}

fn load_rules(path: Option<&PathBuf>) -> Result<Rules> {
    let Some(path) = path else {
        return Ok(Rules::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Couldn't read rules file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Couldn't parse rules file {}", path.display()))
}

fn load_map(path: &PathBuf) -> Result<MapData> {
    let desc = fs::read_to_string(path)
        .with_context(|| format!("Couldn't read map file {}", path.display()))?;
    MapData::from_description(&desc)
        .with_context(|| format!("Couldn't parse map file {}", path.display()))
}

fn log_outcome(game: &Game) {
    if let Some(winner) = game.winner() {
        let name = game.player(winner).map_or("?", |player| player.name.as_str());
        info!(winner, name, round = game.round(), "Game won");
        return;
    }

    info!(round = game.round(), "No winner; final standings:");
    for player in game.turn_order() {
        if let Some(player) = game.player(*player) {
            info!(
                player = player.num,
                name = player.name.as_str(),
                cities = player.cities().len(),
                units = player.units().len(),
                "Standing"
            );
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = matches();

    let player_types = matches
        .get_one::<Vec<PlayerType>>("players")
        .cloned()
        .context("No players specified")?;
    let size = *matches.get_one::<u16>("size").context("No board size given")?;
    let rounds = *matches.get_one::<TurnNum>("rounds").context("No round limit given")?;
    let seed = matches
        .get_one::<u64>("seed")
        .copied()
        .unwrap_or_else(rand::random::<u64>);

    let mut rules = load_rules(matches.get_one::<PathBuf>("rules"))?;
    rules.max_rounds = Some(rounds);

    info!(seed, "Setting up");
    let mut game = match matches.get_one::<PathBuf>("map") {
        Some(path) => Game::new_with_map(load_map(path)?, &player_types, rules, seed)?,
        None => Game::new(size, &player_types, rules, seed)?,
    };

    game.place_starting_units()?;
    game.start_game();

    // Nobody is at the controls, so human turns pass straight through
    while !game.game_over() && !game.round_limit_reached() {
        game.take_events();
        if !game.is_human_turn() {
            warn!(round = game.round(), "Turn chain stopped on a computer player");
            break;
        }
        game.end_turn()?;
    }
    game.take_events();

    log_outcome(&game);
    Ok(())
}
