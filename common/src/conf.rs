//! Configuration
//!
//! Compile-time defaults. Anything a game needs to vary at runtime lives in `game::rules::Rules` or comes in
//! through the command line.

/// The name of this application
pub const APP_NAME: &str = "minciv";

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The subtitle. You know, for flavor.
pub const APP_SUBTITLE: &str = "A Very Small Civilization";

/// The side length of a generated board
pub const BOARD_SIZE: &str = "20";

/// One human versus one computer
pub const PLAYERS: &str = "hc";

/// How many rounds an all-computer game may run before the runner gives up on a winner
pub const MAX_ROUNDS: &str = "200";

/// Fraction of the board side, measured from each corner, that counts as a corner region during generation
pub const CORNER_REGION_FRACTION: u16 = 4;

/// Fraction of the board side that makes up the half-width of the hilly diagonal band
pub const DIAGONAL_BAND_FRACTION: u16 = 8;

pub const CORNER_SWAMP_PROB: f64 = 0.35;
pub const CORNER_WATER_PROB: f64 = 0.2;

pub const BAND_HILL_PROB: f64 = 0.3;
pub const BAND_MOUNTAIN_PROB: f64 = 0.1;

pub const PLAIN_HILL_PROB: f64 = 0.1;
pub const PLAIN_SWAMP_PROB: f64 = 0.05;

pub const FIELD_WHEAT_PROB: f64 = 0.08;
pub const FIELD_HORSE_PROB: f64 = 0.04;
pub const HILL_IRON_PROB: f64 = 0.1;

/// Distance from the board corner at which players' starting units are placed
pub const START_INSET: u16 = 2;

/// How many non-settler units the computer player keeps home as defenders
pub const AI_DEFENDERS: usize = 2;

/// Names handed out to cities in founding order. Once they run out they come around again with a numeral.
pub const CITY_NAMES: [&str; 16] = [
    "Ur", "Uruk", "Kish", "Lagash", "Nippur", "Eridu", "Larsa", "Umma", "Akkad", "Mari", "Ebla", "Sippar",
    "Isin", "Adab", "Shuruppak", "Girsu",
];
