//!
//! Map generation
//!

use rand::Rng;

use crate::{
    conf,
    util::{Dims, Location},
};

use super::{LocationGrid, MapData, Resource, Terrain, Tile};

/// Which part of the board a location falls in, for the purposes of terrain generation
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Region {
    Border,
    Corner,
    DiagonalBand,
    Plain,
}

fn region(loc: Location, size: u16) -> Region {
    let last = size.saturating_sub(1);
    if loc.x == 0 || loc.y == 0 || loc.x == last || loc.y == last {
        return Region::Border;
    }

    let corner_reach = (size / conf::CORNER_REGION_FRACTION).max(1);
    let nearest_corner = [
        Location::new(0, 0),
        Location::new(last, 0),
        Location::new(0, last),
        Location::new(last, last),
    ]
    .into_iter()
    .map(|corner| loc.chebyshev_distance(corner))
    .min()
    .unwrap_or(u16::MAX);
    if nearest_corner < corner_reach {
        return Region::Corner;
    }

    let band_half_width = (size / conf::DIAGONAL_BAND_FRACTION).max(1);
    if loc.x.abs_diff(loc.y) < band_half_width {
        return Region::DiagonalBand;
    }

    Region::Plain
}

/// Pick among the outcomes by cumulative probability, falling back to `default`
fn roll<R: Rng, T: Copy>(rng: &mut R, outcomes: &[(f64, T)], default: T) -> T {
    let x: f64 = rng.gen();
    let mut threshold = 0.0;
    for (prob, outcome) in outcomes {
        threshold += prob;
        if x < threshold {
            return *outcome;
        }
    }
    default
}

fn generate_terrain<R: Rng>(rng: &mut R, loc: Location, size: u16) -> Terrain {
    match region(loc, size) {
        Region::Border => Terrain::Water,
        Region::Corner => roll(
            rng,
            &[
                (conf::CORNER_SWAMP_PROB, Terrain::Swamp),
                (conf::CORNER_WATER_PROB, Terrain::Water),
            ],
            Terrain::Field,
        ),
        Region::DiagonalBand => roll(
            rng,
            &[
                (conf::BAND_HILL_PROB, Terrain::Hill),
                (conf::BAND_MOUNTAIN_PROB, Terrain::Mountain),
            ],
            Terrain::Field,
        ),
        Region::Plain => roll(
            rng,
            &[
                (conf::PLAIN_HILL_PROB, Terrain::Hill),
                (conf::PLAIN_SWAMP_PROB, Terrain::Swamp),
            ],
            Terrain::Field,
        ),
    }
}

fn generate_resource<R: Rng>(rng: &mut R, terrain: Terrain) -> Option<Resource> {
    match terrain {
        Terrain::Field => roll(
            rng,
            &[
                (conf::FIELD_WHEAT_PROB, Some(Resource::Wheat)),
                (conf::FIELD_HORSE_PROB, Some(Resource::Horse)),
            ],
            None,
        ),
        Terrain::Hill => roll(rng, &[(conf::HILL_IRON_PROB, Some(Resource::Iron))], None),
        Terrain::Swamp | Terrain::Water | Terrain::Mountain => None,
    }
}

/// Generate a `size`x`size` board
///
/// The outer ring is water. Swamps and lakes gather near the corners, hills and mountains along the main diagonal,
/// and open fields everywhere else. Wheat and horses turn up on fields, iron in the hills.
pub fn generate_map<R: Rng>(rng: &mut R, size: u16) -> MapData {
    let tiles = LocationGrid::new(Dims::square(size), |loc| {
        let terrain = generate_terrain(rng, loc, size);
        let resource = generate_resource(rng, terrain);
        Tile::with_resource(terrain, resource, loc)
    });
    MapData::new_from_grid(tiles)
}
