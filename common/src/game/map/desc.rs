//! Plain-text map descriptions
//!
//! The first line gives the board's side length N. Each of the following N² lines describes one tile as a
//! terrain name optionally followed by a resource key (`w`, `h`, or `i`), in row-major order. Blank lines are
//! skipped.
//!
//! ```text
//! 2
//! field w
//! hill i
//! water
//! swamp
//! ```

use std::fmt::Write;

use thiserror::Error;

use crate::util::{Dimensioned, Dims, Location};

use super::{LocationGrid, MapData, Resource, Terrain, Terrainous, Tile};

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MapParseError {
    #[error("The map description is empty")]
    Empty,

    #[error("Line {line}: '{token}' is not a valid board size")]
    BadSize { line: usize, token: String },

    #[error("Line {line}: unrecognized terrain '{token}'")]
    BadTerrain { line: usize, token: String },

    #[error("Line {line}: unrecognized resource '{token}'")]
    BadResource { line: usize, token: String },

    #[error("Line {line}: unexpected trailing text '{token}'")]
    TrailingText { line: usize, token: String },

    #[error("Line {line}: the board has {expected} tiles but this is one too many")]
    TooManyTiles { line: usize, expected: usize },

    #[error("Line {line}: expected {expected} tiles but the description ended after {found}")]
    TooFewTiles {
        line: usize,
        expected: usize,
        found: usize,
    },
}

fn parse_tile(line: usize, text: &str, loc: Location) -> Result<Tile, MapParseError> {
    let mut tokens = text.split_whitespace();

    // Blank lines never get this far
    let terrain_token = tokens.next().unwrap_or_default();
    let terrain: Terrain = terrain_token
        .parse()
        .map_err(|_| MapParseError::BadTerrain {
            line,
            token: terrain_token.to_string(),
        })?;

    let resource = match tokens.next() {
        None => None,
        Some(token) => {
            let mut chars = token.chars();
            let resource = match (chars.next(), chars.next()) {
                (Some(c), None) => Resource::try_from_key(c.to_ascii_lowercase()),
                _ => None,
            };
            Some(resource.ok_or_else(|| MapParseError::BadResource {
                line,
                token: token.to_string(),
            })?)
        }
    };

    if let Some(token) = tokens.next() {
        return Err(MapParseError::TrailingText {
            line,
            token: token.to_string(),
        });
    }

    Ok(Tile::with_resource(terrain, resource, loc))
}

impl MapData {
    pub fn from_description(desc: &str) -> Result<Self, MapParseError> {
        let mut lines = desc
            .lines()
            .enumerate()
            .map(|(idx, text)| (idx + 1, text.trim()))
            .filter(|(_, text)| !text.is_empty());

        let (size_line, size_text) = lines.next().ok_or(MapParseError::Empty)?;
        let size: u16 = size_text
            .parse()
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| MapParseError::BadSize {
                line: size_line,
                token: size_text.to_string(),
            })?;

        let dims = Dims::square(size);
        let expected = dims.area() as usize;

        // The header is untrusted; the tile list only grows as lines actually arrive
        let mut tiles = Vec::new();
        let mut last_line = size_line;
        for (line, text) in lines {
            if tiles.len() == expected {
                return Err(MapParseError::TooManyTiles { line, expected });
            }
            let idx = tiles.len();
            let loc = Location::new((idx % usize::from(size)) as u16, (idx / usize::from(size)) as u16);
            tiles.push(parse_tile(line, text, loc)?);
            last_line = line;
        }

        if tiles.len() < expected {
            return Err(MapParseError::TooFewTiles {
                line: last_line + 1,
                expected,
                found: tiles.len(),
            });
        }

        // Row-major order matches the grid's own layout
        let mut tiles = tiles.into_iter();
        let grid = LocationGrid::new(dims, |loc| {
            tiles
                .next()
                .unwrap_or_else(|| Tile::new(Terrain::Water, loc))
        });

        Ok(MapData::new_from_grid(grid))
    }

    /// Describe the terrain and resources of this board in the format `from_description` reads
    ///
    /// Units, cities, and visibility are not part of the description.
    pub fn to_description(&self) -> String {
        let mut desc = String::new();
        let _ = writeln!(desc, "{}", self.dims().width);
        for tile in self.tiles() {
            let _ = match tile.resource {
                Some(resource) => writeln!(desc, "{} {}", tile.terrain().token(), resource.key()),
                None => writeln!(desc, "{}", tile.terrain().token()),
            };
        }
        desc
    }
}

#[cfg(test)]
mod test {
    use crate::{
        game::map::{MapData, Resource, Terrain, Terrainous},
        util::Location,
    };

    use super::MapParseError;

    const DESC: &str = "3
field w
hill i

swamp
water
mountain
field h
FIELD
hill
field
";

    #[test]
    fn test_from_description() {
        let map = MapData::from_description(DESC).unwrap();
        assert_eq!(map.size(), 3);

        let tile = map.tile(Location::new(0, 0)).unwrap();
        assert_eq!(tile.terrain(), Terrain::Field);
        assert_eq!(tile.resource, Some(Resource::Wheat));

        let tile = map.tile(Location::new(1, 0)).unwrap();
        assert_eq!(tile.terrain(), Terrain::Hill);
        assert_eq!(tile.resource, Some(Resource::Iron));

        assert_eq!(
            map.tile(Location::new(2, 0)).unwrap().terrain(),
            Terrain::Swamp
        );
        assert_eq!(
            map.tile(Location::new(1, 1)).unwrap().terrain(),
            Terrain::Mountain
        );
        assert_eq!(
            map.tile(Location::new(2, 1)).unwrap().resource,
            Some(Resource::Horse)
        );
        assert_eq!(
            map.tile(Location::new(0, 2)).unwrap().terrain(),
            Terrain::Field
        );
        assert_eq!(
            map.tile(Location::new(2, 2)).unwrap().terrain(),
            Terrain::Field
        );
    }

    #[test]
    fn test_description_survives_rewriting() {
        let map = MapData::from_description(DESC).unwrap();
        let rewritten = MapData::from_description(&map.to_description()).unwrap();
        assert!(map.tiles().zip(rewritten.tiles()).all(|(a, b)| a == b));
    }

    #[test]
    fn test_errors_name_the_line() {
        assert_eq!(MapData::from_description("").unwrap_err(), MapParseError::Empty);
        assert_eq!(
            MapData::from_description("two\nfield").unwrap_err(),
            MapParseError::BadSize {
                line: 1,
                token: String::from("two")
            }
        );
        assert_eq!(
            MapData::from_description("1\n\nlava").unwrap_err(),
            MapParseError::BadTerrain {
                line: 3,
                token: String::from("lava")
            }
        );
        assert_eq!(
            MapData::from_description("1\nfield x").unwrap_err(),
            MapParseError::BadResource {
                line: 2,
                token: String::from("x")
            }
        );
        assert_eq!(
            MapData::from_description("1\nfield w w").unwrap_err(),
            MapParseError::TrailingText {
                line: 2,
                token: String::from("w")
            }
        );
        assert_eq!(
            MapData::from_description("1\nfield\nfield").unwrap_err(),
            MapParseError::TooManyTiles {
                line: 3,
                expected: 1
            }
        );
        assert_eq!(
            MapData::from_description("2\nfield\nhill").unwrap_err(),
            MapParseError::TooFewTiles {
                line: 4,
                expected: 4,
                found: 2
            }
        );
    }

    #[test]
    fn test_huge_size_with_short_body() {
        assert_eq!(
            MapData::from_description("60000\nfield\n").unwrap_err(),
            MapParseError::TooFewTiles {
                line: 3,
                expected: 3_600_000_000,
                found: 1
            }
        );
        assert_eq!(
            MapData::from_description("65535\n").unwrap_err(),
            MapParseError::TooFewTiles {
                line: 2,
                expected: 4_294_836_225,
                found: 0
            }
        );
    }
}
