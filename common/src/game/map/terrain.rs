use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The movement modifier of terrain nothing can enter
///
/// Entry cost is `1 - modifier`, so this puts the cost far beyond any unit's movement budget.
pub const IMPASSABLE_MOVEMENT_MODIFIER: i32 = -99;

/// Things that can provide terrain
pub trait Terrainous {
    fn terrain(&self) -> Terrain;
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Terrain {
    Field,
    Hill,
    Swamp,
    Water,
    Mountain,
}

impl Terrain {
    pub const fn values() -> [Terrain; 5] {
        [
            Terrain::Field,
            Terrain::Hill,
            Terrain::Swamp,
            Terrain::Water,
            Terrain::Mountain,
        ]
    }

    /// Additive delta to the cost of entering a tile of this terrain
    pub fn movement_modifier(self) -> i32 {
        match self {
            Terrain::Field => 0,
            Terrain::Hill | Terrain::Swamp => -1,
            Terrain::Water | Terrain::Mountain => IMPASSABLE_MOVEMENT_MODIFIER,
        }
    }

    /// Multiplier applied to the attack of a unit fighting from this terrain
    pub fn attack_modifier(self) -> f64 {
        match self {
            Terrain::Field => 1.0,
            Terrain::Hill => 1.4,
            Terrain::Swamp => 0.5,
            Terrain::Water | Terrain::Mountain => 0.0,
        }
    }

    pub fn is_passable(self) -> bool {
        self.movement_modifier() != IMPASSABLE_MOVEMENT_MODIFIER
    }

    /// The token used for this terrain in map descriptions
    pub fn token(self) -> &'static str {
        match self {
            Terrain::Field => "field",
            Terrain::Hill => "hill",
            Terrain::Swamp => "swamp",
            Terrain::Water => "water",
            Terrain::Mountain => "mountain",
        }
    }
}

impl FromStr for Terrain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Terrain::values()
            .into_iter()
            .find(|terrain| terrain.token().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("'{}' is not a terrain type", s))
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                Terrain::Field => "Field",
                Terrain::Hill => "Hill",
                Terrain::Swamp => "Swamp",
                Terrain::Water => "Water",
                Terrain::Mountain => "Mountain",
            }
        )
    }
}

impl Terrainous for Terrain {
    fn terrain(&self) -> Terrain {
        *self
    }
}

/// A strategic resource sitting on a tile
///
/// A city founded with a resource inside its control radius can produce the unit that resource unlocks.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Resource {
    Wheat,
    Horse,
    Iron,
}

impl Resource {
    pub const fn values() -> [Resource; 3] {
        [Resource::Wheat, Resource::Horse, Resource::Iron]
    }

    pub fn key(self) -> char {
        match self {
            Resource::Wheat => 'w',
            Resource::Horse => 'h',
            Resource::Iron => 'i',
        }
    }

    pub fn try_from_key(c: char) -> Option<Resource> {
        Resource::values().into_iter().find(|r| r.key() == c)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                Resource::Wheat => "Wheat",
                Resource::Horse => "Horse",
                Resource::Iron => "Iron",
            }
        )
    }
}

#[cfg(test)]
mod test {
    use super::{Resource, Terrain};

    #[test]
    fn test_modifiers() {
        assert_eq!(Terrain::Field.movement_modifier(), 0);
        assert_eq!(Terrain::Hill.movement_modifier(), -1);
        assert_eq!(Terrain::Swamp.attack_modifier(), 0.5);
        assert!(!Terrain::Water.is_passable());
        assert!(!Terrain::Mountain.is_passable());
        assert!(Terrain::Swamp.is_passable());
        assert_eq!(Terrain::Mountain.attack_modifier(), 0.0);
    }

    #[test]
    fn test_tokens() {
        for terrain in Terrain::values() {
            assert_eq!(terrain.token().parse::<Terrain>(), Ok(terrain));
        }
        assert_eq!("HILL".parse::<Terrain>(), Ok(Terrain::Hill));
        assert!("lava".parse::<Terrain>().is_err());

        assert_eq!(Resource::try_from_key('i'), Some(Resource::Iron));
        assert_eq!(Resource::try_from_key('x'), None);
    }
}
