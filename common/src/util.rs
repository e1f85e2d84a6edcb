//! Utility functions and structs

use std::{fmt, ops::Add};

use serde::{Deserialize, Serialize};

/// Dimensions in a two-dimensional space
///
/// This can be thought of as a rectangle with a particular width and height, but not located at any
/// particular point in space. Boards are square, but nothing here assumes it.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Dims {
    pub width: u16,
    pub height: u16,
}

impl Dims {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn square(size: u16) -> Self {
        Self::new(size, size)
    }

    /// Is the location `loc` contained within these dimensions?
    ///
    /// More specifically, if these dimensions are taken to define a rectangle with one corner at the origin (0,0),
    /// then is the cartesian point represented by location `loc` contained by that rectangle?
    pub fn contain(self, loc: Location) -> bool {
        loc.x < self.width && loc.y < self.height
    }

    /// The area of a rectangle with these dimensions
    pub fn area(self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }

    /// Iterate through all `Location`s implied by placing the rectangle of these dimensions at the origin
    ///
    /// Row-major: all of row 0 first, then row 1, and so on.
    pub fn iter_locs(self) -> impl Iterator<Item = Location> {
        let width: u16 = self.width;
        let height: u16 = self.height;
        (0..height).flat_map(move |y| (0..width).map(move |x| Location { x, y }))
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Things that have dimensions
pub trait Dimensioned {
    fn dims(&self) -> Dims;
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Vec2d<T> {
    pub x: T,
    pub y: T,
}

impl<T> Vec2d<T> {
    pub const fn new(x: T, y: T) -> Self {
        Vec2d { x, y }
    }
}

impl<N: Add<Output = N>> Add for Vec2d<N> {
    type Output = Vec2d<N>;
    fn add(self, rhs: Vec2d<N>) -> Vec2d<N> {
        Vec2d {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Vec2d<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// The eight relative offsets of a tile's neighbors
pub const RELATIVE_NEIGHBORS: [Vec2d<i32>; 8] = [
    Vec2d::new(-1, -1),
    Vec2d::new(0, -1),
    Vec2d::new(1, -1),
    Vec2d::new(-1, 0),
    Vec2d::new(1, 0),
    Vec2d::new(-1, 1),
    Vec2d::new(0, 1),
    Vec2d::new(1, 1),
];

/// Every offset within `radius` of the origin by Chebyshev distance, the origin included
pub fn chebyshev_ball(radius: u16) -> impl Iterator<Item = Vec2d<i32>> {
    let r = i32::from(radius);
    (-r..=r).flat_map(move |dy| (-r..=r).map(move |dx| Vec2d::new(dx, dy)))
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Location {
    // Field order matters to the derived Ord: locations sort row-major
    pub y: u16,
    pub x: u16,
}

impl Location {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Distance to `other` when diagonal steps count as one
    pub fn chebyshev_distance(self, other: Location) -> u16 {
        let dx = (i32::from(self.x) - i32::from(other.x)).unsigned_abs();
        let dy = (i32::from(self.y) - i32::from(other.y)).unsigned_abs();
        dx.max(dy) as u16
    }

    /// Offset this location, yielding `None` if the result falls outside `dims`
    pub fn checked_add(self, delta: Vec2d<i32>, dims: Dims) -> Option<Location> {
        let x = i32::from(self.x) + delta.x;
        let y = i32::from(self.y) + delta.y;
        if x < 0 || y < 0 || x >= i32::from(dims.width) || y >= i32::from(dims.height) {
            None
        } else {
            Some(Location::new(x as u16, y as u16))
        }
    }

    /// The relative offset that takes us from `self` to `other`
    pub fn delta_to(self, other: Location) -> Vec2d<i32> {
        Vec2d::new(
            i32::from(other.x) - i32::from(self.x),
            i32::from(other.y) - i32::from(self.y),
        )
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[cfg(test)]
mod test {
    use super::{chebyshev_ball, Dims, Location, Vec2d};

    #[test]
    fn test_checked_add() {
        let dims = Dims::square(5);
        let loc = Location::new(0, 4);
        assert_eq!(loc.checked_add(Vec2d::new(-1, 0), dims), None);
        assert_eq!(loc.checked_add(Vec2d::new(0, 1), dims), None);
        assert_eq!(
            loc.checked_add(Vec2d::new(1, -1), dims),
            Some(Location::new(1, 3))
        );
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = Location::new(2, 2);
        assert_eq!(a.chebyshev_distance(Location::new(3, 3)), 1);
        assert_eq!(a.chebyshev_distance(Location::new(2, 2)), 0);
        assert_eq!(a.chebyshev_distance(Location::new(0, 5)), 3);
    }

    #[test]
    fn test_ball_and_ordering() {
        assert_eq!(chebyshev_ball(0).count(), 1);
        assert_eq!(chebyshev_ball(2).count(), 25);

        let locs: Vec<Location> = Dims::new(2, 2).iter_locs().collect();
        let mut sorted = locs.clone();
        sorted.sort();
        assert_eq!(locs, sorted);
        assert_eq!(locs[1], Location::new(1, 0));
    }
}
