use std::ops::{Index, IndexMut};

use crate::util::{Dimensioned, Dims, Location};

/// A dense grid with one `T` per location
///
/// Lookups by `Location` through `get`/`get_mut` are total: out-of-bounds locations yield `None`.
#[derive(Clone, Debug)]
pub struct LocationGrid<T> {
    grid: Vec<T>, // row-major: grid[y * width + x]
    dims: Dims,
}

impl<T> LocationGrid<T> {
    pub fn new<I>(dims: Dims, mut initializer: I) -> Self
    where
        I: FnMut(Location) -> T,
    {
        let grid = dims.iter_locs().map(&mut initializer).collect();
        LocationGrid { grid, dims }
    }

    fn idx(&self, loc: Location) -> Option<usize> {
        if self.dims.contain(loc) {
            Some(usize::from(loc.y) * usize::from(self.dims.width) + usize::from(loc.x))
        } else {
            None
        }
    }

    pub fn get(&self, loc: Location) -> Option<&T> {
        self.idx(loc).map(|idx| &self.grid[idx])
    }

    pub fn get_mut(&mut self, loc: Location) -> Option<&mut T> {
        self.idx(loc).map(move |idx| &mut self.grid[idx])
    }

    /// Iterate in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.grid.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.grid.iter_mut()
    }
}

impl<T> Dimensioned for LocationGrid<T> {
    fn dims(&self) -> Dims {
        self.dims
    }
}

impl<T> Index<Location> for LocationGrid<T> {
    type Output = T;
    fn index(&self, loc: Location) -> &T {
        let idx = self
            .idx(loc)
            .unwrap_or_else(|| panic!("Location {} out of bounds {}", loc, self.dims));
        &self.grid[idx]
    }
}

impl<T> IndexMut<Location> for LocationGrid<T> {
    fn index_mut(&mut self, loc: Location) -> &mut T {
        let idx = self
            .idx(loc)
            .unwrap_or_else(|| panic!("Location {} out of bounds {}", loc, self.dims));
        &mut self.grid[idx]
    }
}

#[cfg(test)]
mod test {
    use crate::util::{Dims, Location};

    use super::LocationGrid;

    #[test]
    fn test_grid() {
        let grid = LocationGrid::new(Dims::new(3, 2), |loc| loc.x * 10 + loc.y);
        assert_eq!(grid.get(Location::new(2, 1)), Some(&21));
        assert_eq!(grid[Location::new(1, 0)], 10);
        assert_eq!(grid.get(Location::new(3, 0)), None);
        assert_eq!(grid.get(Location::new(0, 2)), None);
        assert_eq!(grid.iter().count(), 6);
    }
}
