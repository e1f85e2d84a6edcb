//! Fog of war
//!
//! Each tile remembers which players have seen it. Observers reveal the tiles around them; nothing ever hides a
//! tile again.

use crate::util::{chebyshev_ball, Dims, Location};

/// Something that can see the tiles around it
pub trait Observer {
    fn sight_distance(&self) -> u16;
}

/// The in-bounds locations within `radius` of `center`
pub fn observed_locs(center: Location, radius: u16, dims: Dims) -> Vec<Location> {
    chebyshev_ball(radius)
        .filter_map(|delta| center.checked_add(delta, dims))
        .collect()
}

#[cfg(test)]
mod test {
    use crate::util::{Dims, Location};

    use super::observed_locs;

    #[test]
    fn test_observed_locs_clipped() {
        let dims = Dims::square(10);
        assert_eq!(observed_locs(Location::new(5, 5), 1, dims).len(), 9);
        assert_eq!(observed_locs(Location::new(0, 0), 1, dims).len(), 4);
        assert_eq!(observed_locs(Location::new(9, 0), 2, dims).len(), 9);
    }
}
