use toroid_core::{Coord, Topology};

use crate::Pathfinder;

impl Pathfinder {
    /// A* successor: the single step from `current` along `dir`.
    #[inline]
    pub(crate) fn astar_next(&self, topology: &Topology, current: Coord, dir: Coord) -> Option<Coord> {
        topology.step(current, dir)
    }
}
