//! Jump Point Search successors.
//!
//! Instead of one step, each direction is scanned in a straight line for as
//! long as the travel cost to the goal keeps from increasing. The scan's end
//! is the successor; when the scan cannot move at all the single step is
//! used, which is also how the goal itself gets reached.

use toroid_core::{Coord, Topology};
use toroid_grid::GridRegistry;

use crate::Pathfinder;
use crate::error::PathError;

impl Pathfinder {
    pub(crate) fn jps_next(
        &self,
        registry: &GridRegistry,
        topology: &Topology,
        current: Coord,
        dir: Coord,
        goal: Coord,
    ) -> Result<Option<Coord>, PathError> {
        let point = self.jump(registry, topology, current, dir, goal)?;
        if point == current {
            Ok(topology.step(current, dir))
        } else {
            Ok(Some(point))
        }
    }

    /// Scan from `current` along `dir`, at most one lap short of the axis
    /// extent.
    ///
    /// Returns the cell just before `goal` if the scan reaches it, otherwise
    /// the last cell before the cost to `goal` increased or a blocked cell
    /// was met.
    pub(crate) fn jump(
        &self,
        registry: &GridRegistry,
        topology: &Topology,
        current: Coord,
        dir: Coord,
        goal: Coord,
    ) -> Result<Coord, PathError> {
        let axis = dir.axis().ok_or(PathError::DiagonalDirection(dir))?;
        let count = topology.extent.component(axis);

        let mut step = current;
        let mut prev_cost = self.travel_cost.eval(topology, step, goal);
        for _ in 1..count {
            let Some(next) = topology.step(step, dir) else {
                break;
            };
            if next == goal {
                break;
            }
            let cost = self.travel_cost.eval(topology, next, goal);
            if cost > prev_cost || (self.is_blocked)(registry, next) {
                break;
            }
            prev_cost = cost;
            step = next;
        }
        Ok(step)
    }
}
