use std::fmt;

use toroid_core::{Axes, Coord, Topology};
use toroid_grid::GridRegistry;

use crate::cell::SearchCell;
use crate::config::{PathfinderConfig, Strategy};
use crate::distance::toroidal_manhattan;
use crate::error::PathError;
use crate::frontier::Frontier;

/// Cost of moving (or estimated cost of getting) from the first coordinate
/// to the second.
pub type CostFn = Box<dyn Fn(Coord, Coord) -> f32>;

/// Whether a coordinate may not be entered. Receives the registry so it can
/// read whichever attribute encodes occupancy.
pub type BlockFn = Box<dyn Fn(&GridRegistry, Coord) -> bool>;

/// A cost or heuristic policy.
pub(crate) enum Distance {
    /// Manhattan distance over these axes, the short way round on the
    /// search's wrapping axes.
    Manhattan(Axes),
    Custom(CostFn),
}

impl Distance {
    #[inline]
    pub(crate) fn eval(&self, topology: &Topology, a: Coord, b: Coord) -> f32 {
        match self {
            Distance::Manhattan(axes) => toroidal_manhattan(topology, a, b, *axes),
            Distance::Custom(f) => f(a, b),
        }
    }
}

/// Shortest-path search over the [`SearchCell`] attribute of a
/// [`GridRegistry`].
///
/// The pathfinder holds the policies and a reusable frontier; the per-cell
/// search state lives in the registry and is reset at the start of every
/// search.
pub struct Pathfinder {
    pub(crate) strategy: Strategy,
    pub(crate) wrap: Axes,
    pub(crate) travel_cost: Distance,
    pub(crate) heuristic: Distance,
    pub(crate) is_blocked: BlockFn,
    frontier: Frontier,
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Pathfinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pathfinder")
            .field("strategy", &self.strategy)
            .field("wrap", &self.wrap)
            .finish_non_exhaustive()
    }
}

impl Pathfinder {
    /// Jump point search, wrapping on every axis, x/y Manhattan cost and
    /// heuristic taking the short way round, nothing blocked.
    pub fn new() -> Self {
        Self::with_config(PathfinderConfig::default())
    }

    /// Until replaced, cost and heuristic are the Manhattan distance over
    /// `config.metric`, measured on the lattice each search runs over.
    pub fn with_config(config: PathfinderConfig) -> Self {
        Self {
            strategy: config.strategy,
            wrap: config.wrap,
            travel_cost: Distance::Manhattan(config.metric),
            heuristic: Distance::Manhattan(config.metric),
            is_blocked: Box::new(|_, _| false),
            frontier: Frontier::new(),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Axes on which movement wraps.
    pub fn wrap(&self) -> Axes {
        self.wrap
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_wrap(mut self, wrap: Axes) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_travel_cost(mut self, f: impl Fn(Coord, Coord) -> f32 + 'static) -> Self {
        self.set_travel_cost(f);
        self
    }

    pub fn with_heuristic(mut self, f: impl Fn(Coord, Coord) -> f32 + 'static) -> Self {
        self.set_heuristic(f);
        self
    }

    pub fn with_block_fn(mut self, f: impl Fn(&GridRegistry, Coord) -> bool + 'static) -> Self {
        self.set_block_fn(f);
        self
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    pub fn set_wrap(&mut self, wrap: Axes) {
        self.wrap = wrap;
    }

    pub fn set_travel_cost(&mut self, f: impl Fn(Coord, Coord) -> f32 + 'static) {
        self.travel_cost = Distance::Custom(Box::new(f));
    }

    pub fn set_heuristic(&mut self, f: impl Fn(Coord, Coord) -> f32 + 'static) {
        self.heuristic = Distance::Custom(Box::new(f));
    }

    pub fn set_block_fn(&mut self, f: impl Fn(&GridRegistry, Coord) -> bool + 'static) {
        self.is_blocked = Box::new(f);
    }

    /// Find a path from `start` to `goal`.
    ///
    /// The path excludes `start` and ends with `goal`, one coordinate per
    /// move. `search(c, c)` is `[c]`. An endpoint outside the lattice or an
    /// exhausted frontier gives `Ok(None)`.
    ///
    /// Errors if the [`SearchCell`] attribute is not registered, or if jump
    /// point search meets a direction that is not along a single axis.
    pub fn search(
        &mut self,
        registry: &mut GridRegistry,
        start: Coord,
        goal: Coord,
    ) -> Result<Option<Vec<Coord>>, PathError> {
        if !registry.in_bounds(start) || !registry.in_bounds(goal) {
            log::debug!("search {start} -> {goal}: endpoint out of bounds");
            return Ok(None);
        }
        if start == goal {
            return Ok(Some(vec![goal]));
        }

        let topology = Topology::new(registry.count(), self.wrap);
        self.initialise(registry, &topology, start)?;

        let mut expanded = 0usize;
        let found = 'search: loop {
            let Some((current, _)) = self.frontier.pop() else {
                break 'search false;
            };
            if current == goal {
                break 'search true;
            }
            expanded += 1;

            let mut cell = registry.get::<SearchCell>(current)?;
            cell.visited = true;
            registry.set(current, cell.clone())?;
            log::trace!("expanding {current} g={} f={}", cell.g, cell.f);

            for &dir in cell.directions.iter() {
                let next = match self.strategy {
                    Strategy::AStar => self.astar_next(&topology, current, dir),
                    Strategy::JumpPointSearch => {
                        self.jps_next(registry, &topology, current, dir, goal)?
                    }
                };
                let Some(next) = next else {
                    continue;
                };

                let mut neighbour = registry.get::<SearchCell>(next)?;
                if neighbour.visited || (self.is_blocked)(registry, next) {
                    continue;
                }
                let g = cell.g + self.travel_cost.eval(&topology, current, next);
                if g < neighbour.g {
                    neighbour.g = g;
                    neighbour.f = g + self.heuristic.eval(&topology, next, goal);
                    neighbour.came_from = Some(current);
                    neighbour.came_from_dir = Some(dir);
                    self.frontier.push(next, neighbour.f);
                    registry.set(next, neighbour)?;
                }
            }
        };
        self.frontier.clear();

        if !found {
            log::debug!(
                "{:?} search {start} -> {goal}: no path after {expanded} expansions",
                self.strategy
            );
            return Ok(None);
        }

        let path = reconstruct(registry, &topology, start, goal)?;
        if let Some(path) = &path {
            log::debug!(
                "{:?} search {start} -> {goal}: {} steps, {expanded} expansions",
                self.strategy,
                path.len()
            );
        }
        Ok(path)
    }

    fn initialise(
        &mut self,
        registry: &mut GridRegistry,
        topology: &Topology,
        start: Coord,
    ) -> Result<(), PathError> {
        registry.update::<SearchCell>(|_, cell| cell.reset())?;

        let mut origin = registry.get::<SearchCell>(start)?;
        origin.g = 0.0;
        origin.f = self.heuristic.eval(topology, start, start);
        self.frontier.clear();
        self.frontier.push(start, origin.f);
        registry.set(start, origin)?;
        Ok(())
    }
}

/// Walk the back-pointers from `goal` to `start`, filling in the cells a
/// jump passed over.
fn reconstruct(
    registry: &GridRegistry,
    topology: &Topology,
    start: Coord,
    goal: Coord,
) -> Result<Option<Vec<Coord>>, PathError> {
    // No simple path visits a cell twice.
    let limit = registry.bounds().len();
    let mut path = Vec::new();
    let mut node = goal;
    while node != start {
        let cell = registry.get::<SearchCell>(node)?;
        let (Some(parent), Some(dir)) = (cell.came_from, cell.came_from_dir) else {
            log::warn!("search cell {node} has no back-pointer");
            return Ok(None);
        };
        let mut c = node;
        while c != parent {
            if path.len() >= limit {
                log::warn!("back-pointers from {goal} do not lead to {start}");
                return Ok(None);
            }
            path.push(c);
            match topology.step(c, -dir) {
                Some(prev) => c = prev,
                None => {
                    log::warn!("back-pointer segment {parent} -> {node} leaves the lattice");
                    return Ok(None);
                }
            }
        }
        node = parent;
    }
    path.reverse();
    Ok(Some(path))
}
