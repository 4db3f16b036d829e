//! Shortest paths across a toroid [`GridRegistry`](toroid_grid::GridRegistry).
//!
//! - **A\*** expands one neighbour per direction ([`Strategy::AStar`])
//! - **Jump Point Search** scans straight lines and expands where a scan
//!   stops ([`Strategy::JumpPointSearch`], the default)
//!
//! Both run through [`Pathfinder::search`], which keeps its per-cell state in
//! the registry's [`SearchCell`] attribute. Register that attribute with
//! [`install_search_cells`] before searching:
//!
//! ```
//! use toroid_core::Coord;
//! use toroid_grid::GridRegistry;
//! use toroid_paths::{Pathfinder, install_search_cells};
//!
//! let mut reg = GridRegistry::new(Coord::new(8, 8, 1));
//! install_search_cells(&mut reg, &Coord::AXIS_DIRECTIONS).unwrap();
//! let path = Pathfinder::new()
//!     .search(&mut reg, Coord::new(1, 1, 0), Coord::new(3, 1, 0))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(path, vec![Coord::new(2, 1, 0), Coord::new(3, 1, 0)]);
//! ```
//!
//! Travel cost, heuristic and the blocking predicate are injected as
//! closures. The defaults are Manhattan distance on the x/y plane, taken
//! the short way round on wrapping axes, and "nothing is blocked".

mod astar;
mod cell;
mod config;
mod distance;
mod error;
mod frontier;
mod jps;
mod pathfinder;

pub use cell::{SearchCell, install_search_cells, seed_search_cells};
pub use config::{PathfinderConfig, Strategy};
pub use distance::{manhattan, toroidal_manhattan};
pub use error::PathError;
pub use frontier::Frontier;
pub use pathfinder::{BlockFn, CostFn, Pathfinder};
