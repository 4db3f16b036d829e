//! A snake world on top of the toroid crates.
//!
//! [`World`] owns a [`GridRegistry`](toroid_grid::GridRegistry) with the
//! occupancy, tint and search-cell attributes and converts between world
//! space and lattice indices. [`Snake`] drives itself through it with a
//! [`Pathfinder`](toroid_paths::Pathfinder), and [`SimConfig`] describes a
//! headless run of the `toroid-sim` binary.

pub mod config;
pub mod occupant;
pub mod snake;
pub mod tint;
pub mod world;

pub use config::{ConfigError, SimConfig};
pub use occupant::Occupant;
pub use snake::{Snake, SnakeStats, TickOutcome};
pub use tint::Tint;
pub use world::{World, WorldPos};
