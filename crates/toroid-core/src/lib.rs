//! **toroid-core**: lattice geometry shared by the *toroid* crates.
//!
//! This crate provides the coordinate type every other toroid crate speaks,
//! the inclusive box used for region operations, and the wrap-around
//! topology the pathfinder moves through.

pub mod geom;
pub mod topology;

pub use geom::{Bounds, BoundsIter, Coord};
pub use topology::{Axes, Axis, Topology};
