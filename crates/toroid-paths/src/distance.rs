use toroid_core::{Axes, Coord, Topology};

/// Manhattan (L1) distance between two coordinates, summed over `axes`.
#[inline]
pub fn manhattan(a: Coord, b: Coord, axes: Axes) -> f32 {
    axes.iter()
        .map(|axis| (a.component(axis) - b.component(axis)).abs())
        .sum::<i32>() as f32
}

/// Manhattan distance that takes the short way round on the wrapping axes
/// of `topology`.
#[inline]
pub fn toroidal_manhattan(topology: &Topology, a: Coord, b: Coord, axes: Axes) -> f32 {
    axes.iter()
        .map(|axis| topology.axis_delta(a, b, axis))
        .sum::<i32>() as f32
}
