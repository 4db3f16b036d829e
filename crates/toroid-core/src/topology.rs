//! Axis selection and wrap-around topology.
//!
//! The lattice itself is always a plain bounded array. A [`Topology`] is how
//! callers *move* across it: every axis marked as wrapping behaves like a
//! ring, so a lattice wrapping on all three axes is a 3-torus.

use std::fmt;

use crate::geom::{Coord, wrap_axis};

/// One of the three lattice axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes in x, y, z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// A set of axes, used both for "which axes wrap" and "which axes a metric
/// sums over".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axes {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl Axes {
    pub const NONE: Self = Self::new(false, false, false);
    pub const X: Self = Self::new(true, false, false);
    pub const Y: Self = Self::new(false, true, false);
    pub const Z: Self = Self::new(false, false, true);
    /// The x/y plane.
    pub const XY: Self = Self::new(true, true, false);
    pub const ALL: Self = Self::new(true, true, true);

    #[inline]
    pub const fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }

    /// Whether `axis` is part of the set.
    #[inline]
    pub const fn contains(self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Iterate over the member axes in x, y, z order.
    pub fn iter(self) -> impl Iterator<Item = Axis> {
        Axis::ALL.into_iter().filter(move |&a| self.contains(a))
    }
}

// ---------------------------------------------------------------------------
// Topology
// ---------------------------------------------------------------------------

/// Movement rules over a lattice of a given extent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topology {
    pub extent: Coord,
    pub wrap: Axes,
}

impl Topology {
    #[inline]
    pub const fn new(extent: Coord, wrap: Axes) -> Self {
        Self { extent, wrap }
    }

    /// Every axis wraps (a 3-torus).
    #[inline]
    pub const fn toroidal(extent: Coord) -> Self {
        Self::new(extent, Axes::ALL)
    }

    /// No axis wraps.
    #[inline]
    pub const fn bounded(extent: Coord) -> Self {
        Self::new(extent, Axes::NONE)
    }

    /// Whether `c` is a cell of the lattice.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.in_extent(self.extent)
    }

    /// Wrap the components of `c` that lie on wrapping axes; the others are
    /// returned untouched and may still be out of range.
    #[inline]
    pub fn wrap(&self, c: Coord) -> Coord {
        let on = |axis: Axis, v: i32, extent: i32| {
            if self.wrap.contains(axis) { wrap_axis(v, extent) } else { v }
        };
        Coord::new(
            on(Axis::X, c.x, self.extent.x),
            on(Axis::Y, c.y, self.extent.y),
            on(Axis::Z, c.z, self.extent.z),
        )
    }

    /// The cell reached by moving from `c` by `dir`, or `None` if the move
    /// leaves the lattice across a non-wrapping axis.
    #[inline]
    pub fn step(&self, c: Coord, dir: Coord) -> Option<Coord> {
        let n = self.wrap(c + dir);
        self.contains(n).then_some(n)
    }

    /// Distance between `a` and `b` along `axis`, taking the short way round
    /// when the axis wraps.
    #[inline]
    pub fn axis_delta(&self, a: Coord, b: Coord, axis: Axis) -> i32 {
        let extent = self.extent.component(axis);
        let d = (a.component(axis) - b.component(axis)).abs();
        if self.wrap.contains(axis) && extent > 0 {
            let d = d % extent;
            d.min(extent - d)
        } else {
            d
        }
    }
}
