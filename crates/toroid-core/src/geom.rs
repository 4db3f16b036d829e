//! Geometry primitives: [`Coord`] and [`Bounds`].
//!
//! A `Coord` names one cell of the lattice. A `Bounds` is an *inclusive*
//! axis-aligned box of cells, which is the shape every region operation in
//! the toroid crates accepts.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::topology::Axis;

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A 3D integer lattice coordinate.
///
/// The same type doubles as a lattice extent ("count") and as a movement
/// direction, exactly as the three uses share one triple of integers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coord {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self::new(0, 0, 0);
    /// (1, 1, 1).
    pub const ONE: Self = Self::new(1, 1, 1);

    pub const RIGHT: Self = Self::new(1, 0, 0);
    pub const LEFT: Self = Self::new(-1, 0, 0);
    pub const UP: Self = Self::new(0, 1, 0);
    pub const DOWN: Self = Self::new(0, -1, 0);
    pub const FORWARD: Self = Self::new(0, 0, 1);
    pub const BACK: Self = Self::new(0, 0, -1);

    /// The six axis-aligned unit directions: up, down, left, right, forward,
    /// back.
    pub const AXIS_DIRECTIONS: [Coord; 6] = [
        Self::UP,
        Self::DOWN,
        Self::LEFT,
        Self::RIGHT,
        Self::FORWARD,
        Self::BACK,
    ];

    /// Create a new coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return a coordinate shifted by (dx, dy, dz).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Whether every component lies in `[0, count)` on its axis.
    #[inline]
    pub fn in_extent(self, count: Coord) -> bool {
        self.x >= 0
            && self.x < count.x
            && self.y >= 0
            && self.y < count.y
            && self.z >= 0
            && self.z < count.z
    }

    /// Number of cells in a lattice of this extent (0 if any axis is
    /// non-positive).
    #[inline]
    pub fn volume(self) -> usize {
        if self.x <= 0 || self.y <= 0 || self.z <= 0 {
            return 0;
        }
        self.x as usize * self.y as usize * self.z as usize
    }

    /// Component along `axis`.
    #[inline]
    pub fn component(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// The single axis this direction moves along, or `None` for the zero
    /// vector and for diagonals.
    #[inline]
    pub fn axis(self) -> Option<Axis> {
        match (self.x != 0, self.y != 0, self.z != 0) {
            (true, false, false) => Some(Axis::X),
            (false, true, false) => Some(Axis::Y),
            (false, false, true) => Some(Axis::Z),
            _ => None,
        }
    }

    /// Wrap every component into `[0, count)`.
    ///
    /// Axes with a non-positive extent are left unchanged.
    #[inline]
    pub fn wrap(self, count: Coord) -> Self {
        Self::new(
            wrap_axis(self.x, count.x),
            wrap_axis(self.y, count.y),
            wrap_axis(self.z, count.z),
        )
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Coord) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Coord) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}

#[inline]
pub(crate) fn wrap_axis(v: i32, extent: i32) -> i32 {
    if extent <= 0 { v } else { v.rem_euclid(extent) }
}

// --- trait impls for Coord ---

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordered the way grids are iterated: z, then y, then x.
impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.z
            .cmp(&other.z)
            .then(self.y.cmp(&other.y))
            .then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for Coord {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Coord {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<(i32, i32, i32)> for Coord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// An inclusive axis-aligned box \[min, max\] of lattice cells.
///
/// Empty boxes (any `min` component above its `max`) are normalised to
/// [`Bounds::EMPTY`] by every constructor that can produce one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Coord,
    pub max: Coord,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Bounds {
    /// The canonical empty box.
    pub const EMPTY: Self = Self {
        min: Coord::ZERO,
        max: Coord::new(-1, -1, -1),
    };

    /// Create a box from two opposite corners, both included. The corners
    /// are canonicalized so that `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(a: Coord, b: Coord) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// The box covering every cell of a lattice with extent `count`.
    #[inline]
    pub fn from_extent(count: Coord) -> Self {
        Self {
            min: Coord::ZERO,
            max: count - Coord::ONE,
        }
        .normalized()
    }

    /// The box of radius `radius` around `center`, clamped to a lattice of
    /// extent `count`. Returns `None` when `center` is outside the lattice.
    pub fn around(center: Coord, radius: Coord, count: Coord) -> Option<Self> {
        if !center.in_extent(count) {
            return None;
        }
        let min = (center - radius).max(Coord::ZERO);
        let max = (center + radius).min(count - Coord::ONE);
        Some(Self { min, max }.normalized())
    }

    #[inline]
    fn normalized(self) -> Self {
        if self.is_empty() { Self::EMPTY } else { self }
    }

    /// Whether the box contains no cell.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Number of cells along each axis.
    #[inline]
    pub fn size(self) -> Coord {
        if self.is_empty() {
            return Coord::ZERO;
        }
        self.max - self.min + Coord::ONE
    }

    /// Total number of cells in the box.
    #[inline]
    pub fn len(self) -> usize {
        self.size().volume()
    }

    /// Whether `c` lies inside the box (edges included).
    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        c.x >= self.min.x
            && c.x <= self.max.x
            && c.y >= self.min.y
            && c.y <= self.max.y
            && c.z >= self.min.z
            && c.z <= self.max.z
    }

    /// Intersection of two boxes (may be empty).
    #[inline]
    pub fn intersect(self, other: Bounds) -> Self {
        Self {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
        .normalized()
    }

    /// Iterator over every cell in the box, x varying fastest, then y, then z.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            cur: self.min,
            remaining: self.len(),
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Coord;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}]", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// BoundsIter
// ---------------------------------------------------------------------------

/// Iterator over the cells of a [`Bounds`], x fastest.
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    cur: Coord,
    remaining: usize,
}

impl Iterator for BoundsIter {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        if self.remaining == 0 {
            return None;
        }
        let c = self.cur;
        self.remaining -= 1;
        self.cur.x += 1;
        if self.cur.x > self.bounds.max.x {
            self.cur.x = self.bounds.min.x;
            self.cur.y += 1;
            if self.cur.y > self.bounds.max.y {
                self.cur.y = self.bounds.min.y;
                self.cur.z += 1;
            }
        }
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for BoundsIter {}
