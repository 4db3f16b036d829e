//! A dense 3D grid holding one attribute value per lattice cell.
//!
//! [`AttributeGrid`] owns a flat `Vec<T>` laid out x-fastest, then y, then z,
//! so walking the backing vector front to back visits cells in the same
//! order as [`Bounds::iter`].

use toroid_core::{Bounds, Coord};

/// A dense 3D array of `T`, one value per cell of a lattice of `size`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttributeGrid<T> {
    cells: Vec<T>,
    size: Coord,
}

impl<T: Default> AttributeGrid<T> {
    /// Create a grid of the given dimensions with every cell at
    /// `T::default()`.
    pub fn new(size: Coord) -> Self {
        Self {
            cells: default_cells(size.volume()),
            size,
        }
    }

    /// Reallocate to `size`.
    ///
    /// Every cell whose coordinate is inside both the old and the new
    /// dimensions keeps its value; newly introduced cells are defaulted and
    /// cells outside the new dimensions are dropped.
    pub fn resize(&mut self, size: Coord) {
        let mut old = std::mem::take(&mut self.cells);
        let old_size = self.size;
        let mut cells = Vec::with_capacity(size.volume());
        for c in Bounds::from_extent(size) {
            if c.in_extent(old_size) {
                cells.push(std::mem::take(&mut old[flat_index(old_size, c)]));
            } else {
                cells.push(T::default());
            }
        }
        self.cells = cells;
        self.size = size;
    }

    /// Reset every cell to `T::default()`. Dimensions are unchanged.
    pub fn clear(&mut self) {
        for v in self.cells.iter_mut() {
            *v = T::default();
        }
    }
}

impl<T> AttributeGrid<T> {
    /// Dimensions of the grid.
    #[inline]
    pub fn size(&self) -> Coord {
        self.size
    }

    /// The box covering every cell.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_extent(self.size)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cell at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `c` is in bounds: every axis value in `[0, size)`.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.in_extent(self.size)
    }

    #[inline]
    fn idx(&self, c: Coord) -> Option<usize> {
        self.contains(c).then(|| flat_index(self.size, c))
    }

    #[inline]
    #[track_caller]
    fn idx_or_panic(&self, c: Coord) -> usize {
        match self.idx(c) {
            Some(i) => i,
            None => panic!("coordinate {c} out of bounds for grid of size {}", self.size),
        }
    }

    /// Borrow the value at `c`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Coord) -> Option<&T> {
        self.idx(c).map(|i| &self.cells[i])
    }

    /// Write `value` at `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c` is out of bounds; check with [`contains`](Self::contains)
    /// first or use [`try_set`](Self::try_set).
    #[inline]
    #[track_caller]
    pub fn set(&mut self, c: Coord, value: T) {
        let i = self.idx_or_panic(c);
        self.cells[i] = value;
    }

    /// Write `value` at `c` if it is in bounds. Returns whether it was
    /// written; out-of-bounds writes leave the grid untouched.
    #[inline]
    pub fn try_set(&mut self, c: Coord, value: T) -> bool {
        match self.idx(c) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Visit every cell read-only, x fastest.
    pub fn for_each(&self, mut f: impl FnMut(Coord, &T)) {
        for (c, v) in self.bounds().iter().zip(self.cells.iter()) {
            f(c, v);
        }
    }

    /// Visit the cells of `bounds` read-only. Parts of the box outside the
    /// grid are skipped.
    pub fn for_each_in(&self, bounds: Bounds, mut f: impl FnMut(Coord, &T)) {
        for c in bounds.intersect(self.bounds()) {
            f(c, &self.cells[flat_index(self.size, c)]);
        }
    }

    /// Read-modify-write every cell. Each cell's new value is stored as soon
    /// as `f` returns for it, so a panic inside `f` leaves earlier cells (in
    /// iteration order) already updated.
    pub fn update(&mut self, mut f: impl FnMut(Coord, &mut T)) {
        let bounds = self.bounds();
        for (c, v) in bounds.iter().zip(self.cells.iter_mut()) {
            f(c, v);
        }
    }

    /// Read-modify-write the cells of `bounds`, clipped to the grid.
    pub fn update_in(&mut self, bounds: Bounds, mut f: impl FnMut(Coord, &mut T)) {
        for c in bounds.intersect(self.bounds()) {
            let i = flat_index(self.size, c);
            f(c, &mut self.cells[i]);
        }
    }

    /// Iterate over `(Coord, &T)` pairs, x fastest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Coord, &T)> {
        self.bounds().iter().zip(self.cells.iter())
    }
}

impl<T: Clone> AttributeGrid<T> {
    /// Value at `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c` is out of bounds; check with [`contains`](Self::contains)
    /// first or use [`try_get`](Self::try_get).
    #[inline]
    #[track_caller]
    pub fn get(&self, c: Coord) -> T {
        self.cells[self.idx_or_panic(c)].clone()
    }

    /// Value at `c`, or `None` if out of bounds.
    #[inline]
    pub fn try_get(&self, c: Coord) -> Option<T> {
        self.at(c).cloned()
    }
}

impl<T: Clone + Default> AttributeGrid<T> {
    /// Value at `c` paired with whether `c` was in bounds; a miss yields
    /// `(T::default(), false)`.
    #[inline]
    pub fn try_get_or_default(&self, c: Coord) -> (T, bool) {
        match self.at(c) {
            Some(v) => (v.clone(), true),
            None => (T::default(), false),
        }
    }
}

#[inline]
fn flat_index(size: Coord, c: Coord) -> usize {
    let sx = size.x as usize;
    let sy = size.y as usize;
    c.x as usize + c.y as usize * sx + c.z as usize * sx * sy
}

fn default_cells<T: Default>(len: usize) -> Vec<T> {
    std::iter::repeat_with(T::default).take(len).collect()
}


#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for AttributeGrid<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Repr<T> {
            cells: Vec<T>,
            size: Coord,
        }

        let Repr { cells, size } = Repr::deserialize(deserializer)?;
        if cells.len() != size.volume() {
            return Err(serde::de::Error::custom(format!(
                "grid of size {size} needs {} cells, got {}",
                size.volume(),
                cells.len()
            )));
        }
        Ok(Self { cells, size })
    }
}
