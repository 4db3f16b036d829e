use std::rc::Rc;

use toroid_core::Coord;
use toroid_grid::{GridRegistry, RegistryError, ResizeSubscription};

/// Per-cell search bookkeeping, stored as an attribute in the registry so
/// the lattice itself carries the search state.
///
/// `directions` is the neighbour set expanded from this cell. It survives
/// [`reset`](Self::reset); everything else is per-search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchCell {
    /// Estimated total cost through this cell.
    pub f: f32,
    /// Best known cost from the start.
    pub g: f32,
    pub visited: bool,
    pub directions: Rc<[Coord]>,
    /// Cell this one was reached from.
    pub came_from: Option<Coord>,
    /// Direction of the move (or jump) that reached this cell.
    pub came_from_dir: Option<Coord>,
}

impl Default for SearchCell {
    fn default() -> Self {
        Self::with_directions(Rc::new([]))
    }
}

impl SearchCell {
    /// An unsearched cell expanding into `directions`.
    pub fn with_directions(directions: Rc<[Coord]>) -> Self {
        Self {
            f: f32::INFINITY,
            g: f32::INFINITY,
            visited: false,
            directions,
            came_from: None,
            came_from_dir: None,
        }
    }

    /// Forget the previous search, keeping the direction set.
    pub fn reset(&mut self) {
        self.f = f32::INFINITY;
        self.g = f32::INFINITY;
        self.visited = false;
        self.came_from = None;
        self.came_from_dir = None;
    }
}

/// Overwrite every search cell with a fresh one expanding into `directions`.
pub fn seed_search_cells(
    registry: &mut GridRegistry,
    directions: &[Coord],
) -> Result<(), RegistryError> {
    let directions: Rc<[Coord]> = Rc::from(directions);
    registry.update::<SearchCell>(|_, cell| {
        *cell = SearchCell::with_directions(Rc::clone(&directions));
    })
}

/// Register the [`SearchCell`] attribute if needed, seed it with
/// `directions`, and keep it seeded across registry resizes.
///
/// Drop the subscription with
/// [`GridRegistry::remove_resize_listener`] to stop re-seeding.
pub fn install_search_cells(
    registry: &mut GridRegistry,
    directions: &[Coord],
) -> Result<ResizeSubscription, RegistryError> {
    if !registry.contains::<SearchCell>() {
        registry.create_grid::<SearchCell>()?;
    }
    seed_search_cells(registry, directions)?;

    let directions = directions.to_vec();
    Ok(registry.on_resize(move |reg| {
        if let Err(e) = seed_search_cells(reg, &directions) {
            log::warn!("could not re-seed search cells after resize: {e}");
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_directions() {
        let mut cell = SearchCell::with_directions(Rc::from(&Coord::AXIS_DIRECTIONS[..]));
        cell.g = 3.0;
        cell.visited = true;
        cell.came_from = Some(Coord::ZERO);
        cell.reset();
        assert_eq!(cell.g, f32::INFINITY);
        assert!(!cell.visited);
        assert_eq!(cell.came_from, None);
        assert_eq!(cell.directions.len(), 6);
    }

    #[test]
    fn install_reseeds_on_resize() {
        let mut reg = GridRegistry::new(Coord::new(2, 2, 1));
        install_search_cells(&mut reg, &[Coord::RIGHT, Coord::LEFT]).unwrap();
        let cell = reg.get::<SearchCell>(Coord::new(1, 1, 0)).unwrap();
        assert_eq!(cell.directions.len(), 2);

        reg.resize(Coord::new(4, 4, 1));
        let grown = reg.get::<SearchCell>(Coord::new(3, 3, 0)).unwrap();
        assert_eq!(&*grown.directions, &[Coord::RIGHT, Coord::LEFT]);
    }

    #[test]
    fn default_cell_has_no_directions() {
        let cell = SearchCell::default();
        assert!(cell.directions.is_empty());
        assert_eq!(cell.f, f32::INFINITY);
    }
}
