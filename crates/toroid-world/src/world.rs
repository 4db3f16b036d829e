//! The world: a registry with the attributes the simulation needs, plus the
//! conversions between world space and lattice indices.

use rand::{Rng, RngExt};
use toroid_core::{Axes, Coord, Topology};
use toroid_grid::{GridRegistry, RegistryError};
use toroid_paths::{Pathfinder, PathfinderConfig, install_search_cells};

use crate::occupant::Occupant;
use crate::tint::Tint;

/// A point in world space. Each lattice cell is a unit cube.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Offset of a cell's world position from its integer corner.
const ANCHOR: f32 = 0.5;

pub struct World {
    registry: GridRegistry,
    wrap: Axes,
}

impl World {
    /// A world of `count` cells registering [`Occupant`], [`Tint`] and the
    /// search cells, all kept in shape across resizes.
    pub fn new(count: Coord, wrap: Axes) -> Result<Self, RegistryError> {
        let mut registry = GridRegistry::new(count);
        registry.create_grid::<Occupant>()?;
        registry.create_grid::<Tint>()?;
        install_search_cells(&mut registry, &Coord::AXIS_DIRECTIONS)?;

        seed_tints(&mut registry)?;
        registry.on_resize(|reg| {
            if let Err(e) = seed_tints(reg) {
                log::warn!("could not re-seed tints after resize: {e}");
            }
        });

        log::info!("world created with {count} cells, wrapping {wrap:?}");
        Ok(Self { registry, wrap })
    }

    pub fn registry(&self) -> &GridRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut GridRegistry {
        &mut self.registry
    }

    pub fn count(&self) -> Coord {
        self.registry.count()
    }

    pub fn topology(&self) -> Topology {
        Topology::new(self.registry.count(), self.wrap)
    }

    pub fn in_bounds(&self, c: Coord) -> bool {
        self.registry.in_bounds(c)
    }

    /// Resize every attribute; search cells and tints are re-seeded.
    pub fn resize(&mut self, count: Coord) {
        self.registry.resize(count);
    }

    /// Index of the cell containing `at`.
    pub fn world_to_index(&self, at: WorldPos) -> Coord {
        let round = |v: f32| (v + ANCHOR).round() as i32;
        Coord::new(round(at.x), round(at.y), round(at.z))
    }

    /// World position of cell `c`.
    pub fn index_to_world(&self, c: Coord) -> WorldPos {
        WorldPos::new(
            c.x as f32 - ANCHOR,
            c.y as f32 - ANCHOR,
            c.z as f32 - ANCHOR,
        )
    }

    /// Bring `c` back onto the lattice along the wrapping axes.
    pub fn wrap_index(&self, c: Coord) -> Coord {
        self.topology().wrap(c)
    }

    /// A uniformly random cell.
    pub fn random_index(&self, rng: &mut impl Rng) -> Coord {
        let count = self.registry.count();
        let mut axis = |extent: i32| {
            if extent > 0 { rng.random_range(0..extent) } else { 0 }
        };
        Coord::new(axis(count.x), axis(count.y), axis(count.z))
    }

    /// Whether a snake segment occupies `c`.
    pub fn is_blocked(registry: &GridRegistry, c: Coord) -> bool {
        matches!(registry.try_get::<Occupant>(c), Ok(Some(o)) if o.is_body())
    }

    /// A pathfinder that moves with this world's wrapping and treats snake
    /// segments as blocked.
    pub fn pathfinder(&self, config: PathfinderConfig) -> Pathfinder {
        Pathfinder::with_config(PathfinderConfig {
            wrap: self.wrap,
            ..config
        })
        .with_block_fn(World::is_blocked)
    }

    pub fn occupant(&self, c: Coord) -> Occupant {
        match self.registry.try_get::<Occupant>(c) {
            Ok(Some(o)) => o,
            _ => Occupant::Empty,
        }
    }

    /// Write `occupant` at `c`. Out-of-bounds writes are dropped.
    pub fn set_occupant(&mut self, c: Coord, occupant: Occupant) -> Result<bool, RegistryError> {
        self.registry.try_set(c, occupant)
    }

    /// Empty every cell.
    pub fn clear_occupants(&mut self) -> Result<(), RegistryError> {
        self.registry.reset::<Occupant>()
    }
}

fn seed_tints(registry: &mut GridRegistry) -> Result<(), RegistryError> {
    registry.update::<Tint>(|c, tint| *tint = Tint::for_index(c))
}
