//! A self-driving snake: each tick it takes the first step of the current
//! path to the food.

use std::collections::VecDeque;

use rand::Rng;
use serde::Serialize;
use toroid_core::Coord;
use toroid_grid::RegistryError;
use toroid_paths::{PathError, Pathfinder};

use crate::occupant::Occupant;
use crate::world::World;

/// What happened during one [`Snake::tick`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    /// Moved onto the food and grew by one segment.
    Ate,
    /// Ran into a segment; everything but the head was dropped.
    Collided,
    /// Could not move: no path and the heading leaves a bounded axis.
    Stranded,
}

/// Running totals over a snake's life.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SnakeStats {
    pub ticks: u64,
    pub eaten: u32,
    pub collisions: u32,
    /// Ticks where no path to the food was found.
    pub unplanned: u32,
    pub longest: usize,
}

pub struct Snake {
    id: u32,
    /// Head first.
    segments: VecDeque<Coord>,
    heading: Coord,
    food: Option<Coord>,
    pathfinder: Pathfinder,
    stats: SnakeStats,
}

impl Snake {
    /// Place a one-segment snake at `at` and drop the first food.
    pub fn spawn(
        world: &mut World,
        id: u32,
        at: Coord,
        pathfinder: Pathfinder,
        rng: &mut impl Rng,
    ) -> Result<Self, RegistryError> {
        let at = world.wrap_index(at);
        world.set_occupant(at, Occupant::Body(id))?;
        let mut snake = Self {
            id,
            segments: VecDeque::from([at]),
            heading: Coord::UP,
            food: None,
            pathfinder,
            stats: SnakeStats {
                longest: 1,
                ..Default::default()
            },
        };
        snake.respawn_food(world, rng)?;
        log::debug!("snake {id} spawned at {at}");
        Ok(snake)
    }

    pub fn head(&self) -> Coord {
        self.segments[0]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = Coord> {
        self.segments.iter().copied()
    }

    pub fn heading(&self) -> Coord {
        self.heading
    }

    pub fn food(&self) -> Option<Coord> {
        self.food
    }

    pub fn stats(&self) -> SnakeStats {
        self.stats
    }

    /// Advance one step.
    pub fn tick(&mut self, world: &mut World, rng: &mut impl Rng) -> Result<TickOutcome, PathError> {
        self.stats.ticks += 1;
        let head = self.head();
        log::debug!("snake {} tick {} at {head}", self.id, self.stats.ticks);
        let topology = world.topology();

        let next = match self.plan(world, head)? {
            Some(next) => next,
            None => {
                self.stats.unplanned += 1;
                match topology.step(head, self.heading) {
                    Some(next) => next,
                    None => return Ok(TickOutcome::Stranded),
                }
            }
        };
        if let Some(dir) = Coord::AXIS_DIRECTIONS
            .into_iter()
            .find(|&d| topology.step(head, d) == Some(next))
        {
            self.heading = dir;
        }

        let occupant = world.occupant(next);
        if occupant.is_body() {
            for seg in self.segments.drain(..) {
                world.set_occupant(seg, Occupant::Empty)?;
            }
            self.segments.push_front(next);
            world.set_occupant(next, Occupant::Body(self.id))?;
            self.stats.collisions += 1;
            log::info!("snake {} collided at {next}", self.id);
            return Ok(TickOutcome::Collided);
        }

        self.segments.push_front(next);
        world.set_occupant(next, Occupant::Body(self.id))?;

        if occupant.is_food() {
            self.stats.eaten += 1;
            self.stats.longest = self.stats.longest.max(self.segments.len());
            log::info!("snake {} ate at {next}, length {}", self.id, self.segments.len());
            self.respawn_food(world, rng)?;
            Ok(TickOutcome::Ate)
        } else {
            if let Some(tail) = self.segments.pop_back() {
                world.set_occupant(tail, Occupant::Empty)?;
            }
            Ok(TickOutcome::Moved)
        }
    }

    /// First step of a path from `head` to the food.
    fn plan(&mut self, world: &mut World, head: Coord) -> Result<Option<Coord>, PathError> {
        let Some(food) = self.food else {
            return Ok(None);
        };
        let path = self.pathfinder.search(world.registry_mut(), head, food)?;
        Ok(path.and_then(|p| p.first().copied()))
    }

    /// Move the food to `at`, replacing the current food.
    pub fn place_food(&mut self, world: &mut World, at: Coord) -> Result<bool, RegistryError> {
        self.clear_food(world)?;
        if !world.in_bounds(at) || world.occupant(at) != Occupant::Empty {
            return Ok(false);
        }
        world.set_occupant(at, Occupant::Food)?;
        self.food = Some(at);
        Ok(true)
    }

    /// Move the food to a random empty cell, giving up after as many draws
    /// as the world has cells.
    pub fn respawn_food(&mut self, world: &mut World, rng: &mut impl Rng) -> Result<bool, RegistryError> {
        self.clear_food(world)?;
        let tries = world.registry().bounds().len();
        for _ in 0..tries {
            let at = world.random_index(rng);
            if world.occupant(at) == Occupant::Empty {
                world.set_occupant(at, Occupant::Food)?;
                self.food = Some(at);
                log::trace!("food respawned at {at}");
                return Ok(true);
            }
        }
        log::warn!("no empty cell for food after {tries} draws");
        Ok(false)
    }

    fn clear_food(&mut self, world: &mut World) -> Result<(), RegistryError> {
        if let Some(old) = self.food.take() {
            if world.occupant(old).is_food() {
                world.set_occupant(old, Occupant::Empty)?;
            }
        }
        Ok(())
    }
}
