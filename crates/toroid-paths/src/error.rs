use std::fmt;

use toroid_core::Coord;
use toroid_grid::RegistryError;

/// Errors raised by [`Pathfinder::search`](crate::Pathfinder::search).
///
/// "No path" is not an error; it is `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The search-cell attribute is missing or the grids are inconsistent.
    Registry(RegistryError),
    /// Jump point search was given a direction that is not a unit move
    /// along exactly one axis.
    DiagonalDirection(Coord),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry(e) => write!(f, "registry error: {e}"),
            Self::DiagonalDirection(d) => {
                write!(f, "direction {d} does not move along a single axis")
            }
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Registry(e) => Some(e),
            Self::DiagonalDirection(_) => None,
        }
    }
}

impl From<RegistryError> for PathError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}
