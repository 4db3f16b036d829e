//! Error types for registry operations.

use std::fmt;

use toroid_core::Coord;

/// Errors reported by [`GridRegistry`](crate::GridRegistry).
///
/// All of these are wiring mistakes rather than runtime conditions: they
/// mean an attribute was registered twice, never registered, or the grids
/// have drifted apart in shape. None of them is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// `create_grid` was called for a type that already has a grid.
    DuplicateGrid { type_name: &'static str },
    /// An operation referenced a type with no registered grid.
    GridNotFound { type_name: &'static str },
    /// A secondary attribute had no value at a coordinate the primary
    /// attribute of a multi-attribute operation covers.
    InconsistentAttributes { type_name: &'static str, coord: Coord },
}

impl RegistryError {
    pub(crate) fn duplicate<T>() -> Self {
        Self::DuplicateGrid {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub(crate) fn not_found<T>() -> Self {
        Self::GridNotFound {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub(crate) fn inconsistent<T>(coord: Coord) -> Self {
        Self::InconsistentAttributes {
            type_name: std::any::type_name::<T>(),
            coord,
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateGrid { type_name } => {
                write!(f, "grid of type {type_name} already created")
            }
            Self::GridNotFound { type_name } => {
                write!(f, "grid of type {type_name} does not exist")
            }
            Self::InconsistentAttributes { type_name, coord } => {
                write!(f, "attribute {type_name} has no value at {coord}")
            }
        }
    }
}

impl std::error::Error for RegistryError {}
