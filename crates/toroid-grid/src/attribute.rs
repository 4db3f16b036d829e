//! Attribute types and the type-erased grid handle the registry stores.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use toroid_core::{Bounds, Coord};

use crate::grid::AttributeGrid;

/// A per-cell data type that can be registered with a
/// [`GridRegistry`](crate::GridRegistry).
///
/// Blanket-implemented for every `'static` type that is `Default`, `Clone`
/// and `Debug`; `Debug` is what the introspection entry points print.
pub trait Attribute: Default + Clone + fmt::Debug + 'static {}

impl<T: Default + Clone + fmt::Debug + 'static> Attribute for T {}

/// Runtime handle naming one attribute type.
///
/// Equality and hashing only look at the type identity.
#[derive(Copy, Clone, Debug)]
pub struct AttributeKind {
    id: TypeId,
    name: &'static str,
}

impl AttributeKind {
    /// The kind of `T`.
    pub fn of<T: Attribute>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Stable identity used as the registry key.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified name of the attribute type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for AttributeKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AttributeKind {}

impl Hash for AttributeKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// ---------------------------------------------------------------------------
// ErasedGrid
// ---------------------------------------------------------------------------

/// Operations the registry performs on a grid without knowing its type.
pub(crate) trait ErasedGrid {
    fn kind(&self) -> AttributeKind;
    fn resize(&mut self, size: Coord);
    fn debug_each(&self, bounds: Bounds, f: &mut dyn FnMut(Coord, &dyn fmt::Debug));
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Attribute> ErasedGrid for AttributeGrid<T> {
    fn kind(&self) -> AttributeKind {
        AttributeKind::of::<T>()
    }

    fn resize(&mut self, size: Coord) {
        AttributeGrid::resize(self, size);
    }

    fn debug_each(&self, bounds: Bounds, f: &mut dyn FnMut(Coord, &dyn fmt::Debug)) {
        self.for_each_in(bounds, |c, v| f(c, v));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
