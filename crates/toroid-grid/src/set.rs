//! Bundles of attributes fetched and stored together.
//!
//! [`AttributeSet`] is implemented for tuples of one to four [`Attribute`]s.
//! The first element is the *primary* attribute: multi-attribute transforms
//! iterate its grid and look the others up at the same coordinate.

use toroid_core::{Bounds, Coord};

use crate::attribute::{Attribute, AttributeKind};
use crate::error::RegistryError;
use crate::registry::GridRegistry;

/// A tuple of attributes addressed as one unit, e.g. `(Occupant, Tint)`.
///
/// The methods are the building blocks of the registry's `*_many`
/// operations; call those rather than these.
pub trait AttributeSet: Sized {
    /// Kinds of the members, primary first.
    fn kinds() -> Vec<AttributeKind>;

    /// Fail with `GridNotFound` for the first member without a grid.
    fn ensure_registered(registry: &GridRegistry) -> Result<(), RegistryError>;

    /// The full box of the primary attribute's grid.
    fn primary_bounds(registry: &GridRegistry) -> Result<Bounds, RegistryError>;

    /// Unchecked read of every member; panics if `c` is out of bounds.
    fn fetch(registry: &GridRegistry, c: Coord) -> Result<Self, RegistryError>;

    /// Checked read, `None` as soon as one member misses.
    fn try_fetch(registry: &GridRegistry, c: Coord) -> Result<Option<Self>, RegistryError>;

    /// Read every member at a coordinate the primary grid covers, reporting
    /// a miss as `InconsistentAttributes`.
    fn fetch_aligned(registry: &GridRegistry, c: Coord) -> Result<Self, RegistryError>;

    /// Unchecked write of every member; panics if `c` is out of bounds.
    fn store(self, registry: &mut GridRegistry, c: Coord) -> Result<(), RegistryError>;

    /// Checked write, stopping at the first member that misses.
    fn try_store(self, registry: &mut GridRegistry, c: Coord) -> Result<bool, RegistryError>;
}

macro_rules! impl_attribute_set {
    ($P:ident $pi:tt $(, $T:ident $ti:tt)*) => {
        impl<$P: Attribute $(, $T: Attribute)*> AttributeSet for ($P, $($T,)*) {
            fn kinds() -> Vec<AttributeKind> {
                vec![AttributeKind::of::<$P>() $(, AttributeKind::of::<$T>())*]
            }

            fn ensure_registered(registry: &GridRegistry) -> Result<(), RegistryError> {
                registry.grid::<$P>()?;
                $( registry.grid::<$T>()?; )*
                Ok(())
            }

            fn primary_bounds(registry: &GridRegistry) -> Result<Bounds, RegistryError> {
                Ok(registry.grid::<$P>()?.bounds())
            }

            fn fetch(registry: &GridRegistry, c: Coord) -> Result<Self, RegistryError> {
                Ok((registry.get::<$P>(c)?, $( registry.get::<$T>(c)?, )*))
            }

            fn try_fetch(registry: &GridRegistry, c: Coord) -> Result<Option<Self>, RegistryError> {
                let Some(primary) = registry.try_get::<$P>(c)? else {
                    return Ok(None);
                };
                Ok(Some((
                    primary,
                    $(
                        match registry.try_get::<$T>(c)? {
                            Some(v) => v,
                            None => return Ok(None),
                        },
                    )*
                )))
            }

            fn fetch_aligned(registry: &GridRegistry, c: Coord) -> Result<Self, RegistryError> {
                Ok((
                    registry
                        .grid::<$P>()?
                        .try_get(c)
                        .ok_or_else(|| RegistryError::inconsistent::<$P>(c))?,
                    $(
                        registry
                            .grid::<$T>()?
                            .try_get(c)
                            .ok_or_else(|| RegistryError::inconsistent::<$T>(c))?,
                    )*
                ))
            }

            fn store(self, registry: &mut GridRegistry, c: Coord) -> Result<(), RegistryError> {
                registry.set::<$P>(c, self.$pi)?;
                $( registry.set::<$T>(c, self.$ti)?; )*
                Ok(())
            }

            fn try_store(self, registry: &mut GridRegistry, c: Coord) -> Result<bool, RegistryError> {
                if !registry.try_set::<$P>(c, self.$pi)? {
                    return Ok(false);
                }
                $(
                    if !registry.try_set::<$T>(c, self.$ti)? {
                        return Ok(false);
                    }
                )*
                Ok(true)
            }
        }
    };
}

impl_attribute_set!(A 0);
impl_attribute_set!(A 0, B 1);
impl_attribute_set!(A 0, B 1, C 2);
impl_attribute_set!(A 0, B 1, C 2, D 3);
