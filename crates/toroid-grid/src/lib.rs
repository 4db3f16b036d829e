//! Typed per-cell attribute storage over a 3D lattice.
//!
//! - [`AttributeGrid`] stores one value of a type per cell of a box.
//! - [`GridRegistry`] keeps one equally shaped grid per attribute type and
//!   addresses cells by type alone, for one attribute or a tuple of them
//!   ([`AttributeSet`]).
//!
//! | Operation | Out of bounds | Unregistered type |
//! |---|---|---|
//! | `get` / `set` / `*_many` | panics | `GridNotFound` |
//! | `try_get` / `try_set` / `try_*_many` | `None` / `false` | `GridNotFound` |
//! | `transform*` / `update*` with bounds | clipped | `GridNotFound` |

mod attribute;
mod error;
mod grid;
mod registry;
mod set;

pub use attribute::{Attribute, AttributeKind};
pub use error::RegistryError;
pub use grid::AttributeGrid;
pub use registry::{GridRegistry, ResizeSubscription};
pub use set::AttributeSet;
