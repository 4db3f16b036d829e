use serde::{Deserialize, Serialize};

/// What fills a cell of the world.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    #[default]
    Empty,
    /// A snake segment, tagged with the owning snake's id.
    Body(u32),
    Food,
}

impl Occupant {
    #[inline]
    pub fn is_body(self) -> bool {
        matches!(self, Occupant::Body(_))
    }

    #[inline]
    pub fn is_food(self) -> bool {
        self == Occupant::Food
    }
}
