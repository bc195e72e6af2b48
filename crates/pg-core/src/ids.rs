//! Strongly typed handles for agents, grid cells and buildings.
//!
//! Both wrap a `u32` index.  `AgentId` indexes the SoA arrays in
//! `pg-agent`; `CellId` is the row-major cell index `y * width + x` assigned
//! by `pg-grid`, so scanning cells by ascending `CellId` is a row-major scan.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel for an unset relation slot.
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Handle of one pawn.
    pub struct AgentId(u32);
}

typed_id! {
    /// Handle of one grid cell.  Only meaningful together with the grid that
    /// issued it.
    pub struct CellId(u32);
}

typed_id! {
    /// Handle of one building in a `pg_grid::BuildingRegistry`.
    pub struct BuildingId(u32);
}
