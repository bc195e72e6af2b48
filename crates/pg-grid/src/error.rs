//! Grid and planning error type.

use thiserror::Error;

use pg_core::{BuildingId, CellId};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("coordinate ({x}, {y}) outside {width}x{height} grid")]
    OutOfRange { x: i32, y: i32, width: u32, height: u32 },

    #[error("cell {0} does not belong to this grid")]
    UnknownCell(CellId),

    #[error("cells {a} and {b} are not orthogonal neighbours")]
    NotAdjacent { a: CellId, b: CellId },

    #[error("edge weight must be positive and finite, got {0}")]
    InvalidWeight(f64),

    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("no path from {from} to {to}")]
    NoPath { from: CellId, to: CellId },

    #[error("building {0} is not registered")]
    UnknownBuilding(BuildingId),

    #[error("cell {cell} is already covered by building {by}")]
    Overlap { cell: CellId, by: BuildingId },

    #[error("door cell {0} is not enterable")]
    DoorBlocked(CellId),
}

pub type GridResult<T> = Result<T, GridError>;
