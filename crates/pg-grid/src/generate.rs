//! Default connectivity for a freshly built grid.
//!
//! The world generator proper is an external collaborator; this module only
//! provides the plain rectangular wiring it starts from: every cell linked to
//! each in-range orthogonal neighbour, with one weight per direction.

use crate::{Direction, GridResult, WeightedGrid};

/// Edge weight used for each outgoing direction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionalWeights {
    pub left:  f64,
    pub right: f64,
    pub up:    f64,
    pub down:  f64,
}

impl DirectionalWeights {
    pub const fn uniform(weight: f64) -> Self {
        Self { left: weight, right: weight, up: weight, down: weight }
    }

    #[inline]
    pub fn get(&self, dir: Direction) -> f64 {
        match dir {
            Direction::Left  => self.left,
            Direction::Right => self.right,
            Direction::Up    => self.up,
            Direction::Down  => self.down,
        }
    }
}

impl Default for DirectionalWeights {
    /// The reference world's deliberately lopsided costs: cheap to go left,
    /// expensive to go up.
    fn default() -> Self {
        Self { left: 1.0, right: 2.0, up: 6.0, down: 3.0 }
    }
}

/// Wire every cell of `grid` to its orthogonal neighbours.
pub fn connect_all(grid: &mut WeightedGrid, weights: DirectionalWeights) -> GridResult<()> {
    let cells: Vec<_> = grid.cells().collect();
    for cell in cells {
        for dir in Direction::ALL {
            if let Some(neighbor) = grid.step(cell, dir) {
                grid.connect(cell, neighbor, weights.get(dir), false)?;
            }
        }
    }
    tracing::debug!(
        width = grid.width(),
        height = grid.height(),
        edges = grid.edge_count(),
        "grid connected"
    );
    Ok(())
}
