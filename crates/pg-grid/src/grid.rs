//! The weighted grid graph.
//!
//! # Data layout
//!
//! Cells are numbered row-major (`CellId = y * width + x`).  Each cell owns a
//! fixed four-slot edge array indexed by [`Direction`]:
//!
//! ```text
//! edges[cell] = [left, right, up, down]   // Option<f64> weight per slot
//! ```
//!
//! A slot can hold at most one weight, so "at most one edge per neighbour"
//! holds by construction and re-connecting a pair simply overwrites the
//! weight.  Edges are directed: `a → b` lives in `a`'s array only.

use pg_core::{CellCoord, CellId, Vec2};

use crate::{GridError, GridResult};

// ── Direction ─────────────────────────────────────────────────────────────────

/// Orthogonal neighbour direction.  Declaration order is the iteration order
/// of [`WeightedGrid::neighbors_of`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    /// Towards `y - 1`.
    Up,
    /// Towards `y + 1`.
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Left  => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up    => (0, -1),
            Direction::Down  => (0, 1),
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }

    /// Direction from `from` to the orthogonally adjacent `to`, if any.
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Direction> {
        let delta = (to.x - from.x, to.y - from.y);
        Direction::ALL.into_iter().find(|d| d.offset() == delta)
    }
}

// ── WeightedGrid ──────────────────────────────────────────────────────────────

/// W×H grid of cells with up to four directed, weighted edges per cell.
#[derive(Clone, Debug)]
pub struct WeightedGrid {
    width:   u32,
    height:  u32,
    edges:   Vec<[Option<f64>; 4]>,
    blocked: Vec<bool>,
}

impl WeightedGrid {
    /// Allocate `width × height` cells with no edges.
    ///
    /// Zero-sized grids are rejected, as are grids whose cell count would
    /// collide with `CellId::INVALID`.
    pub fn new(width: u32, height: u32) -> GridResult<Self> {
        let count = width as u64 * height as u64;
        if width == 0 || height == 0 || count >= CellId::INVALID.0 as u64 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            edges:   vec![[None; 4]; count as usize],
            blocked: vec![false; count as usize],
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.edges.len()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().flatten().filter(|w| w.is_some()).count()
    }

    // ── Cell lookup ───────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, cell: CellId) -> bool {
        cell.index() < self.edges.len()
    }

    /// Handle of the cell at `(x, y)`.
    pub fn cell(&self, x: i32, y: i32) -> GridResult<CellId> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return Err(GridError::OutOfRange { x, y, width: self.width, height: self.height });
        }
        Ok(CellId(y as u32 * self.width + x as u32))
    }

    pub fn coord(&self, cell: CellId) -> GridResult<CellCoord> {
        if !self.contains(cell) {
            return Err(GridError::UnknownCell(cell));
        }
        Ok(CellCoord::new((cell.0 % self.width) as i32, (cell.0 / self.width) as i32))
    }

    /// World-space centre of `cell`.
    pub fn center(&self, cell: CellId) -> GridResult<Vec2> {
        self.coord(cell).map(CellCoord::center)
    }

    /// Every cell in ascending (row-major) order.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.edges.len() as u32).map(CellId)
    }

    /// The cell one step from `cell` in `dir`, or `None` at the grid edge.
    pub fn step(&self, cell: CellId, dir: Direction) -> Option<CellId> {
        let c = self.coord(cell).ok()?;
        let (dx, dy) = dir.offset();
        self.cell(c.x + dx, c.y + dy).ok()
    }

    // ── Edges ─────────────────────────────────────────────────────────────

    /// Add the directed edge `a → b`, and `b → a` with the same weight when
    /// `reversible`.  Asymmetric pairs take two calls with
    /// `reversible = false`.
    pub fn connect(&mut self, a: CellId, b: CellId, weight: f64, reversible: bool) -> GridResult<()> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(GridError::InvalidWeight(weight));
        }
        let (ca, cb) = (self.coord(a)?, self.coord(b)?);
        let forward = Direction::between(ca, cb).ok_or(GridError::NotAdjacent { a, b })?;
        self.edges[a.index()][forward.slot()] = Some(weight);
        if reversible {
            let back = Direction::between(cb, ca).ok_or(GridError::NotAdjacent { a: b, b: a })?;
            self.edges[b.index()][back.slot()] = Some(weight);
        }
        Ok(())
    }

    /// Weight of `a → b`, if that edge exists.
    pub fn edge_weight(&self, a: CellId, b: CellId) -> Option<f64> {
        let dir = Direction::between(self.coord(a).ok()?, self.coord(b).ok()?)?;
        self.edges[a.index()][dir.slot()]
    }

    /// Outgoing `(neighbour, weight)` pairs of `cell` in left, right, up,
    /// down order.  Unknown cells have no neighbours.
    pub fn neighbors_of(&self, cell: CellId) -> impl Iterator<Item = (CellId, f64)> + '_ {
        let slots = self.edges.get(cell.index());
        Direction::ALL.into_iter().filter_map(move |dir| {
            let weight = slots?[dir.slot()]?;
            Some((self.step(cell, dir)?, weight))
        })
    }

    /// Make `cell` impassable by removing every edge that leads into it.
    /// Its own outgoing edges stay, so a pawn already inside can still leave.
    pub fn block_cell(&mut self, cell: CellId) -> GridResult<()> {
        let coord = self.coord(cell)?;
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            if let Ok(neighbor) = self.cell(coord.x + dx, coord.y + dy) {
                if let Some(back) = Direction::between(self.coord(neighbor)?, coord) {
                    self.edges[neighbor.index()][back.slot()] = None;
                }
            }
        }
        self.blocked[cell.index()] = true;
        tracing::debug!(%cell, "blocked cell");
        Ok(())
    }

    /// `true` once [`block_cell`](Self::block_cell) has been applied to
    /// `cell`.  Unknown cells are not blocked.
    #[inline]
    pub fn is_blocked(&self, cell: CellId) -> bool {
        self.blocked.get(cell.index()).copied().unwrap_or(false)
    }
}
