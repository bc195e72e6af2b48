//! Buildings: named rectangular footprints placed on the grid.
//!
//! Placing a building blocks every footprint cell (see
//! [`WeightedGrid::block_cell`]), so planners route around it.  Pawns reach a
//! building through its door, a single enterable cell given as an offset from
//! the footprint's top-left corner.
//!
//! ```text
//!   origin (3, 8), size 3×3, door (-1, 0)
//!
//!        x=2  3  4  5
//!   y=8   D  [#  #  #]
//!   y=9      [#  #  #]
//!   y=10     [#  #  #]
//! ```

use std::fmt;

use pg_core::{BuildingId, CellCoord, CellId};

use crate::{GridError, GridResult, WeightedGrid};

// ── Value types ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildingKind {
    /// Built by pawns.
    Structure,
    /// Part of the landscape (trees, rocks).
    Nature,
}

/// Stockpile held by a building.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resources {
    pub fish:  u32,
    pub stone: u32,
    pub wood:  u32,
}

impl Resources {
    pub fn total(&self) -> u32 {
        self.fish + self.stone + self.wood
    }
}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fish {} stone {} wood {}", self.fish, self.stone, self.wood)
    }
}

/// What to place: everything about a building except where the registry
/// files it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildingSpec {
    pub name:      String,
    pub kind:      BuildingKind,
    /// Top-left footprint cell.
    pub origin:    CellCoord,
    pub width:     u32,
    pub height:    u32,
    /// Door position relative to `origin`.  Must fall outside the footprint.
    pub door:      CellCoord,
    pub resources: Resources,
}

impl BuildingSpec {
    /// The reference world's starting granary: 3 × 3 at (3, 8), door on the
    /// west side, empty stores.
    pub fn granary() -> Self {
        Self {
            name:      "Granary".into(),
            kind:      BuildingKind::Structure,
            origin:    CellCoord::new(3, 8),
            width:     3,
            height:    3,
            door:      CellCoord::new(-1, 0),
            resources: Resources::default(),
        }
    }

    /// Footprint cells in row-major order.
    fn footprint(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (0..self.height as i32).flat_map(move |dy| {
            (0..self.width as i32).map(move |dx| CellCoord::new(self.origin.x + dx, self.origin.y + dy))
        })
    }
}

/// A placed building.
#[derive(Clone, Debug)]
pub struct Building {
    pub spec:      BuildingSpec,
    pub resources: Resources,
    cells:         Vec<CellId>,
    door:          CellId,
}

impl Building {
    /// Footprint cells in row-major order.
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    /// The cell pawns walk to when they visit.
    pub fn door(&self) -> CellId {
        self.door
    }

    pub fn covers(&self, cell: CellId) -> bool {
        self.cells.contains(&cell)
    }
}

// ── BuildingRegistry ──────────────────────────────────────────────────────────

/// Every building placed on one grid, indexed by [`BuildingId`].
#[derive(Clone, Debug, Default)]
pub struct BuildingRegistry {
    buildings: Vec<Building>,
}

impl BuildingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `spec` on `grid`, blocking its footprint.
    ///
    /// Nothing is blocked unless the whole placement is valid: the footprint
    /// must be non-empty, inside the grid, and clear of other buildings; the
    /// door must be an in-grid cell outside every footprint.
    pub fn place(&mut self, grid: &mut WeightedGrid, spec: BuildingSpec) -> GridResult<BuildingId> {
        if spec.width == 0 || spec.height == 0 {
            return Err(GridError::InvalidDimensions { width: spec.width, height: spec.height });
        }
        let cells = spec
            .footprint()
            .map(|c| grid.cell(c.x, c.y))
            .collect::<GridResult<Vec<_>>>()?;
        for &cell in &cells {
            if let Some(by) = self.building_at(cell) {
                return Err(GridError::Overlap { cell, by });
            }
        }

        let door = grid.cell(spec.origin.x + spec.door.x, spec.origin.y + spec.door.y)?;
        if cells.contains(&door) || self.building_at(door).is_some() || grid.is_blocked(door) {
            return Err(GridError::DoorBlocked(door));
        }

        for &cell in &cells {
            grid.block_cell(cell)?;
        }
        let id = BuildingId(self.buildings.len() as u32);
        tracing::debug!(%id, name = %spec.name, cells = cells.len(), %door, "building placed");
        self.buildings.push(Building { resources: spec.resources, spec, cells, door });
        Ok(id)
    }

    pub fn get(&self, id: BuildingId) -> GridResult<&Building> {
        self.buildings.get(id.index()).ok_or(GridError::UnknownBuilding(id))
    }

    pub fn get_mut(&mut self, id: BuildingId) -> GridResult<&mut Building> {
        self.buildings.get_mut(id.index()).ok_or(GridError::UnknownBuilding(id))
    }

    /// Door cell of `id`, ready to be used as a pawn goal.
    pub fn door(&self, id: BuildingId) -> GridResult<CellId> {
        self.get(id).map(Building::door)
    }

    /// The building whose footprint covers `cell`, if any.
    pub fn building_at(&self, cell: CellId) -> Option<BuildingId> {
        self.buildings
            .iter()
            .position(|b| b.covers(cell))
            .map(|i| BuildingId(i as u32))
    }

    /// First building named `name`.
    pub fn find(&self, name: &str) -> Option<BuildingId> {
        self.buildings
            .iter()
            .position(|b| b.spec.name == name)
            .map(|i| BuildingId(i as u32))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BuildingId, &Building)> {
        self.buildings.iter().enumerate().map(|(i, b)| (BuildingId(i as u32), b))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}
