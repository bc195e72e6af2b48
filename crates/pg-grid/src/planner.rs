//! Next-hop planning.
//!
//! # Pluggability
//!
//! The occupancy layer asks for the next hop through the [`Planner`] trait,
//! so a different search (A*, flow fields, …) can be swapped in without
//! touching the movement code.  [`DijkstraPlanner`] is the default.
//!
//! # Complexity
//!
//! `DijkstraPlanner` is the array form of Dijkstra: no priority queue, a
//! linear scan for the next frontier cell, O(V²) per query.  At the intended
//! scale (a few hundred cells) this is cheap, and the linear scan is what
//! makes tie-breaking exactly reproducible: among equal-cost unvisited cells
//! the lowest `CellId` (row-major first) is expanded first.  Switching to a
//! heap changes which of several equal-cost hops is returned.

use pg_core::CellId;

use crate::{GridError, GridResult, WeightedGrid};

// ── Planner trait ─────────────────────────────────────────────────────────────

/// Pluggable next-hop search.
///
/// Implementations must be `Send + Sync`: one planner is shared by every
/// worker during the parallel boundary-crossing phase.
pub trait Planner: Send + Sync {
    /// The neighbour of `source` to move into next on the way to `target`.
    ///
    /// Returns `source` itself when `source == target`, and
    /// [`GridError::NoPath`] when `target` cannot be reached.
    fn next_hop(&self, grid: &WeightedGrid, source: CellId, target: CellId) -> GridResult<CellId>;
}

// ── ShortestPaths ─────────────────────────────────────────────────────────────

/// Single-source search result: cost and predecessor per cell.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: CellId,
    cost:   Vec<f64>,
    prev:   Vec<CellId>,
}

impl ShortestPaths {
    #[inline]
    pub fn source(&self) -> CellId {
        self.source
    }

    /// Minimum cost from the source, or `None` if `cell` is unreachable.
    pub fn cost(&self, cell: CellId) -> Option<f64> {
        self.cost.get(cell.index()).copied().filter(|c| c.is_finite())
    }

    /// First cell after the source on the path to `target`.
    ///
    /// Walks the predecessor chain back from `target`; the walk is capped at
    /// the cell count so a broken chain surfaces as `NoPath` instead of
    /// spinning forever.
    pub fn first_hop(&self, target: CellId) -> GridResult<CellId> {
        if target == self.source {
            return Ok(self.source);
        }
        let no_path = GridError::NoPath { from: self.source, to: target };
        if self.cost(target).is_none() {
            return Err(no_path);
        }
        let mut cur = target;
        for _ in 0..self.prev.len() {
            let p = self.prev[cur.index()];
            if p == self.source {
                return Ok(cur);
            }
            if !p.is_valid() {
                return Err(no_path);
            }
            cur = p;
        }
        Err(no_path)
    }

    /// Full path `source ..= target`.
    pub fn path(&self, target: CellId) -> GridResult<Vec<CellId>> {
        if target == self.source {
            return Ok(vec![self.source]);
        }
        let no_path = GridError::NoPath { from: self.source, to: target };
        if self.cost(target).is_none() {
            return Err(no_path);
        }
        let mut path = vec![target];
        let mut cur = target;
        while cur != self.source {
            if path.len() > self.prev.len() {
                return Err(no_path);
            }
            cur = self.prev[cur.index()];
            if !cur.is_valid() {
                return Err(no_path);
            }
            path.push(cur);
        }
        path.reverse();
        Ok(path)
    }
}

// ── DijkstraPlanner ───────────────────────────────────────────────────────────

/// O(V²) uniform-cost search over the grid's directed edge weights.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraPlanner;

impl DijkstraPlanner {
    /// Costs and predecessors from `source` to every reachable cell.
    pub fn shortest_paths(&self, grid: &WeightedGrid, source: CellId) -> GridResult<ShortestPaths> {
        if !grid.contains(source) {
            return Err(GridError::UnknownCell(source));
        }
        Ok(search(grid, source, None))
    }
}

impl Planner for DijkstraPlanner {
    fn next_hop(&self, grid: &WeightedGrid, source: CellId, target: CellId) -> GridResult<CellId> {
        for cell in [source, target] {
            if !grid.contains(cell) {
                return Err(GridError::UnknownCell(cell));
            }
        }
        if source == target {
            return Ok(source);
        }
        let hop = search(grid, source, Some(target)).first_hop(target);
        tracing::trace!(%source, %target, ?hop, "next hop");
        hop
    }
}

/// Array Dijkstra from `source`.  With `stop_at`, the search ends as soon as
/// that cell becomes the frontier; its predecessor chain is final by then.
fn search(grid: &WeightedGrid, source: CellId, stop_at: Option<CellId>) -> ShortestPaths {
    let n = grid.cell_count();
    let mut cost    = vec![f64::INFINITY; n];
    let mut visited = vec![false; n];
    let mut prev    = vec![CellId::INVALID; n];

    cost[source.index()] = 0.0;
    let mut current = source;

    for _ in 0..n.saturating_sub(1) {
        visited[current.index()] = true;
        if stop_at == Some(current) {
            break;
        }

        let base = cost[current.index()];
        for (neighbor, weight) in grid.neighbors_of(current) {
            let i = neighbor.index();
            if !visited[i] && base + weight < cost[i] {
                cost[i] = base + weight;
                prev[i] = current;
            }
        }

        // Strict `<` keeps the first (lowest-index) cell among equal costs.
        let mut best: Option<usize> = None;
        let mut best_cost = f64::INFINITY;
        for i in 0..n {
            if !visited[i] && cost[i] < best_cost {
                best_cost = cost[i];
                best = Some(i);
            }
        }
        match best {
            Some(i) => current = CellId(i as u32),
            // Everything reachable has been expanded.
            None => break,
        }
    }

    ShortestPaths { source, cost, prev }
}
