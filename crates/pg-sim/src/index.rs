//! Cell → pawns lookup, rebuilt on demand from the occupying relation.

use pg_agent::AgentStore;
use pg_core::{AgentId, CellId};

#[cfg(feature = "fx-hash")]
pub type CellIndex = rustc_hash::FxHashMap<CellId, Vec<AgentId>>;

#[cfg(not(feature = "fx-hash"))]
pub type CellIndex = std::collections::HashMap<CellId, Vec<AgentId>>;

/// Group every placed pawn by the cell it occupies.  Pawns within a cell are
/// listed in ascending `AgentId` order.  O(agent_count).
pub fn occupancy_index(agents: &AgentStore) -> CellIndex {
    let mut index = CellIndex::default();
    for (i, &cell) in agents.occupying.iter().enumerate() {
        if cell.is_valid() {
            index.entry(cell).or_default().push(AgentId(i as u32));
        }
    }
    index
}
