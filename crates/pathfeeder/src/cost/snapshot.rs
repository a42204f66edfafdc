use crate::cost::{EdgeCostTable, NodeCostTable};
use crate::error::Result;
use crate::variables::VariableStore;

/// Resolved node and edge costs for one search.
///
/// Built right before a search and dropped with it; later changes to the
/// tables or to host variables do not affect a snapshot already built.
#[derive(Debug, Clone)]
pub struct CostSnapshot {
    nodes: Vec<i32>,
    edges: Vec<i32>,
    edge_dim: usize,
}

impl CostSnapshot {
    /// Resolve both tables against `vars` in one pass each.
    ///
    /// Fails if any variable-backed entry refers to a missing slot.
    pub fn build<V: VariableStore + ?Sized>(
        nodes: &NodeCostTable,
        edges: &EdgeCostTable,
        vars: &V,
    ) -> Result<Self> {
        Ok(Self {
            nodes: nodes.build_snapshot(vars)?,
            edges: edges.build_snapshot(vars)?,
            edge_dim: edges.max_terrain_id() as usize + 1,
        })
    }

    /// Cost of entering a tile of `terrain`. Terrain ids outside the dense
    /// range fall back to `max(terrain, 1)`.
    #[inline]
    pub fn node(&self, terrain: i32) -> i32 {
        usize::try_from(terrain)
            .ok()
            .and_then(|i| self.nodes.get(i).copied())
            .unwrap_or(terrain.max(NodeCostTable::FLOOR))
    }

    /// Surcharge for stepping from `from` terrain onto `to` terrain.
    #[inline]
    pub fn edge(&self, from: i32, to: i32) -> i32 {
        match (usize::try_from(from), usize::try_from(to)) {
            (Ok(f), Ok(t)) if f < self.edge_dim && t < self.edge_dim => {
                self.edges[f * self.edge_dim + t]
            }
            _ => 0,
        }
    }

    /// Full cost of a step from `from` terrain onto `to` terrain.
    #[inline]
    pub fn step(&self, from: i32, to: i32) -> i32 {
        self.node(to).saturating_add(self.edge(from, to))
    }
}
