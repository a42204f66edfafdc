//! Session configuration: search tunables and the cost tables a new game
//! starts with.

use pathfeeder_paths::SearchOptions;

use crate::cost::{CostSpec, DEFAULT_MAX_TERRAIN_ID, EdgeCostTable, NodeCostTable};

/// A configured node cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainCost {
    pub terrain: i32,
    pub cost: CostSpec,
}

/// A configured transition cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionCost {
    pub from: i32,
    pub to: i32,
    pub cost: CostSpec,
}

/// Everything a [`Pathfeeder`](crate::Pathfeeder) is constructed from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfeederConfig {
    /// Highest terrain id the cost tables accept, clamped to
    /// [`MAX_TERRAIN_ID_LIMIT`](crate::MAX_TERRAIN_ID_LIMIT).
    pub max_terrain_id: i32,
    /// A* tunables.
    pub search: SearchOptions,
    /// Node costs applied on every new game.
    pub terrain_costs: Vec<TerrainCost>,
    /// Transition costs applied on every new game.
    pub transition_costs: Vec<TransitionCost>,
}

impl Default for PathfeederConfig {
    fn default() -> Self {
        Self {
            max_terrain_id: DEFAULT_MAX_TERRAIN_ID,
            search: SearchOptions::default(),
            terrain_costs: Vec::new(),
            transition_costs: Vec::new(),
        }
    }
}

impl PathfeederConfig {
    /// Fresh node cost table seeded with [`terrain_costs`](Self::terrain_costs).
    /// Invalid entries are skipped like any other invalid write.
    pub fn node_costs(&self) -> NodeCostTable {
        let mut table = NodeCostTable::new(self.max_terrain_id);
        for tc in &self.terrain_costs {
            table.set(tc.terrain, tc.cost);
        }
        table
    }

    /// Fresh edge cost table seeded with
    /// [`transition_costs`](Self::transition_costs).
    pub fn edge_costs(&self) -> EdgeCostTable {
        let mut table = EdgeCostTable::new(self.max_terrain_id);
        for tc in &self.transition_costs {
            table.set(tc.from, tc.to, tc.cost);
        }
        table
    }
}
