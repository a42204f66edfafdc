//! The [`Pathfeeder`] service: one instance per game session.

use std::fmt;
use std::io::{Read, Write};

use pathfeeder_core::Point;
use pathfeeder_paths::{Path, PathRange};

use crate::config::PathfeederConfig;
use crate::cost::{CostSnapshot, EdgeCostTable, NodeCostTable};
use crate::error::{Error, Result};
use crate::persist::{read_terrain_costs, write_terrain_costs};
use crate::store::{PathId, PathStore};
use crate::terrain::{MoveOracle, TerrainMap, TerrainPather};
use crate::variables::VariableStore;

/// Who a path is computed for. The mover's position is the path's start and
/// its movement rules decide which steps are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mover {
    Hero,
    /// A map event, by id.
    Event(i32),
    Airship,
    Ship,
    Skiff,
}

impl fmt::Display for Mover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hero => f.write_str("hero"),
            Self::Event(id) => write!(f, "event {id}"),
            Self::Airship => f.write_str("airship"),
            Self::Ship => f.write_str("ship"),
            Self::Skiff => f.write_str("skiff"),
        }
    }
}

/// Everything the service needs from the game engine.
pub trait Host: TerrainMap + VariableStore {
    /// Current tile of `mover`, or `None` if it is not on this map.
    fn locate(&self, mover: Mover) -> Option<Point>;

    /// Whether `mover` may step from `from` onto the adjacent `to` right now.
    fn can_move(&self, mover: Mover, from: Point, to: Point) -> bool;
}

/// Cost configuration, path registry and search state of one session.
pub struct Pathfeeder {
    config: PathfeederConfig,
    terrain_costs: NodeCostTable,
    transition_costs: EdgeCostTable,
    paths: PathStore,
    range: PathRange,
}

impl Default for Pathfeeder {
    fn default() -> Self {
        Self::new(PathfeederConfig::default())
    }
}

impl Pathfeeder {
    /// Create a service whose cost tables start from `config`.
    pub fn new(config: PathfeederConfig) -> Self {
        Self {
            terrain_costs: config.node_costs(),
            transition_costs: config.edge_costs(),
            paths: PathStore::new(),
            range: PathRange::new(Default::default()),
            config,
        }
    }

    pub fn config(&self) -> &PathfeederConfig {
        &self.config
    }

    pub fn terrain_costs(&self) -> &NodeCostTable {
        &self.terrain_costs
    }

    pub fn transition_costs(&self) -> &EdgeCostTable {
        &self.transition_costs
    }

    pub fn paths(&self) -> &PathStore {
        &self.paths
    }

    // -----------------------------------------------------------------------
    // Session lifecycle
    // -----------------------------------------------------------------------

    /// Start a new game: forget every path and reload costs from the
    /// configuration.
    pub fn new_game(&mut self) {
        self.paths.clear();
        self.terrain_costs = self.config.node_costs();
        self.transition_costs = self.config.edge_costs();
        log::debug!(
            "new game: {} terrain costs, {} transition costs",
            self.terrain_costs.len(),
            self.transition_costs.len()
        );
    }

    /// The player left the map; stored paths refer to the old one.
    pub fn on_map_change(&mut self) {
        log::debug!("map change: dropping {} paths", self.paths.len());
        self.clear_paths();
    }

    // -----------------------------------------------------------------------
    // Pathfinding
    // -----------------------------------------------------------------------

    /// Compute a path for `mover` from its current tile to `dest`.
    ///
    /// `Ok(None)` means there is no path. Errors abort only this request:
    /// the mover is not on the map, or a cost refers to a missing variable.
    pub fn find_path<H: Host>(
        &mut self,
        host: &H,
        mover: Mover,
        dest: Point,
    ) -> Result<Option<PathId>> {
        let start = host.locate(mover).ok_or(Error::UnknownMover(mover))?;
        let oracle = |from: Point, to: Point| host.can_move(mover, from, to);
        self.find_path_between(host, &oracle, host, start, dest)
    }

    /// Compute a path from `from` to `to` with explicit collaborators.
    pub fn find_path_between<M, O, V>(
        &mut self,
        map: &M,
        oracle: &O,
        vars: &V,
        from: Point,
        to: Point,
    ) -> Result<Option<PathId>>
    where
        M: TerrainMap + ?Sized,
        O: MoveOracle + ?Sized,
        V: VariableStore + ?Sized,
    {
        let bounds = map.bounds();
        if !bounds.contains(from) || !bounds.contains(to) {
            log::debug!("path {from} -> {to} leaves the map {bounds}");
            return Ok(None);
        }
        if self.range.range() != bounds {
            self.range.set_range(bounds);
        }

        let costs = CostSnapshot::build(&self.terrain_costs, &self.transition_costs, vars)?;
        let pather = TerrainPather::new(map, oracle, &costs);
        let Some(path) = self.range.astar_path(&pather, from, to, self.config.search) else {
            log::debug!("no path {from} -> {to}");
            return Ok(None);
        };

        let len = path.len();
        let id = self.paths.insert(path);
        log::debug!("path {id}: {from} -> {to}, {len} vertices");
        Ok(Some(id))
    }

    /// Counters of the most recent search.
    pub fn last_search_stats(&self) -> pathfeeder_paths::SearchStats {
        self.range.last_stats()
    }

    // -----------------------------------------------------------------------
    // Path queries
    // -----------------------------------------------------------------------

    pub fn path(&self, id: PathId) -> Option<&Path> {
        self.paths.find(id)
    }

    /// Number of vertices of path `id`, endpoints included.
    pub fn path_len(&self, id: PathId) -> Option<usize> {
        self.paths.find(id).map(Path::len)
    }

    /// Vertex `index` (0 = start) of path `id`.
    pub fn path_vertex(&self, id: PathId, index: usize) -> Option<Point> {
        self.paths.find(id)?.vertex(index)
    }

    pub fn clear_path(&mut self, id: PathId) {
        if self.paths.remove(id).is_some() {
            log::debug!("cleared path {id}");
        }
    }

    /// Drop every stored path and restart handles at 1.
    pub fn clear_paths(&mut self) {
        self.paths.clear();
    }

    // -----------------------------------------------------------------------
    // Terrain costs
    // -----------------------------------------------------------------------

    pub fn set_terrain_cost(&mut self, terrain: i32, cost: i32) -> bool {
        self.terrain_costs.set_cost(terrain, cost)
    }

    pub fn set_terrain_cost_var(&mut self, terrain: i32, slot: i32) -> bool {
        self.terrain_costs.set_cost_from_variable(terrain, slot)
    }

    pub fn reset_terrain_cost(&mut self, terrain: i32) {
        self.terrain_costs.reset_cost(terrain);
    }

    pub fn clear_terrain_costs(&mut self) {
        self.terrain_costs.clear();
    }

    pub fn terrain_cost<V: VariableStore + ?Sized>(&self, terrain: i32, vars: &V) -> Result<i32> {
        self.terrain_costs.get_cost(terrain, vars)
    }

    // -----------------------------------------------------------------------
    // Transition costs
    // -----------------------------------------------------------------------

    pub fn set_transition_cost(&mut self, from: i32, to: i32, cost: i32) -> bool {
        self.transition_costs.set_cost(from, to, cost)
    }

    pub fn set_transition_cost_var(&mut self, from: i32, to: i32, slot: i32) -> bool {
        self.transition_costs.set_cost_from_variable(from, to, slot)
    }

    pub fn reset_transition_cost(&mut self, from: i32, to: i32) {
        self.transition_costs.reset_cost(from, to);
    }

    pub fn clear_transition_costs(&mut self) {
        self.transition_costs.clear();
    }

    pub fn transition_cost<V: VariableStore + ?Sized>(
        &self,
        from: i32,
        to: i32,
        vars: &V,
    ) -> Result<i32> {
        self.transition_costs.get_cost(from, to, vars)
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Write the terrain cost table for the host's save file.
    pub fn save_costs<W: Write>(&self, writer: W) -> std::io::Result<()> {
        write_terrain_costs(&self.terrain_costs, writer)
    }

    /// Restore the terrain cost table from a save file. On failure the
    /// current table is kept.
    pub fn load_costs<R: Read>(&mut self, reader: R) -> std::io::Result<()> {
        read_terrain_costs(&mut self.terrain_costs, reader)
            .inspect_err(|e| log::warn!("discarding saved terrain costs: {e}"))
    }
}
