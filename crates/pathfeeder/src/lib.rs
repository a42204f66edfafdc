//! **pathfeeder**: terrain-aware path computation for tile-based games.
//!
//! The crate computes paths; it never moves anything. A host game engine asks
//! a [`Pathfeeder`] for a path from one of its movers to a destination tile,
//! gets back a [`PathId`], and then reads the path vertex by vertex whenever
//! it needs the next step.
//!
//! Step costs come from two tables the host can tune at any time:
//!
//! - terrain costs ([`NodeCostTable`]): what entering a tile of a given
//!   terrain costs, by default the terrain id itself;
//! - transition costs ([`EdgeCostTable`]): an extra charge for moving from one
//!   terrain onto another, free by default.
//!
//! Either kind may be a literal or a reference to a host variable
//! ([`CostSpec`]), read anew at the start of every search.
//!
//! ```
//! use pathfeeder::{Host, Mover, Pathfeeder, Point, Range, TerrainGrid, TerrainMap, VariableStore};
//!
//! struct Map(TerrainGrid);
//!
//! impl TerrainMap for Map {
//!     fn bounds(&self) -> Range { self.0.bounds() }
//!     fn terrain_at(&self, p: Point) -> i32 { self.0.terrain_at(p) }
//! }
//! impl VariableStore for Map {
//!     fn variable(&self, _slot: i32) -> Option<i32> { None }
//! }
//! impl Host for Map {
//!     fn locate(&self, _mover: Mover) -> Option<Point> { Some(Point::ZERO) }
//!     fn can_move(&self, _mover: Mover, _from: Point, _to: Point) -> bool { true }
//! }
//!
//! let map = Map(TerrainGrid::new(5, 5, 1));
//! let mut pf = Pathfeeder::default();
//! let id = pf.find_path(&map, Mover::Hero, Point::new(4, 4)).unwrap().unwrap();
//! assert_eq!(pf.path_len(id), Some(9));
//! ```

mod command;
mod config;
mod cost;
mod error;
mod persist;
mod service;
mod store;
mod terrain;
mod variables;

pub use command::{Command, Reply};
pub use config::{PathfeederConfig, TerrainCost, TransitionCost};
pub use cost::{
    CostSnapshot, CostSpec, DEFAULT_MAX_TERRAIN_ID, EdgeCostTable, MAX_TERRAIN_ID_LIMIT, NodeCostTable,
};
pub use error::{Error, Result};
pub use persist::{CostDecoder, CostEncoder, read_terrain_costs, write_terrain_costs};
pub use service::{Host, Mover, Pathfeeder};
pub use store::{PathId, PathStore};
pub use terrain::{MoveOracle, TerrainGrid, TerrainMap, TerrainPather};
pub use variables::VariableStore;

pub use pathfeeder_core::{Point, Range};
pub use pathfeeder_paths::{Path, SearchOptions, SearchStats};
