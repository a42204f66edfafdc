//! A* pathfinding on 4-connected tile grids.
//!
//! All searches run through [`PathRange`], which owns a dense per-cell state
//! grid sized to the current map. The grid is reused between searches; a
//! generation stamp makes each search start from a logically fresh state, so
//! repeated queries incur no allocation after warm-up.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | legal neighbours of a cell |
//! | [`WeightedPather`] : [`Pather`] | non-negative step cost |
//! | [`AstarPather`] : [`WeightedPather`] | admissible remaining-cost estimate |
//!
//! A completed search yields a [`Path`]: the start and destination cells and
//! every cardinal step between them.

mod astar;
mod distance;
mod path;
mod pathrange;
mod traits;

pub use distance::manhattan;
pub use path::Path;
pub use pathrange::{PathRange, SearchOptions, SearchStats};
pub use traits::{AstarPather, Pather, WeightedPather};
