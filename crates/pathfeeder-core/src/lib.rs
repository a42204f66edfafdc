//! **pathfeeder-core**: grid geometry shared by the pathfeeder crates.
//!
//! Tile positions are [`Point`]s and map extents are [`Range`]s. A position is
//! walkable-in-principle only when it lies inside the current map's range;
//! everything else about movement legality belongs to the host.

pub mod geom;

pub use geom::{Point, Range, RangeIter};
