//! Map-side collaborators of a search and the pather that combines them.

use pathfeeder_core::{Point, Range};
use pathfeeder_paths::{AstarPather, Pather, WeightedPather, manhattan};

use crate::cost::CostSnapshot;

/// Dimensions and terrain of the current map.
pub trait TerrainMap {
    /// Tile rectangle of the map; every valid position lies inside it.
    fn bounds(&self) -> Range;

    /// Terrain id of the tile at `p`. Only called for positions inside
    /// [`bounds`](Self::bounds).
    fn terrain_at(&self, p: Point) -> i32;

    /// Whether `p` is a position on this map.
    #[inline]
    fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }
}

/// Movement legality for one specific mover.
pub trait MoveOracle {
    /// Whether the mover may step from `from` onto the adjacent `to`.
    fn can_move(&self, from: Point, to: Point) -> bool;
}

impl<F: Fn(Point, Point) -> bool> MoveOracle for F {
    #[inline]
    fn can_move(&self, from: Point, to: Point) -> bool {
        self(from, to)
    }
}

// ---------------------------------------------------------------------------
// TerrainGrid
// ---------------------------------------------------------------------------

/// Dense in-memory terrain map rooted at the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainGrid {
    rng: Range,
    cells: Vec<i32>,
}

impl TerrainGrid {
    /// A `width × height` map where every tile has terrain `fill`.
    pub fn new(width: i32, height: i32, fill: i32) -> Self {
        let rng = Range::sized(width, height);
        Self {
            rng,
            cells: vec![fill; rng.len()],
        }
    }

    /// Build from rows of digits, one terrain id per character.
    ///
    /// Returns `None` if rows differ in width or contain a non-digit.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            if row.chars().count() != width {
                return None;
            }
            for ch in row.chars() {
                cells.push(ch.to_digit(10)? as i32);
            }
        }
        Some(Self {
            rng: Range::sized(width as i32, rows.len() as i32),
            cells,
        })
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        self.rng
            .contains(p)
            .then(|| (p.y * self.rng.width() + p.x) as usize)
    }

    /// Terrain at `p`, or `None` off the map.
    pub fn at(&self, p: Point) -> Option<i32> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Set the terrain at `p`. Returns `false` off the map.
    pub fn set(&mut self, p: Point, terrain: i32) -> bool {
        match self.index(p) {
            Some(i) => {
                self.cells[i] = terrain;
                true
            }
            None => false,
        }
    }

    pub fn width(&self) -> i32 {
        self.rng.width()
    }

    pub fn height(&self) -> i32 {
        self.rng.height()
    }
}

impl TerrainMap for TerrainGrid {
    fn bounds(&self) -> Range {
        self.rng
    }

    fn terrain_at(&self, p: Point) -> i32 {
        self.at(p).unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// TerrainPather
// ---------------------------------------------------------------------------

/// Terrain-weighted 4-directional pather.
///
/// A step onto `to` costs the node cost of `to`'s terrain plus the edge cost
/// of the `from -> to` terrain transition. Every step costs at least 1, so the
/// Manhattan distance never overestimates.
pub struct TerrainPather<'a, M: ?Sized, O: ?Sized> {
    map: &'a M,
    oracle: &'a O,
    costs: &'a CostSnapshot,
}

impl<'a, M, O> TerrainPather<'a, M, O>
where
    M: TerrainMap + ?Sized,
    O: MoveOracle + ?Sized,
{
    pub fn new(map: &'a M, oracle: &'a O, costs: &'a CostSnapshot) -> Self {
        Self { map, oracle, costs }
    }
}

impl<M, O> Pather for TerrainPather<'_, M, O>
where
    M: TerrainMap + ?Sized,
    O: MoveOracle + ?Sized,
{
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            if self.map.contains(n) && self.oracle.can_move(p, n) {
                buf.push(n);
            }
        }
    }
}

impl<M, O> WeightedPather for TerrainPather<'_, M, O>
where
    M: TerrainMap + ?Sized,
    O: MoveOracle + ?Sized,
{
    fn cost(&self, from: Point, to: Point) -> i32 {
        self.costs
            .step(self.map.terrain_at(from), self.map.terrain_at(to))
    }
}

impl<M, O> AstarPather for TerrainPather<'_, M, O>
where
    M: TerrainMap + ?Sized,
    O: MoveOracle + ?Sized,
{
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}
