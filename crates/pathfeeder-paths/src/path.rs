use pathfeeder_core::Point;

use crate::PathRange;
use crate::pathrange::NO_PARENT;

/// An ordered walk from a start cell to a destination cell, both included.
///
/// A path always holds at least one vertex and every consecutive pair of
/// vertices is one cardinal step apart. Paths are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Build a path from its vertices.
    ///
    /// Returns `None` if `points` is empty or contains a step that is not a
    /// single cardinal move.
    pub fn from_points(points: Vec<Point>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let path = Self { points };
        path.is_contiguous().then_some(path)
    }

    /// The degenerate path that starts and ends on `p`.
    pub fn single(p: Point) -> Self {
        Self { points: vec![p] }
    }

    /// Number of vertices, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The vertex at `index`, or `None` past the end.
    #[inline]
    pub fn vertex(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Start cell.
    #[inline]
    pub fn first(&self) -> Point {
        self.points[0]
    }

    /// Destination cell.
    #[inline]
    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn into_vec(self) -> Vec<Point> {
        self.points
    }

    /// Whether every step is a single cardinal move.
    pub fn is_contiguous(&self) -> bool {
        self.points.windows(2).all(|w| w[0].is_adjacent_4(w[1]))
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Path {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            points: Vec<Point>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Path::from_points(raw.points)
            .ok_or_else(|| serde::de::Error::custom("path must be non-empty and contiguous"))
    }
}

// ---------------------------------------------------------------------------
// Path extraction
// ---------------------------------------------------------------------------

impl PathRange {
    /// Rebuild the path from `from` to `to` out of the state grid left by the
    /// most recent search.
    ///
    /// Returns `None` if either point is outside the range or the destination
    /// was never given a predecessor in that search.
    pub fn extract_path(&self, from: Point, to: Point) -> Option<Path> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;
        if start_idx == goal_idx {
            return Some(Path::single(from));
        }

        let goal = &self.nodes[goal_idx];
        if goal.generation != self.generation || goal.parent == NO_PARENT {
            return None;
        }

        let mut points = Vec::new();
        let mut ci = goal_idx;
        loop {
            points.push(self.point(ci));
            if ci == start_idx {
                break;
            }
            // A chain longer than the grid means it never reaches the start.
            if points.len() > self.nodes.len() {
                return None;
            }
            let n = &self.nodes[ci];
            if n.parent == NO_PARENT || n.generation != self.generation {
                return None;
            }
            ci = n.parent;
        }
        points.reverse();
        let path = Path { points };
        debug_assert!(path.is_contiguous());
        Some(path)
    }
}
