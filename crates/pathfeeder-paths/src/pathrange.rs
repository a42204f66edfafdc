use pathfeeder_core::{Point, Range};

/// Parent index of a cell with no predecessor (the start, or untouched).
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Per-cell search state
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i64,
    pub(crate) f: i64,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            f: 0,
            parent: NO_PARENT,
            generation: 0,
            open: false,
        }
    }
}

/// Frontier entry, ordered by `f` then by insertion sequence for use in
/// `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i64,
    pub(crate) seq: u32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, and among
        // equal f the entry pushed first.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Options and statistics
// ---------------------------------------------------------------------------

/// Tunables for [`PathRange::astar_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchOptions {
    /// Keep expanding until the frontier is empty instead of stopping as soon
    /// as the destination is closed. The returned path is identical; only the
    /// amount of work differs.
    pub exhaustive: bool,
    /// Never offer a cell's own predecessor as one of its successors.
    pub skip_predecessor: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            exhaustive: false,
            skip_predecessor: true,
        }
    }
}

/// Work counters of the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells closed (popped and expanded).
    pub expanded: usize,
    /// Entries pushed onto the frontier, including re-admissions.
    pub pushed: usize,
}

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Dense per-cell search state for one map rectangle.
///
/// Every cell of the range has a slot recording its best known cost, its
/// predecessor and whether it is still on the frontier. Slots are stamped with
/// the generation of the search that wrote them, so bumping the generation
/// invalidates the whole grid without touching it.
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) stats: SearchStats,
    // scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            nodes: vec![Node::default(); rng.len()],
            generation: 0,
            stats: SearchStats::default(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying range, e.g. after a map transition.
    ///
    /// If the new size fits within the existing node array it is kept and
    /// only the generation is bumped; otherwise the array is reallocated.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        self.rng = rng;
        self.width = rng.width().max(0) as usize;
        self.stats = SearchStats::default();

        if new_len <= self.nodes.len() {
            self.next_generation();
            return;
        }

        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.generation = 0;
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Counters of the most recent search.
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Best known accumulated cost of `p` in the most recent search, or
    /// `None` if that search never reached it.
    ///
    /// Step costs are `i32`; sums are kept in `i64` so long expensive routes
    /// still compare correctly.
    pub fn cost_at(&self, p: Point) -> Option<i64> {
        let i = self.idx(p)?;
        let n = &self.nodes[i];
        (n.generation == self.generation && self.generation != 0).then_some(n.g)
    }

    /// Start a new search generation, returning its stamp.
    ///
    /// Generation 0 marks never-written slots; on wrap-around every slot is
    /// reset so stale stamps cannot collide with the new one.
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            for n in self.nodes.iter_mut() {
                *n = Node::default();
            }
            self.generation = 1;
        }
        self.generation
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}
