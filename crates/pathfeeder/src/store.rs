//! Registry of computed paths, addressed by integer handle.

use std::collections::BTreeMap;
use std::fmt;

use pathfeeder_paths::Path;

/// Handle of a stored path. Valid handles start at 1; `0` is never issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PathId(u32);

impl PathId {
    /// The handle that never refers to a path.
    pub const INVALID: Self = Self(0);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owns every path handed out since the last [`clear`](Self::clear).
#[derive(Debug, Clone)]
pub struct PathStore {
    next_id: u32,
    paths: BTreeMap<PathId, Path>,
}

impl Default for PathStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PathStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            paths: BTreeMap::new(),
        }
    }

    /// Store `path` under the next free handle.
    pub fn insert(&mut self, path: Path) -> PathId {
        let mut id = PathId(self.next_id);
        // Only reachable after 2^32 inserts without a clear.
        while !id.is_valid() || self.paths.contains_key(&id) {
            id = PathId(id.0.wrapping_add(1));
        }
        self.next_id = id.0.wrapping_add(1);
        self.paths.insert(id, path);
        id
    }

    pub fn find(&self, id: PathId) -> Option<&Path> {
        self.paths.get(&id)
    }

    pub fn contains(&self, id: PathId) -> bool {
        self.paths.contains_key(&id)
    }

    /// Drop the path behind `id`, if any.
    pub fn remove(&mut self, id: PathId) -> Option<Path> {
        self.paths.remove(&id)
    }

    /// Drop every path and restart handles at 1.
    pub fn clear(&mut self) {
        self.paths.clear();
        self.next_id = 1;
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PathId, &Path)> + '_ {
        self.paths.iter().map(|(&id, p)| (id, p))
    }
}
