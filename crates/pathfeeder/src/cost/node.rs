use std::collections::BTreeMap;

use crate::cost::{CostSpec, DEFAULT_MAX_TERRAIN_ID, MAX_TERRAIN_ID_LIMIT, clamp_max_terrain_id};
use crate::error::Result;
use crate::variables::VariableStore;

/// Per-terrain cost of entering a tile.
///
/// Non-positive literals, non-positive variable slots and terrain ids outside
/// `1..=max_terrain_id` are ignored on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeCostTable {
    max_terrain_id: i32,
    entries: BTreeMap<i32, CostSpec>,
}

impl Default for NodeCostTable {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TERRAIN_ID)
    }
}

impl NodeCostTable {
    /// Lowest cost a resolved node can have.
    pub const FLOOR: i32 = 1;

    /// Table accepting terrain ids `1..=max_terrain_id`, clamped to
    /// [`MAX_TERRAIN_ID_LIMIT`].
    pub fn new(max_terrain_id: i32) -> Self {
        Self {
            max_terrain_id: clamp_max_terrain_id(max_terrain_id),
            entries: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn max_terrain_id(&self) -> i32 {
        self.max_terrain_id
    }

    #[inline]
    pub fn accepts_terrain(&self, terrain: i32) -> bool {
        (1..=self.max_terrain_id).contains(&terrain)
    }

    /// Store a literal cost. Returns `false` (and stores nothing) for
    /// `cost <= 0` or an invalid terrain id.
    pub fn set_cost(&mut self, terrain: i32, cost: i32) -> bool {
        self.set(terrain, CostSpec::Literal(cost))
    }

    /// Make `terrain` cost whatever variable `slot` holds at search time.
    pub fn set_cost_from_variable(&mut self, terrain: i32, slot: i32) -> bool {
        self.set(terrain, CostSpec::Variable(slot))
    }

    /// Store any cost spec, subject to the same validation.
    pub fn set(&mut self, terrain: i32, spec: CostSpec) -> bool {
        if !spec.is_valid() || !self.accepts_terrain(terrain) {
            log::debug!("ignoring terrain cost {spec:?} for terrain {terrain}");
            return false;
        }
        self.entries.insert(terrain, spec);
        true
    }

    /// Remove the entry for `terrain`, if any.
    pub fn reset_cost(&mut self, terrain: i32) -> Option<CostSpec> {
        self.entries.remove(&terrain)
    }

    /// Resolved cost of `terrain`: its configured cost floored at 1, or the
    /// terrain id itself when nothing is configured.
    pub fn get_cost<V: VariableStore + ?Sized>(&self, terrain: i32, vars: &V) -> Result<i32> {
        match self.entries.get(&terrain) {
            Some(spec) => spec.resolve(vars, Self::FLOOR),
            None => Ok(terrain),
        }
    }

    /// The configured spec for `terrain`, unresolved.
    pub fn entry(&self, terrain: i32) -> Option<CostSpec> {
        self.entries.get(&terrain).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured entries in ascending terrain id order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, CostSpec)> + '_ {
        self.entries.iter().map(|(&id, &spec)| (id, spec))
    }

    /// Replace every entry at once. Entries are assumed already validated.
    pub(crate) fn replace_entries(&mut self, entries: BTreeMap<i32, CostSpec>) {
        self.entries = entries;
    }

    /// Dense table indexed by terrain id (`0..=max_terrain_id`).
    ///
    /// Slot `i` starts at `max(i, 1)` and configured entries are resolved over
    /// it, so a search can look costs up without touching `vars`.
    pub fn build_snapshot<V: VariableStore + ?Sized>(&self, vars: &V) -> Result<Vec<i32>> {
        let mut dense: Vec<i32> = (0..=self.max_terrain_id).map(|i| i.max(Self::FLOOR)).collect();
        for (&terrain, spec) in &self.entries {
            dense[terrain as usize] = spec.resolve(vars, Self::FLOOR)?;
        }
        Ok(dense)
    }
}
