use std::collections::BTreeMap;

use crate::cost::{CostSpec, DEFAULT_MAX_TERRAIN_ID, MAX_TERRAIN_ID_LIMIT, clamp_max_terrain_id};
use crate::error::Result;
use crate::variables::VariableStore;

/// Surcharge for stepping from one terrain onto another.
///
/// Keys are ordered pairs, so `(a, b)` and `(b, a)` are independent entries.
/// Unconfigured pairs cost 0 and resolved costs are floored at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeCostTable {
    max_terrain_id: i32,
    entries: BTreeMap<(i32, i32), CostSpec>,
}

impl Default for EdgeCostTable {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TERRAIN_ID)
    }
}

impl EdgeCostTable {
    /// Lowest cost a resolved edge can have.
    pub const FLOOR: i32 = 0;

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
    fn accepts_pair(&self, from: i32, to: i32) -> bool {
        let ids = 1..=self.max_terrain_id;
        ids.contains(&from) && ids.contains(&to)
    }

    /// Store a literal transition cost. Returns `false` for `cost <= 0` or an
    /// invalid terrain id.
    pub fn set_cost(&mut self, from: i32, to: i32, cost: i32) -> bool {
        self.set(from, to, CostSpec::Literal(cost))
    }

    /// Make the transition cost whatever variable `slot` holds at search time.
    pub fn set_cost_from_variable(&mut self, from: i32, to: i32, slot: i32) -> bool {
        self.set(from, to, CostSpec::Variable(slot))
    }

    pub fn set(&mut self, from: i32, to: i32, spec: CostSpec) -> bool {
        if !spec.is_valid() || !self.accepts_pair(from, to) {
            log::debug!("ignoring transition cost {spec:?} for {from} -> {to}");
            return false;
        }
        self.entries.insert((from, to), spec);
        true
    }

    pub fn reset_cost(&mut self, from: i32, to: i32) -> Option<CostSpec> {
        self.entries.remove(&(from, to))
    }

    /// Resolved surcharge for `from -> to`, 0 when unconfigured.
    pub fn get_cost<V: VariableStore + ?Sized>(&self, from: i32, to: i32, vars: &V) -> Result<i32> {
        match self.entries.get(&(from, to)) {
            Some(spec) => spec.resolve(vars, Self::FLOOR),
            None => Ok(0),
        }
    }

    pub fn entry(&self, from: i32, to: i32) -> Option<CostSpec> {
        self.entries.get(&(from, to)).copied()
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

    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), CostSpec)> + '_ {
        self.entries.iter().map(|(&k, &spec)| (k, spec))
    }

    /// Dense row-major `(max+1) × (max+1)` table, zero-filled, with every
    /// configured pair resolved into `[from * (max+1) + to]`.
    pub fn build_snapshot<V: VariableStore + ?Sized>(&self, vars: &V) -> Result<Vec<i32>> {
        let dim = self.max_terrain_id as usize + 1;
        let mut dense = vec![0; dim * dim];
        for (&(from, to), spec) in &self.entries {
            dense[from as usize * dim + to as usize] = spec.resolve(vars, Self::FLOOR)?;
        }
        Ok(dense)
    }
}
