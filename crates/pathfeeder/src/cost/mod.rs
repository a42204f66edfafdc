//! Terrain cost configuration.
//!
//! Two sparse tables describe what a step costs:
//!
//! - [`NodeCostTable`]: cost of *entering* a tile, keyed by its terrain id.
//!   Unconfigured terrain costs its own id.
//! - [`EdgeCostTable`]: surcharge for moving *from* one terrain *to* another,
//!   keyed by the ordered pair. Unconfigured pairs are free.
//!
//! Before each search both tables are flattened into a [`CostSnapshot`] so the
//! search never touches the variable store.

mod edge;
mod node;
mod snapshot;

pub use edge::EdgeCostTable;
pub use node::NodeCostTable;
pub use snapshot::CostSnapshot;

use crate::error::{Error, Result};
use crate::variables::VariableStore;

/// Highest terrain id covered by the dense snapshot tables by default.
pub const DEFAULT_MAX_TERRAIN_ID: i32 = 256;

/// Upper bound on `max_terrain_id`. The transition snapshot grows with its
/// square, so larger requests are clamped to this.
pub const MAX_TERRAIN_ID_LIMIT: i32 = 1024;

/// Clamp a requested terrain id range to `0..=MAX_TERRAIN_ID_LIMIT`.
pub(crate) fn clamp_max_terrain_id(max_terrain_id: i32) -> i32 {
    let clamped = max_terrain_id.clamp(0, MAX_TERRAIN_ID_LIMIT);
    if clamped != max_terrain_id {
        log::warn!("max terrain id {max_terrain_id} clamped to {clamped}");
    }
    clamped
}

/// How a configured cost is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CostSpec {
    /// A fixed cost. Only positive values are ever stored.
    Literal(i32),
    /// Read the cost from this host variable slot at resolve time.
    Variable(i32),
}

impl CostSpec {
    /// Legacy signed encoding: literals stay positive, variable slots are
    /// stored negated.
    #[inline]
    pub fn encode(self) -> i32 {
        match self {
            Self::Literal(cost) => cost,
            Self::Variable(slot) => -slot,
        }
    }

    /// Inverse of [`encode`](Self::encode). Zero carries no meaning and
    /// decodes to `None`.
    #[inline]
    pub fn decode(raw: i32) -> Option<Self> {
        match raw {
            0 => None,
            r if r > 0 => Some(Self::Literal(r)),
            r => r.checked_neg().map(Self::Variable),
        }
    }

    /// Whether this spec may be stored in a table.
    #[inline]
    pub fn is_valid(self) -> bool {
        match self {
            Self::Literal(v) | Self::Variable(v) => v > 0,
        }
    }

    /// Resolve against `vars`, never returning less than `floor`.
    pub(crate) fn resolve<V: VariableStore + ?Sized>(self, vars: &V, floor: i32) -> Result<i32> {
        match self {
            Self::Literal(cost) => Ok(cost.max(floor)),
            Self::Variable(slot) => vars
                .variable(slot)
                .map(|v| v.max(floor))
                .ok_or(Error::InvalidVariable { slot }),
        }
    }
}
