//! Read access to the host's numeric variables.

use std::collections::HashMap;

/// Indexed integer slots owned by the host.
///
/// Cost entries configured as [`CostSpec::Variable`](crate::CostSpec::Variable)
/// are dereferenced through this trait every time costs are resolved.
pub trait VariableStore {
    /// Current value of `slot`, or `None` if the slot does not exist.
    fn variable(&self, slot: i32) -> Option<i32>;
}

/// Slots index the slice directly; hosts with 1-based ids leave index 0 unused.
impl VariableStore for [i32] {
    fn variable(&self, slot: i32) -> Option<i32> {
        usize::try_from(slot).ok().and_then(|i| self.get(i).copied())
    }
}

impl VariableStore for Vec<i32> {
    fn variable(&self, slot: i32) -> Option<i32> {
        self.as_slice().variable(slot)
    }
}

impl VariableStore for HashMap<i32, i32> {
    fn variable(&self, slot: i32) -> Option<i32> {
        self.get(&slot).copied()
    }
}

impl<T: VariableStore + ?Sized> VariableStore for &T {
    fn variable(&self, slot: i32) -> Option<i32> {
        (**self).variable(slot)
    }
}
