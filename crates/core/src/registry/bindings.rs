use alloy::primitives::{Address, aliases::B32};
use serde::Deserialize;
use std::collections::HashMap;

use crate::types::{function_id::FunctionId, role_bitmask::RoleBitmask};

/// One `(target, selector, role)` binding request, the `RoleData` struct of the
/// contract ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RoleBinding {
    pub target: Address,
    pub selector: B32,
    pub role_id: u8,
}

impl RoleBinding {
    pub fn new(target: Address, selector: B32, role_id: u8) -> Self {
        Self {
            target,
            selector,
            role_id,
        }
    }

    pub fn function_id(&self) -> FunctionId {
        FunctionId::new(self.target, self.selector)
    }
}

/// Function id -> roles allowed to call it.
#[derive(Debug, Clone, Default)]
pub struct FunctionBindingTable {
    masks: HashMap<FunctionId, RoleBitmask>,
}

impl FunctionBindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the bit flipped. Binding an already bound role is a
    /// no-op.
    pub fn bind(&mut self, func_id: FunctionId, role_id: u8) -> bool {
        let mask = self.masks.entry(func_id).or_default();
        if mask.contains(role_id) {
            return false;
        }
        *mask = mask.with(role_id);
        true
    }

    /// Returns whether the bit flipped.
    pub fn unbind(&mut self, func_id: FunctionId, role_id: u8) -> bool {
        let Some(mask) = self.masks.get_mut(&func_id) else {
            return false;
        };
        if !mask.contains(role_id) {
            return false;
        }
        *mask = mask.without(role_id);
        if mask.is_empty() {
            self.masks.remove(&func_id);
        }
        true
    }

    pub fn bound_mask(&self, func_id: FunctionId) -> RoleBitmask {
        self.masks.get(&func_id).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FunctionId, RoleBitmask)> + '_ {
        self.masks.iter().map(|(id, mask)| (*id, *mask))
    }
}
