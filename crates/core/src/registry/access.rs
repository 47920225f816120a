use alloy::primitives::{Address, aliases::B32};

use super::{bindings::FunctionBindingTable, ledger::CapabilityTokenLedger};
use crate::error::AccessError;
use crate::types::function_id::FunctionId;

/// Read-only view answering "may this caller invoke this function". One AND
/// of the bound mask and the caller's aggregate mask, independent of how many
/// roles exist.
#[derive(Clone, Copy)]
pub struct AccessChecker<'a> {
    bindings: &'a FunctionBindingTable,
    ledger: &'a CapabilityTokenLedger,
}

impl<'a> AccessChecker<'a> {
    pub fn new(bindings: &'a FunctionBindingTable, ledger: &'a CapabilityTokenLedger) -> Self {
        Self { bindings, ledger }
    }

    pub fn has_access(&self, caller: Address, target: Address, selector: B32) -> bool {
        self.has_access_by_id(caller, FunctionId::new(target, selector))
    }

    pub fn has_access_by_id(&self, caller: Address, func_id: FunctionId) -> bool {
        self.bindings
            .bound_mask(func_id)
            .intersects(&self.ledger.role_mask_of(caller))
    }

    /// What a guarded entry point calls before running its body.
    pub fn require_access(
        &self,
        caller: Address,
        target: Address,
        selector: B32,
    ) -> Result<(), AccessError> {
        let func_id = FunctionId::new(target, selector);
        if self.has_access_by_id(caller, func_id) {
            Ok(())
        } else {
            Err(AccessError::AccessNotGranted { caller, func_id })
        }
    }
}
