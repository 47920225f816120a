use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use serde_json::{Value, json};

use crate::{
    actions::admin_action::{AdminAction, AdminCall},
    authority::Authority,
    bindings::access::Access,
    error::AccessError,
    registry::AccessRegistry,
};

pub struct ChangeBatchTokenTransferabilityAction {
    registry: Address,
    changes: Vec<(U256, bool)>,
}

impl ChangeBatchTokenTransferabilityAction {
    pub fn new(registry: Address, changes: Vec<(U256, bool)>) -> Self {
        Self { registry, changes }
    }
}

impl AdminCall for ChangeBatchTokenTransferabilityAction {
    fn target(&self) -> Address {
        self.registry
    }
    fn data(&self) -> Bytes {
        let bytes_data = Access::changeBatchTokenTransferabilityCall {
            tokenTransferabilities: self
                .changes
                .iter()
                .map(|(token_id, non_transferable)| Access::TokenTransferability {
                    tokenId: *token_id,
                    isNonTransferable: *non_transferable,
                })
                .collect(),
        }
        .abi_encode();
        Bytes::from(bytes_data)
    }
    fn describe(&self) -> Value {
        let changes: Vec<Value> = self
            .changes
            .iter()
            .map(|(token_id, non_transferable)| {
                json!({
                    "token_id": token_id.to_string(),
                    "non_transferable": non_transferable.to_string(),
                })
            })
            .collect();
        json!({
            "action": "ChangeBatchTokenTransferabilityAction",
            "registry": self.registry.to_string(),
            "changes": changes,
        })
    }
}

impl<A: Authority> AdminAction<A> for ChangeBatchTokenTransferabilityAction {
    fn execute(
        &self,
        registry: &mut AccessRegistry<A>,
        caller: Address,
    ) -> Result<(), AccessError> {
        registry
            .change_batch_token_transferability(caller, &self.changes)
            .map(|_| ())
    }
}
