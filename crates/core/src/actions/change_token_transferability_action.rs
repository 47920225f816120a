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

pub struct ChangeTokenTransferabilityAction {
    registry: Address,
    token_id: U256,
    non_transferable: bool,
}

impl ChangeTokenTransferabilityAction {
    pub fn new(registry: Address, token_id: U256, non_transferable: bool) -> Self {
        Self {
            registry,
            token_id,
            non_transferable,
        }
    }
}

impl AdminCall for ChangeTokenTransferabilityAction {
    fn target(&self) -> Address {
        self.registry
    }
    fn data(&self) -> Bytes {
        let bytes_data = Access::changeTokenTransferabilityCall {
            tokenId: self.token_id,
            isNonTransferable: self.non_transferable,
        }
        .abi_encode();
        Bytes::from(bytes_data)
    }
    fn describe(&self) -> Value {
        json!({
            "action": "ChangeTokenTransferabilityAction",
            "registry": self.registry.to_string(),
            "token_id": self.token_id.to_string(),
            "non_transferable": self.non_transferable.to_string(),
        })
    }
}

impl<A: Authority> AdminAction<A> for ChangeTokenTransferabilityAction {
    fn execute(
        &self,
        registry: &mut AccessRegistry<A>,
        caller: Address,
    ) -> Result<(), AccessError> {
        registry.change_token_transferability(caller, self.token_id, self.non_transferable)
    }
}
