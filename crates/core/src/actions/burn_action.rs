use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use serde_json::{Value, json};

use crate::{
    actions::{admin_action::{AdminAction, AdminCall}, sender_type::SenderType},
    authority::Authority,
    bindings::access::Access,
    error::AccessError,
    registry::AccessRegistry,
};

pub struct BurnAction {
    registry: Address,
    token_id: U256,
    sender: SenderType,
}

impl BurnAction {
    /// `holder` is the sender when the registry lets holders burn their own
    /// grants; `None` sends as the registry owner.
    pub fn new(registry: Address, token_id: U256, holder: Option<Address>) -> Self {
        Self {
            registry,
            token_id,
            sender: holder.map_or(SenderType::RegistryOwner, SenderType::Account),
        }
    }
}

impl AdminCall for BurnAction {
    fn target(&self) -> Address {
        self.registry
    }
    fn data(&self) -> Bytes {
        let bytes_data = Access::burnCall {
            tokenId: self.token_id,
        }
        .abi_encode();
        Bytes::from(bytes_data)
    }
    fn sender(&self) -> SenderType {
        self.sender
    }
    fn describe(&self) -> Value {
        json!({
            "action": "BurnAction",
            "registry": self.registry.to_string(),
            "token_id": self.token_id.to_string(),
        })
    }
}

impl<A: Authority> AdminAction<A> for BurnAction {
    fn execute(
        &self,
        registry: &mut AccessRegistry<A>,
        caller: Address,
    ) -> Result<(), AccessError> {
        registry.burn(caller, self.token_id)
    }
}
