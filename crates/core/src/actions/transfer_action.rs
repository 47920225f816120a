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

/// Holder-initiated move of a capability token. Sent by `from` unless an
/// approved operator is named.
pub struct TransferAction {
    registry: Address,
    from: Address,
    to: Address,
    token_id: U256,
    operator: Option<Address>,
}

impl TransferAction {
    pub fn new(
        registry: Address,
        from: Address,
        to: Address,
        token_id: U256,
        operator: Option<Address>,
    ) -> Self {
        Self {
            registry,
            from,
            to,
            token_id,
            operator,
        }
    }
}

impl AdminCall for TransferAction {
    fn target(&self) -> Address {
        self.registry
    }
    fn data(&self) -> Bytes {
        let bytes_data = Access::transferFromCall {
            from: self.from,
            to: self.to,
            tokenId: self.token_id,
        }
        .abi_encode();
        Bytes::from(bytes_data)
    }
    fn sender(&self) -> SenderType {
        SenderType::Account(self.operator.unwrap_or(self.from))
    }
    fn describe(&self) -> Value {
        json!({
            "action": "TransferAction",
            "registry": self.registry.to_string(),
            "from": self.from.to_string(),
            "to": self.to.to_string(),
            "token_id": self.token_id.to_string(),
        })
    }
}

impl<A: Authority> AdminAction<A> for TransferAction {
    fn execute(
        &self,
        registry: &mut AccessRegistry<A>,
        caller: Address,
    ) -> Result<(), AccessError> {
        registry.transfer_from(caller, self.from, self.to, self.token_id)
    }
}
