use alloy::primitives::{Address, Bytes, U256};
use serde_json::Value;

use super::sender_type::SenderType;
use crate::authority::{Authority, Ownable};
use crate::error::AccessError;
use crate::registry::AccessRegistry;

/// One registry call as it goes on chain.
pub trait AdminCall: Send + Sync {
    fn target(&self) -> Address;
    fn value(&self) -> U256 {
        U256::ZERO
    }
    fn data(&self) -> Bytes; // encode to tx data
    fn sender(&self) -> SenderType {
        SenderType::RegistryOwner
    }
    fn describe(&self) -> Value;
}

/// A call that can also run against an in-process registry governed by `A`.
pub trait AdminAction<A: Authority = Ownable>: AdminCall {
    fn execute(&self, registry: &mut AccessRegistry<A>, caller: Address) -> Result<(), AccessError>;

    /// Executes as the configured sender.
    fn apply(&self, registry: &mut AccessRegistry<A>) -> Result<(), AccessError> {
        let caller = self.sender().resolve(registry.owner());
        self.execute(registry, caller)
    }
}
