use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;
use serde_json::{Value, json};

use crate::{
    actions::admin_action::{AdminAction, AdminCall},
    authority::Authority,
    bindings::access::Access,
    error::AccessError,
    registry::AccessRegistry,
};

/// Adds or removes whitelist entries.
pub struct WhitelistAction {
    registry: Address,
    addresses: Vec<Address>,
    remove: bool,
}

impl WhitelistAction {
    pub fn add(registry: Address, addresses: Vec<Address>) -> Self {
        Self {
            registry,
            addresses,
            remove: false,
        }
    }

    pub fn remove(registry: Address, addresses: Vec<Address>) -> Self {
        Self {
            registry,
            addresses,
            remove: true,
        }
    }
}

impl AdminCall for WhitelistAction {
    fn target(&self) -> Address {
        self.registry
    }
    fn data(&self) -> Bytes {
        let addresses = self.addresses.clone();
        let bytes_data = if self.remove {
            Access::removeWhitelistCall { addresses }.abi_encode()
        } else {
            Access::addWhitelistCall { addresses }.abi_encode()
        };
        Bytes::from(bytes_data)
    }
    fn describe(&self) -> Value {
        json!({
            "action": if self.remove { "RemoveWhitelistAction" } else { "AddWhitelistAction" },
            "registry": self.registry.to_string(),
            "addresses": self.addresses.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
        })
    }
}

impl<A: Authority> AdminAction<A> for WhitelistAction {
    fn execute(
        &self,
        registry: &mut AccessRegistry<A>,
        caller: Address,
    ) -> Result<(), AccessError> {
        if self.remove {
            registry.remove_whitelist(caller, &self.addresses)
        } else {
            registry.add_whitelist(caller, &self.addresses)
        }
    }
}
