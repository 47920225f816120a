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

pub struct AddRoleAction {
    registry: Address,
    role: String,
}

impl AddRoleAction {
    pub fn new(registry: Address, role: String) -> Self {
        Self { registry, role }
    }
}

impl AdminCall for AddRoleAction {
    fn target(&self) -> Address {
        self.registry
    }
    fn data(&self) -> Bytes {
        let bytes_data = Access::addRoleCall {
            role: self.role.clone(),
        }
        .abi_encode();
        Bytes::from(bytes_data)
    }
    fn describe(&self) -> Value {
        json!({
            "action": "AddRoleAction",
            "registry": self.registry.to_string(),
            "role": self.role,
        })
    }
}

impl<A: Authority> AdminAction<A> for AddRoleAction {
    fn execute(
        &self,
        registry: &mut AccessRegistry<A>,
        caller: Address,
    ) -> Result<(), AccessError> {
        registry.add_role(caller, &self.role).map(|_| ())
    }
}
