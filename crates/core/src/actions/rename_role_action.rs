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

pub struct RenameRoleAction {
    registry: Address,
    role_id: u8,
    role: String,
}

impl RenameRoleAction {
    pub fn new(registry: Address, role_id: u8, role: String) -> Self {
        Self {
            registry,
            role_id,
            role,
        }
    }
}

impl AdminCall for RenameRoleAction {
    fn target(&self) -> Address {
        self.registry
    }
    fn data(&self) -> Bytes {
        let bytes_data = Access::renameRoleCall {
            roleId: self.role_id,
            role: self.role.clone(),
        }
        .abi_encode();
        Bytes::from(bytes_data)
    }
    fn describe(&self) -> Value {
        json!({
            "action": "RenameRoleAction",
            "registry": self.registry.to_string(),
            "role_id": self.role_id.to_string(),
            "role": self.role,
        })
    }
}

impl<A: Authority> AdminAction<A> for RenameRoleAction {
    fn execute(
        &self,
        registry: &mut AccessRegistry<A>,
        caller: Address,
    ) -> Result<(), AccessError> {
        registry.rename_role(caller, self.role_id, &self.role)
    }
}
