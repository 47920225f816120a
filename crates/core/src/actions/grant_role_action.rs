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

pub struct GrantRoleAction {
    registry: Address,
    user: Address,
    role_id: u8,
    non_transferable: bool,
}

impl GrantRoleAction {
    pub fn new(registry: Address, user: Address, role_id: u8, non_transferable: bool) -> Self {
        Self {
            registry,
            user,
            role_id,
            non_transferable,
        }
    }
}

impl AdminCall for GrantRoleAction {
    fn target(&self) -> Address {
        self.registry
    }
    fn data(&self) -> Bytes {
        // Plain grants use the two-argument entry point.
        let bytes_data = if self.non_transferable {
            Access::grantRoleTransferableCall {
                user: self.user,
                roleId: self.role_id,
                isNonTransferable: true,
            }
            .abi_encode()
        } else {
            Access::grantRoleCall {
                user: self.user,
                roleId: self.role_id,
            }
            .abi_encode()
        };
        Bytes::from(bytes_data)
    }
    fn describe(&self) -> Value {
        json!({
            "action": "GrantRoleAction",
            "registry": self.registry.to_string(),
            "user": self.user.to_string(),
            "role_id": self.role_id.to_string(),
            "non_transferable": self.non_transferable.to_string(),
        })
    }
}

impl<A: Authority> AdminAction<A> for GrantRoleAction {
    fn execute(
        &self,
        registry: &mut AccessRegistry<A>,
        caller: Address,
    ) -> Result<(), AccessError> {
        registry
            .grant_role_transferable(caller, self.user, self.role_id, self.non_transferable)
            .map(|_| ())
    }
}
