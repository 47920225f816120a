use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;
use serde_json::{Value, json};

use crate::{
    actions::admin_action::{AdminAction, AdminCall},
    authority::Authority,
    bindings::access::Access,
    error::AccessError,
    registry::{AccessRegistry, bindings::RoleBinding},
};

pub(crate) fn role_data(binding: &RoleBinding) -> Access::RoleData {
    Access::RoleData {
        target: binding.target,
        selector: binding.selector,
        roleId: binding.role_id,
    }
}

pub(crate) fn describe_binding(binding: &RoleBinding) -> Value {
    json!({
        "target": binding.target.to_string(),
        "selector": binding.selector.to_string(),
        "role_id": binding.role_id.to_string(),
        "function_id": binding.function_id().to_string(),
    })
}

/// Binds (or, with `unbind`, unbinds) one role on one function.
pub struct BindRoleAction {
    registry: Address,
    binding: RoleBinding,
    unbind: bool,
}

impl BindRoleAction {
    pub fn new(registry: Address, binding: RoleBinding) -> Self {
        Self {
            registry,
            binding,
            unbind: false,
        }
    }

    pub fn unbind(registry: Address, binding: RoleBinding) -> Self {
        Self {
            registry,
            binding,
            unbind: true,
        }
    }
}

impl AdminCall for BindRoleAction {
    fn target(&self) -> Address {
        self.registry
    }
    fn data(&self) -> Bytes {
        let role_data = role_data(&self.binding);
        let bytes_data = if self.unbind {
            Access::unbindRoleCall {
                roleData: role_data,
            }
            .abi_encode()
        } else {
            Access::bindRoleCall {
                roleData: role_data,
            }
            .abi_encode()
        };
        Bytes::from(bytes_data)
    }
    fn describe(&self) -> Value {
        json!({
            "action": if self.unbind { "UnbindRoleAction" } else { "BindRoleAction" },
            "registry": self.registry.to_string(),
            "binding": describe_binding(&self.binding),
        })
    }
}

impl<A: Authority> AdminAction<A> for BindRoleAction {
    fn execute(
        &self,
        registry: &mut AccessRegistry<A>,
        caller: Address,
    ) -> Result<(), AccessError> {
        if self.unbind {
            registry.unbind_role(caller, self.binding)?;
        } else {
            registry.bind_role(caller, self.binding)?;
        }
        Ok(())
    }
}
