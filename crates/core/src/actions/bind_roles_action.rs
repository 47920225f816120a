use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;
use serde_json::{Value, json};

use crate::{
    actions::{
        admin_action::{AdminAction, AdminCall},
        bind_role_action::{describe_binding, role_data},
    },
    authority::Authority,
    bindings::access::Access,
    error::AccessError,
    registry::{AccessRegistry, bindings::RoleBinding},
};

pub struct BindRolesAction {
    registry: Address,
    bindings: Vec<RoleBinding>,
}

impl BindRolesAction {
    pub fn new(registry: Address, bindings: Vec<RoleBinding>) -> Self {
        Self { registry, bindings }
    }
}

impl AdminCall for BindRolesAction {
    fn target(&self) -> Address {
        self.registry
    }
    fn data(&self) -> Bytes {
        let bytes_data = Access::bindRolesCall {
            roleDatas: self.bindings.iter().map(role_data).collect(),
        }
        .abi_encode();
        Bytes::from(bytes_data)
    }
    fn describe(&self) -> Value {
        json!({
            "action": "BindRolesAction",
            "registry": self.registry.to_string(),
            "bindings": self.bindings.iter().map(describe_binding).collect::<Vec<_>>(),
        })
    }
}

impl<A: Authority> AdminAction<A> for BindRolesAction {
    fn execute(
        &self,
        registry: &mut AccessRegistry<A>,
        caller: Address,
    ) -> Result<(), AccessError> {
        registry.bind_roles(caller, &self.bindings).map(|_| ())
    }
}
