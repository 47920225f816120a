use alloy::primitives::{Address, LogData, U256};
use alloy::sol_types::SolEvent;
use serde::Serialize;
use serde_json::{Value, json};

use crate::bindings::access::Access;
use crate::types::{function_id::FunctionId, role::RoleName, token::TokenId};

/// Audit record of one actual state transition. Indexers learn assigned role
/// ids and token ids only through these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event")]
pub enum RegistryEvent {
    RoleAdded {
        role: RoleName,
        role_id: u8,
    },
    RoleRenamed {
        role: RoleName,
        role_id: u8,
    },
    RoleBound {
        func_id: FunctionId,
        role_id: u8,
    },
    RoleUnbound {
        func_id: FunctionId,
        role_id: u8,
    },
    RoleGranted {
        user: Address,
        role_id: u8,
    },
    TokenTransferabilityChanged {
        token_id: TokenId,
        is_non_transferable: bool,
    },
    /// `from == 0` marks a mint, `to == 0` a burn.
    Transfer {
        from: Address,
        to: Address,
        token_id: TokenId,
    },
    Approval {
        owner: Address,
        approved: Address,
        token_id: TokenId,
    },
    ApprovalForAll {
        owner: Address,
        operator: Address,
        approved: bool,
    },
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
}

impl RegistryEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RoleAdded { .. } => "RoleAdded",
            Self::RoleRenamed { .. } => "RoleRenamed",
            Self::RoleBound { .. } => "RoleBound",
            Self::RoleUnbound { .. } => "RoleUnbound",
            Self::RoleGranted { .. } => "RoleGranted",
            Self::TokenTransferabilityChanged { .. } => "TokenTransferabilityChanged",
            Self::Transfer { .. } => "Transfer",
            Self::Approval { .. } => "Approval",
            Self::ApprovalForAll { .. } => "ApprovalForAll",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
        }
    }

    pub fn is_mint(&self) -> bool {
        matches!(self, Self::Transfer { from, .. } if from.is_zero())
    }

    pub fn is_burn(&self) -> bool {
        matches!(self, Self::Transfer { to, .. } if to.is_zero())
    }

    /// EVM log body (topics + data) of the matching contract event.
    pub fn to_log_data(&self) -> LogData {
        match self {
            Self::RoleAdded { role, role_id } => Access::RoleAdded {
                role: role.as_word(),
                roleId: *role_id,
            }
            .encode_log_data(),
            Self::RoleRenamed { role, role_id } => Access::RoleRenamed {
                role: role.as_word(),
                roleId: *role_id,
            }
            .encode_log_data(),
            Self::RoleBound { func_id, role_id } => Access::RoleBound {
                funcId: func_id.raw(),
                roleId: *role_id,
            }
            .encode_log_data(),
            Self::RoleUnbound { func_id, role_id } => Access::RoleUnbound {
                funcId: func_id.raw(),
                roleId: *role_id,
            }
            .encode_log_data(),
            Self::RoleGranted { user, role_id } => Access::RoleGranted {
                user: *user,
                roleId: *role_id,
            }
            .encode_log_data(),
            Self::TokenTransferabilityChanged {
                token_id,
                is_non_transferable,
            } => Access::TokenTransferabilityChanged {
                tokenId: *token_id,
                isNonTransferable: *is_non_transferable,
            }
            .encode_log_data(),
            Self::Transfer { from, to, token_id } => Access::Transfer {
                from: *from,
                to: *to,
                tokenId: *token_id,
            }
            .encode_log_data(),
            Self::Approval {
                owner,
                approved,
                token_id,
            } => Access::Approval {
                owner: *owner,
                approved: *approved,
                tokenId: *token_id,
            }
            .encode_log_data(),
            Self::ApprovalForAll {
                owner,
                operator,
                approved,
            } => Access::ApprovalForAll {
                owner: *owner,
                operator: *operator,
                approved: *approved,
            }
            .encode_log_data(),
            Self::OwnershipTransferred {
                previous_owner,
                new_owner,
            } => Access::OwnershipTransferred {
                previousOwner: *previous_owner,
                newOwner: *new_owner,
            }
            .encode_log_data(),
        }
    }

    pub fn describe(&self) -> Value {
        match self {
            Self::RoleAdded { role, role_id } | Self::RoleRenamed { role, role_id } => json!({
                "event": self.name(),
                "role": role.to_string(),
                "role_id": role_id.to_string(),
            }),
            Self::RoleBound { func_id, role_id } | Self::RoleUnbound { func_id, role_id } => {
                json!({
                    "event": self.name(),
                    "func_id": func_id.to_string(),
                    "target": func_id.target().to_string(),
                    "selector": func_id.selector().to_string(),
                    "role_id": role_id.to_string(),
                })
            }
            Self::RoleGranted { user, role_id } => json!({
                "event": self.name(),
                "user": user.to_string(),
                "role_id": role_id.to_string(),
            }),
            Self::TokenTransferabilityChanged {
                token_id,
                is_non_transferable,
            } => json!({
                "event": self.name(),
                "token_id": token_id.to_string(),
                "is_non_transferable": is_non_transferable.to_string(),
            }),
            Self::Transfer { from, to, token_id } => json!({
                "event": self.name(),
                "from": from.to_string(),
                "to": to.to_string(),
                "token_id": token_id.to_string(),
            }),
            Self::Approval {
                owner,
                approved,
                token_id,
            } => json!({
                "event": self.name(),
                "owner": owner.to_string(),
                "approved": approved.to_string(),
                "token_id": token_id.to_string(),
            }),
            Self::ApprovalForAll {
                owner,
                operator,
                approved,
            } => json!({
                "event": self.name(),
                "owner": owner.to_string(),
                "operator": operator.to_string(),
                "approved": approved.to_string(),
            }),
            Self::OwnershipTransferred {
                previous_owner,
                new_owner,
            } => json!({
                "event": self.name(),
                "previous_owner": previous_owner.to_string(),
                "new_owner": new_owner.to_string(),
            }),
        }
    }
}

/// Token ids minted by a batch of events, in emission order.
pub fn minted_token_ids(events: &[RegistryEvent]) -> Vec<U256> {
    events
        .iter()
        .filter_map(|e| match e {
            RegistryEvent::Transfer { from, token_id, .. } if from.is_zero() => Some(*token_id),
            _ => None,
        })
        .collect()
}
