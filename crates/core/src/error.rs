//! Errors raised by the registry core.
//!
//! Every failing operation aborts before touching state, so an error is
//! always the whole outcome of the call. The variants map one to one onto the
//! custom errors of the on-chain contract (see [`AccessError::revert_data`]).

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolError;
use thiserror::Error;

use crate::bindings::access::Access;
use crate::types::function_id::FunctionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Non-admin calling an admin-only operation.
    Authorization,
    Validation,
    StateConflict,
    Ownership,
    Policy,
    /// Raised by protected callers, never by a registry mutation.
    AccessDenied,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("account {0} is not the registry owner")]
    Unauthorized(Address),

    #[error("invalid registry owner {0}")]
    InvalidOwner(Address),

    #[error("role name is {0} bytes, at most 32 allowed")]
    TooBigRoleName(usize),

    #[error("all 256 roles are already defined")]
    MaxRolesReached,

    #[error("role {0} does not exist")]
    RoleNotExists(u8),

    #[error("token {0} does not exist")]
    NonexistentToken(U256),

    #[error("invalid receiver {0}")]
    InvalidReceiver(Address),

    #[error("invalid operator {0}")]
    InvalidOperator(Address),

    #[error("{from} does not own token {token_id} (owner is {owner})")]
    IncorrectOwner {
        from: Address,
        token_id: U256,
        owner: Address,
    },

    #[error("{user} already holds role {role_id}")]
    RoleAlreadyGranted { user: Address, role_id: u8 },

    #[error("token {0} already has the requested transferability")]
    NoChanges(U256),

    #[error("{caller} is not the owner of token {token_id}")]
    NotTokenOwner { caller: Address, token_id: U256 },

    #[error("token {0} is non-transferable")]
    TokenNonTransferable(U256),

    #[error("{0} is not whitelisted")]
    NotInWhitelist(Address),

    #[error("{caller} has no role bound to function {func_id}")]
    AccessNotGranted { caller: Address, func_id: FunctionId },
}

impl AccessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) => ErrorKind::Authorization,
            Self::InvalidOwner(_)
            | Self::TooBigRoleName(_)
            | Self::MaxRolesReached
            | Self::RoleNotExists(_)
            | Self::NonexistentToken(_)
            | Self::InvalidReceiver(_)
            | Self::InvalidOperator(_) => ErrorKind::Validation,
            Self::RoleAlreadyGranted { .. } | Self::NoChanges(_) => ErrorKind::StateConflict,
            Self::IncorrectOwner { .. } | Self::NotTokenOwner { .. } => ErrorKind::Ownership,
            Self::TokenNonTransferable(_) | Self::NotInWhitelist(_) => ErrorKind::Policy,
            Self::AccessNotGranted { .. } => ErrorKind::AccessDenied,
        }
    }

    /// Static error code string, matches the contract's custom error name.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "OwnableUnauthorizedAccount",
            Self::InvalidOwner(_) => "OwnableInvalidOwner",
            Self::TooBigRoleName(_) => "TooBigRoleName",
            Self::MaxRolesReached => "MaxRolesReached",
            Self::RoleNotExists(_) => "RoleNotExists",
            Self::NonexistentToken(_) => "ERC721NonexistentToken",
            Self::InvalidReceiver(_) => "ERC721InvalidReceiver",
            Self::InvalidOperator(_) => "ERC721InvalidOperator",
            Self::IncorrectOwner { .. } => "ERC721IncorrectOwner",
            Self::RoleAlreadyGranted { .. } => "RoleAlreadyGranted",
            Self::NoChanges(_) => "NoChanges",
            Self::NotTokenOwner { .. } => "NotTokenOwner",
            Self::TokenNonTransferable(_) => "TokenNonTransferable",
            Self::NotInWhitelist(_) => "NotInWhitelist",
            Self::AccessNotGranted { .. } => "AccessNotGranted",
        }
    }

    /// ABI-encoded custom error, as a reverting contract would return it.
    pub fn revert_data(&self) -> Bytes {
        let encoded = match self {
            Self::Unauthorized(account) => {
                Access::OwnableUnauthorizedAccount { account: *account }.abi_encode()
            }
            Self::InvalidOwner(owner) => Access::OwnableInvalidOwner { owner: *owner }.abi_encode(),
            Self::TooBigRoleName(_) => Access::TooBigRoleName {}.abi_encode(),
            Self::MaxRolesReached => Access::MaxRolesReached {}.abi_encode(),
            Self::RoleNotExists(role_id) => Access::RoleNotExists { roleId: *role_id }.abi_encode(),
            Self::NonexistentToken(token_id) => Access::ERC721NonexistentToken {
                tokenId: *token_id,
            }
            .abi_encode(),
            Self::InvalidReceiver(receiver) => Access::ERC721InvalidReceiver {
                receiver: *receiver,
            }
            .abi_encode(),
            Self::InvalidOperator(operator) => Access::ERC721InvalidOperator {
                operator: *operator,
            }
            .abi_encode(),
            Self::IncorrectOwner {
                from,
                token_id,
                owner,
            } => Access::ERC721IncorrectOwner {
                sender: *from,
                tokenId: *token_id,
                owner: *owner,
            }
            .abi_encode(),
            Self::RoleAlreadyGranted { .. } => Access::RoleAlreadyGranted {}.abi_encode(),
            Self::NoChanges(_) => Access::NoChanges {}.abi_encode(),
            Self::NotTokenOwner { .. } => Access::NotTokenOwner {}.abi_encode(),
            Self::TokenNonTransferable(_) => Access::TokenNonTransferable {}.abi_encode(),
            Self::NotInWhitelist(_) => Access::NotInWhitelist {}.abi_encode(),
            Self::AccessNotGranted { .. } => Access::AccessNotGranted {}.abi_encode(),
        };
        Bytes::from(encoded)
    }
}
