use alloy::primitives::{Address, U256};
use serde::Serialize;

pub type TokenId = U256;

/// One role grant to one holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityToken {
    pub token_id: TokenId,
    pub owner: Address,
    pub role_id: u8,
    pub non_transferable: bool,
}
