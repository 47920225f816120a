use alloy::primitives::{Address, B256, U256, aliases::B32, keccak256};
use serde::{Deserialize, Serialize};
use std::fmt;

const SELECTOR_BITS: usize = 96;

/// Packed `(target, selector)` pair: the target address fills the high 160
/// bits and the selector the low 32 bits, so distinct pairs never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionId(U256);

impl FunctionId {
    pub fn new(target: Address, selector: B32) -> Self {
        let target_bits = U256::from_be_slice(target.as_slice()) << SELECTOR_BITS;
        let selector_bits = U256::from(u32::from_be_bytes(selector.0));
        Self(target_bits | selector_bits)
    }

    pub fn from_signature(target: Address, function_signature: &str) -> Self {
        Self::new(target, selector_from_signature(function_signature))
    }

    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> U256 {
        self.0
    }

    pub fn target(&self) -> Address {
        Address::from_word(B256::from((self.0 >> SELECTOR_BITS).to_be_bytes::<32>()))
    }

    pub fn selector(&self) -> B32 {
        B32::from((self.0.as_limbs()[0] as u32).to_be_bytes())
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.to_be_bytes::<32>()))
    }
}

/// First 4 bytes of `keccak256(signature)`, e.g. `"transfer(address,uint256)"`.
pub fn selector_from_signature(function_signature: &str) -> B32 {
    B32::from_slice(&keccak256(function_signature.as_bytes())[..4])
}
