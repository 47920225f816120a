use alloy::primitives::B256;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::AccessError;

pub const MAX_ROLE_NAME_LEN: usize = 32;

/// Role name stored the way the contract stores it: a `bytes32`, zero padded
/// on the right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleName(B256);

impl RoleName {
    pub fn new(name: &str) -> Result<Self, AccessError> {
        let bytes = name.as_bytes();
        if bytes.len() > MAX_ROLE_NAME_LEN {
            return Err(AccessError::TooBigRoleName(bytes.len()));
        }
        let mut word = [0u8; 32];
        word[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(B256::from(word)))
    }

    pub const fn as_word(&self) -> B256 {
        self.0
    }

    /// Name with the zero padding stripped.
    pub fn as_str(&self) -> String {
        let end = self
            .0
            .iter()
            .rposition(|b| *b != 0)
            .map(|i| i + 1)
            .unwrap_or(0);
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl Serialize for RoleName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub id: u8,
    pub name: RoleName,
}
