use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::AccessError;
use crate::types::token::CapabilityToken;

/// Who may burn a capability token. One registry applies exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurnPolicy {
    /// Only the registry owner revokes grants.
    #[default]
    RegistryOwner,
    /// Holders give up their own grants.
    TokenOwner,
}

/// Gates holder-initiated transfers. The whitelist is consulted by transfers
/// only, never by grants or burns.
#[derive(Debug, Clone, Default)]
pub struct TransferPolicy {
    whitelist_enabled: bool,
    whitelist: BTreeSet<Address>,
}

impl TransferPolicy {
    pub fn new(whitelist_enabled: bool) -> Self {
        Self {
            whitelist_enabled,
            whitelist: BTreeSet::new(),
        }
    }

    pub fn whitelist_enabled(&self) -> bool {
        self.whitelist_enabled
    }

    pub fn is_whitelisted(&self, account: Address) -> bool {
        self.whitelist.contains(&account)
    }

    /// Returns the addresses that were actually added.
    pub fn add(&mut self, addresses: &[Address]) -> Vec<Address> {
        addresses
            .iter()
            .copied()
            .filter(|a| self.whitelist.insert(*a))
            .collect()
    }

    /// Returns the addresses that were actually removed.
    pub fn remove(&mut self, addresses: &[Address]) -> Vec<Address> {
        addresses
            .iter()
            .copied()
            .filter(|a| self.whitelist.remove(a))
            .collect()
    }

    pub fn whitelist(&self) -> impl Iterator<Item = Address> + '_ {
        self.whitelist.iter().copied()
    }

    pub fn check_transfer(
        &self,
        token: &CapabilityToken,
        from: Address,
        to: Address,
    ) -> Result<(), AccessError> {
        if token.non_transferable {
            return Err(AccessError::TokenNonTransferable(token.token_id));
        }
        if self.whitelist_enabled {
            for account in [from, to] {
                if !self.is_whitelisted(account) {
                    return Err(AccessError::NotInWhitelist(account));
                }
            }
        }
        Ok(())
    }
}
