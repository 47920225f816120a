use alloy::primitives::{Address, U256};
use log::debug;
use std::collections::{BTreeSet, HashMap};

use super::transfer_policy::TransferPolicy;
use crate::error::AccessError;
use crate::types::{
    role_bitmask::RoleBitmask,
    token::{CapabilityToken, TokenId},
};

/// Non-fungible grant ledger. Keeps, next to the tokens themselves, the
/// aggregate role mask of every holder and an enumerable holder -> tokens
/// index. All three move together inside a single call.
#[derive(Debug, Clone, Default)]
pub struct CapabilityTokenLedger {
    tokens: HashMap<TokenId, CapabilityToken>,
    // Global enumeration, swap-remove on burn.
    all_tokens: Vec<TokenId>,
    all_index: HashMap<TokenId, usize>,
    // Holder enumeration, swap-remove on burn/transfer.
    owned: HashMap<Address, Vec<TokenId>>,
    owned_index: HashMap<TokenId, usize>,
    masks: HashMap<Address, RoleBitmask>,
    approvals: HashMap<TokenId, Address>,
    operators: HashMap<Address, BTreeSet<Address>>,
    next_token_id: TokenId,
}

impl CapabilityTokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(
        &mut self,
        to: Address,
        role_id: u8,
        non_transferable: bool,
    ) -> Result<TokenId, AccessError> {
        if to.is_zero() {
            return Err(AccessError::InvalidReceiver(to));
        }
        if self.role_mask_of(to).contains(role_id) {
            return Err(AccessError::RoleAlreadyGranted { user: to, role_id });
        }

        let token_id = self.next_token_id;
        self.next_token_id += U256::from(1u8);

        self.tokens.insert(
            token_id,
            CapabilityToken {
                token_id,
                owner: to,
                role_id,
                non_transferable,
            },
        );
        self.all_index.insert(token_id, self.all_tokens.len());
        self.all_tokens.push(token_id);
        self.attach(to, token_id, role_id);

        debug!("minted token {} (role {}) to {}", token_id, role_id, to);
        Ok(token_id)
    }

    /// Moves `token_id` from `from` to `to` once every check passed; the
    /// sender's role bit is cleared and the recipient's set in the same step.
    pub fn transfer(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
        policy: &TransferPolicy,
    ) -> Result<(), AccessError> {
        let token = self.require(token_id)?;
        if to.is_zero() {
            return Err(AccessError::InvalidReceiver(to));
        }
        if !self.is_authorized(caller, token) {
            return Err(AccessError::NotTokenOwner { caller, token_id });
        }
        if token.owner != from {
            return Err(AccessError::IncorrectOwner {
                from,
                token_id,
                owner: token.owner,
            });
        }
        policy.check_transfer(token, from, to)?;
        let role_id = token.role_id;
        if self.role_mask_of(to).contains(role_id) {
            return Err(AccessError::RoleAlreadyGranted { user: to, role_id });
        }

        self.approvals.remove(&token_id);
        self.detach(from, token_id, role_id);
        self.attach(to, token_id, role_id);
        if let Some(token) = self.tokens.get_mut(&token_id) {
            token.owner = to;
        }

        debug!("token {} (role {}) moved {} -> {}", token_id, role_id, from, to);
        Ok(())
    }

    /// Deletes the token for good, its id is never handed out again.
    pub fn burn(&mut self, token_id: TokenId) -> Result<CapabilityToken, AccessError> {
        let token = self
            .tokens
            .remove(&token_id)
            .ok_or(AccessError::NonexistentToken(token_id))?;

        self.approvals.remove(&token_id);
        self.detach(token.owner, token_id, token.role_id);
        if let Some(index) = self.all_index.remove(&token_id) {
            self.all_tokens.swap_remove(index);
            if let Some(moved) = self.all_tokens.get(index) {
                self.all_index.insert(*moved, index);
            }
        }

        debug!("burned token {} (role {}) of {}", token_id, token.role_id, token.owner);
        Ok(token)
    }

    /// Returns whether the flag changed.
    pub fn set_non_transferable(
        &mut self,
        token_id: TokenId,
        non_transferable: bool,
    ) -> Result<bool, AccessError> {
        let token = self
            .tokens
            .get_mut(&token_id)
            .ok_or(AccessError::NonexistentToken(token_id))?;
        if token.non_transferable == non_transferable {
            return Ok(false);
        }
        token.non_transferable = non_transferable;
        Ok(true)
    }

    pub fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        token_id: TokenId,
    ) -> Result<Address, AccessError> {
        let owner = self.require(token_id)?.owner;
        if caller != owner && !self.is_approved_for_all(owner, caller) {
            return Err(AccessError::NotTokenOwner { caller, token_id });
        }
        if spender.is_zero() {
            self.approvals.remove(&token_id);
        } else {
            self.approvals.insert(token_id, spender);
        }
        Ok(owner)
    }

    pub fn set_approval_for_all(&mut self, owner: Address, operator: Address, approved: bool) {
        let set = self.operators.entry(owner).or_default();
        if approved {
            set.insert(operator);
        } else {
            set.remove(&operator);
            if set.is_empty() {
                self.operators.remove(&owner);
            }
        }
    }

    pub fn require(&self, token_id: TokenId) -> Result<&CapabilityToken, AccessError> {
        self.tokens
            .get(&token_id)
            .ok_or(AccessError::NonexistentToken(token_id))
    }

    pub fn token(&self, token_id: TokenId) -> Option<&CapabilityToken> {
        self.tokens.get(&token_id)
    }

    pub fn owner_of(&self, token_id: TokenId) -> Option<Address> {
        self.tokens.get(&token_id).map(|t| t.owner)
    }

    pub fn role_mask_of(&self, holder: Address) -> RoleBitmask {
        self.masks.get(&holder).copied().unwrap_or_default()
    }

    pub fn balance_of(&self, holder: Address) -> usize {
        self.owned.get(&holder).map_or(0, Vec::len)
    }

    pub fn tokens_of(&self, holder: Address) -> &[TokenId] {
        self.owned.get(&holder).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn token_of_owner_by_index(&self, holder: Address, index: usize) -> Option<TokenId> {
        self.tokens_of(holder).get(index).copied()
    }

    pub fn total_supply(&self) -> usize {
        self.all_tokens.len()
    }

    pub fn token_by_index(&self, index: usize) -> Option<TokenId> {
        self.all_tokens.get(index).copied()
    }

    pub fn get_approved(&self, token_id: TokenId) -> Option<Address> {
        self.approvals.get(&token_id).copied()
    }

    pub fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.operators
            .get(&owner)
            .is_some_and(|set| set.contains(&operator))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CapabilityToken> + '_ {
        self.all_tokens.iter().filter_map(|id| self.tokens.get(id))
    }

    fn is_authorized(&self, caller: Address, token: &CapabilityToken) -> bool {
        caller == token.owner
            || self.get_approved(token.token_id) == Some(caller)
            || self.is_approved_for_all(token.owner, caller)
    }

    fn attach(&mut self, holder: Address, token_id: TokenId, role_id: u8) {
        let list = self.owned.entry(holder).or_default();
        self.owned_index.insert(token_id, list.len());
        list.push(token_id);
        let mask = self.masks.entry(holder).or_default();
        *mask = mask.with(role_id);
    }

    fn detach(&mut self, holder: Address, token_id: TokenId, role_id: u8) {
        if let Some(index) = self.owned_index.remove(&token_id) {
            if let Some(list) = self.owned.get_mut(&holder) {
                list.swap_remove(index);
                if let Some(moved) = list.get(index) {
                    self.owned_index.insert(*moved, index);
                }
                if list.is_empty() {
                    self.owned.remove(&holder);
                }
            }
        }
        // At most one token per role per holder, so the bit can be cleared.
        if let Some(mask) = self.masks.get_mut(&holder) {
            *mask = mask.without(role_id);
            if mask.is_empty() {
                self.masks.remove(&holder);
            }
        }
    }
}
