//! The authorization core: roles, function bindings, the capability token
//! ledger and the access check, behind one owner-gated facade.
//!
//! Every operation validates completely before it mutates anything, so a
//! returned error means nothing changed and no event was recorded.

pub mod access;
pub mod bindings;
pub mod ledger;
pub mod roles;
pub mod transfer_policy;

use alloy::primitives::{Address, aliases::B32};
use log::info;
use serde::Serialize;

use self::access::AccessChecker;
use self::bindings::{FunctionBindingTable, RoleBinding};
use self::ledger::CapabilityTokenLedger;
use self::roles::RoleRegistry;
use self::transfer_policy::{BurnPolicy, TransferPolicy};
use crate::authority::{Authority, Ownable};
use crate::error::AccessError;
use crate::events::RegistryEvent;
use crate::types::{
    function_id::FunctionId,
    registry_settings::RegistrySettings,
    role::{Role, RoleName},
    role_bitmask::RoleBitmask,
    token::{CapabilityToken, TokenId},
};

#[derive(Debug, Clone)]
pub struct AccessRegistry<A: Authority = Ownable> {
    name: String,
    symbol: String,
    authority: A,
    burn_policy: BurnPolicy,
    roles: RoleRegistry,
    bindings: FunctionBindingTable,
    ledger: CapabilityTokenLedger,
    transfer_policy: TransferPolicy,
    events: Vec<RegistryEvent>,
}

impl AccessRegistry<Ownable> {
    pub fn new(settings: &RegistrySettings) -> Result<Self, AccessError> {
        let authority = Ownable::new(settings.owner)?;
        let mut transfer_policy = TransferPolicy::new(settings.whitelist_enabled);
        transfer_policy.add(&settings.whitelist);
        Ok(Self::with_authority(
            &settings.name,
            &settings.symbol,
            authority,
            settings.burn_policy,
            transfer_policy,
        ))
    }

    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), AccessError> {
        let event = self.authority.transfer_ownership(caller, new_owner)?;
        self.events.push(event);
        Ok(())
    }

    pub fn renounce_ownership(&mut self, caller: Address) -> Result<(), AccessError> {
        let event = self.authority.renounce_ownership(caller)?;
        self.events.push(event);
        Ok(())
    }
}

impl<A: Authority> AccessRegistry<A> {
    pub fn with_authority(
        name: &str,
        symbol: &str,
        authority: A,
        burn_policy: BurnPolicy,
        transfer_policy: TransferPolicy,
    ) -> Self {
        info!(
            "registry {} ({}) owned by {}, burn policy {:?}",
            name,
            symbol,
            authority.owner(),
            burn_policy
        );
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            authority,
            burn_policy,
            roles: RoleRegistry::new(),
            bindings: FunctionBindingTable::new(),
            ledger: CapabilityTokenLedger::new(),
            transfer_policy,
            events: Vec::new(),
        }
    }

    // ---- roles ----

    pub fn add_role(&mut self, caller: Address, name: &str) -> Result<u8, AccessError> {
        self.authority.authorize(caller)?;
        let role = self.roles.add(name)?;
        info!("role {} added with id {}", role.name, role.id);
        self.events.push(RegistryEvent::RoleAdded {
            role: role.name,
            role_id: role.id,
        });
        Ok(role.id)
    }

    /// Bindings and grants of the role are untouched.
    pub fn rename_role(
        &mut self,
        caller: Address,
        role_id: u8,
        new_name: &str,
    ) -> Result<(), AccessError> {
        self.authority.authorize(caller)?;
        let role = self.roles.rename(role_id, new_name)?;
        info!("role {} renamed to {}", role.id, role.name);
        self.events.push(RegistryEvent::RoleRenamed {
            role: role.name,
            role_id: role.id,
        });
        Ok(())
    }

    pub fn get_role(&self, role_id: u8) -> Option<RoleName> {
        self.roles.get(role_id)
    }

    pub fn role_count(&self) -> usize {
        self.roles.count()
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter()
    }

    // ---- bindings ----

    /// Returns whether the binding changed. Repeats are silent no-ops.
    pub fn bind_role(&mut self, caller: Address, binding: RoleBinding) -> Result<bool, AccessError> {
        self.bind_roles(caller, &[binding]).map(|n| n == 1)
    }

    /// Applies every entry independently, in order; only entries that flip a
    /// bit emit `RoleBound`. Returns how many did.
    pub fn bind_roles(
        &mut self,
        caller: Address,
        bindings: &[RoleBinding],
    ) -> Result<usize, AccessError> {
        self.authority.authorize(caller)?;
        for binding in bindings {
            self.roles.ensure_exists(binding.role_id)?;
        }

        let mut changed = 0;
        for binding in bindings {
            let func_id = binding.function_id();
            if self.bindings.bind(func_id, binding.role_id) {
                info!("role {} bound to {}", binding.role_id, func_id);
                self.events.push(RegistryEvent::RoleBound {
                    func_id,
                    role_id: binding.role_id,
                });
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Returns whether the binding changed. Repeats are silent no-ops.
    pub fn unbind_role(
        &mut self,
        caller: Address,
        binding: RoleBinding,
    ) -> Result<bool, AccessError> {
        self.authority.authorize(caller)?;
        self.roles.ensure_exists(binding.role_id)?;

        let func_id = binding.function_id();
        if !self.bindings.unbind(func_id, binding.role_id) {
            return Ok(false);
        }
        info!("role {} unbound from {}", binding.role_id, func_id);
        self.events.push(RegistryEvent::RoleUnbound {
            func_id,
            role_id: binding.role_id,
        });
        Ok(true)
    }

    pub fn get_function_id(&self, target: Address, selector: B32) -> FunctionId {
        FunctionId::new(target, selector)
    }

    pub fn get_bound_mask(&self, func_id: FunctionId) -> RoleBitmask {
        self.bindings.bound_mask(func_id)
    }

    // ---- grants ----

    pub fn grant_role(
        &mut self,
        caller: Address,
        user: Address,
        role_id: u8,
    ) -> Result<TokenId, AccessError> {
        self.grant_role_transferable(caller, user, role_id, false)
    }

    pub fn grant_role_non_transferable(
        &mut self,
        caller: Address,
        user: Address,
        role_id: u8,
    ) -> Result<TokenId, AccessError> {
        self.grant_role_transferable(caller, user, role_id, true)
    }

    /// Mints one token for `(user, role_id)`. Grants never consult the
    /// whitelist.
    pub fn grant_role_transferable(
        &mut self,
        caller: Address,
        user: Address,
        role_id: u8,
        non_transferable: bool,
    ) -> Result<TokenId, AccessError> {
        self.authority.authorize(caller)?;
        self.roles.ensure_exists(role_id)?;
        let token_id = self.ledger.mint(user, role_id, non_transferable)?;

        info!(
            "role {} granted to {} as token {} (non-transferable: {})",
            role_id, user, token_id, non_transferable
        );
        self.events.push(RegistryEvent::RoleGranted { user, role_id });
        self.events.push(RegistryEvent::Transfer {
            from: Address::ZERO,
            to: user,
            token_id,
        });
        Ok(token_id)
    }

    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<(), AccessError> {
        self.ledger
            .transfer(caller, from, to, token_id, &self.transfer_policy)?;
        self.events
            .push(RegistryEvent::Transfer { from, to, token_id });
        Ok(())
    }

    pub fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        token_id: TokenId,
    ) -> Result<(), AccessError> {
        let owner = self.ledger.approve(caller, spender, token_id)?;
        self.events.push(RegistryEvent::Approval {
            owner,
            approved: spender,
            token_id,
        });
        Ok(())
    }

    pub fn set_approval_for_all(
        &mut self,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), AccessError> {
        if operator.is_zero() {
            return Err(AccessError::InvalidOperator(operator));
        }
        self.ledger.set_approval_for_all(caller, operator, approved);
        self.events.push(RegistryEvent::ApprovalForAll {
            owner: caller,
            operator,
            approved,
        });
        Ok(())
    }

    /// Revokes one grant, subject to the registry's burn policy.
    pub fn burn(&mut self, caller: Address, token_id: TokenId) -> Result<(), AccessError> {
        self.authorize_burn(caller, token_id)?;
        self.burn_unchecked(token_id)
    }

    /// Burns every token `holder` owns, all or nothing. Returns the burned ids
    /// in holder-index order.
    pub fn revoke_all(
        &mut self,
        caller: Address,
        holder: Address,
    ) -> Result<Vec<TokenId>, AccessError> {
        self.authority.authorize(caller)?;
        let token_ids = self.ledger.tokens_of(holder).to_vec();
        for token_id in &token_ids {
            self.authorize_burn(caller, *token_id)?;
        }

        for token_id in &token_ids {
            self.burn_unchecked(*token_id)?;
        }
        info!("revoked {} grant(s) of {}", token_ids.len(), holder);
        Ok(token_ids)
    }

    /// Rejections are `NotTokenOwner` under either policy. Under
    /// `RegistryOwner` the caller is checked before the token is looked up.
    fn authorize_burn(&self, caller: Address, token_id: TokenId) -> Result<(), AccessError> {
        let allowed = match self.burn_policy {
            BurnPolicy::RegistryOwner => self.authority.authorize(caller).is_ok(),
            BurnPolicy::TokenOwner => self.ledger.require(token_id)?.owner == caller,
        };
        if allowed {
            Ok(())
        } else {
            Err(AccessError::NotTokenOwner { caller, token_id })
        }
    }

    fn burn_unchecked(&mut self, token_id: TokenId) -> Result<(), AccessError> {
        let token = self.ledger.burn(token_id)?;
        info!(
            "token {} burned, {} loses role {}",
            token_id, token.owner, token.role_id
        );
        self.events.push(RegistryEvent::Transfer {
            from: token.owner,
            to: Address::ZERO,
            token_id,
        });
        Ok(())
    }

    // ---- transferability ----

    /// Fails with `NoChanges` when the token already has the requested flag.
    pub fn change_token_transferability(
        &mut self,
        caller: Address,
        token_id: TokenId,
        non_transferable: bool,
    ) -> Result<(), AccessError> {
        self.authority.authorize(caller)?;
        if !self.ledger.set_non_transferable(token_id, non_transferable)? {
            return Err(AccessError::NoChanges(token_id));
        }
        self.events.push(RegistryEvent::TokenTransferabilityChanged {
            token_id,
            is_non_transferable: non_transferable,
        });
        Ok(())
    }

    /// Unchanged entries are skipped rather than rejected. Returns how many
    /// tokens changed.
    pub fn change_batch_token_transferability(
        &mut self,
        caller: Address,
        changes: &[(TokenId, bool)],
    ) -> Result<usize, AccessError> {
        self.authority.authorize(caller)?;
        for (token_id, _) in changes {
            self.ledger.require(*token_id)?;
        }

        let mut changed = 0;
        for (token_id, non_transferable) in changes {
            if self.ledger.set_non_transferable(*token_id, *non_transferable)? {
                self.events.push(RegistryEvent::TokenTransferabilityChanged {
                    token_id: *token_id,
                    is_non_transferable: *non_transferable,
                });
                changed += 1;
            }
        }
        Ok(changed)
    }

    // ---- whitelist ----

    pub fn add_whitelist(
        &mut self,
        caller: Address,
        addresses: &[Address],
    ) -> Result<(), AccessError> {
        self.authority.authorize(caller)?;
        for added in self.transfer_policy.add(addresses) {
            info!("{} whitelisted", added);
        }
        Ok(())
    }

    pub fn remove_whitelist(
        &mut self,
        caller: Address,
        addresses: &[Address],
    ) -> Result<(), AccessError> {
        self.authority.authorize(caller)?;
        for removed in self.transfer_policy.remove(addresses) {
            info!("{} removed from whitelist", removed);
        }
        Ok(())
    }

    pub fn is_whitelisted(&self, account: Address) -> bool {
        self.transfer_policy.is_whitelisted(account)
    }

    pub fn whitelist_enabled(&self) -> bool {
        self.transfer_policy.whitelist_enabled()
    }

    // ---- access ----

    pub fn checker(&self) -> AccessChecker<'_> {
        AccessChecker::new(&self.bindings, &self.ledger)
    }

    pub fn has_access(&self, caller: Address, target: Address, selector: B32) -> bool {
        self.checker().has_access(caller, target, selector)
    }

    pub fn has_access_by_id(&self, caller: Address, func_id: FunctionId) -> bool {
        self.checker().has_access_by_id(caller, func_id)
    }

    pub fn require_access(
        &self,
        caller: Address,
        target: Address,
        selector: B32,
    ) -> Result<(), AccessError> {
        self.checker().require_access(caller, target, selector)
    }

    // ---- views ----

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn owner(&self) -> Address {
        self.authority.owner()
    }

    pub fn burn_policy(&self) -> BurnPolicy {
        self.burn_policy
    }

    pub fn ledger(&self) -> &CapabilityTokenLedger {
        &self.ledger
    }

    pub fn role_mask_of(&self, holder: Address) -> RoleBitmask {
        self.ledger.role_mask_of(holder)
    }

    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Puts previously taken events back in front of the pending ones.
    pub(crate) fn restore_events(&mut self, mut earlier: Vec<RegistryEvent>) {
        earlier.append(&mut self.events);
        self.events = earlier;
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        let mut bindings: Vec<BindingSnapshot> = self
            .bindings
            .iter()
            .map(|(func_id, mask)| BindingSnapshot {
                func_id,
                target: func_id.target(),
                selector: func_id.selector(),
                roles: mask.iter().collect(),
            })
            .collect();
        bindings.sort_by_key(|b| b.func_id);

        RegistrySnapshot {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            owner: self.owner(),
            burn_policy: self.burn_policy,
            whitelist_enabled: self.whitelist_enabled(),
            whitelist: self.transfer_policy.whitelist().collect(),
            roles: self.roles.iter().collect(),
            bindings,
            tokens: self.ledger.iter().cloned().collect(),
        }
    }
}

/// Serializable view of the whole registry state.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrySnapshot {
    pub name: String,
    pub symbol: String,
    pub owner: Address,
    pub burn_policy: BurnPolicy,
    pub whitelist_enabled: bool,
    pub whitelist: Vec<Address>,
    pub roles: Vec<Role>,
    pub bindings: Vec<BindingSnapshot>,
    pub tokens: Vec<CapabilityToken>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BindingSnapshot {
    pub func_id: FunctionId,
    pub target: Address,
    pub selector: B32,
    pub roles: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use alloy::primitives::{U256, fixed_bytes};

    const OWNER: Address = Address::repeat_byte(0xaa);

    fn registry() -> AccessRegistry {
        AccessRegistry::new(&RegistrySettings::new(OWNER)).unwrap()
    }

    fn binding(role_id: u8) -> RoleBinding {
        RoleBinding::new(Address::repeat_byte(0x10), fixed_bytes!("0x11223344"), role_id)
    }

    #[test]
    fn test_admin_operations_reject_non_owner() {
        let mut reg = registry();
        let intruder = Address::repeat_byte(0x01);
        let denied = AccessError::Unauthorized(intruder);

        assert_eq!(reg.add_role(intruder, "Role0").unwrap_err(), denied);
        let role = reg.add_role(OWNER, "Role0").unwrap();
        assert_eq!(reg.rename_role(intruder, role, "New").unwrap_err(), denied);
        assert_eq!(reg.bind_role(intruder, binding(role)).unwrap_err(), denied);
        assert_eq!(reg.unbind_role(intruder, binding(role)).unwrap_err(), denied);
        assert_eq!(reg.grant_role(intruder, intruder, role).unwrap_err(), denied);
        assert_eq!(
            reg.change_token_transferability(intruder, U256::ZERO, true)
                .unwrap_err(),
            denied
        );
        assert_eq!(
            reg.change_batch_token_transferability(intruder, &[(U256::ZERO, true)])
                .unwrap_err(),
            denied
        );
        assert_eq!(reg.add_whitelist(intruder, &[intruder]).unwrap_err(), denied);
        assert_eq!(reg.remove_whitelist(intruder, &[intruder]).unwrap_err(), denied);
        assert_eq!(reg.revoke_all(intruder, intruder).unwrap_err(), denied);
        // Only the owner's RoleAdded was recorded.
        assert_eq!(reg.events().len(), 1);
    }

    #[test]
    fn test_grant_emits_role_granted_then_mint() {
        let mut reg = registry();
        let user = Address::repeat_byte(0x01);
        let role = reg.add_role(OWNER, "Role0").unwrap();
        reg.take_events();

        let token_id = reg.grant_role(OWNER, user, role).unwrap();
        assert_eq!(
            reg.events(),
            &[
                RegistryEvent::RoleGranted { user, role_id: role },
                RegistryEvent::Transfer {
                    from: Address::ZERO,
                    to: user,
                    token_id
                }
            ]
        );
        assert!(!reg.ledger().token(token_id).unwrap().non_transferable);
    }

    #[test]
    fn test_grant_requires_existing_role() {
        let mut reg = registry();
        assert_eq!(
            reg.grant_role(OWNER, Address::repeat_byte(1), 0),
            Err(AccessError::RoleNotExists(0))
        );
        assert_eq!(
            reg.bind_role(OWNER, binding(0)),
            Err(AccessError::RoleNotExists(0))
        );
    }

    #[test]
    fn test_bind_roles_rejects_whole_batch_on_unknown_role() {
        let mut reg = registry();
        let role = reg.add_role(OWNER, "Role0").unwrap();
        reg.take_events();

        assert_eq!(
            reg.bind_roles(OWNER, &[binding(role), binding(7)]),
            Err(AccessError::RoleNotExists(7))
        );
        assert!(reg.get_bound_mask(binding(role).function_id()).is_empty());
        assert!(reg.events().is_empty());
    }

    #[test]
    fn test_batch_transferability_skips_unchanged() {
        let mut reg = registry();
        let role = reg.add_role(OWNER, "Role0").unwrap();
        let a = reg
            .grant_role_non_transferable(OWNER, Address::repeat_byte(1), role)
            .unwrap();
        let b = reg.grant_role(OWNER, Address::repeat_byte(2), role).unwrap();
        reg.take_events();

        let changed = reg
            .change_batch_token_transferability(OWNER, &[(a, false), (b, false)])
            .unwrap();
        assert_eq!(changed, 1);
        assert_eq!(
            reg.events(),
            &[RegistryEvent::TokenTransferabilityChanged {
                token_id: a,
                is_non_transferable: false
            }]
        );

        // A missing token aborts the whole batch.
        assert_eq!(
            reg.change_batch_token_transferability(OWNER, &[(b, true), (U256::from(9u8), true)]),
            Err(AccessError::NonexistentToken(U256::from(9u8)))
        );
        assert!(!reg.ledger().token(b).unwrap().non_transferable);
    }

    #[test]
    fn test_token_owner_burn_policy() {
        let mut settings = RegistrySettings::new(OWNER);
        settings.burn_policy = BurnPolicy::TokenOwner;
        let mut reg = AccessRegistry::new(&settings).unwrap();
        let user = Address::repeat_byte(1);
        let role = reg.add_role(OWNER, "Role0").unwrap();
        let token_id = reg.grant_role(OWNER, user, role).unwrap();

        assert_eq!(
            reg.burn(OWNER, token_id),
            Err(AccessError::NotTokenOwner {
                caller: OWNER,
                token_id
            })
        );
        assert_eq!(
            reg.revoke_all(OWNER, user),
            Err(AccessError::NotTokenOwner {
                caller: OWNER,
                token_id
            })
        );
        reg.burn(user, token_id).unwrap();
        assert!(reg.role_mask_of(user).is_empty());
    }

    #[test]
    fn test_registry_owner_burn_policy() {
        let mut reg = registry();
        let user = Address::repeat_byte(1);
        let role = reg.add_role(OWNER, "Role0").unwrap();
        let token_id = reg.grant_role(OWNER, user, role).unwrap();

        let not_owner = Err(AccessError::NotTokenOwner {
            caller: user,
            token_id,
        });
        assert_eq!(reg.burn(user, token_id), not_owner);
        assert_eq!(reg.burn(user, token_id).unwrap_err().kind(), ErrorKind::Ownership);
        // The caller is rejected before the token id is looked up.
        let missing = U256::from(9u8);
        assert_eq!(
            reg.burn(user, missing),
            Err(AccessError::NotTokenOwner {
                caller: user,
                token_id: missing
            })
        );
        reg.burn(OWNER, token_id).unwrap();
        assert_eq!(
            reg.events().last(),
            Some(&RegistryEvent::Transfer {
                from: user,
                to: Address::ZERO,
                token_id
            })
        );
        assert_eq!(
            reg.burn(OWNER, token_id),
            Err(AccessError::NonexistentToken(token_id))
        );
    }

    #[test]
    fn test_zero_operator_rejected() {
        let mut reg = registry();
        let holder = Address::repeat_byte(1);
        let err = reg
            .set_approval_for_all(holder, Address::ZERO, true)
            .unwrap_err();
        assert_eq!(err, AccessError::InvalidOperator(Address::ZERO));
        assert_eq!(err.error_code(), "ERC721InvalidOperator");
        assert!(reg.events().is_empty());

        reg.set_approval_for_all(holder, Address::repeat_byte(2), true)
            .unwrap();
        assert!(reg.ledger().is_approved_for_all(holder, Address::repeat_byte(2)));
    }

    #[test]
    fn test_ownership_transfer_moves_admin_rights() {
        let mut reg = registry();
        let next = Address::repeat_byte(0xbb);
        reg.transfer_ownership(OWNER, next).unwrap();
        assert_eq!(reg.owner(), next);
        assert_eq!(reg.add_role(OWNER, "Role0"), Err(AccessError::Unauthorized(OWNER)));
        assert_eq!(reg.add_role(next, "Role0"), Ok(0));
    }

    #[test]
    fn test_snapshot() {
        let mut settings = RegistrySettings::new(OWNER);
        settings.whitelist_enabled = true;
        settings.whitelist = vec![Address::repeat_byte(3)];
        let mut reg = AccessRegistry::new(&settings).unwrap();
        let role = reg.add_role(OWNER, "Role0").unwrap();
        reg.bind_role(OWNER, binding(role)).unwrap();
        reg.grant_role(OWNER, Address::repeat_byte(1), role).unwrap();

        let snapshot = reg.snapshot();
        assert_eq!(snapshot.name, "Access NFT token");
        assert_eq!(snapshot.roles.len(), 1);
        assert_eq!(snapshot.bindings[0].roles, vec![role]);
        assert_eq!(snapshot.bindings[0].target, Address::repeat_byte(0x10));
        assert_eq!(snapshot.tokens.len(), 1);
        assert_eq!(snapshot.whitelist, vec![Address::repeat_byte(3)]);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["roles"][0]["name"], "Role0");
        assert_eq!(json["burn_policy"], "registry_owner");
    }
}
