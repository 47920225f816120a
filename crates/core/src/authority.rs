use alloy::primitives::Address;
use log::{info, warn};

use crate::error::AccessError;
use crate::events::RegistryEvent;

/// Administrative authority consulted by every owner-gated registry
/// operation. Kept as a seam so the registry does not care how the admin
/// account is managed.
pub trait Authority: Clone + Send + Sync {
    fn owner(&self) -> Address;

    fn authorize(&self, caller: Address) -> Result<(), AccessError> {
        if caller == self.owner() && !caller.is_zero() {
            Ok(())
        } else {
            warn!("rejected admin call from {}", caller);
            Err(AccessError::Unauthorized(caller))
        }
    }
}

/// Single unilateral owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ownable {
    owner: Address,
}

impl Ownable {
    pub fn new(owner: Address) -> Result<Self, AccessError> {
        if owner.is_zero() {
            return Err(AccessError::InvalidOwner(owner));
        }
        Ok(Self { owner })
    }

    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<RegistryEvent, AccessError> {
        self.authorize(caller)?;
        if new_owner.is_zero() {
            return Err(AccessError::InvalidOwner(new_owner));
        }
        Ok(self.set_owner(new_owner))
    }

    /// Leaves the registry without an owner, every admin operation fails
    /// afterwards.
    pub fn renounce_ownership(&mut self, caller: Address) -> Result<RegistryEvent, AccessError> {
        self.authorize(caller)?;
        Ok(self.set_owner(Address::ZERO))
    }

    fn set_owner(&mut self, new_owner: Address) -> RegistryEvent {
        let previous_owner = std::mem::replace(&mut self.owner, new_owner);
        info!("ownership transferred {} -> {}", previous_owner, new_owner);
        RegistryEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        }
    }
}

impl Authority for Ownable {
    fn owner(&self) -> Address {
        self.owner
    }
}
