use log::debug;

use crate::error::AccessError;
use crate::types::role::{Role, RoleName};

pub const MAX_ROLES: usize = 256;

/// Sequentially numbered roles. Roles are only ever added or renamed.
#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    names: Vec<RoleName>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next unused id, starting at 0.
    pub fn add(&mut self, name: &str) -> Result<Role, AccessError> {
        let name = RoleName::new(name)?;
        if self.names.len() >= MAX_ROLES {
            return Err(AccessError::MaxRolesReached);
        }
        let id = self.names.len() as u8;
        self.names.push(name);
        debug!("role {} added as {}", name, id);
        Ok(Role { id, name })
    }

    pub fn rename(&mut self, id: u8, new_name: &str) -> Result<Role, AccessError> {
        let name = RoleName::new(new_name)?;
        let slot = self
            .names
            .get_mut(id as usize)
            .ok_or(AccessError::RoleNotExists(id))?;
        *slot = name;
        Ok(Role { id, name })
    }

    pub fn get(&self, id: u8) -> Option<RoleName> {
        self.names.get(id as usize).copied()
    }

    pub fn exists(&self, id: u8) -> bool {
        (id as usize) < self.names.len()
    }

    pub fn ensure_exists(&self, id: u8) -> Result<(), AccessError> {
        if self.exists(id) {
            Ok(())
        } else {
            Err(AccessError::RoleNotExists(id))
        }
    }

    pub fn count(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.names.iter().enumerate().map(|(i, name)| Role {
            id: i as u8,
            name: *name,
        })
    }
}
