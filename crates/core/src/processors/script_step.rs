use alloy::primitives::{Address, U256, aliases::B32};
use eyre::{Result, eyre};
use into_trait::IntoTraitObject;
use serde::Deserialize;

use crate::{
    actions::{
        add_role_action::AddRoleAction, admin_action::AdminAction,
        bind_role_action::BindRoleAction, bind_roles_action::BindRolesAction,
        burn_action::BurnAction,
        change_batch_token_transferability_action::ChangeBatchTokenTransferabilityAction,
        change_token_transferability_action::ChangeTokenTransferabilityAction,
        grant_role_action::GrantRoleAction, rename_role_action::RenameRoleAction,
        transfer_action::TransferAction, whitelist_action::WhitelistAction,
    },
    registry::bindings::RoleBinding,
    types::function_id::selector_from_signature,
};

pub trait Actionable: Send + Sync {
    fn to_actions(&self, registry: Address) -> Result<Vec<Box<dyn AdminAction>>>;
}

/// One entry of an admin script, externally tagged by its operation name.
#[derive(Deserialize, Debug, IntoTraitObject)]
#[trait_name(Actionable)]
pub enum ScriptStep {
    AddRole(AddRoleStep),
    RenameRole(RenameRoleStep),
    BindRole(BindingStep),
    BindRoles(BindRolesStep),
    UnbindRole(UnbindRoleStep),
    GrantRole(GrantRoleStep),
    Burn(BurnStep),
    ChangeTokenTransferability(TransferabilityStep),
    ChangeBatchTokenTransferability(BatchTransferabilityStep),
    AddWhitelist(AddWhitelistStep),
    RemoveWhitelist(RemoveWhitelistStep),
    Transfer(TransferStep),
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct AddRoleStep {
    pub role: String,
}

impl Actionable for AddRoleStep {
    fn to_actions(&self, registry: Address) -> Result<Vec<Box<dyn AdminAction>>> {
        Ok(vec![Box::new(AddRoleAction::new(registry, self.role.clone()))])
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct RenameRoleStep {
    pub role_id: u8,
    pub role: String,
}

impl Actionable for RenameRoleStep {
    fn to_actions(&self, registry: Address) -> Result<Vec<Box<dyn AdminAction>>> {
        Ok(vec![Box::new(RenameRoleAction::new(
            registry,
            self.role_id,
            self.role.clone(),
        ))])
    }
}

/// A function named by `function_signature` or by a raw `selector`, never both.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct BindingStep {
    pub target: Address,
    pub function_signature: Option<String>,
    pub selector: Option<B32>,
    pub role_id: u8,
}

impl BindingStep {
    pub fn to_binding(&self) -> Result<RoleBinding> {
        let selector = match (&self.function_signature, self.selector) {
            (Some(signature), None) => selector_from_signature(signature),
            (None, Some(selector)) => selector,
            (Some(_), Some(_)) => {
                return Err(eyre!(
                    "function_signature and selector are mutually exclusive"
                ));
            }
            (None, None) => return Err(eyre!("function_signature or selector is required")),
        };
        Ok(RoleBinding::new(self.target, selector, self.role_id))
    }
}

impl Actionable for BindingStep {
    fn to_actions(&self, registry: Address) -> Result<Vec<Box<dyn AdminAction>>> {
        Ok(vec![Box::new(BindRoleAction::new(registry, self.to_binding()?))])
    }
}

#[derive(Deserialize, Debug)]
#[serde(transparent)]
pub struct UnbindRoleStep(pub BindingStep);

impl Actionable for UnbindRoleStep {
    fn to_actions(&self, registry: Address) -> Result<Vec<Box<dyn AdminAction>>> {
        Ok(vec![Box::new(BindRoleAction::unbind(
            registry,
            self.0.to_binding()?,
        ))])
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct BindRolesStep {
    pub bindings: Vec<BindingStep>,
}

impl Actionable for BindRolesStep {
    fn to_actions(&self, registry: Address) -> Result<Vec<Box<dyn AdminAction>>> {
        let bindings = self
            .bindings
            .iter()
            .map(BindingStep::to_binding)
            .collect::<Result<Vec<_>>>()?;
        Ok(vec![Box::new(BindRolesAction::new(registry, bindings))])
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct GrantRoleStep {
    pub user: Address,
    pub role_id: u8,
    #[serde(default)]
    pub non_transferable: bool,
}

impl Actionable for GrantRoleStep {
    fn to_actions(&self, registry: Address) -> Result<Vec<Box<dyn AdminAction>>> {
        Ok(vec![Box::new(GrantRoleAction::new(
            registry,
            self.user,
            self.role_id,
            self.non_transferable,
        ))])
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct BurnStep {
    pub token_id: U256,
    // Set when the holder burns its own grant.
    #[serde(default)]
    pub holder: Option<Address>,
}

impl Actionable for BurnStep {
    fn to_actions(&self, registry: Address) -> Result<Vec<Box<dyn AdminAction>>> {
        Ok(vec![Box::new(BurnAction::new(
            registry,
            self.token_id,
            self.holder,
        ))])
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct TransferabilityStep {
    pub token_id: U256,
    pub non_transferable: bool,
}

impl Actionable for TransferabilityStep {
    fn to_actions(&self, registry: Address) -> Result<Vec<Box<dyn AdminAction>>> {
        Ok(vec![Box::new(ChangeTokenTransferabilityAction::new(
            registry,
            self.token_id,
            self.non_transferable,
        ))])
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct BatchTransferabilityStep {
    pub changes: Vec<TransferabilityStep>,
}

impl Actionable for BatchTransferabilityStep {
    fn to_actions(&self, registry: Address) -> Result<Vec<Box<dyn AdminAction>>> {
        if self.changes.is_empty() {
            return Err(eyre!("changes must not be empty"));
        }
        let changes = self
            .changes
            .iter()
            .map(|c| (c.token_id, c.non_transferable))
            .collect();
        Ok(vec![Box::new(ChangeBatchTokenTransferabilityAction::new(
            registry, changes,
        ))])
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct AddWhitelistStep {
    pub addresses: Vec<Address>,
}

impl Actionable for AddWhitelistStep {
    fn to_actions(&self, registry: Address) -> Result<Vec<Box<dyn AdminAction>>> {
        Ok(vec![Box::new(WhitelistAction::add(
            registry,
            self.addresses.clone(),
        ))])
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct RemoveWhitelistStep {
    pub addresses: Vec<Address>,
}

impl Actionable for RemoveWhitelistStep {
    fn to_actions(&self, registry: Address) -> Result<Vec<Box<dyn AdminAction>>> {
        Ok(vec![Box::new(WhitelistAction::remove(
            registry,
            self.addresses.clone(),
        ))])
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct TransferStep {
    pub from: Address,
    pub to: Address,
    pub token_id: U256,
    #[serde(default)]
    pub operator: Option<Address>,
}

impl Actionable for TransferStep {
    fn to_actions(&self, registry: Address) -> Result<Vec<Box<dyn AdminAction>>> {
        Ok(vec![Box::new(TransferAction::new(
            registry,
            self.from,
            self.to,
            self.token_id,
            self.operator,
        ))])
    }
}
