use alloy::primitives::Address;
use eyre::{Result, eyre};

use super::config_wrapper::ConfigWrapper;
use crate::registry::transfer_policy::BurnPolicy;

pub const DEFAULT_NAME: &str = "Access NFT token";
pub const DEFAULT_SYMBOL: &str = "AccNFT";

/// One-time setup parameters of a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySettings {
    pub name: String,
    pub symbol: String,
    pub owner: Address,
    pub burn_policy: BurnPolicy,
    pub whitelist_enabled: bool,
    pub whitelist: Vec<Address>,
    // Deployed registry, only needed to encode calldata targets.
    pub address: Option<Address>,
}

impl RegistrySettings {
    pub fn new(owner: Address) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            owner,
            burn_policy: BurnPolicy::default(),
            whitelist_enabled: false,
            whitelist: vec![],
            address: None,
        }
    }

    pub fn from_config(cw: &ConfigWrapper, network_id: u32) -> Result<Self> {
        let owner = cw
            .get_registry_config_value(network_id, "owner")?
            .parse::<Address>()
            .map_err(|e| eyre!("owner is not an address: {}", e))?;
        let mut settings = Self::new(owner);

        if let Some(name) = cw.get_registry_config_value_opt(network_id, "name")? {
            settings.name = name;
        }
        if let Some(symbol) = cw.get_registry_config_value_opt(network_id, "symbol")? {
            settings.symbol = symbol;
        }
        if let Some(policy) = cw.get_registry_config_value_opt(network_id, "burn_policy")? {
            settings.burn_policy = match policy.as_str() {
                "registry_owner" => BurnPolicy::RegistryOwner,
                "token_owner" => BurnPolicy::TokenOwner,
                other => {
                    return Err(eyre!(
                        "Unknown burn_policy: {}. Must be one of: registry_owner, token_owner",
                        other
                    ));
                }
            };
        }
        settings.whitelist_enabled = cw.get_registry_config_bool(network_id, "whitelist_enabled")?;
        settings.whitelist = cw
            .get_registry_addresses(network_id, "whitelist")?
            .into_iter()
            .map(|s| {
                s.parse::<Address>()
                    .map_err(|e| eyre!("whitelist entry {} is not an address: {}", s, e))
            })
            .collect::<Result<Vec<_>>>()?;
        settings.address = cw
            .get_registry_config_value_opt(network_id, "address")?
            .map(|s| s.parse::<Address>())
            .transpose()
            .map_err(|e| eyre!("address is not an address: {}", e))?;

        Ok(settings)
    }
}
