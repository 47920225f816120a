pub mod actions;
pub mod authority;
pub mod bindings;
pub mod error;
pub mod events;
pub mod processors;
pub mod registry;
pub mod shared;
pub mod types;

use alloy::primitives::Address;
use eyre::{Result, WrapErr};
use log::info;
use std::fs;
use std::path::Path;

use actions::admin_action::{AdminAction, AdminCall};
use events::RegistryEvent;
use registry::AccessRegistry;
use shared::SharedRegistry;
use types::{
    config_wrapper::ConfigWrapper, registry_settings::RegistrySettings, transaction::Transaction,
};

pub fn load_settings(config_path: Option<&str>, network_id: u32) -> Result<RegistrySettings> {
    let cw = ConfigWrapper::from_file(config_path)?;
    RegistrySettings::from_config(&cw, network_id)
}

/// Runs `actions` against a fresh registry as one transaction.
pub async fn simulate_actions(
    settings: &RegistrySettings,
    actions: &[Box<dyn AdminAction>],
) -> Result<(AccessRegistry, Vec<RegistryEvent>)> {
    let registry = AccessRegistry::new(settings).wrap_err("invalid registry settings")?;
    let shared = SharedRegistry::new(registry);
    let events = shared.apply_actions(actions).await?;
    let registry = shared.read().await.clone();
    Ok((registry, events))
}

pub fn encode_actions(actions: &[Box<dyn AdminAction>], network_id: u32) -> Vec<Transaction> {
    actions
        .iter()
        .map(|action| Transaction {
            network_id,
            to: action.target(),
            value: action.value(),
            data: action.data(),
            description: action.describe(),
        })
        .collect()
}

/// Writes `tx_{i}.json` per transaction into `dir`, returning the paths.
pub fn write_transactions(dir: &Path, txs: &[Transaction]) -> Result<Vec<String>> {
    fs::create_dir_all(dir)?;
    let mut paths = Vec::with_capacity(txs.len());
    for (i, tx) in txs.iter().enumerate() {
        let path = dir.join(format!("tx_{}.json", i));
        fs::write(&path, serde_json::to_string_pretty(tx)?)?;
        paths.push(path.display().to_string());
    }
    info!("wrote {} transaction(s) to {}", txs.len(), dir.display());
    Ok(paths)
}

/// Registry address used as calldata target, zero when no deployment is
/// configured.
pub fn registry_address(settings: &RegistrySettings) -> Address {
    settings.address.unwrap_or(Address::ZERO)
}
