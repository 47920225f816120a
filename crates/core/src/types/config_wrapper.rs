use dotenv::dotenv;
use eyre::{Result, eyre};
use std::{env, fs};
use toml::Value;

/// Read-only view over `config.toml`. Registry keys live under
/// `[registry.<network_id>]` with `[registry.default]` as the fallback.
pub struct ConfigWrapper {
    raw_config: Value,
}

impl ConfigWrapper {
    pub fn new(raw_config: Value) -> Self {
        Self { raw_config }
    }

    pub fn from_file(path: Option<&str>) -> Result<Self> {
        dotenv().ok(); // Load environment variables from .env file

        let path = path.unwrap_or("config.toml");
        let config_content = fs::read_to_string(path)
            .map_err(|e| eyre!("Failed to read config file {}: {}", path, e))?;
        let raw_config = config_content.parse::<Value>()?;

        Ok(Self { raw_config })
    }

    fn registry_value(&self, network_id: u32, key: &str) -> Option<&Value> {
        let registry = self.raw_config.get("registry")?;
        // Try network specific value first
        registry
            .get(network_id.to_string())
            .and_then(|r| r.get(key))
            .or_else(|| registry.get("default").and_then(|r| r.get(key)))
    }

    pub fn get_registry_config_value(&self, network_id: u32, key: &str) -> Result<String> {
        self.get_registry_config_value_opt(network_id, key)?
            .ok_or_else(|| eyre!("{} not found for network: {}", key, network_id))
    }

    pub fn get_registry_config_value_opt(
        &self,
        network_id: u32,
        key: &str,
    ) -> Result<Option<String>> {
        match self.registry_value(network_id, key) {
            None => Ok(None),
            Some(value) => {
                let s = value
                    .as_str()
                    .ok_or_else(|| eyre!("{} must be a string", key))?;
                resolve_env(s).map(Some)
            }
        }
    }

    /// Missing keys read as `false`.
    pub fn get_registry_config_bool(&self, network_id: u32, key: &str) -> Result<bool> {
        match self.registry_value(network_id, key) {
            None => Ok(false),
            Some(value) => value
                .as_bool()
                .ok_or_else(|| eyre!("{} must be a boolean", key)),
        }
    }

    /// Missing keys read as an empty list.
    pub fn get_registry_addresses(&self, network_id: u32, key: &str) -> Result<Vec<String>> {
        let Some(value) = self.registry_value(network_id, key) else {
            return Ok(vec![]);
        };
        value
            .as_array()
            .ok_or_else(|| eyre!("{} must be an array", key))?
            .iter()
            .map(|v| {
                v.as_str()
                    .ok_or_else(|| eyre!("{} entries must be strings", key))
                    .and_then(resolve_env)
            })
            .collect()
    }
}

fn resolve_env(value: &str) -> Result<String> {
    match value.strip_prefix("env:") {
        Some(env_var) => {
            env::var(env_var).map_err(|_| eyre!("Environment variable {} not set", env_var))
        }
        None => Ok(value.to_string()),
    }
}
