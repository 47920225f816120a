use alloy::primitives::Address;
use eyre::{Result, WrapErr, eyre};
use log::debug;
use serde_json::Value;
use std::fs;

use super::script_step::ScriptStep;
use crate::actions::admin_action::AdminAction;

pub fn process_script_value(
    script: &Value,
    registry: Address,
) -> Result<Vec<Box<dyn AdminAction>>> {
    let steps = script
        .as_array()
        .ok_or_else(|| eyre!("script must be an array"))?;

    let mut admin_actions: Vec<Box<dyn AdminAction>> = Vec::new();
    for (i, step) in steps.iter().enumerate() {
        let step: ScriptStep = serde_json::from_value(step.clone())
            .wrap_err_with(|| format!("invalid script step {}", i))?;
        debug!("step {}: {:?}", i, step);
        let actions = step
            .into_trait_object()
            .to_actions(registry)
            .wrap_err_with(|| format!("invalid script step {}", i))?;
        admin_actions.extend(actions);
    }
    Ok(admin_actions)
}

pub fn process_script_str(script: &str, registry: Address) -> Result<Vec<Box<dyn AdminAction>>> {
    let value: Value = serde_json::from_str(script)?;
    process_script_value(&value, registry)
}

pub fn process_script_file(path: &str, registry: Address) -> Result<Vec<Box<dyn AdminAction>>> {
    let content =
        fs::read_to_string(path).wrap_err_with(|| format!("failed to read script {}", path))?;
    process_script_str(&content, registry)
}
