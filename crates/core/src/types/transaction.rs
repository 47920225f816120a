use alloy::primitives::{Address, Bytes, U256};
use serde::Serialize;
use serde_json::Value;

/// One encoded admin call, ready to hand to whatever submits it.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub network_id: u32,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub description: Value,
}
