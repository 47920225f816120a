pub mod config_wrapper;
pub mod function_id;
pub mod registry_settings;
pub mod role;
pub mod role_bitmask;
pub mod token;
pub mod transaction;
