pub mod add_role_action;
pub mod admin_action;
pub mod bind_role_action;
pub mod bind_roles_action;
pub mod burn_action;
pub mod change_batch_token_transferability_action;
pub mod change_token_transferability_action;
pub mod grant_role_action;
pub mod rename_role_action;
pub mod sender_type;
pub mod transfer_action;
pub mod whitelist_action;
