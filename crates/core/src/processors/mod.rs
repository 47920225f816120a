pub mod script;
pub mod script_step;
