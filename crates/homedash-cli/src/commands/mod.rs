//! Command implementations for the CLI.

mod config;
mod set;
mod status;

pub use config::cmd_config;
pub use set::{DeviceSetting, cmd_set};
pub use status::cmd_status;
