//! Command feature handlers.
//!
//! Each module owns one subcommand.

pub mod config_command;
pub mod move_command;
pub mod screenshots_command;
pub mod search_command;
