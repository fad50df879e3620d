//! Command-line interface: deploy script and scripted runs

pub mod commands;
pub mod script;

pub use commands::{cmd_accounts, cmd_deploy, cmd_run, AppState, CliResult};
pub use script::{parse_script, required_accounts, AccountRef, ScriptCall, ScriptError, ScriptStep};
