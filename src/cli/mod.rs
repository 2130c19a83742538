//! Text presentation layer: an interactive or scripted shell over the ledger.

pub mod commands;
pub mod core;
pub mod help;
pub mod output;
pub mod registry;
mod shell;
pub mod ui;

pub use self::core::{CliError, CliMode, CommandError, ShellContext};
pub use shell::run_cli;
