use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::Config;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change display settings",
        "config [show | set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show(&context.config);
            Ok(())
        }
        ["set", key, value] => {
            let mut updated = context.config.clone();
            updated.set(key, value)?;
            context.persist_config(&updated)?;
            context.config = updated;
            context.apply_output_preferences();
            output::success(format!("Set {key} = {value}"));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config [show | set <key> <value>]; keys: {}",
            Config::KEYS.join(", ")
        ))),
    }
}

fn show(config: &Config) {
    output::section("Configuration");
    for (key, value) in config.entries() {
        output::info(format!("  {key:<18} {value}"));
    }
}
