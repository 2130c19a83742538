use chrono::Utc;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::tips::pick_tip;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("tip", "Show a financial tip", "tip", cmd_tip),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_tip(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let seed = Utc::now().timestamp_subsec_nanos();
    output::hint(pick_tip(u64::from(seed)));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => help::print_overview(&context.registry),
        [name] => match context.registry.get(name) {
            Some(entry) => help::print_command(entry),
            None => return Err(CommandError::UnknownCommand(name.to_string())),
        },
        _ => return Err(CommandError::InvalidArguments("usage: help [command]".into())),
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
