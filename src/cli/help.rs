use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Commands");
    let width = registry.names().map(str::len).max().unwrap_or(0);
    for entry in registry.entries() {
        output::info(format!("  {:<width$}  {}", entry.name, entry.summary));
    }
    output::hint("`help <command>` shows its arguments.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(entry.name);
    output::info(entry.summary);
    output::info(format!("usage: {}", entry.usage));
}
