//! Shell context, the command loop, and CLI error types.

use std::io;

use chrono::Utc;
use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::error::ReadlineError;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cli::commands;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::CommandRegistry;
use crate::cli::shell::{Input, LineSource};
use crate::config::{Config, ConfigError, ConfigManager};
use crate::core::services::ServiceError;
use crate::ledger::Ledger;
use crate::tips::pick_tip;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure of a single command line; reported, and the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Failure that stops the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
}

/// Owns the ledger for the lifetime of the shell; every command borrows it
/// from here.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger: Ledger,
    pub config: Config,
    pub config_manager: Option<ConfigManager>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let (config_manager, config) = match ConfigManager::new() {
            Ok(manager) => {
                let config = manager.load().unwrap_or_else(|err| {
                    warn!(error = %err, "failed to load configuration, using defaults");
                    Config::default()
                });
                (Some(manager), config)
            }
            Err(err) => {
                warn!(error = %err, "configuration directory unavailable");
                (None, Config::default())
            }
        };
        Ok(Self::with_config(mode, config, config_manager))
    }

    pub fn with_config(
        mode: CliMode,
        config: Config,
        config_manager: Option<ConfigManager>,
    ) -> Self {
        let context = Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            ledger: Ledger::new(),
            config,
            config_manager,
            running: true,
        };
        context.apply_output_preferences();
        info!(?mode, "shell context ready");
        context
    }

    pub(crate) fn apply_output_preferences(&self) {
        output::set_preferences(OutputPreferences {
            plain: !self.config.color || self.mode == CliMode::Script,
        });
    }

    pub(crate) fn greet(&self) {
        output::section("fintrack");
        output::info("Type `help` to list commands.");
        if self.config.show_tip_on_start {
            let now = Utc::now();
            let seed = now.timestamp() as u64 ^ u64::from(now.timestamp_subsec_nanos());
            output::hint(format!("Tip: {}", pick_tip(seed)));
        }
    }

    pub fn prompt(&self) -> &'static str {
        "fintrack> "
    }

    /// Reads lines until `exit`, end of input, or a confirmed interrupt.
    /// Only lines that ran cleanly are handed back to the source's history.
    pub(crate) fn run(&mut self, source: &mut dyn LineSource) -> Result<(), CliError> {
        while self.running {
            match source.read(self.prompt())? {
                Input::Line(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match self.execute(line) {
                        Ok(()) => source.accepted(line),
                        Err(err) => self.report_error(err),
                    }
                }
                Input::Interrupted => {
                    if self.confirm_exit()? {
                        break;
                    }
                }
                Input::Closed => {
                    if self.mode == CliMode::Interactive {
                        output::info("Goodbye.");
                    }
                    break;
                }
            }
        }
        Ok(())
    }

    /// Tokenizes and runs a single command line.
    pub fn execute(&mut self, line: &str) -> CommandResult {
        let tokens = shell_words::split(line)
            .map_err(|err| CommandError::InvalidArguments(format!("cannot parse line: {err}")))?;
        let Some((name, rest)) = tokens.split_first() else {
            return Ok(());
        };
        let handler = match self.registry.get(name) {
            Some(entry) => entry.handler,
            None => return Err(CommandError::UnknownCommand(name.clone())),
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        debug!(command = %name, args = args.len(), "dispatching command");

        match handler(self, &args) {
            Err(CommandError::ExitRequested) => {
                self.running = false;
                Ok(())
            }
            other => other,
        }
    }

    fn confirm_exit(&self) -> Result<bool, CliError> {
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Exit fintrack? Recorded entries are not kept.")
            .default(false)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::UnknownCommand(name) => {
                output::warning(format!(
                    "Unknown command `{name}`. Type `help` to see available commands."
                ));
                if let Some(best) = self.registry.closest(&name) {
                    output::info(format!("Suggestion: `{best}`?"));
                }
            }
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other.to_string()),
        }
    }

    /// Writes `config` to disk. Callers adopt it only after this succeeds.
    pub(crate) fn persist_config(&self, config: &Config) -> CommandResult {
        match &self.config_manager {
            Some(manager) => manager.save(config)?,
            None => {
                output::warning("No configuration directory; settings apply to this session only.")
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use tempfile::tempdir;

    fn script_context() -> ShellContext {
        ShellContext::with_config(CliMode::Script, Config::default(), None)
    }

    #[test]
    fn record_command_updates_owned_ledger() {
        let mut context = script_context();
        context.execute("record income 1 1000 salary").unwrap();
        assert_eq!(context.ledger.category_total(Category::Income), 1000.0);
        assert_eq!(context.ledger.transaction_count(), 3);
        assert!(context.running);
    }

    #[test]
    fn rejected_record_is_reported_and_ledger_unchanged() {
        let mut context = script_context();
        let err = context
            .execute("record expense 13 50 groceries")
            .expect_err("month 13 is out of range");
        assert!(matches!(err, CommandError::InvalidArguments(_)));

        let err = context
            .execute("record expense 2 50 salary")
            .expect_err("salary is not an expense subcategory");
        assert!(matches!(err, CommandError::Service(_)));
        assert_eq!(context.ledger.transaction_count(), 0);
    }

    #[test]
    fn overflowing_amount_is_rejected_by_the_ledger() {
        let mut context = script_context();
        context.execute("record loan 1 1e308").unwrap();
        let err = context
            .execute("record loan 2 1e308")
            .expect_err("annual loan total would overflow");
        assert!(matches!(err, CommandError::Service(_)));
        assert_eq!(context.ledger.transaction_count(), 1);
        assert!(context.ledger.category_total(Category::Loan).is_finite());
    }

    #[test]
    fn unknown_command_is_an_error_and_keeps_running() {
        let mut context = script_context();
        let err = context.execute("recrod income 1 10").unwrap_err();
        assert!(matches!(err, CommandError::UnknownCommand(ref name) if name == "recrod"));
        assert!(context.running);
    }

    #[test]
    fn unbalanced_quotes_are_invalid_arguments() {
        let mut context = script_context();
        let err = context.execute("record \"income 1 10").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut context = script_context();
        context.execute("EXIT").unwrap();
        assert!(!context.running);
    }

    #[test]
    fn failed_config_save_leaves_session_settings_unchanged() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        // A directory in place of the file makes the final rename fail.
        std::fs::create_dir(manager.path()).unwrap();
        let mut context =
            ShellContext::with_config(CliMode::Script, Config::default(), Some(manager));

        let err = context
            .execute("config set currency_symbol $")
            .expect_err("save cannot replace a directory");
        assert!(matches!(err, CommandError::Config(_)));
        assert_eq!(context.config, Config::default());
    }

    #[test]
    fn successful_config_set_applies_to_session() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut context =
            ShellContext::with_config(CliMode::Script, Config::default(), Some(manager));

        context.execute("config set currency_symbol $").unwrap();
        assert_eq!(context.config.currency_symbol, "$");
        assert!(dir.path().join("config.json").is_file());
    }
}
