//! Where command lines come from: a line-editing terminal or piped stdin.

use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    history::DefaultHistory,
    Context as ReadlineContext, Editor, Helper, Highlighter, Hinter, Validator,
};

use crate::cli::core::{CliError, CliMode, ShellContext};
use crate::domain::Category;

const SCRIPT_ENV: &str = "FINTRACK_SCRIPT";

/// One read from a [`LineSource`].
pub(crate) enum Input {
    Line(String),
    /// Ctrl-C at the prompt.
    Interrupted,
    Closed,
}

pub(crate) trait LineSource {
    fn read(&mut self, prompt: &str) -> Result<Input, CliError>;

    /// Called with each line that executed without error.
    fn accepted(&mut self, _line: &str) {}
}

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    context.greet();

    match mode {
        CliMode::Interactive => {
            let mut terminal = Terminal::new(context.registry.names().collect())?;
            context.run(&mut terminal)
        }
        CliMode::Script => {
            let mut piped = Piped::new(io::stdin().lock());
            context.run(&mut piped)
        }
    }
}

struct Terminal {
    editor: Editor<WordCompleter, DefaultHistory>,
}

impl Terminal {
    fn new(commands: Vec<&'static str>) -> Result<Self, CliError> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(WordCompleter { commands }));
        Ok(Self { editor })
    }
}

impl LineSource for Terminal {
    fn read(&mut self, prompt: &str) -> Result<Input, CliError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Input::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Closed),
            Err(err) => Err(err.into()),
        }
    }

    fn accepted(&mut self, line: &str) {
        self.editor.add_history_entry(line).ok();
    }
}

struct Piped<R> {
    lines: io::Lines<R>,
}

impl<R: BufRead> Piped<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> LineSource for Piped<R> {
    fn read(&mut self, _prompt: &str) -> Result<Input, CliError> {
        match self.lines.next() {
            Some(line) => Ok(Input::Line(line?)),
            None => Ok(Input::Closed),
        }
    }
}

/// Completes command names, `help` topics, and the category argument of the
/// ledger commands.
#[derive(Helper, Hinter, Highlighter, Validator)]
struct WordCompleter {
    commands: Vec<&'static str>,
}

impl WordCompleter {
    fn candidates(&self, head: &str) -> (usize, Vec<&'static str>) {
        let start = head.rfind(char::is_whitespace).map_or(0, |idx| idx + 1);
        let before: Vec<String> = head[..start]
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect();
        let pool: Vec<&'static str> = match before.as_slice() {
            [] => self.commands.clone(),
            [cmd] if cmd == "help" => self.commands.clone(),
            [cmd] if matches!(cmd.as_str(), "record" | "total" | "chart") => {
                Category::ALL.iter().map(|category| category.as_str()).collect()
            }
            _ => Vec::new(),
        };

        let needle = head[start..].to_ascii_lowercase();
        let matches = pool
            .into_iter()
            .filter(|word| word.to_ascii_lowercase().starts_with(&needle))
            .collect();
        (start, matches)
    }
}

impl Completer for WordCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = self.candidates(&line[..pos]);
        let pairs = words
            .into_iter()
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn completer() -> WordCompleter {
        WordCompleter {
            commands: vec!["record", "total", "chart", "history", "help"],
        }
    }

    #[test]
    fn completes_command_names_then_categories() {
        let completer = completer();
        assert_eq!(completer.candidates("h"), (0, vec!["history", "help"]));
        assert_eq!(completer.candidates("help c"), (5, vec!["chart"]));
        assert_eq!(completer.candidates("record s"), (7, vec!["Savings"]));
        assert_eq!(completer.candidates("Total "), (6, Category::ALL.map(|c| c.as_str()).to_vec()));
        assert!(completer.candidates("record income 1 ").1.is_empty());
    }

    #[test]
    fn piped_source_runs_until_exit() {
        let input = "record loan 1 10\n\nbogus\nexit\nrecord loan 1 10\n";
        let mut context = ShellContext::with_config(CliMode::Script, Config::default(), None);
        context.run(&mut Piped::new(input.as_bytes())).unwrap();

        assert!(!context.running);
        assert_eq!(context.ledger.transaction_count(), 1);
    }

    #[derive(Default)]
    struct Recorded {
        lines: Vec<&'static str>,
        history: Vec<String>,
    }

    impl LineSource for Recorded {
        fn read(&mut self, _prompt: &str) -> Result<Input, CliError> {
            if self.lines.is_empty() {
                return Ok(Input::Closed);
            }
            Ok(Input::Line(self.lines.remove(0).to_string()))
        }

        fn accepted(&mut self, line: &str) {
            self.history.push(line.to_string());
        }
    }

    #[test]
    fn only_clean_lines_reach_history() {
        let mut source = Recorded {
            lines: vec!["  total loan ", "recrod loan 1 5", "record loan 13 5", "tip"],
            ..Recorded::default()
        };
        let mut context = ShellContext::with_config(CliMode::Script, Config::default(), None);
        context.run(&mut source).unwrap();

        assert_eq!(source.history, vec!["total loan", "tip"]);
    }
}
