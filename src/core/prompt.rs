/// User interaction for restore flows
///
/// Every restore decision comes from a human: an alert they read, a
/// yes/no confirmation, a file they choose. That surface is a
/// result-returning prompt capability so restore logic can be driven
/// by scripted implementations in tests, while the production
/// implementation talks to the terminal.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Informational message, non-blocking
    fn info(&self, message: &str);

    /// User-visible failure report
    fn alert(&self, message: &str);

    /// Explicit yes/no confirmation; anything but an affirmative answer
    /// counts as declined
    fn confirm(&self, question: &str) -> Result<bool>;

    /// Ask for a backup file path, restricted to .json files.
    /// Ok(None) means the user cancelled the selection.
    fn pick_file(&self) -> Result<Option<PathBuf>>;
}

/// Terminal prompter reading answers from stdin
pub struct ConsolePrompter {
    assume_yes: bool,
}

impl ConsolePrompter {
    pub fn new() -> Self {
        Self { assume_yes: false }
    }

    /// Pre-confirm every question, for scripted use (--yes)
    pub fn with_assume_yes() -> Self {
        Self { assume_yes: true }
    }

    fn read_line(&self) -> Result<String> {
        let mut line = String::new();
        io::stdin()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        Ok(line.trim().to_string())
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for ConsolePrompter {
    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn alert(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message.red());
    }

    fn confirm(&self, question: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }

        print!("{} [y/N]: ", question);
        io::stdout().flush().context("Failed to flush stdout")?;

        let answer = self.read_line()?;
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    fn pick_file(&self) -> Result<Option<PathBuf>> {
        print!("Path to backup file (.json), empty to cancel: ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let answer = self.read_line()?;
        if answer.is_empty() {
            return Ok(None);
        }

        let path = PathBuf::from(answer);
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            println!("{} Only .json backup files are accepted", "⚠".yellow());
            return Ok(None);
        }

        Ok(Some(path))
    }
}
