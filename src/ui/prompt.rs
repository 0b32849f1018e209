//! Confirmation and line-input prompts
//!
//! Interactive input goes through the [`Prompter`] trait so command logic
//! stays testable without a terminal. The process blocks on stdin while a
//! prompt is open; nothing has been committed to storage at that point
//! unless the command explicitly snapshotted earlier.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Attempt budget for interactive retry loops (currency codes, exchange rates)
pub const MAX_ATTEMPTS: u32 = 3;

/// Interactive input primitive used by commands
pub trait Prompter {
    /// Ask a yes/no question; only an explicit "y" answers yes
    fn confirm(&mut self, question: &str) -> io::Result<bool>;

    /// Prompt for a single line of input, trimmed
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Prompter backed by stdin/stdout
pub struct StdPrompter;

impl Prompter for StdPrompter {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.read_line(&format!("{question} (y/N): "))?;
        Ok(answer.eq_ignore_ascii_case("y"))
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

/// Scripted prompter that replays canned answers, for tests
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
}

impl ScriptedPrompter {
    /// Build a prompter that will answer prompts in order
    pub fn with_answers(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, _question: &str) -> io::Result<bool> {
        Ok(self
            .answers
            .pop_front()
            .map(|a| a.eq_ignore_ascii_case("y"))
            .unwrap_or(false))
    }

    fn read_line(&mut self, _prompt: &str) -> io::Result<String> {
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompter_replays_in_order() {
        let mut prompter = ScriptedPrompter::with_answers(&["y", "EUR", "n"]);

        assert!(prompter.confirm("first?").unwrap());
        assert_eq!(prompter.read_line("code: ").unwrap(), "EUR");
        assert!(!prompter.confirm("third?").unwrap());
    }

    #[test]
    fn test_scripted_prompter_defaults_to_no() {
        let mut prompter = ScriptedPrompter::default();
        assert!(!prompter.confirm("anything?").unwrap());
        assert_eq!(prompter.read_line("anything: ").unwrap(), "");
    }
}
