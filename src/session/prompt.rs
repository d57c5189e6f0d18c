//! Line-oriented prompts with validate-and-repeat loops

use anyhow::Result;
use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Where answers come from
#[async_trait]
pub trait Prompter: Send {
    /// Show `prompt` and read one answer; `None` once input is exhausted
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Tell the user why an answer was rejected
    fn reject(&mut self, message: &str);
}

/// Terminal state of a prompt loop
#[derive(Debug, Clone, PartialEq)]
pub enum Prompted<T> {
    Accepted(T),
    Cancelled,
}

/// Ask until `validate` accepts an answer or input runs out
///
/// Answers are trimmed before validation. There is no retry limit.
pub async fn prompt_until<T, F>(
    prompter: &mut dyn Prompter,
    prompt: &str,
    mut validate: F,
) -> Result<Prompted<T>>
where
    F: FnMut(&str) -> Result<T, String>,
{
    loop {
        let Some(answer) = prompter.ask(prompt).await? else {
            return Ok(Prompted::Cancelled);
        };
        match validate(answer.trim()) {
            Ok(value) => return Ok(Prompted::Accepted(value)),
            Err(message) => prompter.reject(&message),
        }
    }
}

/// Prompts on stdout, answers from stdin
pub struct TerminalPrompter {
    lines: Lines<BufReader<Stdin>>,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;
        Ok(self.lines.next_line().await?)
    }

    fn reject(&mut self, message: &str) {
        println!("❌ {}", message);
    }
}
