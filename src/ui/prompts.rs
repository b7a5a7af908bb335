//! ui::prompts
//!
//! Line input, plain or masked.
//!
//! # Design
//!
//! The terminal driver reads through the [`LineSource`] trait. [`Stdin`]
//! reads the process's standard input and switches to `rpassword` for masked
//! prompts when standard input is a terminal. When input is piped, masked
//! prompts fall back to plain line reads so the tool stays scriptable.
//! [`Scripted`] replays fixed lines for tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use thiserror::Error;
use zeroize::Zeroize;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// A source of operator input lines.
pub trait LineSource {
    /// Show `prompt` and read one line without its line terminator.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str, masked: bool) -> Result<Option<String>, PromptError>;
}

/// Standard input.
#[derive(Debug)]
pub struct Stdin {
    interactive: bool,
}

impl Stdin {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }

    /// Whether standard input is a terminal.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

impl Default for Stdin {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for Stdin {
    fn read_line(&mut self, prompt: &str, masked: bool) -> Result<Option<String>, PromptError> {
        if masked && self.interactive {
            return masked_line(rpassword::prompt_password(prompt));
        }

        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).to_string();
        line.zeroize();
        Ok(Some(trimmed))
    }
}

/// Ctrl-D at a masked prompt surfaces as `UnexpectedEof`; treat it as end
/// of input like any other prompt.
fn masked_line(read: io::Result<String>) -> Result<Option<String>, PromptError> {
    match read {
        Ok(line) => Ok(Some(line)),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Replays a fixed list of lines, then reports end of input.
#[derive(Debug, Default)]
pub struct Scripted {
    lines: VecDeque<String>,
    prompts: Vec<(String, bool)>,
}

impl Scripted {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far, with their masked flag.
    pub fn prompts(&self) -> &[(String, bool)] {
        &self.prompts
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for Scripted {
    fn read_line(&mut self, prompt: &str, masked: bool) -> Result<Option<String>, PromptError> {
        self.prompts.push((prompt.to_string(), masked));
        Ok(self.lines.pop_front())
    }
}
