//! Interactive read-eval-print loop.

use crate::error::{Result, StoreError};
use crate::shell::command::{parse_line, Command, Output};
use crate::store::Store;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use tracing::debug;

/// Shell configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Text written before each line is read.
    pub prompt: String,

    /// Whether to write the prompt at all.
    pub show_prompt: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            show_prompt: true,
        }
    }
}

/// Command interpreter over a [`Store`].
pub struct Shell {
    store: Store,
    config: ShellConfig,
}

impl Shell {
    pub fn new(store: Store, config: ShellConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Run a parsed command.
    pub fn execute(&mut self, command: Command) -> Result<Output> {
        let output = match command {
            Command::Begin => {
                self.store.begin();
                Output::Empty
            }
            Command::Commit => {
                if !self.store.commit() {
                    return Err(StoreError::NoTransaction);
                }
                Output::Empty
            }
            Command::Rollback => {
                if !self.store.rollback() {
                    return Err(StoreError::NoTransaction);
                }
                Output::Empty
            }
            Command::Get { key } => match self.store.get(&key) {
                Some(value) => Output::Value(value.to_string()),
                None => Output::Missing,
            },
            Command::Set { key, value } => {
                self.store.set(key, value);
                Output::Empty
            }
            Command::Delete { key } => {
                self.store.delete(key);
                Output::Empty
            }
            Command::Count { value } => Output::Count(self.store.count(&value)),
        };

        Ok(output)
    }

    /// Read commands from `input` until it ends or an exit line is read.
    ///
    /// An empty line, `exit` or `quit` ends the session. Command errors are
    /// written to `output` and the loop continues; only I/O errors stop it.
    /// Invalid UTF-8 is replaced with U+FFFD rather than rejected.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        let mut buf = Vec::new();

        loop {
            if self.config.show_prompt {
                write!(output, "{}", self.config.prompt)?;
                output.flush()?;
            }

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }

            let line = String::from_utf8_lossy(&buf);
            let text = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
            if text.is_empty() || text == "exit" || text == "quit" {
                return Ok(());
            }

            let command = match parse_line(text) {
                Ok(Some(command)) => command,
                Ok(None) => {
                    debug!(line = text, "ignoring unrecognized line");
                    continue;
                }
                Err(e) => {
                    writeln!(output, "{}", e)?;
                    continue;
                }
            };

            match self.execute(command) {
                Ok(Output::Empty) => {}
                Ok(result) => writeln!(output, "{}", result)?,
                Err(e) => writeln!(output, "{}", e)?,
            }
        }
    }
}
