//! Command parsing and rendering.

use crate::error::{Result, StoreError};
use std::fmt;

/// A parsed shell command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Begin,
    Commit,
    Rollback,
    Get { key: String },
    Set { key: String, value: String },
    Delete { key: String },
    Count { value: String },
}

/// Result of running a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    /// Nothing to print.
    Empty,
    /// A `get` hit.
    Value(String),
    /// A `get` miss.
    Missing,
    /// A `count` result.
    Count(usize),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Empty => Ok(()),
            Output::Value(value) => write!(f, "{}", value),
            Output::Missing => write!(f, "key not set"),
            Output::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Parse one input line.
///
/// Tokens are separated by spaces; runs of spaces produce no empty
/// arguments. The verb is case-insensitive, arguments are kept verbatim.
/// Returns `Ok(None)` for a blank line or an unknown verb.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let parts: Vec<&str> = line.split(' ').filter(|p| !p.is_empty()).collect();
    let Some((verb, args)) = parts.split_first() else {
        return Ok(None);
    };

    let command = match verb.to_lowercase().as_str() {
        "begin" => Command::Begin,
        "commit" => Command::Commit,
        "rollback" => Command::Rollback,
        "get" => match args {
            [key] => Command::Get {
                key: key.to_string(),
            },
            _ => return Err(arity("GET", "one argument")),
        },
        "set" => match args {
            [key, value] => Command::Set {
                key: key.to_string(),
                value: value.to_string(),
            },
            _ => return Err(arity("SET", "two arguments")),
        },
        "delete" => match args {
            [key] => Command::Delete {
                key: key.to_string(),
            },
            _ => return Err(arity("DELETE", "one argument")),
        },
        "count" => match args {
            [value] => Command::Count {
                value: value.to_string(),
            },
            _ => return Err(arity("COUNT", "one argument")),
        },
        _ => return Ok(None),
    };

    Ok(Some(command))
}

fn arity(command: &'static str, expected: &'static str) -> StoreError {
    StoreError::WrongArity { command, expected }
}
