//! Line-oriented command interpreter.
//!
//! Reads one command per line, runs it against a [`Store`](crate::Store) and
//! writes the result:
//!
//! ```text
//! > set a 10
//! > begin
//! > delete a
//! > get a
//! key not set
//! > rollback
//! > get a
//! 10
//! ```

mod command;
mod repl;

pub use command::{parse_line, Command, Output};
pub use repl::{Shell, ShellConfig};
