//! Serial console for board maintenance
//!
//! Single cooperative worker, no heap allocation.

#[allow(clippy::module_inception)]
pub mod console;
pub mod commands;
pub mod error;
pub mod interpreter;
pub mod line_buffer;
pub mod parser;

pub use commands::{command_names, find_command, CommandDescriptor, Reply, COMMANDS};
pub use console::{Console, Poll};
pub use error::ConsoleError;
pub use interpreter::{Interpreter, Step};
pub use line_buffer::LineBuffer;
pub use parser::{parse_line, ParsedCommand};
