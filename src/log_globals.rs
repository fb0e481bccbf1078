//! Global log stream instance.
//!
//! Producer: the console worker. Consumer: the log drain task.

use crate::logging::LogStream;

/// Device-wide console log.
pub static CONSOLE_LOG: LogStream = LogStream::new();
