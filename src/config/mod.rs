//! Console and board configuration.
//!
//! Buffer capacities are compile-time constants; everything else has a
//! `Default` matching the reference board and can be overridden before
//! the console is built.

use crate::log_globals::CONSOLE_LOG;
use crate::logging::LogStream;

/// Characters kept per command line. Extra input is dropped.
pub const INPUT_CAPACITY: usize = 50;

/// Bytes per reply chunk.
pub const OUTPUT_CAPACITY: usize = 100;

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Console behaviour
#[derive(Clone, Copy)]
pub struct ConsoleConfig {
    /// Text of the startup line, written once before input is accepted
    pub banner: &'static str,
    /// Echo every received byte back to the operator
    pub echo: bool,
    /// Microsecond clock used to timestamp log records
    pub clock: fn() -> i64,
    /// Where console events are logged
    pub log: &'static LogStream,
}

fn no_clock() -> i64 {
    0
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            banner: VERSION,
            echo: true,
            clock: no_clock,
            log: &CONSOLE_LOG,
        }
    }
}

/// Peripheral settings for the device build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Operator console UART
    pub console_baud: u32,
    /// TX-only log UART
    pub log_baud: u32,
    /// I2C bus clock in Hz
    pub i2c_hz: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            console_baud: 115_200,
            log_baud: 115_200,
            i2c_hz: 100_000,
        }
    }
}
