//! # BoardConsole
//!
//! Serial maintenance console for GPIO and I2C bring-up.
//!
//! ## Architecture
//!
//! ```text
//! Transport ─▶ LineBuffer ─▶ Interpreter ─▶ COMMANDS ─▶ handler ─▶ PinBank / BusMaster
//!     ▲                                                   │
//!     └──────────────────── reply chunks ◀────────────────┘
//! ```
//!
//! One cooperative worker owns the [`Console`] and the hardware injected
//! into it. Nothing in the console allocates, locks or panics on operator
//! input.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod hal;
pub mod log_drain;
pub mod log_globals;
pub mod logging;

pub use config::{BoardConfig, ConsoleConfig};
pub use console::{Console, ConsoleError, Poll};
pub use hal::{BusMaster, PinBank, PinId, Status, Transport};
pub use log_globals::CONSOLE_LOG;
