//! Command interpreter: resolves a completed line against the registry
//! and produces the reply chunks.

use core::fmt::Write;

use super::commands::{find_command, Action, Hardware, Reply, COMMANDS};
use super::parser::parse_line;
use super::ConsoleError;
use crate::hal::{BusMaster, PinBank};

const UNKNOWN_COMMAND: &str =
    "\r\nCommand not recognised.  Enter 'help' to view a list of available commands.\r\n";
const INCORRECT_PARAMETERS: &str =
    "\r\nIncorrect command parameter(s).  Enter 'help' to view a list of available commands.\r\n";

/// Result of one interpreter step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// More output follows; call again with the same line
    Pending,
    /// Command finished
    Complete(Result<(), ConsoleError>),
}

/// Owns the hardware the handlers act on.
pub struct Interpreter<P, B> {
    pins: P,
    bus: B,
    /// Next registry entry to list while `help` is in progress
    listing: Option<usize>,
}

impl<P: PinBank, B: BusMaster> Interpreter<P, B> {
    pub fn new(pins: P, bus: B) -> Self {
        Self { pins, bus, listing: None }
    }

    pub fn pins(&self) -> &P {
        &self.pins
    }

    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Produce the next reply chunk for `line`.
    ///
    /// The reply is cleared first. While a multi-chunk command is in
    /// progress the line is not looked at again.
    pub fn process_command(&mut self, line: &[u8], reply: &mut Reply) -> Step {
        reply.clear();

        if let Some(next) = self.listing {
            return self.list_commands(next, reply);
        }

        let cmd = parse_line(line);
        if cmd.command.is_empty() {
            return Step::Complete(Ok(()));
        }

        let Some(descriptor) = find_command(cmd.command) else {
            let _ = reply.push_str(UNKNOWN_COMMAND);
            return Step::Complete(Err(ConsoleError::UnknownCommand));
        };

        if cmd.count() < descriptor.min_params {
            let _ = reply.push_str(INCORRECT_PARAMETERS);
            return Step::Complete(Err(ConsoleError::IncorrectParameters));
        }

        match descriptor.action {
            Action::ListCommands => self.list_commands(0, reply),
            Action::Run(handler) => {
                let mut hw = Hardware {
                    pins: &mut self.pins,
                    bus: &mut self.bus,
                };
                Step::Complete(handler(&cmd, &mut hw, reply))
            }
        }
    }

    fn list_commands(&mut self, index: usize, reply: &mut Reply) -> Step {
        let Some(descriptor) = COMMANDS.get(index) else {
            self.listing = None;
            return Step::Complete(Ok(()));
        };

        if index == 0 {
            let _ = reply.push_str("\r\n");
        }
        let _ = write!(reply, "{}\r\n", descriptor.help);

        if index + 1 < COMMANDS.len() {
            self.listing = Some(index + 1);
            Step::Pending
        } else {
            self.listing = None;
            Step::Complete(Ok(()))
        }
    }

    /// Run `line` to completion, handing each non-empty chunk to `sink`
    /// as soon as it is produced.
    pub fn interpret(&mut self, line: &[u8], mut sink: impl FnMut(&str)) -> Result<(), ConsoleError> {
        let mut reply = Reply::new();
        loop {
            let step = self.process_command(line, &mut reply);
            if !reply.is_empty() {
                sink(reply.as_str());
            }
            if let Step::Complete(result) = step {
                return result;
            }
        }
    }
}
