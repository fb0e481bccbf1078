//! Main console struct: line editing and the serving loop

use super::{ConsoleError, Interpreter, LineBuffer};
use crate::config::ConsoleConfig;
use crate::hal::{BusMaster, PinBank, Transport};
use crate::{log_debug, log_error, log_info, log_warn};

const CR: u8 = b'\r';
const LF: u8 = b'\n';
const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;

/// Outcome of one [`Console::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// Nothing to read; the caller should yield
    Idle,
    /// A byte was consumed, no line completed
    Byte,
    /// A line was dispatched
    Line(Result<(), ConsoleError>),
}

/// Console state machine
pub struct Console<P, B> {
    line: LineBuffer,
    interpreter: Interpreter<P, B>,
    config: ConsoleConfig,
}

impl<P: PinBank, B: BusMaster> Console<P, B> {
    /// Create a console driving `pins` and `bus`
    pub fn new(pins: P, bus: B, config: ConsoleConfig) -> Self {
        Self {
            line: LineBuffer::new(),
            interpreter: Interpreter::new(pins, bus),
            config,
        }
    }

    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    pub fn interpreter(&self) -> &Interpreter<P, B> {
        &self.interpreter
    }

    pub fn interpreter_mut(&mut self) -> &mut Interpreter<P, B> {
        &mut self.interpreter
    }

    /// Write the banner line
    pub fn start<T: Transport>(&mut self, port: &mut T) {
        emit(port, self.config.banner.as_bytes(), &self.config);
        emit(port, b" console, type 'help'\r\n", &self.config);
        log_info!(self.config.log, (self.config.clock)(), "console started");
    }

    /// Process a single input byte
    ///
    /// Returns Some(result) if a line was dispatched, None otherwise.
    pub fn process_byte<T: Transport>(&mut self, byte: u8, port: &mut T) -> Option<Result<(), ConsoleError>> {
        if self.config.echo {
            emit(port, &[byte], &self.config);
        }

        match byte {
            CR => {
                emit(port, b"\r\n", &self.config);
                let result = if self.line.is_blank() {
                    None
                } else {
                    Some(self.dispatch(port))
                };
                self.line.clear();
                result
            }

            // Second half of a CR LF pair
            LF => None,

            BACKSPACE | DELETE => {
                self.line.backspace();
                None
            }

            _ => {
                self.line.push(byte);
                None
            }
        }
    }

    fn dispatch<T: Transport>(&mut self, port: &mut T) -> Result<(), ConsoleError> {
        let config = self.config;
        let result = self
            .interpreter
            .interpret(self.line.as_bytes(), |chunk| emit(port, chunk.as_bytes(), &config));

        let now = (config.clock)();
        match result {
            Ok(()) => log_debug!(config.log, now, "'{}' ok", self.line.as_str()),
            Err(err) => log_warn!(config.log, now, "'{}' {}", self.line.as_str(), err),
        }
        result
    }

    /// Attempt one read and process what arrived
    pub fn poll<T: Transport>(&mut self, port: &mut T) -> Poll {
        let mut byte = [0u8; 1];
        match port.read(&mut byte) {
            Ok(0) => Poll::Idle,
            Ok(_) => match self.process_byte(byte[0], port) {
                Some(result) => Poll::Line(result),
                None => Poll::Byte,
            },
            Err(err) => {
                log_error!(self.config.log, (self.config.clock)(), "transport read failed: {:?}", err);
                Poll::Idle
            }
        }
    }

    /// Serve the port forever, calling `idle` whenever nothing arrived.
    pub fn run<T: Transport>(mut self, port: &mut T, mut idle: impl FnMut()) -> ! {
        self.start(port);
        loop {
            if self.poll(port) == Poll::Idle {
                idle();
            }
        }
    }
}

/// Write to the operator; failures are logged, never propagated
fn emit<T: Transport>(port: &mut T, bytes: &[u8], config: &ConsoleConfig) {
    if let Err(err) = port.write_all(bytes) {
        log_error!(config.log, (config.clock)(), "transport write failed: {:?}", err);
    }
}
