//! Shared fixtures for the console integration tests

#![allow(dead_code)]

use std::collections::VecDeque;

use board_console::hal::{SimBus, SimPins, Transport};
use board_console::logging::{LogRecord, LogStream, LOG_BUFFER_SIZE};
use board_console::{Console, ConsoleConfig, Poll};

/// Error raised by a [`TestPort`] set up to fail writes
#[derive(Debug)]
pub struct PortClosed;

/// In-memory transport: queued input, captured output
#[derive(Default)]
pub struct TestPort {
    input: VecDeque<u8>,
    output: Vec<u8>,
    fail_writes: bool,
}

impl TestPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        self.input.extend(bytes);
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Output since the last call
    pub fn take_output(&mut self) -> String {
        let text = self.output();
        self.output.clear();
        text
    }
}

impl Transport for TestPort {
    type Error = PortClosed;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, PortClosed> {
        match (buf.first_mut(), self.input.pop_front()) {
            (Some(slot), Some(byte)) => {
                *slot = byte;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), PortClosed> {
        if self.fail_writes {
            return Err(PortClosed);
        }
        self.output.extend_from_slice(data);
        Ok(())
    }
}

pub type SimConsole = Console<SimPins, SimBus>;

/// Private log stream so parallel tests never share records
pub fn test_log() -> &'static LogStream {
    Box::leak(Box::new(LogStream::<LOG_BUFFER_SIZE>::new()))
}

/// Console without echo, so output holds only replies and line breaks
pub fn quiet_console() -> (SimConsole, &'static LogStream) {
    let log = test_log();
    let config = ConsoleConfig {
        echo: false,
        log,
        ..ConsoleConfig::default()
    };
    (Console::new(SimPins::new(), SimBus::new(), config), log)
}

pub fn echo_console() -> (SimConsole, &'static LogStream) {
    let log = test_log();
    let config = ConsoleConfig {
        log,
        ..ConsoleConfig::default()
    };
    (Console::new(SimPins::new(), SimBus::new(), config), log)
}

/// Feed `input` and poll until the port runs dry
pub fn type_line(console: &mut SimConsole, port: &mut TestPort, input: &str) -> Vec<Poll> {
    port.feed(input.as_bytes());
    let mut polls = Vec::new();
    loop {
        match console.poll(port) {
            Poll::Idle => return polls,
            other => polls.push(other),
        }
    }
}

/// Non-empty lines of console output
pub fn reply_lines(output: &str) -> Vec<&str> {
    output.split("\r\n").filter(|l| !l.is_empty()).collect()
}

pub fn drain_log(log: &LogStream) -> Vec<LogRecord> {
    std::iter::from_fn(|| log.drain()).collect()
}
