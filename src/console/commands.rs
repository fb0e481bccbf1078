//! Command registry and hardware command handlers

use core::fmt::Write;

use super::parser::{parse_decimal, parse_hex_u16, parse_hex_u8, ParsedCommand};
use super::ConsoleError;
use crate::config::OUTPUT_CAPACITY;
use crate::hal::{BusMaster, PinBank, PinId, Status, Transfer};

/// One chunk of console output
pub type Reply = heapless::String<OUTPUT_CAPACITY>;

/// Hardware handed to a handler for the duration of one command
pub struct Hardware<'a> {
    pub pins: &'a mut dyn PinBank,
    pub bus: &'a mut dyn BusMaster,
}

/// Command implementation.
///
/// Writes exactly one ack or error line into the reply and returns the
/// error, if any, for logging.
pub type Handler = fn(&ParsedCommand<'_>, &mut Hardware<'_>, &mut Reply) -> Result<(), ConsoleError>;

/// What a registered command does
#[derive(Clone, Copy)]
pub enum Action {
    /// Built-in listing of every registered command, one per chunk
    ListCommands,
    Run(Handler),
}

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    pub help: &'static str,
    /// Parameters required after the keyword
    pub min_params: usize,
    pub action: Action,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "help",
        help: "help: Lists all the registered commands",
        min_params: 0,
        action: Action::ListCommands,
    },
    CommandDescriptor {
        name: "gpio",
        help: "gpio <number> <on/off/get>: Sets GPIO number on or off, or reads it",
        min_params: 2,
        action: Action::Run(cmd_gpio),
    },
    CommandDescriptor {
        name: "2write",
        help: "2write <0x8slave> <0x16address> <0x8value>: writes 1 byte hexa to address at slave",
        min_params: 3,
        action: Action::Run(cmd_i2c_write),
    },
    CommandDescriptor {
        name: "2read",
        help: "2read <0x8slave> <0x16address>: reads 1 byte hexa from address at slave",
        min_params: 2,
        action: Action::Run(cmd_i2c_read),
    },
];

/// Exact, case-sensitive keyword lookup
pub fn find_command(name: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// Get all command names
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name)
}

// --- Command Implementations ---

/// Second `gpio` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinAction {
    On,
    Off,
    Get,
}

impl PinAction {
    /// Exact keyword match
    pub fn classify(token: &str) -> Option<Self> {
        match token {
            "on" => Some(Self::On),
            "off" => Some(Self::Off),
            "get" => Some(Self::Get),
            _ => None,
        }
    }
}

fn gpio_error(reply: &mut Reply, err: ConsoleError) -> Result<(), ConsoleError> {
    let _ = write!(reply, "\r\n#Error during gpio\r\n");
    Err(err)
}

fn cmd_gpio(cmd: &ParsedCommand<'_>, hw: &mut Hardware<'_>, reply: &mut Reply) -> Result<(), ConsoleError> {
    let token = cmd.arg(1).unwrap_or_default();

    let Some(pin) = cmd.arg(0).and_then(parse_decimal).and_then(PinId::new) else {
        return gpio_error(reply, ConsoleError::InvalidValue);
    };
    let Some(action) = PinAction::classify(token) else {
        return gpio_error(reply, ConsoleError::UnknownAction);
    };

    match action {
        PinAction::Get => match hw.pins.get(pin) {
            Ok(high) => {
                let _ = write!(reply, "\r\nack gpio value=0x{:x}\r\n", u8::from(high));
                Ok(())
            }
            Err(status) => gpio_error(reply, ConsoleError::Hardware(status)),
        },
        PinAction::On | PinAction::Off => match hw.pins.set(pin, action == PinAction::On) {
            Ok(()) => {
                let _ = write!(reply, "\r\nack gpio {}\r\n", token);
                Ok(())
            }
            Err(status) => gpio_error(reply, ConsoleError::Hardware(status)),
        },
    }
}

/// Map a transfer outcome onto the status printed to the operator
fn settle(result: Result<(), Status>) -> Status {
    match result {
        Ok(()) => Status::SUCCESS,
        Err(status) => status,
    }
}

fn transfer_error(status: Status) -> ConsoleError {
    if status == Status::NOT_ATTEMPTED {
        ConsoleError::InvalidValue
    } else {
        ConsoleError::Hardware(status)
    }
}

fn cmd_i2c_write(cmd: &ParsedCommand<'_>, hw: &mut Hardware<'_>, reply: &mut Reply) -> Result<(), ConsoleError> {
    let slave = cmd.arg(0).and_then(parse_hex_u8);
    let subaddress = cmd.arg(1).and_then(parse_hex_u16);
    let data = cmd.arg(2).and_then(parse_hex_u8);

    let mut status = Status::NOT_ATTEMPTED;
    if let (Some(slave), Some(subaddress), Some(data)) = (slave, subaddress, data) {
        let mut xfer = Transfer::write(slave, subaddress, data);
        status = settle(hw.bus.transfer(&mut xfer));
    }

    // Unparsed values print as all ones
    let slave = slave.unwrap_or(u8::MAX);
    let subaddress = subaddress.unwrap_or(u16::MAX);
    let data = data.unwrap_or(u8::MAX);

    if status.is_success() {
        let _ = write!(reply, "\r\nack 2write {:x} {:x} {:x}\r\n", slave, subaddress, data);
        Ok(())
    } else {
        let _ = write!(
            reply,
            "\r\n#Error during 2write {:x} {:x} {:x} result: {}\r\n",
            slave, subaddress, data, status
        );
        Err(transfer_error(status))
    }
}

fn cmd_i2c_read(cmd: &ParsedCommand<'_>, hw: &mut Hardware<'_>, reply: &mut Reply) -> Result<(), ConsoleError> {
    let slave = cmd.arg(0).and_then(parse_hex_u8);
    let subaddress = cmd.arg(1).and_then(parse_hex_u16);

    let mut status = Status::NOT_ATTEMPTED;
    let mut value = 0u8;
    if let (Some(slave), Some(subaddress)) = (slave, subaddress) {
        let mut xfer = Transfer::read(slave, subaddress);
        status = settle(hw.bus.transfer(&mut xfer));
        value = xfer.data;
    }

    let slave = slave.unwrap_or(u8::MAX);
    let subaddress = subaddress.unwrap_or(u16::MAX);

    if status.is_success() {
        let _ = write!(
            reply,
            "\r\nack 2read 0x{:x} 0x{:x} value=0x{:x}\r\n",
            slave, subaddress, value
        );
        Ok(())
    } else {
        let _ = write!(
            reply,
            "\r\n#Error during 2read 0x{:x} 0x{:x} result: {}\r\n",
            slave, subaddress, status
        );
        Err(transfer_error(status))
    }
}
