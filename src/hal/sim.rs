//! Simulated pins and bus.
//!
//! Backs the host build of the console and the test suite. Every call is
//! counted and failures can be injected.

use heapless::Vec;

use super::bus::{BusMaster, Direction, Transfer};
use super::gpio::{PinBank, PinId, PIN_COUNT};
use super::Status;

/// Maximum number of distinct registers the simulated bus remembers
pub const SIM_REGISTERS: usize = 32;

/// Pin bank holding one level per pin id
pub struct SimPins {
    levels: [bool; PIN_COUNT as usize],
    fail_with: Option<Status>,
    reads: u32,
    writes: u32,
}

impl SimPins {
    /// All pins low, every call succeeds
    pub const fn new() -> Self {
        Self {
            levels: [false; PIN_COUNT as usize],
            fail_with: None,
            reads: 0,
            writes: 0,
        }
    }

    /// Make every following call fail with `status` (or succeed with `None`)
    pub fn fail_with(&mut self, status: Option<Status>) {
        self.fail_with = status;
    }

    /// Force a level without counting it as a write
    pub fn drive(&mut self, pin: PinId, high: bool) {
        self.levels[pin.number() as usize] = high;
    }

    pub fn level(&self, pin: PinId) -> bool {
        self.levels[pin.number() as usize]
    }

    pub fn reads(&self) -> u32 {
        self.reads
    }

    pub fn writes(&self) -> u32 {
        self.writes
    }

    /// Total number of calls made through [`PinBank`]
    pub fn calls(&self) -> u32 {
        self.reads + self.writes
    }
}

impl Default for SimPins {
    fn default() -> Self {
        Self::new()
    }
}

impl PinBank for SimPins {
    fn set(&mut self, pin: PinId, high: bool) -> Result<(), Status> {
        self.writes += 1;
        if let Some(status) = self.fail_with {
            return Err(status);
        }
        self.levels[pin.number() as usize] = high;
        Ok(())
    }

    fn get(&mut self, pin: PinId) -> Result<bool, Status> {
        self.reads += 1;
        if let Some(status) = self.fail_with {
            return Err(status);
        }
        Ok(self.levels[pin.number() as usize])
    }
}

#[derive(Debug, Clone, Copy)]
struct Register {
    slave: u8,
    subaddress: u16,
    value: u8,
}

/// Bus where every slave acknowledges and registers read back what was
/// written (zero when never written).
pub struct SimBus {
    registers: Vec<Register, SIM_REGISTERS>,
    fail_with: Option<Status>,
    transfers: u32,
    last: Option<Transfer>,
}

impl SimBus {
    pub const fn new() -> Self {
        Self {
            registers: Vec::new(),
            fail_with: None,
            transfers: 0,
            last: None,
        }
    }

    /// Make every following transfer fail with `status` (or succeed with `None`)
    pub fn fail_with(&mut self, status: Option<Status>) {
        self.fail_with = status;
    }

    /// Preload a register value.
    ///
    /// Returns `false` when the register table is full.
    pub fn preload(&mut self, slave: u8, subaddress: u16, value: u8) -> bool {
        self.store(slave, subaddress, value)
    }

    /// Current register value, if it was ever written
    pub fn register(&self, slave: u8, subaddress: u16) -> Option<u8> {
        self.registers
            .iter()
            .find(|r| r.slave == slave && r.subaddress == subaddress)
            .map(|r| r.value)
    }

    /// Number of transfers issued, failed ones included
    pub fn transfers(&self) -> u32 {
        self.transfers
    }

    /// Descriptor of the most recent transfer as the driver saw it
    pub fn last_transfer(&self) -> Option<Transfer> {
        self.last
    }

    fn store(&mut self, slave: u8, subaddress: u16, value: u8) -> bool {
        if let Some(reg) = self
            .registers
            .iter_mut()
            .find(|r| r.slave == slave && r.subaddress == subaddress)
        {
            reg.value = value;
            return true;
        }
        self.registers
            .push(Register { slave, subaddress, value })
            .is_ok()
    }
}

impl Default for SimBus {
    fn default() -> Self {
        Self::new()
    }
}

impl BusMaster for SimBus {
    fn transfer(&mut self, xfer: &mut Transfer) -> Result<(), Status> {
        self.transfers += 1;
        self.last = Some(*xfer);

        if let Some(status) = self.fail_with {
            return Err(status);
        }

        match xfer.direction {
            Direction::Write => {
                if self.store(xfer.slave, xfer.subaddress, xfer.data) {
                    Ok(())
                } else {
                    Err(Status::OVERRUN)
                }
            }
            Direction::Read => {
                xfer.data = self.register(xfer.slave, xfer.subaddress).unwrap_or(0);
                Ok(())
            }
        }
    }
}
