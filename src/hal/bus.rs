//! Single-byte register transfers on the shared I2C bus.

use embedded_hal::i2c::{Error as _, I2c};

use super::Status;

/// Transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

/// One register transfer.
///
/// Built per command and consumed synchronously. For [`Direction::Read`]
/// the driver stores the received byte in `data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub slave: u8,
    pub subaddress: u16,
    pub direction: Direction,
    pub data: u8,
}

impl Transfer {
    pub fn write(slave: u8, subaddress: u16, data: u8) -> Self {
        Self { slave, subaddress, direction: Direction::Write, data }
    }

    pub fn read(slave: u8, subaddress: u16) -> Self {
        Self { slave, subaddress, direction: Direction::Read, data: 0 }
    }
}

/// Synchronous bus access.
///
/// Blocks until the driver reports an outcome. Serialising access with
/// other bus users is the implementation's job.
pub trait BusMaster {
    fn transfer(&mut self, xfer: &mut Transfer) -> Result<(), Status>;
}

/// [`BusMaster`] on top of an `embedded-hal` I2C driver.
///
/// The 16-bit subaddress goes out MSB first, ahead of the payload.
pub struct I2cBus<I> {
    i2c: I,
}

impl<I: I2c> I2cBus<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Give the driver back
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> BusMaster for I2cBus<I> {
    fn transfer(&mut self, xfer: &mut Transfer) -> Result<(), Status> {
        let [hi, lo] = xfer.subaddress.to_be_bytes();
        let result = match xfer.direction {
            Direction::Write => self.i2c.write(xfer.slave, &[hi, lo, xfer.data]),
            Direction::Read => {
                let mut buf = [0u8; 1];
                self.i2c
                    .write_read(xfer.slave, &[hi, lo], &mut buf)
                    .map(|()| xfer.data = buf[0])
            }
        };
        result.map_err(|e| Status::from(e.kind()))
    }
}
