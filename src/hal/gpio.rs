//! Digital pins reachable from the console.

use embedded_hal::digital::{InputPin, OutputPin};
use heapless::Vec;

use super::Status;

/// Number of GPIO lines in the pin matrix.
#[cfg(not(feature = "esp32p4"))]
pub const PIN_COUNT: u8 = 49;
#[cfg(feature = "esp32p4")]
pub const PIN_COUNT: u8 = 55;

/// Validated pin number in `0..PIN_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PinId(u8);

impl PinId {
    /// Validate a raw pin number
    pub fn new(number: u32) -> Option<Self> {
        u8::try_from(number)
            .ok()
            .filter(|n| *n < PIN_COUNT)
            .map(PinId)
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

/// Level access to the board's digital pins.
///
/// Implementations own the drivers; the console never configures pin modes.
pub trait PinBank {
    /// Drive the pin high (`true`) or low (`false`)
    fn set(&mut self, pin: PinId, high: bool) -> Result<(), Status>;

    /// Read the current input level
    fn get(&mut self, pin: PinId) -> Result<bool, Status>;
}

/// [`PinBank`] over a fixed set of `embedded-hal` pins.
///
/// Only pins that were attached are reachable; any other valid id
/// reports [`Status::UNSUPPORTED`].
pub struct DigitalPins<P, const N: usize> {
    pins: Vec<(PinId, P), N>,
}

impl<P, const N: usize> DigitalPins<P, N>
where
    P: InputPin + OutputPin,
{
    /// Create an empty bank
    pub const fn new() -> Self {
        Self { pins: Vec::new() }
    }

    /// Attach a driver under `id`.
    ///
    /// Hands the driver back if the bank is full or `id` is taken.
    pub fn attach(&mut self, id: PinId, pin: P) -> Result<(), P> {
        if self.pins.iter().any(|(existing, _)| *existing == id) {
            return Err(pin);
        }
        self.pins.push((id, pin)).map_err(|(_, pin)| pin)
    }

    /// Number of attached pins
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    fn find(&mut self, id: PinId) -> Result<&mut P, Status> {
        self.pins
            .iter_mut()
            .find(|(existing, _)| *existing == id)
            .map(|(_, pin)| pin)
            .ok_or(Status::UNSUPPORTED)
    }
}

impl<P, const N: usize> Default for DigitalPins<P, N>
where
    P: InputPin + OutputPin,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, const N: usize> PinBank for DigitalPins<P, N>
where
    P: InputPin + OutputPin,
{
    fn set(&mut self, pin: PinId, high: bool) -> Result<(), Status> {
        let driver = self.find(pin)?;
        let result = if high { driver.set_high() } else { driver.set_low() };
        result.map_err(|_| Status::OTHER)
    }

    fn get(&mut self, pin: PinId) -> Result<bool, Status> {
        self.find(pin)?.is_high().map_err(|_| Status::OTHER)
    }
}
