//! Hardware Abstraction Layer for BoardConsole.
//!
//! Traits the console drives, plus adapters onto `embedded-hal` drivers.
//! Business logic stays in the console, HAL is just I/O.

pub mod bus;
pub mod gpio;
pub mod serial;
pub mod sim;
pub mod status;

pub use bus::{BusMaster, Direction, I2cBus, Transfer};
pub use gpio::{DigitalPins, PinBank, PinId, PIN_COUNT};
pub use serial::Transport;
pub use sim::{SimBus, SimPins};
pub use status::Status;
