//! Driver status codes reported back to the operator.

use embedded_hal::i2c::ErrorKind;

/// Outcome of a hardware operation.
///
/// `0` is success, positive values are driver failures and
/// [`Status::NOT_ATTEMPTED`] marks an operation that was never issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(pub i32);

impl Status {
    pub const SUCCESS: Status = Status(0);
    /// Operation skipped because its parameters did not parse.
    pub const NOT_ATTEMPTED: Status = Status(-1);
    pub const BUS: Status = Status(1);
    pub const ARBITRATION_LOST: Status = Status(2);
    pub const NO_ACKNOWLEDGE: Status = Status(3);
    pub const OVERRUN: Status = Status(4);
    pub const OTHER: Status = Status(5);
    /// Pin id is valid but no driver is attached to it.
    pub const UNSUPPORTED: Status = Status(6);

    /// Check for the success code
    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// Raw code as printed in error replies
    pub fn code(self) -> i32 {
        self.0
    }
}

impl From<ErrorKind> for Status {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => Self::BUS,
            ErrorKind::ArbitrationLoss => Self::ARBITRATION_LOST,
            ErrorKind::NoAcknowledge(_) => Self::NO_ACKNOWLEDGE,
            ErrorKind::Overrun => Self::OVERRUN,
            _ => Self::OTHER,
        }
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
