//! Console error types

use crate::hal::Status;

/// Why a command line did not complete successfully.
///
/// Every variant has already been reported to the operator by the time
/// it is returned; callers only log it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: Unknown command
    UnknownCommand,
    /// E02: Fewer parameters than the command needs
    IncorrectParameters,
    /// E03: Numeric parameter did not parse or is out of range
    InvalidValue,
    /// E04: Keyword parameter not recognised
    UnknownAction,
    /// E05: Driver reported a failure status
    Hardware(Status),
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::IncorrectParameters => "E02",
            Self::InvalidValue => "E03",
            Self::UnknownAction => "E04",
            Self::Hardware(_) => "E05",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown command",
            Self::IncorrectParameters => "incorrect parameters",
            Self::InvalidValue => "invalid value",
            Self::UnknownAction => "unknown action",
            Self::Hardware(_) => "hardware status",
        }
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Hardware(status) => write!(f, "{}: {} {}", self.code(), self.message(), status),
            _ => write!(f, "{}: {}", self.code(), self.message()),
        }
    }
}
