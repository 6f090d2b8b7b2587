// libleia/src/protocol/status.rs

use crate::constants::{STATUS_ERROR, STATUS_SUCCESS, STATUS_UNSUPPORTED, STATUS_WAIT_EXTENSION};

/// Classification of the status byte the reader sends after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFlag {
    /// `S`: a detail byte follows
    Success,
    /// `E`
    Error,
    /// `U`: the firmware does not know the command
    Unsupported,
    /// `w`: the reader needs more time, read again
    WaitExtension,
    Invalid(u8),
}

impl From<u8> for StatusFlag {
    fn from(byte: u8) -> Self {
        match byte {
            STATUS_SUCCESS => StatusFlag::Success,
            STATUS_ERROR => StatusFlag::Error,
            STATUS_UNSUPPORTED => StatusFlag::Unsupported,
            STATUS_WAIT_EXTENSION => StatusFlag::WaitExtension,
            other => StatusFlag::Invalid(other),
        }
    }
}
