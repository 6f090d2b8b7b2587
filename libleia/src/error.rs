// libleia/src/error.rs

use derive_more::Display;
use thiserror::Error;

/// Protocol stage at which a failure was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Stage {
    #[display(fmt = "status")]
    Status,
    #[display(fmt = "ack")]
    Ack,
    #[display(fmt = "response size")]
    ResponseSize,
    #[display(fmt = "payload")]
    Payload,
}

/// Coarse classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    /// No device, port could not be opened, or no open channel.
    Connection,
    /// The liveness probe did not answer with the ready flag.
    Handshake,
    /// Short reads/writes, bad flags or unexpected sizes on the wire.
    Framing,
    /// The device answered with an error status.
    Device,
    /// The operation's precondition does not hold (e.g. no card).
    Precondition,
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("discovery: no LEIA device found ({vendor_id:#06x}:{product_id:#06x})")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    #[error("discovery: {count} matching serial ports found, expected one or a paired two")]
    AmbiguousDevice { count: usize },

    #[error("discovery: cannot open any matching serial port: {0}")]
    PortOpen(String),

    #[error("no serial connection open")]
    NotConnected,

    #[error("session lock poisoned by a panicking operation")]
    SessionPoisoned,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serial")]
    #[error("serial error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("handshake: {0}")]
    Handshake(String),

    #[error("{stage}: short read, expected {expected} bytes, got {actual}")]
    ShortRead {
        stage: Stage,
        expected: usize,
        actual: usize,
    },

    #[error("command: short write, expected {expected} bytes, wrote {actual}")]
    ShortWrite { expected: usize, actual: usize },

    #[error("response size: unexpected size {actual} for '{command}' command, expected {expected}")]
    UnexpectedResponseSize {
        command: char,
        expected: String,
        actual: usize,
    },

    #[error("status: invalid status flag {0:#04x} received")]
    InvalidStatusFlag(u8),

    #[error("ack: no response ack received (got {0:?})")]
    NoAck(Option<u8>),

    #[error("command: payload of {0} bytes does not fit the length field")]
    PayloadTooLarge(usize),

    #[error("invalid structure length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("status: command '{command}' not supported by LEIA firmware")]
    Unsupported { command: char },

    #[error("status: unknown device error (E)")]
    DeviceError,

    #[error("status: error status {0:#04x}")]
    ErrorStatus(u8),

    #[error("card not inserted, insert a card to configure it")]
    CardNotInserted,

    #[error("configure_smartcard failed with the requested parameters: {source}")]
    Configure {
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DeviceNotFound { .. }
            | Error::AmbiguousDevice { .. }
            | Error::PortOpen(_)
            | Error::NotConnected
            | Error::SessionPoisoned
            | Error::Io(_) => ErrorKind::Connection,
            #[cfg(feature = "serial")]
            Error::Serial(_) => ErrorKind::Connection,
            Error::Handshake(_) => ErrorKind::Handshake,
            Error::ShortRead { .. }
            | Error::ShortWrite { .. }
            | Error::UnexpectedResponseSize { .. }
            | Error::InvalidStatusFlag(_)
            | Error::NoAck(_)
            | Error::PayloadTooLarge(_)
            | Error::InvalidLength { .. } => ErrorKind::Framing,
            Error::Unsupported { .. } | Error::DeviceError | Error::ErrorStatus(_) => {
                ErrorKind::Device
            }
            Error::CardNotInserted => ErrorKind::Precondition,
            Error::Configure { source } => source.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
