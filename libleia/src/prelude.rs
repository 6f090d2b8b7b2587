// libleia/src/prelude.rs

pub use crate::device::{Reader, ReaderBuilder, ReaderConfig};
pub use crate::protocol::{ApduCommand, ApduResponse, AtrInfo, Packable, Unpackable};
pub use crate::transport::{Channel, ChannelSettings, PortDiscovery, PortInfo};
pub use crate::{CommandId, Error, ErrorKind, Protocol, Result, Stage};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, ms};
