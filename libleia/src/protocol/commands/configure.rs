// libleia/src/protocol/commands/configure.rs

use crate::constants::CONFIGURE_SIZE;
use crate::protocol::commands::Packable;
use crate::types::Protocol;

/// Reader configuration (`c` command payload).
///
/// Layout: protocol(1) etu(4, LE) freq(4, LE) negotiate_pts(1) negotiate_baudrate(1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigureCommand {
    pub protocol: Protocol,
    /// 0 lets the reader negotiate the ETU
    pub etu: u32,
    /// 0 lets the reader negotiate the clock frequency
    pub freq: u32,
    pub negotiate_pts: bool,
    pub negotiate_baudrate: bool,
}

impl ConfigureCommand {
    pub fn new(
        protocol: Protocol,
        etu: u32,
        freq: u32,
        negotiate_pts: bool,
        negotiate_baudrate: bool,
    ) -> Self {
        Self {
            protocol,
            etu,
            freq,
            negotiate_pts,
            negotiate_baudrate,
        }
    }
}

impl Packable for ConfigureCommand {
    fn pack(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(CONFIGURE_SIZE);
        out.push(self.protocol as u8);
        out.extend_from_slice(&self.etu.to_le_bytes());
        out.extend_from_slice(&self.freq.to_le_bytes());
        out.push(self.negotiate_pts as u8);
        out.push(self.negotiate_baudrate as u8);
        out
    }
}
