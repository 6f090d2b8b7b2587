// libleia/src/protocol/commands/apdu.rs

use crate::constants::{APDU_HEADER_SIZE, MAX_APDU_PAYLOAD_SIZE};
use crate::protocol::commands::Packable;
use crate::protocol::parser;
use crate::Result;

/// Command APDU as forwarded to the reader (`a` command payload).
///
/// Layout: cla(1) ins(1) p1(1) p2(1) lc(2, LE) le(4, LE) send_le(1) data(lc)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApduCommand {
    pub cla: u8,
    pub ins: u8,
    pub p1: u8,
    pub p2: u8,
    pub lc: u16,
    pub le: u32,
    pub send_le: u8,
    pub data: Vec<u8>,
}

impl ApduCommand {
    /// Build a command APDU. Data longer than 16384 bytes is truncated.
    pub fn new(cla: u8, ins: u8, p1: u8, p2: u8, data: &[u8]) -> Self {
        let data = data[..data.len().min(MAX_APDU_PAYLOAD_SIZE)].to_vec();
        Self {
            cla,
            ins,
            p1,
            p2,
            lc: data.len() as u16,
            le: 0,
            send_le: 0,
            data,
        }
    }

    /// Parse a packed command APDU. The data field must be exactly `lc` bytes.
    pub fn unpack(bytes: &[u8]) -> Result<Self> {
        parser::ensure_len(bytes, APDU_HEADER_SIZE)?;
        let lc = parser::le_u16_at(bytes, 4)?;
        parser::ensure_exact_len(bytes, APDU_HEADER_SIZE + lc as usize)?;
        Ok(Self {
            cla: bytes[0],
            ins: bytes[1],
            p1: bytes[2],
            p2: bytes[3],
            lc,
            le: parser::le_u32_at(bytes, 6)?,
            send_le: parser::byte_at(bytes, 10)?,
            data: bytes[APDU_HEADER_SIZE..].to_vec(),
        })
    }
}

impl Packable for ApduCommand {
    fn pack(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(APDU_HEADER_SIZE + self.data.len());
        out.extend_from_slice(&[self.cla, self.ins, self.p1, self.p2]);
        out.extend_from_slice(&self.lc.to_le_bytes());
        out.extend_from_slice(&self.le.to_le_bytes());
        out.push(self.send_le);
        out.extend_from_slice(&self.data);
        out
    }
}
