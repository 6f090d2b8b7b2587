// libleia/src/protocol/responses/apdu.rs

use crate::constants::RESP_HEADER_SIZE;
use crate::protocol::parser;
use crate::protocol::responses::Unpackable;
use crate::Result;

/// Response APDU as reported by the reader (`a` command response).
///
/// Layout: le(4, LE) sw1(1) sw2(1) delta_t(4, LE) delta_t_answer(4, LE) data(..)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApduResponse {
    pub le: u32,
    pub sw1: u8,
    pub sw2: u8,
    /// Time spent sending the command, as measured by the reader
    pub delta_t: u32,
    /// Time spent waiting for the card's answer
    pub delta_t_answer: u32,
    pub data: Vec<u8>,
}

impl ApduResponse {
    /// Response data followed by SW1 SW2.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() + 2);
        out.extend_from_slice(&self.data);
        out.push(self.sw1);
        out.push(self.sw2);
        out
    }

    pub fn sw(&self) -> u16 {
        u16::from_be_bytes([self.sw1, self.sw2])
    }

    pub fn is_success(&self) -> bool {
        self.sw() == 0x9000
    }

    pub fn pack(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(RESP_HEADER_SIZE + self.data.len());
        out.extend_from_slice(&self.le.to_le_bytes());
        out.push(self.sw1);
        out.push(self.sw2);
        out.extend_from_slice(&self.delta_t.to_le_bytes());
        out.extend_from_slice(&self.delta_t_answer.to_le_bytes());
        out.extend_from_slice(&self.data);
        out
    }
}

impl Unpackable for ApduResponse {
    const MIN_SIZE: usize = RESP_HEADER_SIZE;

    fn unpack(data: &[u8]) -> Result<Self> {
        parser::ensure_len(data, RESP_HEADER_SIZE)?;
        Ok(Self {
            le: parser::le_u32_at(data, 0)?,
            sw1: data[4],
            sw2: data[5],
            delta_t: parser::le_u32_at(data, 6)?,
            delta_t_answer: parser::le_u32_at(data, 10)?,
            data: data[RESP_HEADER_SIZE..].to_vec(),
        })
    }
}
