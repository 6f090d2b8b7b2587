// libleia/src/protocol/frame.rs

use crate::constants::{COMMAND_LEN_SIZE, RESPONSE_LEN_SIZE};
use crate::protocol::parser;
use crate::types::CommandId;
use crate::{Error, Result};

/// Host -> reader command frame.
/// Format: [Id(1)] [Len(4, LE)] [Payload(Len)]
/// A command without payload carries a zero length and nothing after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    pub id: u8,
    pub payload: Vec<u8>,
}

impl CommandFrame {
    /// Encode a command identifier and payload into a wire frame.
    pub fn encode(id: CommandId, payload: &[u8]) -> Result<Vec<u8>> {
        let len = u32::try_from(payload.len()).map_err(|_| Error::PayloadTooLarge(payload.len()))?;
        let mut out = Vec::with_capacity(1 + COMMAND_LEN_SIZE + payload.len());
        out.push(id.as_byte());
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(payload);
        Ok(out)
    }

    /// Decode a full command frame. Used by test doubles that play the
    /// reader's side of the link.
    pub fn decode(frame: &[u8]) -> Result<Self> {
        parser::ensure_len(frame, 1 + COMMAND_LEN_SIZE)?;
        let len = parser::le_u32_at(frame, 1)? as usize;
        parser::ensure_exact_len(frame, 1 + COMMAND_LEN_SIZE + len)?;
        Ok(Self {
            id: frame[0],
            payload: frame[1 + COMMAND_LEN_SIZE..].to_vec(),
        })
    }

    pub fn command_id(&self) -> Option<CommandId> {
        CommandId::from_byte(self.id)
    }
}

/// Reader -> host response frame.
/// Format: [Len(4, LE)] [Payload(Len)]
pub struct ResponseFrame;

impl ResponseFrame {
    /// Decode the length prefix of a response.
    pub fn decode_size(header: &[u8]) -> Result<u32> {
        parser::ensure_exact_len(header, RESPONSE_LEN_SIZE)?;
        parser::le_u32_at(header, 0)
    }

    /// Encode a response payload with its length prefix.
    pub fn encode(payload: &[u8]) -> Result<Vec<u8>> {
        let len = u32::try_from(payload.len()).map_err(|_| Error::PayloadTooLarge(payload.len()))?;
        let mut out = Vec::with_capacity(RESPONSE_LEN_SIZE + payload.len());
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(payload);
        Ok(out)
    }
}
