// libleia/src/protocol/exchange.rs
//! Command/response exchange with the reader.
//!
//! One exchange runs `probe -> command frame -> status (w*) -> ack` and,
//! for commands that answer with data, `response size -> payload`. The
//! caller owns the channel for the whole sequence; nothing here retries
//! or resynchronises after a failure, so a channel that produced an error
//! should be considered out of sync.

use std::thread;
use std::time::Duration;

use log::{debug, trace};

use crate::constants::{ACK_FLAG, PROBE_BYTE, READY_FLAG, RESPONSE_LEN_SIZE};
use crate::protocol::commands::Packable;
use crate::protocol::frame::{CommandFrame, ResponseFrame};
use crate::protocol::status::StatusFlag;
use crate::transport::Channel;
use crate::types::CommandId;
use crate::utils::{HexBytes, bytes_to_hex_spaced};
use crate::{Error, Result, Stage};

pub struct Exchange<'a> {
    channel: &'a mut dyn Channel,
    probe_delay: Duration,
}

impl<'a> Exchange<'a> {
    pub fn new(channel: &'a mut dyn Channel, probe_delay: Duration) -> Self {
        Self {
            channel,
            probe_delay,
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.channel.is_open() {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }

    /// Read whatever is buffered on the channel without blocking.
    pub fn drain(&mut self) -> Result<Vec<u8>> {
        self.ensure_open()?;
        let available = self.channel.bytes_available()?;
        if available == 0 {
            return Ok(Vec::new());
        }
        let bytes = self.channel.read(available)?;
        trace!("drained {} bytes: {}", bytes.len(), HexBytes(&bytes));
        Ok(bytes)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.ensure_open()?;
        trace!("-> {}", HexBytes(data));
        let written = self.channel.write(data)?;
        if written != data.len() {
            return Err(Error::ShortWrite {
                expected: data.len(),
                actual: written,
            });
        }
        Ok(())
    }

    fn read_exact(&mut self, len: usize, stage: Stage) -> Result<Vec<u8>> {
        self.ensure_open()?;
        let bytes = self.channel.read(len)?;
        trace!("<- [{}] {}", stage, HexBytes(&bytes));
        if bytes.len() != len {
            return Err(Error::ShortRead {
                stage,
                expected: len,
                actual: bytes.len(),
            });
        }
        Ok(bytes)
    }

    fn read_byte(&mut self, stage: Stage) -> Result<u8> {
        let bytes = self.read_exact(1, stage)?;
        Ok(bytes[0])
    }

    /// Liveness probe: the reader answers a space with its ready flag `W`
    /// when it is idle and in sync.
    pub fn probe(&mut self) -> Result<()> {
        self.drain()?;
        self.write_all(&[PROBE_BYTE])?;
        if !self.probe_delay.is_zero() {
            thread::sleep(self.probe_delay);
        }

        self.ensure_open()?;
        let mut answer = self.channel.read(1)?;
        answer.extend(self.drain()?);

        match answer.last() {
            None => Err(Error::Handshake(
                "no answer to the liveness probe".to_string(),
            )),
            Some(&READY_FLAG) => Ok(()),
            Some(&other) => Err(Error::Handshake(format!(
                "cannot connect to LEIA, expected ready flag 'W' but got {:#04x} ({})",
                other,
                bytes_to_hex_spaced(&answer)
            ))),
        }
    }

    /// Send a command and wait until the reader has acknowledged it.
    pub fn send_command(&mut self, id: CommandId, payload: Option<&dyn Packable>) -> Result<()> {
        self.probe()?;

        let packed = payload.map(|p| p.pack()).unwrap_or_default();
        debug!("sending '{}' command with {} byte payload", id, packed.len());
        let frame = CommandFrame::encode(id, &packed)?;
        self.write_all(&frame)?;

        self.check_status(id)?;
        self.check_ack()
    }

    /// Wait for the status flag, consuming wait extensions.
    ///
    /// The number of `w` flags is not bounded: a reader that keeps
    /// extending blocks the caller for as long as it does so.
    pub fn check_status(&mut self, id: CommandId) -> Result<()> {
        let mut extensions = 0usize;
        loop {
            match StatusFlag::from(self.read_byte(Stage::Status)?) {
                StatusFlag::WaitExtension => {
                    extensions += 1;
                    trace!("wait extension #{} for '{}'", extensions, id);
                }
                StatusFlag::Success => break,
                StatusFlag::Unsupported => {
                    return Err(Error::Unsupported {
                        command: id.as_char(),
                    });
                }
                StatusFlag::Error => return Err(Error::DeviceError),
                StatusFlag::Invalid(flag) => return Err(Error::InvalidStatusFlag(flag)),
            }
        }

        match self.read_byte(Stage::Status)? {
            0x00 => Ok(()),
            detail => Err(Error::ErrorStatus(detail)),
        }
    }

    pub fn check_ack(&mut self) -> Result<()> {
        self.ensure_open()?;
        let ack = self.channel.read(1)?;
        trace!("<- [{}] {}", Stage::Ack, HexBytes(&ack));
        match ack.first() {
            Some(&ACK_FLAG) => Ok(()),
            other => Err(Error::NoAck(other.copied())),
        }
    }

    pub fn read_response_size(&mut self) -> Result<usize> {
        let header = self.read_exact(RESPONSE_LEN_SIZE, Stage::ResponseSize)?;
        let size = ResponseFrame::decode_size(&header)? as usize;
        debug!("response size {}", size);
        Ok(size)
    }

    pub fn read_payload(&mut self, len: usize) -> Result<Vec<u8>> {
        self.read_exact(len, Stage::Payload)
    }
}
