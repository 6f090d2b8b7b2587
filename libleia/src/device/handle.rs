// libleia/src/device/handle.rs

use std::sync::{Mutex, MutexGuard};

use log::{debug, info, warn};

use crate::constants::MAX_MATCHING_PORTS;
use crate::device::config::ReaderConfig;
use crate::protocol::commands::{ApduCommand, ConfigureCommand, TriggerStrategyCommand};
use crate::protocol::responses::{ApduResponse, AtrInfo, Unpackable};
use crate::protocol::Exchange;
use crate::transport::{Channel, PortDiscovery, PortInfo};
use crate::types::{CommandId, Protocol};
use crate::{Error, Result};

type Session = Option<Box<dyn Channel>>;

/// Session with a LEIA reader.
///
/// Every operation holds the session lock for its whole exchange, so a
/// `Reader` can be shared between threads (e.g. behind an `Arc`) without
/// two commands interleaving on the wire. After any error other than
/// [`Error::CardNotInserted`] the channel should be assumed out of sync;
/// close and re-open the reader.
pub struct Reader {
    config: ReaderConfig,
    channel: Mutex<Session>,
}

impl Reader {
    /// Create a reader that is not connected yet.
    pub fn new(config: ReaderConfig) -> Self {
        Self {
            config,
            channel: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    fn session(&self) -> Result<MutexGuard<'_, Session>> {
        self.channel.lock().map_err(|_| Error::SessionPoisoned)
    }

    /// Find the reader among the ports reported by `discovery`, open it
    /// and run the ready handshake.
    ///
    /// Some hosts expose the reader as two ports sharing the same ids, of
    /// which only one can be opened; the first port that opens is used.
    ///
    /// A channel the reader already holds is closed first, since serial
    /// ports are opened exclusively.
    pub fn open(&self, discovery: &dyn PortDiscovery) -> Result<()> {
        let previous = self.session()?.take();
        if let Some(old) = previous {
            info!("closing serial port {} before re-opening", old.name());
            release(old);
        }

        let (vendor_id, product_id) = (self.config.vendor_id, self.config.product_id);
        let ports = discovery.list_ports()?;
        let matching: Vec<&PortInfo> = ports
            .iter()
            .filter(|p| p.matches(vendor_id, product_id))
            .collect();

        if matching.is_empty() {
            return Err(Error::DeviceNotFound {
                vendor_id,
                product_id,
            });
        }
        if matching.len() > MAX_MATCHING_PORTS {
            return Err(Error::AmbiguousDevice {
                count: matching.len(),
            });
        }

        let settings = self.config.channel_settings();
        let mut failures = Vec::new();
        for port in matching {
            match discovery.open(port, &settings) {
                Ok(channel) => {
                    info!(
                        "serial port {} ({:#06x}/{:#06x}) is open",
                        port.name, vendor_id, product_id
                    );
                    return self.attach(channel);
                }
                Err(e) => {
                    warn!("cannot open {}: {}", port.name, e);
                    failures.push(format!("{}: {}", port.name, e));
                }
            }
        }

        Err(Error::PortOpen(failures.join("; ")))
    }

    /// Take ownership of an open channel: discard stale input and run the
    /// ready handshake. A channel failing the handshake is closed.
    pub fn attach(&self, mut channel: Box<dyn Channel>) -> Result<()> {
        let mut session = self.session()?;
        if let Some(old) = session.take() {
            release(old);
        }

        let handshake = {
            let mut ex = Exchange::new(&mut *channel, self.config.probe_delay);
            ex.drain().and_then(|_| ex.probe())
        };
        if let Err(e) = handshake {
            warn!("handshake with {} failed: {}", channel.name(), e);
            release(channel);
            return Err(e);
        }

        *session = Some(channel);
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        match self.channel.lock() {
            Ok(session) => session.as_ref().is_some_and(|c| c.is_open()),
            Err(_) => false,
        }
    }

    fn with_exchange<T>(&self, op: impl FnOnce(&mut Exchange<'_>) -> Result<T>) -> Result<T> {
        let mut session = self.session()?;
        let channel = session.as_mut().ok_or(Error::NotConnected)?;
        let mut ex = Exchange::new(&mut **channel, self.config.probe_delay);
        op(&mut ex)
    }

    /// Test whether a card is inserted in the reader (`?`).
    pub fn is_card_inserted(&self) -> Result<bool> {
        self.with_exchange(|ex| {
            ex.send_command(CommandId::IsCardInserted, None)?;
            let size = ex.read_response_size()?;
            if size != 1 {
                return Err(unexpected_size(CommandId::IsCardInserted, "1", size));
            }
            let payload = ex.read_payload(size)?;
            Ok(payload[0] == 1)
        })
    }

    /// Configure the reader for the inserted card (`c`).
    ///
    /// `protocol` defaults to T=1; `etu` and `freq` set to 0 let the
    /// reader negotiate them.
    pub fn configure(
        &self,
        protocol: Option<Protocol>,
        etu: u32,
        freq: u32,
        negotiate_pts: bool,
        negotiate_baudrate: bool,
    ) -> Result<()> {
        // Checked before taking the lock: is_card_inserted locks on its own.
        if !self.is_card_inserted()? {
            return Err(Error::CardNotInserted);
        }

        let cmd = ConfigureCommand::new(
            protocol.unwrap_or_default(),
            etu,
            freq,
            negotiate_pts,
            negotiate_baudrate,
        );
        debug!("configuring reader: {:?}", cmd);
        self.with_exchange(|ex| ex.send_command(CommandId::ConfigureSmartcard, Some(&cmd)))
            .map_err(|e| Error::Configure {
                source: Box::new(e),
            })
    }

    /// Read the ATR of the inserted card (`t`).
    pub fn get_atr(&self) -> Result<AtrInfo> {
        self.with_exchange(|ex| {
            ex.send_command(CommandId::GetAtr, None)?;
            let size = ex.read_response_size()?;
            if size != AtrInfo::MIN_SIZE {
                return Err(unexpected_size(CommandId::GetAtr, "55", size));
            }
            let payload = ex.read_payload(size)?;
            AtrInfo::unpack(&payload)
        })
    }

    /// Disable all trigger points (`O`).
    pub fn reset_trigger_strategy(&self) -> Result<()> {
        self.set_trigger_strategy(&TriggerStrategyCommand::reset())
    }

    /// Raise the trigger right before each APDU is sent (`O`).
    pub fn set_pre_send_apdu_trigger_strategy(&self) -> Result<()> {
        self.set_trigger_strategy(&TriggerStrategyCommand::pre_send_apdu())
    }

    fn set_trigger_strategy(&self, strategy: &TriggerStrategyCommand) -> Result<()> {
        self.with_exchange(|ex| ex.send_command(CommandId::SetTriggerStrategy, Some(strategy)))
    }

    /// Send an APDU to the card and return its response data followed by
    /// SW1 SW2. Data longer than 16384 bytes is truncated.
    pub fn send_apdu(&self, cla: u8, ins: u8, p1: u8, p2: u8, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.send_apdu_raw(cla, ins, p1, p2, data)?.to_bytes())
    }

    /// Like [`send_apdu`](Self::send_apdu) but returns the full response
    /// including the reader's timing measurements.
    pub fn send_apdu_raw(
        &self,
        cla: u8,
        ins: u8,
        p1: u8,
        p2: u8,
        data: &[u8],
    ) -> Result<ApduResponse> {
        let apdu = ApduCommand::new(cla, ins, p1, p2, data);
        self.with_exchange(|ex| {
            ex.send_command(CommandId::SendApdu, Some(&apdu))?;
            let size = ex.read_response_size()?;
            if size < ApduResponse::MIN_SIZE {
                return Err(unexpected_size(CommandId::SendApdu, ">= 14", size));
            }
            let payload = ex.read_payload(size)?;
            ApduResponse::unpack(&payload)
        })
    }

    /// Release the channel. Closing a reader that is not open does nothing.
    pub fn close(&self) {
        let mut session = self.channel.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(channel) = session.take() {
            info!("closing serial port {}", channel.name());
            release(channel);
        }
    }
}

impl Drop for Reader {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Reader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("config", &self.config)
            .field("open", &self.is_open())
            .finish()
    }
}

fn release(mut channel: Box<dyn Channel>) {
    if channel.is_open() {
        if let Err(e) = channel.close() {
            warn!("error closing {}: {}", channel.name(), e);
        }
    }
}

fn unexpected_size(command: CommandId, expected: &str, actual: usize) -> Error {
    Error::UnexpectedResponseSize {
        command: command.as_char(),
        expected: expected.to_string(),
        actual,
    }
}
