// libleia/src/transport/traits.rs

use std::time::Duration;

use crate::Result;
use crate::constants::{LEIA_BAUD_RATE, READ_TIMEOUT_MS, WRITE_TIMEOUT_MS};

/// Channel abstracts the serial byte stream away from protocol logic.
pub trait Channel: Send {
    /// Read up to `len` bytes, blocking up to the read timeout. A result
    /// shorter than `len` means the timeout expired.
    fn read(&mut self, len: usize) -> Result<Vec<u8>>;

    /// Write raw bytes and return how many were accepted
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Number of bytes that can be read without blocking
    fn bytes_available(&mut self) -> Result<usize>;

    fn is_open(&self) -> bool {
        true
    }

    /// Release the underlying port. Default is a no-op for channels that
    /// close on drop.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    /// Human readable port name used in log messages
    fn name(&self) -> String {
        String::from("channel")
    }
}

/// A serial endpoint found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    pub name: String,
    pub vendor_id: Option<u16>,
    pub product_id: Option<u16>,
}

impl PortInfo {
    pub fn new(name: impl Into<String>, vendor_id: Option<u16>, product_id: Option<u16>) -> Self {
        Self {
            name: name.into(),
            vendor_id,
            product_id,
        }
    }

    /// Shorthand for a USB port with known ids.
    pub fn usb(name: impl Into<String>, vendor_id: u16, product_id: u16) -> Self {
        Self::new(name, Some(vendor_id), Some(product_id))
    }

    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == Some(vendor_id) && self.product_id == Some(product_id)
    }
}

/// Line settings applied when a port is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSettings {
    pub baud_rate: u32,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            baud_rate: LEIA_BAUD_RATE,
            read_timeout: Duration::from_millis(READ_TIMEOUT_MS),
            write_timeout: Duration::from_millis(WRITE_TIMEOUT_MS),
        }
    }
}

/// Enumerates serial endpoints and opens them as [`Channel`]s.
pub trait PortDiscovery {
    fn list_ports(&self) -> Result<Vec<PortInfo>>;

    fn open(&self, port: &PortInfo, settings: &ChannelSettings) -> Result<Box<dyn Channel>>;
}
