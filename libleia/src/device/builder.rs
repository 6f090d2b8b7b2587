// libleia/src/device/builder.rs

use std::time::Duration;

use crate::device::config::ReaderConfig;
use crate::device::handle::Reader;
use crate::transport::{Channel, PortDiscovery};
use crate::Result;

/// Helper to construct a Reader with optional configuration.
#[derive(Debug, Default)]
pub struct ReaderBuilder {
    config: ReaderConfig,
}

impl ReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look for a device with other USB ids (e.g. a development board).
    pub fn usb_ids(mut self, vendor_id: u16, product_id: u16) -> Self {
        self.config.vendor_id = vendor_id;
        self.config.product_id = product_id;
        self
    }

    pub fn baud_rate(mut self, baud_rate: u32) -> Self {
        self.config.baud_rate = baud_rate;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = timeout;
        self
    }

    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.config.write_timeout = timeout;
        self
    }

    pub fn probe_delay(mut self, delay: Duration) -> Self {
        self.config.probe_delay = delay;
        self
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Return a Reader that is not connected yet.
    pub fn build(self) -> Reader {
        Reader::new(self.config)
    }

    /// Build the Reader and connect it through `discovery`.
    pub fn open(self, discovery: &dyn PortDiscovery) -> Result<Reader> {
        let reader = self.build();
        reader.open(discovery)?;
        Ok(reader)
    }

    /// Build the Reader over an already-open channel (e.g. MockChannel).
    pub fn attach(self, channel: Box<dyn Channel>) -> Result<Reader> {
        let reader = self.build();
        reader.attach(channel)?;
        Ok(reader)
    }
}
