//! Reader session configuration

use std::time::Duration;

use crate::constants::{LEIA_BAUD_RATE, LEIA_USB_PID, LEIA_USB_VID};
use crate::transport::ChannelSettings;
use crate::utils::{default_probe_delay, default_read_timeout, default_write_timeout};

/// Settings used to find, open and talk to the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderConfig {
    pub vendor_id: u16,
    pub product_id: u16,
    pub baud_rate: u32,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    /// Wait between the liveness probe and reading its answer
    pub probe_delay: Duration,
}

impl ReaderConfig {
    pub fn channel_settings(&self) -> ChannelSettings {
        ChannelSettings {
            baud_rate: self.baud_rate,
            read_timeout: self.read_timeout,
            write_timeout: self.write_timeout,
        }
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            vendor_id: LEIA_USB_VID,
            product_id: LEIA_USB_PID,
            baud_rate: LEIA_BAUD_RATE,
            read_timeout: default_read_timeout(),
            write_timeout: default_write_timeout(),
            probe_delay: default_probe_delay(),
        }
    }
}
