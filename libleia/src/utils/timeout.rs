//! Timeout helpers used across the crate.
//!
//! The reader's timing defaults live in `constants` as milliseconds; these
//! helpers turn them into `Duration`s.

use std::time::Duration;

use crate::constants::{PROBE_DELAY_MS, READ_TIMEOUT_MS, WRITE_TIMEOUT_MS};

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

pub fn default_read_timeout() -> Duration {
    ms(READ_TIMEOUT_MS)
}

pub fn default_write_timeout() -> Duration {
    ms(WRITE_TIMEOUT_MS)
}

/// Time the reader is given to answer the liveness probe.
pub fn default_probe_delay() -> Duration {
    ms(PROBE_DELAY_MS)
}
